// src/common/display.rs

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

/// Mascara identificadores: mantém só os 4 últimos caracteres.
pub fn mask_except_last_four(value: Option<&str>) -> String {
    match value {
        None => "*".to_string(),
        Some(v) if v.chars().count() <= 4 => v.to_string(),
        Some(v) => {
            let chars: Vec<char> = v.chars().collect();
            let last_four: String = chars[chars.len() - 4..].iter().collect();
            format!("****{}", last_four)
        }
    }
}

/// "Ksh 1,500.00"
pub fn format_ksh(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("Ksh {}{}.{}", sign, group_thousands(int_part), frac_part)
}

/// "Ksh 12,500" (totais de pedido e receita, sem centavos quando inteiros)
pub fn format_ksh_whole(amount: Decimal) -> String {
    if amount.fract().is_zero() {
        let text = amount.trunc().abs().to_string();
        let sign = if amount.is_sign_negative() && !amount.is_zero() { "-" } else { "" };
        format!("Ksh {}{}", sign, group_thousands(&text))
    } else {
        format_ksh(amount)
    }
}

pub fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// "gold" -> "Gold"
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Aceita "2025-05-15" ou um datetime ISO ("2025-05-15T00:00:00.000Z").
pub fn parse_api_date(value: &str) -> Option<NaiveDate> {
    let head = value.get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

/// "May 15, 2025"
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Validade do cartão: "05/27"
pub fn format_month_year(date: NaiveDate) -> String {
    format!("{:02}/{:02}", date.month(), date.year() % 100)
}
