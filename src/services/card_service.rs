// src/services/card_service.rs

use std::sync::Arc;

use genpdf::{elements, style, Element};
use image::{imageops, DynamicImage, ImageOutputFormat, Luma, Rgba, RgbaImage};
use qrcode::QrCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    common::{
        display::{capitalize, format_ksh, format_month_year, mask_except_last_four, parse_api_date},
        error::AppError,
    },
    models::membership::Membership,
};

const CARD_WIDTH: u32 = 640;
const CARD_HEIGHT: u32 = 400;
const ACCENT_HEIGHT: u32 = 24;
const QR_MARGIN: u32 = 32;

/// Lado do cartão exportado: o cartão de sócio ou a carteira.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CardSide {
    #[default]
    Membership,
    Wallet,
}

impl CardSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardSide::Membership => "membership",
            CardSide::Wallet => "wallet",
        }
    }
}

/// "{nome}-{membership|wallet}-card.png"
pub fn card_file_name(member: &Membership, side: CardSide) -> String {
    format!("{}-{}-card.png", member.name, side.as_str())
}

fn tier_accent(tier: &str) -> [u8; 3] {
    match tier.to_lowercase().as_str() {
        "gold" => [212, 175, 55],
        "platinum" | "vip" => [229, 228, 226],
        "silver" | "premium" => [192, 192, 192],
        "bronze" | "standard" => [205, 127, 50],
        _ => [255, 255, 255],
    }
}

fn lerp(from: [u8; 3], to: [u8; 3], t: f32) -> [u8; 3] {
    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    [mix(from[0], to[0]), mix(from[1], to[1]), mix(from[2], to[2])]
}

// Degradê diagonal em três paradas
fn gradient(stops: [[u8; 3]; 3], x: u32, y: u32) -> Rgba<u8> {
    let t = (x + y) as f32 / (CARD_WIDTH + CARD_HEIGHT) as f32;
    let [r, g, b] = if t < 0.5 {
        lerp(stops[0], stops[1], t * 2.0)
    } else {
        lerp(stops[1], stops[2], (t - 0.5) * 2.0)
    };
    Rgba([r, g, b, 255])
}

fn background(side: CardSide, x: u32, y: u32) -> Rgba<u8> {
    match side {
        // âmbar → laranja → vermelho
        CardSide::Membership => gradient([[251, 191, 36], [249, 115, 22], [239, 68, 68]], x, y),
        // cinza escuro → preto → cinza
        CardSide::Wallet => gradient([[31, 41, 55], [0, 0, 0], [75, 85, 99]], x, y),
    }
}

#[derive(Clone)]
pub struct CardService {
    fonts_dir: Arc<str>,
}

impl CardService {
    pub fn new(fonts_dir: &str) -> Self {
        Self { fonts_dir: Arc::from(fonts_dir) }
    }

    fn qr_image(&self, member: &Membership) -> Result<DynamicImage, AppError> {
        let code = QrCode::new(member.qr_payload().as_bytes())
            .map_err(|e| AppError::Export(format!("QR code: {}", e)))?;
        let buffer = code
            .render::<Luma<u8>>()
            .min_dimensions(160, 160)
            .build();
        Ok(DynamicImage::ImageLuma8(buffer))
    }

    /// Cartão em PNG: fundo do lado escolhido, faixa na cor do tier e o QR.
    pub fn render_png(&self, member: &Membership, side: CardSide) -> Result<Vec<u8>, AppError> {
        let mut canvas = RgbaImage::new(CARD_WIDTH, CARD_HEIGHT);
        for (x, y, pixel) in canvas.enumerate_pixels_mut() {
            *pixel = background(side, x, y);
        }

        let [r, g, b] = tier_accent(member.card_tier());
        for y in 0..ACCENT_HEIGHT {
            for x in 0..CARD_WIDTH {
                canvas.put_pixel(x, y, Rgba([r, g, b, 255]));
            }
        }

        let qr = self.qr_image(member)?.to_rgba8();
        if qr.width() + QR_MARGIN > CARD_WIDTH || qr.height() + QR_MARGIN + ACCENT_HEIGHT > CARD_HEIGHT {
            return Err(AppError::Export("QR code larger than the card".to_string()));
        }
        let qr_x = CARD_WIDTH - qr.width() - QR_MARGIN;
        let qr_y = CARD_HEIGHT - qr.height() - QR_MARGIN;
        imageops::overlay(&mut canvas, &qr, qr_x, qr_y);

        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(canvas)
            .write_to(&mut bytes, ImageOutputFormat::Png)
            .map_err(|e| AppError::Export(e.to_string()))?;

        tracing::debug!(member = %member.id, side = side.as_str(), size = bytes.len(), "cartão PNG gerado");
        Ok(bytes)
    }

    /// Versão para impressão, com os dados do cartão por extenso.
    pub fn render_pdf(&self, member: &Membership, side: CardSide) -> Result<Vec<u8>, AppError> {
        let font_family = genpdf::fonts::from_files(self.fonts_dir.as_ref(), "Roboto", None)
            .map_err(|_| AppError::FontNotFound(format!("Fonte Roboto não encontrada em {}", self.fonts_dir)))?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(card_file_name(member, side).replace(".png", ""));
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        doc.push(elements::Paragraph::new("MURANGA SEAL").styled(style::Style::new().bold().with_font_size(18)));
        let subtitle = match side {
            CardSide::Membership => "Membership Card",
            CardSide::Wallet => "Wallet Card",
        };
        doc.push(elements::Paragraph::new(subtitle).styled(style::Style::new().with_font_size(12)));
        doc.push(elements::Break::new(1.5));

        let month_year = |raw: Option<&str>| {
            raw.and_then(parse_api_date)
                .map(format_month_year)
                .unwrap_or_else(|| "N/A".to_string())
        };

        let mut rows: Vec<(&str, String)> = vec![
            ("Name", member.name.clone()),
            ("Tier", capitalize(member.card_tier())),
            ("Card number", mask_except_last_four(member.card_number.as_deref())),
            ("Member since", month_year(member.join_date.as_deref())),
            ("Valid thru", month_year(member.exp_date.as_deref())),
        ];
        match side {
            CardSide::Membership if member.needs_physical_card => {
                rows.push(("Card status", capitalize(&member.card_status)));
            }
            CardSide::Wallet => {
                let balance = member.balance.map(format_ksh).unwrap_or_else(|| "N/A".to_string());
                rows.push(("Balance", balance));
            }
            _ => {}
        }

        let mut table = elements::TableLayout::new(vec![1, 2]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));
        let style_bold = style::Style::new().bold();
        for (label, value) in rows {
            table
                .row()
                .element(elements::Paragraph::new(label).styled(style_bold))
                .element(elements::Paragraph::new(value))
                .push()
                .map_err(|e| AppError::Export(e.to_string()))?;
        }
        doc.push(table);
        doc.push(elements::Break::new(2));

        let pdf_qr = elements::Image::from_dynamic_image(self.qr_image(member)?)
            .map_err(|e| AppError::Export(e.to_string()))?
            .with_scale(genpdf::Scale::new(0.5, 0.5));
        doc.push(pdf_qr);

        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::Export(e.to_string()))?;

        tracing::debug!(member = %member.id, side = side.as_str(), "cartão PDF gerado");
        Ok(buffer)
    }
}
