// src/console/badges.rs

use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BadgeVariant {
    Outline,
    Default,
    Secondary,
    Success,
    Warning,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Badge {
    pub label: String,
    pub variant: BadgeVariant,
}

impl Badge {
    pub fn new(label: impl Into<String>, variant: BadgeVariant) -> Self {
        Self { label: label.into(), variant }
    }
}

/// Tier do sócio. Cobre os dois vocabulários que a API usa;
/// valores desconhecidos caem no badge neutro.
pub fn tier_variant(tier: &str) -> BadgeVariant {
    match tier.to_lowercase().as_str() {
        "standard" | "bronze" => BadgeVariant::Outline,
        "premium" | "silver" => BadgeVariant::Default,
        "vip" | "platinum" => BadgeVariant::Secondary,
        "gold" => BadgeVariant::Warning,
        _ => BadgeVariant::Outline,
    }
}

/// Status do cartão físico (envio) ou do cartão em si (active/expired).
pub fn card_status_variant(status: &str) -> BadgeVariant {
    match status.to_lowercase().as_str() {
        "pending" => BadgeVariant::Outline,
        "processing" => BadgeVariant::Default,
        "shipped" => BadgeVariant::Secondary,
        "delivered" | "active" => BadgeVariant::Success,
        "expired" => BadgeVariant::Destructive,
        _ => BadgeVariant::Outline,
    }
}

/// Status exibido do pedido: só "Fulfilled" é positivo.
pub fn order_status_variant(display_status: &str) -> BadgeVariant {
    if display_status == "Fulfilled" {
        BadgeVariant::Success
    } else {
        BadgeVariant::Destructive
    }
}

pub fn payment_variant(label: &str) -> BadgeVariant {
    if label == "Success" {
        BadgeVariant::Success
    } else {
        BadgeVariant::Warning
    }
}
