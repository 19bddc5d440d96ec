// src/models/membership.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Os campos de tier/cartão chegam em dois vocabulários diferentes
// (standard/premium/vip e bronze/silver/gold/platinum), por isso ficam como String.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    #[serde(alias = "_id")]
    #[schema(example = "65f1a2b3c4d5e6f708192a3b")]
    pub id: String,
    #[schema(example = "Jane Wanjiku")]
    pub name: String,
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[serde(default)]
    pub join_date: Option<String>,
    #[serde(rename = "type", default)]
    #[schema(example = "standard")]
    pub tier: String,
    #[serde(default)]
    pub needs_physical_card: bool,
    #[serde(default)]
    #[schema(example = "pending")]
    pub card_status: String,
    #[serde(default)]
    pub lock_requested: bool,
    #[serde(default)]
    pub exp_date: Option<String>,
    #[serde(default)]
    pub balance: Option<Decimal>,
    #[serde(default)]
    pub qrcode: Option<String>,
    #[serde(default)]
    pub card_number: Option<String>,
    #[serde(default)]
    #[schema(example = "gold")]
    pub membership_tier: Option<String>,
    // Token da carteira, em base64 (gravado na tag NFC)
    #[serde(default)]
    pub ecrypt_wallet_id: Option<String>,
}

impl Membership {
    /// Conteúdo do QR: o `qrcode` do sócio, ou o id quando ele não existe.
    pub fn qr_payload(&self) -> &str {
        self.qrcode
            .as_deref()
            .filter(|q| !q.trim().is_empty())
            .unwrap_or(&self.id)
    }

    /// Tier usado no cartão: `membershipTier` quando presente, senão `type`.
    pub fn card_tier(&self) -> &str {
        self.membership_tier
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(&self.tier)
    }
}

// Corpo do POST /membership/create-membership
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewMembership {
    pub name: String,
    pub email: String,
    pub join_date: String,
    #[serde(rename = "type")]
    pub tier: String,
    pub needs_physical_card: bool,
    pub card_status: String,
    pub lock_requested: bool,
}
