// src/models/order.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Status que a API usa para "ainda não atendido"
pub const PROCESSING_STATUS: &str = "Processing";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: String,
    pub quantity: i64,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    #[schema(example = "ORD-20250515-0042")]
    pub order_id: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub user_info: CustomerInfo,
    #[serde(default)]
    pub items: Vec<OrderLine>,
    pub total_amount: Decimal,
    #[schema(example = "Processing")]
    pub status: String,
    #[schema(example = "Completed")]
    #[serde(default)]
    pub payment_status: String,
    #[serde(default)]
    pub shipping_address: ShippingAddress,
}

impl Order {
    pub fn customer_name(&self) -> String {
        format!("{} {}", self.user_info.first_name, self.user_info.last_name)
            .trim()
            .to_string()
    }

    /// Status exibido: "Processing" vira "Unfulfilled", o resto passa como está.
    pub fn display_status(&self) -> &str {
        if self.status == PROCESSING_STATUS {
            "Unfulfilled"
        } else {
            &self.status
        }
    }

    pub fn is_unfulfilled(&self) -> bool {
        self.display_status() == "Unfulfilled"
    }

    /// Pagamento exibido: só "Completed" conta como sucesso.
    pub fn payment_label(&self) -> &'static str {
        if self.payment_status == "Completed" {
            "Success"
        } else {
            "Pending"
        }
    }

    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|line| line.quantity).sum()
    }

    /// "Rua X, Nairobi, Kenya" (rua ausente vira "N/A")
    pub fn delivery_line(&self) -> String {
        let street = self
            .shipping_address
            .street
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or("N/A");
        format!(
            "{}, {}, {}",
            street, self.shipping_address.city, self.shipping_address.country
        )
    }
}
