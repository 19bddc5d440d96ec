// src/models/merchandise.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Merchandise {
    // A API às vezes omite o _id em respostas de criação
    #[serde(rename = "_id", default)]
    #[schema(example = "6650c2f0a1b2c3d4e5f60799")]
    pub id: String,
    #[schema(example = "Home Jersey 2025")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[schema(example = 3000)]
    pub price: Decimal,
    #[serde(default)]
    pub stock: i64,
    #[schema(example = "Jersey")]
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

// Corpo do POST /merchandise/create-new-merchandise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewMerchandise {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: i64,
    pub category: String,
    pub image_url: Option<String>,
}
