// src/console/merchandise.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    common::display::format_ksh,
    console::table::{distinct, selected, ResourceTable, TablePage, TableRecord},
    models::merchandise::Merchandise,
};

impl TableRecord for Merchandise {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn set_record_id(&mut self, id: &str) {
        self.id = id.to_string();
    }

    fn search_fields(&self) -> Vec<String> {
        vec![self.name.clone(), self.description.clone()]
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MerchandiseFilters {
    pub search: Option<String>,
    pub category: Option<String>,
    pub page: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchandiseRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub price_label: String,
    pub stock: i64,
    pub category: String,
    pub image_url: Option<String>,
}

impl From<Merchandise> for MerchandiseRow {
    fn from(item: Merchandise) -> Self {
        Self {
            price_label: format_ksh(item.price),
            id: item.id,
            name: item.name,
            description: item.description,
            price: item.price,
            stock: item.stock,
            category: item.category,
            image_url: item.image_url,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchandiseView {
    // Opções do dropdown: categorias presentes nos dados
    pub categories: Vec<String>,
    pub table: TablePage<MerchandiseRow>,
}

pub fn merchandise_view(
    items: &[Merchandise],
    filters: &MerchandiseFilters,
    page_size: usize,
    empty_message: &str,
) -> MerchandiseView {
    let category = selected(filters.category.as_deref()).map(str::to_string);

    let table = ResourceTable::new(items, page_size)
        .search(filters.search.as_deref())
        .filter(move |item: &Merchandise| match &category {
            Some(wanted) => item.category == *wanted,
            None => true,
        })
        .page(filters.page.unwrap_or(1), empty_message)
        .map(MerchandiseRow::from);

    MerchandiseView {
        categories: distinct(items, |i| i.category.as_str()),
        table,
    }
}
