// src/console/staff.rs

use serde::{Deserialize, Serialize};

use crate::{
    common::display::{format_short_date, parse_api_date},
    console::table::{ResourceTable, TablePage, TableRecord},
    models::staff::Staff,
};

impl TableRecord for Staff {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn set_record_id(&mut self, id: &str) {
        self.id = id.to_string();
    }

    fn search_fields(&self) -> Vec<String> {
        vec![self.full_name(), self.email.clone(), self.phone_number.clone()]
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StaffFilters {
    pub search: Option<String>,
    pub page: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub joined_label: String,
}

impl From<Staff> for StaffRow {
    fn from(staff: Staff) -> Self {
        Self {
            name: staff.full_name(),
            joined_label: staff
                .created_at
                .as_deref()
                .and_then(parse_api_date)
                .map(format_short_date)
                .unwrap_or_else(|| "N/A".to_string()),
            id: staff.id,
            email: staff.email,
            phone_number: staff.phone_number,
        }
    }
}

pub fn staff_view(
    staff: &[Staff],
    filters: &StaffFilters,
    page_size: usize,
    empty_message: &str,
) -> TablePage<StaffRow> {
    ResourceTable::new(staff, page_size)
        .search(filters.search.as_deref())
        .page(filters.page.unwrap_or(1), empty_message)
        .map(StaffRow::from)
}
