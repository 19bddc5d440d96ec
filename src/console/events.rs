// src/console/events.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    common::display::{format_ksh, format_ksh_whole, format_short_date},
    console::table::{selected, ResourceTable, TablePage, TableRecord},
    models::event::{Event, EventStatus},
};

impl TableRecord for Event {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn set_record_id(&mut self, id: &str) {
        self.id = id.to_string();
    }

    fn search_fields(&self) -> Vec<String> {
        vec![self.display_name(), self.venue.clone()]
    }
}

// Query string da listagem
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventFilters {
    pub search: Option<String>,
    pub status: Option<String>,
    pub page: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRow {
    pub id: String,
    pub name: String,
    pub date: String,
    pub date_label: String,
    pub time: String,
    pub venue: String,
    pub ticket_price: Decimal,
    pub ticket_price_label: String,
    pub available_tickets: i64,
    pub total_tickets: i64,
    pub status: EventStatus,
    pub home_logo_url: Option<String>,
    pub opponent_logo_url: Option<String>,
}

impl EventRow {
    pub fn from_event(event: &Event, today: NaiveDate) -> Self {
        Self {
            id: event.id.clone(),
            name: event.display_name(),
            date: event.date.clone(),
            date_label: event
                .event_date()
                .map(format_short_date)
                .unwrap_or_else(|| event.date.clone()),
            time: event.time.clone(),
            venue: event.venue.clone(),
            ticket_price: event.ticket_price,
            ticket_price_label: format_ksh(event.ticket_price),
            available_tickets: event.available_tickets,
            total_tickets: event.total_tickets,
            status: event.status_on(today),
            home_logo_url: event.home_logo_url.clone(),
            opponent_logo_url: event.opponent_logo_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventStats {
    pub total_events: usize,
    pub total_tickets: i64,
    pub total_revenue: Decimal,
    pub total_revenue_label: String,
}

impl EventStats {
    pub fn from_events(events: &[Event]) -> Self {
        let total_tickets = events.iter().map(|e| e.total_tickets).sum();
        let total_revenue: Decimal = events.iter().map(Event::revenue).sum();
        Self {
            total_events: events.len(),
            total_tickets,
            total_revenue,
            total_revenue_label: format_ksh_whole(total_revenue),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsView {
    pub stats: EventStats,
    pub status_options: Vec<&'static str>,
    pub table: TablePage<EventRow>,
}

pub fn events_view(
    events: &[Event],
    filters: &EventFilters,
    today: NaiveDate,
    page_size: usize,
    empty_message: &str,
) -> EventsView {
    // Status desconhecido no filtro não casa com nada
    let status = selected(filters.status.as_deref()).map(|s| EventStatus::parse(s).ok_or(()));

    let table = ResourceTable::new(events, page_size)
        .search(filters.search.as_deref())
        .filter(move |event: &Event| match &status {
            None => true,
            Some(Ok(wanted)) => event.status_on(today) == *wanted,
            Some(Err(())) => false,
        })
        .page(filters.page.unwrap_or(1), empty_message)
        .map(|event| EventRow::from_event(&event, today));

    EventsView {
        stats: EventStats::from_events(events),
        status_options: vec!["all", "upcoming", "ongoing", "completed"],
        table,
    }
}
