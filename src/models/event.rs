// src/models/event.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::common::display::parse_api_date;

// --- Enums ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Upcoming,
    Ongoing,
    Completed,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Upcoming => "upcoming",
            EventStatus::Ongoing => "ongoing",
            EventStatus::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "upcoming" => Some(EventStatus::Upcoming),
            "ongoing" => Some(EventStatus::Ongoing),
            "completed" => Some(EventStatus::Completed),
            _ => None,
        }
    }
}

// --- Structs ---

// Evento como a API remota devolve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    // No PUT do console o id vem do caminho
    #[serde(rename = "_id", default)]
    #[schema(example = "6650c2f0a1b2c3d4e5f60718")]
    pub id: String,
    #[schema(example = "Muranga Seal")]
    pub home_team: String,
    #[schema(example = "Gor Mahia Fc")]
    pub away_team: String,
    #[schema(example = "2025-08-15")]
    pub date: String,
    #[schema(example = "15:00")]
    #[serde(default)]
    pub time: String,
    #[schema(example = "Sportpesa Arena, Murang'a")]
    #[serde(default)]
    pub venue: String,
    #[schema(example = 500)]
    pub ticket_price: Decimal,
    #[serde(default)]
    pub available_tickets: i64,
    #[serde(default)]
    pub total_tickets: i64,
    #[serde(default)]
    pub home_logo_url: Option<String>,
    #[serde(default)]
    pub opponent_logo_url: Option<String>,
}

impl Event {
    /// "Muranga Seal vs Gor Mahia Fc"
    pub fn display_name(&self) -> String {
        format!("{} vs {}", self.home_team, self.away_team)
    }

    pub fn event_date(&self) -> Option<NaiveDate> {
        parse_api_date(&self.date)
    }

    /// Status derivado comparando a data do evento com `today`.
    /// Datas que não fazem parse contam como "upcoming".
    pub fn status_on(&self, today: NaiveDate) -> EventStatus {
        match self.event_date() {
            Some(date) if date < today => EventStatus::Completed,
            Some(date) if date == today => EventStatus::Ongoing,
            _ => EventStatus::Upcoming,
        }
    }

    pub fn revenue(&self) -> Decimal {
        self.ticket_price * Decimal::from(self.total_tickets)
    }
}

// Corpo do POST /event/create-event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub home_team: String,
    pub away_team: String,
    pub date: String,
    pub time: String,
    pub venue: String,
    pub ticket_price: Decimal,
    pub available_tickets: i64,
    pub home_logo_url: Option<String>,
    pub opponent_logo_url: Option<String>,
}
