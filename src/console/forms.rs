// src/console/forms.rs
//
// Formulários de criação. As mensagens de validação são chaves do I18nStore;
// `AppError::to_api_error` traduz na hora de responder.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    common::error::AppError,
    console::{images::ImageAllowlist, teams::find_team},
    models::{
        auth::AdminSignUp, event::NewEvent, membership::NewMembership, merchandise::NewMerchandise,
        staff::StaffSignUp,
    },
};

fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() && !val.is_zero() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("form.not_negative".into());
        return Err(err);
    }
    Ok(())
}

// Erro de um campo só, no mesmo formato do validator
fn field_error(field: &'static str, code: &'static str, message_key: &'static str) -> ValidationErrors {
    let mut err = ValidationError::new(code);
    err.message = Some(message_key.into());
    let mut errors = ValidationErrors::new();
    errors.add(field, err);
    errors
}

/// Aceita "dd/mm/yyyy" (tela) ou "yyyy-mm-dd" (API).
pub fn parse_form_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()
}

// ---
// Evento
// ---
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventForm {
    #[serde(default)]
    pub home_team: String,

    #[serde(default)]
    pub away_team: String,

    #[validate(length(min = 1, message = "form.required"))]
    #[schema(example = "15/08/2031")]
    pub date: String,

    #[validate(length(min = 1, message = "form.required"))]
    #[schema(example = "15:00")]
    pub time: String,

    #[validate(length(min = 1, message = "form.required"))]
    pub venue: String,

    #[validate(custom(function = "validate_not_negative"))]
    pub ticket_price: Decimal,

    #[serde(default)]
    pub available_tickets: i64,
}

impl EventForm {
    // Regras que dependem de mais de um campo (ou do dia de hoje)
    fn validate_consistency(&self, today: NaiveDate) -> Result<NaiveDate, ValidationErrors> {
        if self.home_team.trim().is_empty() || self.away_team.trim().is_empty() {
            return Err(field_error("homeTeam", "required", "event.teams_required"));
        }
        if find_team(&self.home_team).is_none() {
            return Err(field_error("homeTeam", "catalog", "event.unknown_team"));
        }
        if find_team(&self.away_team).is_none() {
            return Err(field_error("awayTeam", "catalog", "event.unknown_team"));
        }
        if self.home_team.trim().eq_ignore_ascii_case(self.away_team.trim()) {
            return Err(field_error("awayTeam", "distinct", "event.same_team"));
        }

        let date = parse_form_date(&self.date).ok_or_else(|| field_error("date", "format", "event.invalid_date"))?;
        if date < today {
            return Err(field_error("date", "future", "event.date_in_past"));
        }

        if self.available_tickets <= 0 {
            return Err(field_error("availableTickets", "range", "event.tickets_positive"));
        }

        Ok(date)
    }

    /// Valida e monta o corpo do POST; logos vêm do catálogo de times.
    pub fn into_payload(self, today: NaiveDate) -> Result<NewEvent, AppError> {
        self.validate()?;
        let date = self.validate_consistency(today)?;

        let home = find_team(&self.home_team).ok_or(AppError::FormRejected("event.unknown_team"))?;
        let away = find_team(&self.away_team).ok_or(AppError::FormRejected("event.unknown_team"))?;

        Ok(NewEvent {
            home_team: home.name.to_string(),
            away_team: away.name.to_string(),
            date: date.format("%Y-%m-%d").to_string(),
            time: self.time.trim().to_string(),
            venue: self.venue.trim().to_string(),
            ticket_price: self.ticket_price,
            available_tickets: self.available_tickets,
            home_logo_url: Some(home.logo_url.to_string()),
            opponent_logo_url: Some(away.logo_url.to_string()),
        })
    }
}

// ---
// Produto
// ---
pub const DEFAULT_CATEGORY: &str = "Jersey";
pub const CATEGORIES: [&str; 5] = ["Hats", "Jersey", "Tracksuits", "Hoodie", "Other"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogItem {
    pub keyword: &'static str,
    pub price: u32,
    pub image_url: &'static str,
}

// Nome digitado que contém uma destas palavras preenche preço e imagem
pub const MERCHANDISE_CATALOG: [CatalogItem; 6] = [
    CatalogItem {
        keyword: "home jersey",
        price: 3000,
        image_url: "https://res.cloudinary.com/dfuh1q6ic/image/upload/v1745236825/ChatGPT_Image_Apr_10__2025__09_50_49_PM-removebg-preview_dkopaw.png",
    },
    CatalogItem {
        keyword: "away jersey",
        price: 3000,
        image_url: "https://res.cloudinary.com/dfuh1q6ic/image/upload/v1745236825/Screenshot_from_2025-04-21_14-41-50-removebg-preview_gsaiiz.png",
    },
    CatalogItem {
        keyword: "third jersey",
        price: 3500,
        image_url: "https://res.cloudinary.com/dfuh1q6ic/image/upload/v1745236825/Screenshot_from_2025-04-21_14-34-36-removebg-preview_b6psl8.png",
    },
    CatalogItem {
        keyword: "hoodie",
        price: 6500,
        image_url: "https://res.cloudinary.com/dfuh1q6ic/image/upload/v1745236825/Screenshot_from_2025-04-21_12-48-15-removebg-preview_ws1bys.png",
    },
    CatalogItem {
        keyword: "hat",
        price: 1500,
        image_url: "https://res.cloudinary.com/dfuh1q6ic/image/upload/v1745236825/Screenshot_from_2025-04-21_13-02-45-removebg-preview_1_gukb10.png",
    },
    CatalogItem {
        keyword: "truck suit",
        price: 10000,
        image_url: "https://res.cloudinary.com/dfuh1q6ic/image/upload/v1745236825/Screenshot_from_2025-04-21_14-50-21-removebg-preview_ghyuoy.png",
    },
];

pub fn catalog_match(name: &str) -> Option<&'static CatalogItem> {
    let name = name.to_lowercase();
    MERCHANDISE_CATALOG.iter().find(|item| name.contains(item.keyword))
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MerchandiseForm {
    #[validate(length(min = 1, message = "form.required"))]
    #[schema(example = "Home Jersey 2025")]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub price: Decimal,

    #[validate(range(min = 0, message = "form.not_negative"))]
    #[serde(default)]
    pub stock: i64,

    #[serde(default = "default_category")]
    pub category: String,

    #[serde(default)]
    pub image_url: Option<String>,
}

impl Default for MerchandiseForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: Decimal::ZERO,
            stock: 0,
            category: default_category(),
            image_url: None,
        }
    }
}

impl MerchandiseForm {
    /// Digitar o nome: item do catálogo sobrescreve preço e imagem.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        if let Some(item) = catalog_match(&self.name) {
            self.price = Decimal::from(item.price);
            self.image_url = Some(item.image_url.to_string());
        }
    }

    // Formulário enviado direto (sem digitação): só completa o que veio vazio
    fn fill_blanks_from_catalog(&mut self) {
        let Some(item) = catalog_match(&self.name) else {
            return;
        };
        if self.price.is_zero() {
            self.price = Decimal::from(item.price);
        }
        if self.image_url.as_deref().is_none_or(|u| u.trim().is_empty()) {
            self.image_url = Some(item.image_url.to_string());
        }
    }

    pub fn into_payload(mut self, images: &ImageAllowlist) -> Result<NewMerchandise, AppError> {
        self.validate()?;
        self.fill_blanks_from_catalog();

        let image_url = self.image_url.filter(|u| !u.trim().is_empty());
        if let Some(url) = &image_url {
            if !images.allows(url) {
                return Err(field_error("imageUrl", "allowlist", "form.image_not_allowed").into());
            }
        }

        let category = if self.category.trim().is_empty() { default_category() } else { self.category };

        Ok(NewMerchandise {
            name: self.name.trim().to_string(),
            description: self.description,
            price: self.price,
            stock: self.stock,
            category,
            image_url,
        })
    }
}

// ---
// Sócio
// ---
fn default_tier() -> String {
    "standard".to_string()
}

fn default_card_status() -> String {
    "pending".to_string()
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MembershipForm {
    #[validate(length(min = 1, message = "form.required"))]
    pub name: String,

    #[validate(email(message = "form.email"))]
    pub email: String,

    // Vazio = hoje
    #[serde(default)]
    pub join_date: Option<String>,

    #[serde(rename = "type", default = "default_tier")]
    pub tier: String,

    #[serde(default)]
    pub needs_physical_card: bool,

    #[serde(default = "default_card_status")]
    pub card_status: String,

    #[serde(default)]
    pub lock_requested: bool,
}

impl MembershipForm {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            join_date: None,
            tier: default_tier(),
            needs_physical_card: false,
            card_status: default_card_status(),
            lock_requested: false,
        }
    }

    pub fn into_payload(self, today: NaiveDate) -> Result<NewMembership, AppError> {
        self.validate()?;

        let join_date = match self.join_date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            Some(raw) => parse_form_date(raw).ok_or_else(|| field_error("joinDate", "format", "event.invalid_date"))?,
            None => today,
        };

        Ok(NewMembership {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            join_date: join_date.format("%Y-%m-%d").to_string(),
            tier: if self.tier.trim().is_empty() { default_tier() } else { self.tier },
            needs_physical_card: self.needs_physical_card,
            card_status: if self.card_status.trim().is_empty() { default_card_status() } else { self.card_status },
            lock_requested: self.lock_requested,
        })
    }
}

// ---
// Contas (funcionário e administrador)
// ---
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StaffForm {
    #[validate(length(min = 1, message = "form.required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "form.required"))]
    pub last_name: String,
    #[validate(email(message = "form.email"))]
    pub email: String,
    #[validate(length(min = 1, message = "form.required"))]
    pub phone_number: String,
}

impl StaffForm {
    pub fn into_payload(self) -> Result<StaffSignUp, AppError> {
        self.validate()?;
        Ok(StaffSignUp {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminSignUpForm {
    #[validate(length(min = 1, message = "form.required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "form.required"))]
    pub last_name: String,
    #[validate(email(message = "form.email"))]
    pub email: String,
    #[validate(length(min = 1, message = "form.required"))]
    pub phone_number: String,
    #[validate(length(min = 8, message = "form.password_length"))]
    pub password: String,
}

impl AdminSignUpForm {
    pub fn into_payload(self) -> Result<AdminSignUp, AppError> {
        self.validate()?;
        Ok(AdminSignUp {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
            password: self.password,
        })
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SignInEmailForm {
    #[validate(email(message = "form.email"))]
    pub email: String,
}
