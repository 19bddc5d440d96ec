// src/services.rs

pub mod card_service;
pub mod document_service;
pub mod nfc;

pub use card_service::{CardService, CardSide};
pub use document_service::DocumentService;
pub use nfc::{NfcService, NfcWriter, UnsupportedNfc};
