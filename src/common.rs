// src/common.rs

pub mod display;
pub mod error;
pub mod i18n;
