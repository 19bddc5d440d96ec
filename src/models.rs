// src/models.rs

pub mod auth;
pub mod envelope;
pub mod event;
pub mod membership;
pub mod merchandise;
pub mod order;
pub mod staff;

pub use envelope::ListEnvelope;
