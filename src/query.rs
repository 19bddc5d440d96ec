// src/query.rs

pub mod cache;
pub mod queries;

pub use cache::{Query, QueryClient, QueryKey, QueryOptions, QueryState};
