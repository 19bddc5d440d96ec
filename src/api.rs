// src/api.rs
//
// Portas da API remota. Cada recurso tem seu trait; `AdminApi` junta todos
// para que o console trabalhe com um único `Arc<dyn AdminApi>` por sessão.

pub mod auth;
pub mod client;
pub mod events;
pub mod memberships;
pub mod merchandise;
pub mod orders;
pub mod staff;

use std::sync::Arc;

pub use auth::AuthApi;
pub use client::{ApiClient, AUTH_COOKIE};
pub use events::EventsApi;
pub use memberships::MembershipsApi;
pub use merchandise::MerchandiseApi;
pub use orders::OrdersApi;
pub use staff::StaffApi;

pub trait AdminApi:
    AuthApi + EventsApi + MerchandiseApi + MembershipsApi + OrdersApi + StaffApi
{
}

impl<T> AdminApi for T where
    T: AuthApi + EventsApi + MerchandiseApi + MembershipsApi + OrdersApi + StaffApi
{
}

/// Abre uma conexão com a API remota para um token (ou anônima).
pub trait Connector: Send + Sync {
    fn connect(&self, token: Option<&str>) -> Arc<dyn AdminApi>;
}

impl Connector for ApiClient {
    fn connect(&self, token: Option<&str>) -> Arc<dyn AdminApi> {
        Arc::new(self.with_token(token))
    }
}
