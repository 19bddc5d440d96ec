// src/console.rs
//
// Núcleo do console: tabelas, diálogos, formulários, toasts e o gate de
// autenticação, sem nada de HTTP. Os handlers só traduzem para JSON.

pub mod auth;
pub mod badges;
pub mod dialogs;
pub mod events;
pub mod forms;
pub mod images;
pub mod memberships;
pub mod merchandise;
pub mod mutations;
pub mod nav;
pub mod orders;
pub mod sign_in;
pub mod staff;
pub mod table;
pub mod teams;
pub mod toast;
pub mod workspace;

pub use auth::AuthGate;
pub use mutations::MutationBinding;
pub use table::{ResourceTable, TablePage, TableRecord};
pub use toast::{Toast, Toaster};
pub use workspace::{SessionRegistry, Workspace};
