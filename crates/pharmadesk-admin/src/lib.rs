//! Product listing view-model and session context for the PharmaDesk
//! admin dashboard.
//!
//! This crate provides:
//! - `ProductListViewModel` - debounced search, pagination and display phase
//! - `Debouncer` - cancellable quiet-period timer
//! - `SessionManager` / `AdminSession` - explicit signed-in context
//! - `AdminConfig` - page size, debounce delay, store and logging settings

mod config;
mod debounce;
mod error;
mod phase;
mod session;
mod view_model;

pub use config::*;
pub use debounce::*;
pub use error::*;
pub use phase::*;
pub use session::*;
pub use view_model::*;
