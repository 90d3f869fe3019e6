//! HTTP route handlers.

pub mod health;

pub use health::{gtg, health, AppState};
