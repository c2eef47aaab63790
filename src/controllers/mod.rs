//! Controllers de la API
//!
//! Orquestan los casos de uso por encima de servicios y repositorios.

pub mod revenue_controller;
pub mod status_controller;
pub mod webhook_controller;

pub use revenue_controller::RevenueController;
pub use status_controller::StatusController;
pub use webhook_controller::WebhookController;
