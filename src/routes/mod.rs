pub mod revenue_routes;
pub mod status_routes;
pub mod webhook_routes;
