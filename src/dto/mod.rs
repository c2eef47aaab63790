//! DTOs de entrada y salida de la API

pub mod api;
pub mod garage_dto;
pub mod revenue_dto;
pub mod status_dto;
pub mod webhook_dto;
