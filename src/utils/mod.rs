//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación
//! de matrículas y parsing de fechas.

pub mod errors;
pub mod time;
pub mod validation;
