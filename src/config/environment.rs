//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno del servidor
//! y la URL del simulador de garaje.

use std::env;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub host: String,
    pub port: u16,
    pub garage_api_url: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3003".to_string())
                .parse()
                .expect("PORT must be a valid number"),
            garage_api_url: env::var("GARAGE_API_URL")
                .unwrap_or_else(|_| "http://localhost:3000/garage".to_string()),
        }
    }
}

impl EnvironmentConfig {
    /// Obtener la dirección del servidor
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
