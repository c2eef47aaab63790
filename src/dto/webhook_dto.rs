//! DTOs del webhook de eventos de vehículos

use serde::Deserialize;

/// Tipos de evento soportados por la máquina de estados
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    Entry,
    Parked,
    Exit,
}

impl EventType {
    /// Parsear el tipo de evento, insensible a mayúsculas
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_uppercase().as_str() {
            "ENTRY" => Some(EventType::Entry),
            "PARKED" => Some(EventType::Parked),
            "EXIT" => Some(EventType::Exit),
            _ => None,
        }
    }
}

/// Evento entrante: { license_plate, event_type, entry_time?, exit_time?, lat?, lng? }
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEventRequest {
    pub license_plate: String,
    pub event_type: String,
    pub entry_time: Option<String>,
    pub exit_time: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_parse() {
        assert_eq!(EventType::parse("ENTRY"), Some(EventType::Entry));
        assert_eq!(EventType::parse("parked"), Some(EventType::Parked));
        assert_eq!(EventType::parse("Exit"), Some(EventType::Exit));
        assert_eq!(EventType::parse("RESERVED"), None);
        assert_eq!(EventType::parse(""), None);
    }

    #[test]
    fn test_deserialize_webhook_request() {
        let json = r#"{
            "license_plate": "ABC1D23",
            "event_type": "PARKED",
            "lat": -23.561684,
            "lng": -46.655981
        }"#;
        let dto: WebhookEventRequest = serde_json::from_str(json).unwrap();
        assert_eq!(dto.license_plate, "ABC1D23");
        assert_eq!(dto.event_type, "PARKED");
        assert_eq!(dto.lat, Some(-23.561684));
        assert!(dto.entry_time.is_none());
    }
}
