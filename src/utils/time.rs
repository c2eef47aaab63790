//! Utilidades de fecha y hora
//!
//! Parsing tolerante de timestamps heterogéneos y formateo de duraciones.
//! Los valores con offset se normalizan a hora local (naive) descartando
//! el offset; no se convierte entre zonas horarias.

use chrono::{DateTime, Duration, NaiveDateTime};

use crate::utils::errors::AppError;

// Formatos locales soportados, probados en orden fijo tras el ISO con offset
const LOCAL_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
];

/// Parsear un timestamp en el primer formato reconocido
pub fn parse_datetime(value: &str) -> Result<NaiveDateTime, AppError> {
    // ISO 8601 con offset: se conserva la hora de reloj, se descarta el offset
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.naive_local());
    }

    for format in LOCAL_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(dt);
        }
    }

    Err(AppError::InvalidTimestamp(value.to_string()))
}

/// Formatear una duración como HH:MM:SS (horas sin límite de 24)
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.num_seconds().max(0);
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn test_parse_iso_offset() {
        let dt = parse_datetime("2025-01-01T10:00:00.000Z").unwrap();
        assert_eq!(
            dt,
            NaiveDate::from_ymd_opt(2025, 1, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_offset_is_discarded_not_converted() {
        // Se conserva la hora de reloj tal cual, ignorando el offset
        let dt = parse_datetime("2025-01-01T10:00:00-03:00").unwrap();
        assert_eq!(dt.hour(), 10);
    }

    #[test]
    fn test_parse_iso_local() {
        let dt = parse_datetime("2025-06-15T08:30:45").unwrap();
        assert_eq!(dt.to_string(), "2025-06-15 08:30:45");
    }

    #[test]
    fn test_parse_space_separated() {
        let dt = parse_datetime("2025-06-15 08:30:45").unwrap();
        assert_eq!(dt.to_string(), "2025-06-15 08:30:45");
    }

    #[test]
    fn test_parse_slash_separated() {
        let dt = parse_datetime("15/06/2025 08:30:45").unwrap();
        assert_eq!(dt.to_string(), "2025-06-15 08:30:45");
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(
            parse_datetime("not-a-date"),
            Err(AppError::InvalidTimestamp(_))
        ));
        assert!(matches!(
            parse_datetime("2025-13-40T99:99:99"),
            Err(AppError::InvalidTimestamp(_))
        ));
        assert!(matches!(
            parse_datetime(""),
            Err(AppError::InvalidTimestamp(_))
        ));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::seconds(0)), "00:00:00");
        assert_eq!(format_duration(Duration::seconds(59)), "00:00:59");
        assert_eq!(format_duration(Duration::seconds(3600 + 2 * 60 + 3)), "01:02:03");
    }

    #[test]
    fn test_format_duration_hours_not_clamped() {
        // Las horas no se recortan a 24
        assert_eq!(format_duration(Duration::hours(120)), "120:00:00");
    }
}
