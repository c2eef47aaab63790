//! Utilidades de validación
//!
//! Este módulo contiene la validación de formato de matrículas.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Tres letras mayúsculas, un dígito, un alfanumérico mayúscula, dos dígitos
    static ref PLATE_PATTERN: Regex = Regex::new(r"^[A-Z]{3}[0-9][A-Z0-9][0-9]{2}$").unwrap();
}

/// Validar el formato de una matrícula (ej: ABC1D23)
pub fn is_valid_plate(plate: &str) -> bool {
    !plate.is_empty() && PLATE_PATTERN.is_match(plate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_plates() {
        assert!(is_valid_plate("ABC1D23"));
        assert!(is_valid_plate("XYZ9A01"));
        // El quinto carácter puede ser un dígito
        assert!(is_valid_plate("ABC1234"));
    }

    #[test]
    fn test_invalid_plates() {
        assert!(!is_valid_plate(""));
        assert!(!is_valid_plate("INVALID"));
        assert!(!is_valid_plate("abc1d23")); // minúsculas
        assert!(!is_valid_plate("AB11D23")); // solo dos letras
        assert!(!is_valid_plate("ABC1D2")); // seis caracteres
        assert!(!is_valid_plate("ABC1D234")); // ocho caracteres
        assert!(!is_valid_plate("ABCDD23")); // letra donde va dígito
        assert!(!is_valid_plate(" ABC1D23")); // espacio inicial
    }
}
