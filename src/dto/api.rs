//! Envelope genérico de respuesta de la API

use serde::Serialize;

/// Respuesta estándar: { success, message, data }
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: Option<T>, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data,
        }
    }
}

/// Página de resultados para listados históricos
#[derive(Debug, Serialize)]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub page: i64,
    pub size: i64,
    pub total_elements: i64,
    pub total_pages: i64,
}

impl<T> PageResponse<T> {
    pub fn new(content: Vec<T>, page: i64, size: i64, total_elements: i64) -> Self {
        let total_pages = if size > 0 {
            (total_elements + size - 1) / size
        } else {
            0
        };
        Self {
            content,
            page,
            size,
            total_elements,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_response_total_pages() {
        let page = PageResponse::new(vec![1, 2, 3], 0, 10, 25);
        assert_eq!(page.total_pages, 3);

        let page = PageResponse::new(Vec::<i32>::new(), 0, 10, 0);
        assert_eq!(page.total_pages, 0);

        let page = PageResponse::new(vec![1], 0, 10, 10);
        assert_eq!(page.total_pages, 1);
    }
}
