pub mod additives;
pub mod config;
pub mod error;
pub mod models;
pub mod normalize;
pub mod upstream;

// Re-export endpoint functions for integration tests
pub use crate::handlers::{AppState, health, index, scan};

mod handlers {
    use actix_web::{HttpResponse, Responder, get, web};
    use serde::Serialize;

    use crate::additives::AdditiveTable;
    use crate::error::ScanError;
    use crate::normalize::normalize;
    use crate::upstream::ProductSource;

    const INDEX_HTML: &str = include_str!("../static/index.html");

    /// Shared, read-only state for every worker.
    pub struct AppState {
        pub additives: AdditiveTable,
        pub source: Box<dyn ProductSource>,
    }

    #[derive(Serialize)]
    pub struct HealthResponse {
        pub status: String,
        pub message: String,
    }

    #[get("/")]
    pub async fn index() -> impl Responder {
        HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(INDEX_HTML)
    }

    #[get("/health")]
    pub async fn health() -> impl Responder {
        HttpResponse::Ok().json(HealthResponse {
            status: "ok".to_string(),
            message: "Scan API is running".to_string(),
        })
    }

    #[get("/api/scan/{barcode}")]
    pub async fn scan(
        state: web::Data<AppState>,
        barcode: web::Path<String>,
    ) -> Result<HttpResponse, ScanError> {
        let barcode = barcode.into_inner();
        log::info!("Looking up barcode {}", barcode);

        let product = match state.source.fetch_product(&barcode).await {
            Ok(product) => product,
            Err(ScanError::NotFound) => {
                log::warn!("Product {} not found", barcode);
                return Err(ScanError::NotFound);
            }
            Err(e) => {
                log::error!("Failed to fetch product {}: {}", barcode, e);
                return Err(e);
            }
        };

        Ok(HttpResponse::Ok().json(normalize(&product, &state.additives)))
    }
}
