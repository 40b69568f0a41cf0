// Route exports
pub mod matches;

use crate::models::ErrorResponse;
use actix_web::{error, web, HttpRequest};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(matches::configure),
    );
}

/// Malformed or oversized JSON bodies get the same error body as validation failures
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    ErrorResponse::new("invalid_json", format!("Invalid JSON: {}", err), 400).into()
}

pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Query error on {}: {}", req.path(), err);
    ErrorResponse::new("invalid_query", format!("Invalid query: {}", err), 400).into()
}

/// Extractor configuration shared by the server and the handler tests
pub fn payload_config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
        .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error));
}
