//! # API REST
//!
//! REST API implementation for the patient registry.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, status codes)
//!
//! Uses `api-shared` for request/response bodies and `registry-core` for every store
//! operation.

#![warn(rust_2018_idioms)]

pub mod error;
pub mod handlers;

use axum::{routing::get, Router};
use registry_core::PatientService;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use error::ApiError;

/// Application state shared across REST API handlers
#[derive(Clone, Debug)]
pub struct AppState {
    pub patient_service: PatientService,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::list_patients,
        handlers::create_patient,
        handlers::get_patient,
        handlers::update_patient,
        handlers::delete_patient,
        handlers::patient_statistics,
    ),
    components(schemas(
        api_shared::HealthRes,
        api_shared::AgeValue,
        api_shared::CreatePatientReq,
        api_shared::UpdatePatientReq,
        api_shared::PatientRes,
        api_shared::ListPatientsRes,
        api_shared::StatisticsRes,
        api_shared::ErrorRes,
    ))
)]
pub struct ApiDoc;

/// Builds the registry router, including Swagger UI at `/swagger-ui`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/patients",
            get(handlers::list_patients).post(handlers::create_patient),
        )
        .route("/patients/statistics", get(handlers::patient_statistics))
        .route(
            "/patients/:id",
            get(handlers::get_patient)
                .put(handlers::update_patient)
                .delete(handlers::delete_patient),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
