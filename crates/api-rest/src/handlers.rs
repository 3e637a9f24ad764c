//! HTTP handlers for the patient endpoints.
//!
//! Each handler decodes the request, makes exactly one store call, and converts the outcome
//! into a JSON response. Errors are mapped by [`ApiError`].

use crate::error::ApiError;
use crate::AppState;
use api_shared::{
    CreatePatientReq, HealthRes, HealthService, ListPatientsRes, PatientRes, StatisticsRes,
    UpdatePatientReq,
};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

/// Query string of `GET /patients`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Case-insensitive name fragment, or an exact patient id.
    pub q: Option<String>,
}

fn patient_id(id: Result<Path<u64>, PathRejection>) -> Result<u64, ApiError> {
    id.map(|Path(id)| id)
        .map_err(|e| ApiError::BadRequest(format!("invalid patient id: {}", e.body_text())))
}

fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    query
        .map(|Query(params)| params)
        .map_err(|e| ApiError::BadRequest(e.body_text()))
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(req)| req)
        .map_err(|e| ApiError::BadRequest(e.body_text()))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Returns the current health status of the registry.
/// This endpoint is used for monitoring and load balancer health checks.
#[axum::debug_handler]
pub async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/patients",
    params(SearchParams),
    responses(
        (status = 200, description = "Patients in insertion order, filtered by `q` when given", body = ListPatientsRes),
        (status = 500, description = "Internal server error")
    )
)]
/// List or search patients
///
/// Without `q` every patient is returned. With `q` the result holds patients whose name
/// contains `q` (ignoring case) or whose id equals `q`; no match is an empty list.
#[axum::debug_handler]
pub async fn list_patients(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<ListPatientsRes>, ApiError> {
    let patients = match query_params(params)?.q {
        Some(term) => state.patient_service.find_by_name(&term)?,
        None => state.patient_service.list()?,
    };
    Ok(Json(patients.into()))
}

#[utoipa::path(
    post,
    path = "/patients",
    request_body = CreatePatientReq,
    responses(
        (status = 201, description = "Patient created", body = PatientRes),
        (status = 400, description = "Missing or invalid field", body = api_shared::ErrorRes),
        (status = 500, description = "Internal server error")
    )
)]
/// Create a new patient record
///
/// The id is assigned by the store and the registration time is stamped on creation.
#[axum::debug_handler]
pub async fn create_patient(
    State(state): State<AppState>,
    body: Result<Json<CreatePatientReq>, JsonRejection>,
) -> Result<(StatusCode, Json<PatientRes>), ApiError> {
    let new = json_body(body)?.into_new_patient()?;
    let patient = state.patient_service.create(new)?;
    Ok((StatusCode::CREATED, Json(patient.into())))
}

#[utoipa::path(
    get,
    path = "/patients/{id}",
    params(("id" = u64, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Patient found", body = PatientRes),
        (status = 404, description = "No patient with this id", body = api_shared::ErrorRes),
        (status = 500, description = "Internal server error")
    )
)]
#[axum::debug_handler]
pub async fn get_patient(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<PatientRes>, ApiError> {
    let patient = state.patient_service.get_by_id(patient_id(id)?)?;
    Ok(Json(patient.into()))
}

#[utoipa::path(
    put,
    path = "/patients/{id}",
    params(("id" = u64, Path, description = "Patient id")),
    request_body = UpdatePatientReq,
    responses(
        (status = 200, description = "Patient updated", body = PatientRes),
        (status = 400, description = "Invalid field", body = api_shared::ErrorRes),
        (status = 404, description = "No patient with this id", body = api_shared::ErrorRes),
        (status = 500, description = "Internal server error")
    )
)]
/// Update an existing patient
///
/// Only the supplied fields are overwritten. The id and registration time never change.
#[axum::debug_handler]
pub async fn update_patient(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
    body: Result<Json<UpdatePatientReq>, JsonRejection>,
) -> Result<Json<PatientRes>, ApiError> {
    let id = patient_id(id)?;
    let fields = json_body(body)?.into_update()?;
    let patient = state.patient_service.update(id, fields)?;
    Ok(Json(patient.into()))
}

#[utoipa::path(
    delete,
    path = "/patients/{id}",
    params(("id" = u64, Path, description = "Patient id")),
    responses(
        (status = 204, description = "Patient deleted"),
        (status = 404, description = "No patient with this id", body = api_shared::ErrorRes),
        (status = 500, description = "Internal server error")
    )
)]
#[axum::debug_handler]
pub async fn delete_patient(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    state.patient_service.delete(patient_id(id)?)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/patients/statistics",
    responses(
        (status = 200, description = "Count and age figures; figures are null when there are no patients", body = StatisticsRes),
        (status = 500, description = "Internal server error")
    )
)]
#[axum::debug_handler]
pub async fn patient_statistics(
    State(state): State<AppState>,
) -> Result<Json<StatisticsRes>, ApiError> {
    let stats = state.patient_service.statistics()?;
    Ok(Json(stats.into()))
}
