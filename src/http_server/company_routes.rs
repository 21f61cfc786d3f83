//! Company HTTP Routes
//!
//! - `POST /companies` - create, 201 with the stored record
//! - `GET /companies` - list all

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};

use super::errors::ApiResult;
use super::extract::Payload;
use super::state::{run_blocking, AppState};
use crate::schema::{Company, CompanyCreate};

pub fn company_routes(state: Arc<AppState>) -> Router {
    let collection = post(create_company_handler).get(list_companies_handler);

    Router::new()
        .route("/companies", collection.clone())
        .route("/companies/", collection)
        .with_state(state)
}

async fn create_company_handler(
    State(state): State<Arc<AppState>>,
    Payload(input): Payload<CompanyCreate>,
) -> ApiResult<(StatusCode, Json<Company>)> {
    let companies = state.repositories.companies.clone();
    let company = run_blocking(move || companies.create(input)).await?;
    Ok((StatusCode::CREATED, Json(company)))
}

async fn list_companies_handler(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Company>>> {
    let companies = state.repositories.companies.clone();
    Ok(Json(run_blocking(move || companies.list()).await?))
}
