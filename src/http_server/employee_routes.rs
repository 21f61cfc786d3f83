//! Employee HTTP Routes

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};

use super::errors::ApiResult;
use super::extract::Payload;
use super::state::{run_blocking, AppState};
use crate::schema::{Employee, EmployeeCreate};

pub fn employee_routes(state: Arc<AppState>) -> Router {
    let collection = post(create_employee_handler).get(list_employees_handler);

    Router::new()
        .route("/employees", collection.clone())
        .route("/employees/", collection)
        .with_state(state)
}

async fn create_employee_handler(
    State(state): State<Arc<AppState>>,
    Payload(input): Payload<EmployeeCreate>,
) -> ApiResult<(StatusCode, Json<Employee>)> {
    let employees = state.repositories.employees.clone();
    let employee = run_blocking(move || employees.create(input)).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

async fn list_employees_handler(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Employee>>> {
    let employees = state.repositories.employees.clone();
    Ok(Json(run_blocking(move || employees.list()).await?))
}
