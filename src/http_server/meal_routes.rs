//! Meal HTTP Routes
//!
//! Meals are the only family with per-record routes:
//!
//! - `POST /meals`, `GET /meals`
//! - `GET /meals/{meal_id}`
//! - `PATCH /meals/{meal_id}` - partial update of `type`, `menu`, `count`
//! - `DELETE /meals/{meal_id}` - 204 on success
//! - `GET /meals/by_month/{year}/{month}`

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;

use super::errors::{ApiError, ApiResult};
use super::extract::{Payload, PathParams};
use super::state::{run_blocking, AppState};
use crate::schema::{Meal, MealCreate, MealUpdate, MonthFilter};

const MEAL_NOT_FOUND: &str = "Meal not found";
const NOTHING_TO_UPDATE: &str = "Meal not found or no new data to update";

pub fn meal_routes(state: Arc<AppState>) -> Router {
    let collection = post(create_meal_handler).get(list_meals_handler);

    Router::new()
        .route("/meals", collection.clone())
        .route("/meals/", collection)
        .route(
            "/meals/{meal_id}",
            get(get_meal_handler)
                .patch(update_meal_handler)
                .delete(delete_meal_handler),
        )
        .route("/meals/by_month/{year}/{month}", get(meals_by_month_handler))
        .with_state(state)
}

async fn create_meal_handler(
    State(state): State<Arc<AppState>>,
    Payload(input): Payload<MealCreate>,
) -> ApiResult<(StatusCode, Json<Meal>)> {
    let meals = state.repositories.meals.clone();
    let meal = run_blocking(move || meals.create(input)).await?;
    Ok((StatusCode::CREATED, Json(meal)))
}

async fn list_meals_handler(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Meal>>> {
    let meals = state.repositories.meals.clone();
    Ok(Json(run_blocking(move || meals.list()).await?))
}

async fn get_meal_handler(
    State(state): State<Arc<AppState>>,
    PathParams(meal_id): PathParams<String>,
) -> ApiResult<Json<Meal>> {
    let meals = state.repositories.meals.clone();
    run_blocking(move || meals.get_by_id(&meal_id))
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(MEAL_NOT_FOUND))
}

async fn update_meal_handler(
    State(state): State<Arc<AppState>>,
    PathParams(meal_id): PathParams<String>,
    Payload(body): Payload<Value>,
) -> ApiResult<Json<Meal>> {
    let update = MealUpdate::from_json(body)?;
    let meals = state.repositories.meals.clone();

    // an empty payload and a missing record are both a 404 here
    run_blocking(move || meals.update(&meal_id, update))
        .await?
        .into_updated()
        .map(Json)
        .ok_or(ApiError::NotFound(NOTHING_TO_UPDATE))
}

async fn delete_meal_handler(
    State(state): State<Arc<AppState>>,
    PathParams(meal_id): PathParams<String>,
) -> ApiResult<StatusCode> {
    let meals = state.repositories.meals.clone();
    if run_blocking(move || meals.delete(&meal_id)).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(MEAL_NOT_FOUND))
    }
}

async fn meals_by_month_handler(
    State(state): State<Arc<AppState>>,
    PathParams((year, month)): PathParams<(i64, i64)>,
) -> ApiResult<Json<Vec<Meal>>> {
    let filter = MonthFilter::new(year, month);
    if !filter.in_supported_range() {
        return Err(ApiError::OutOfRange(format!(
            "Invalid year or month: year must be in {}..={}, month in {}..={}",
            MonthFilter::YEARS.start(),
            MonthFilter::YEARS.end(),
            MonthFilter::MONTHS.start(),
            MonthFilter::MONTHS.end(),
        )));
    }

    let meals = state.repositories.meals.clone();
    Ok(Json(run_blocking(move || meals.list_by_month(filter)).await?))
}
