use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::expense_controller::{
    CurrentExpenseController, VehicleExpenseController,
};
use crate::dto::expense_dto::{CurrentExpenseRequest, DateRangeQuery, VehicleExpenseRequest};
use crate::dto::ApiResponse;
use crate::models::{CurrentExpense, VehicleExpense};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::{ApiJson, ApiQuery};

pub fn create_current_expense_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_current_expenses).post(create_current_expense))
        .route(
            "/:id",
            put(update_current_expense).delete(delete_current_expense),
        )
}

pub fn create_vehicle_expense_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicle_expenses).post(create_vehicle_expense))
        .route(
            "/:id",
            put(update_vehicle_expense).delete(delete_vehicle_expense),
        )
}

async fn list_current_expenses(
    State(state): State<AppState>,
    ApiQuery(range): ApiQuery<DateRangeQuery>,
) -> Result<Json<Vec<CurrentExpense>>, AppError> {
    let controller = CurrentExpenseController::new(state.pool.clone());
    let response = controller.list(range.desde, range.hasta).await?;
    Ok(Json(response))
}

async fn create_current_expense(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CurrentExpenseRequest>,
) -> Result<Json<ApiResponse<CurrentExpense>>, AppError> {
    let controller = CurrentExpenseController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn update_current_expense(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(request): ApiJson<CurrentExpenseRequest>,
) -> Result<Json<ApiResponse<CurrentExpense>>, AppError> {
    let controller = CurrentExpenseController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_current_expense(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = CurrentExpenseController::new(state.pool.clone());
    let response = controller.delete(id).await?;
    Ok(Json(response))
}

async fn list_vehicle_expenses(
    State(state): State<AppState>,
) -> Result<Json<Vec<VehicleExpense>>, AppError> {
    let controller = VehicleExpenseController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn create_vehicle_expense(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<VehicleExpenseRequest>,
) -> Result<Json<ApiResponse<VehicleExpense>>, AppError> {
    let controller = VehicleExpenseController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn update_vehicle_expense(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(request): ApiJson<VehicleExpenseRequest>,
) -> Result<Json<ApiResponse<VehicleExpense>>, AppError> {
    let controller = VehicleExpenseController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_vehicle_expense(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = VehicleExpenseController::new(state.pool.clone());
    let response = controller.delete(id).await?;
    Ok(Json(response))
}
