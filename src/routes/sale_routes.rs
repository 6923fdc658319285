use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use tracing::info;
use uuid::Uuid;

use crate::controllers::sale_controller::SaleController;
use crate::dto::sale_dto::{CreateSaleRequest, SaleCreatedResponse};
use crate::dto::ApiResponse;
use crate::middleware::AuthenticatedUser;
use crate::models::SaleDetail;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::ApiJson;

pub fn create_sale_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sales).post(create_sale))
        .route("/:id", get(get_sale).delete(delete_sale))
}

async fn list_sales(State(state): State<AppState>) -> Result<Json<Vec<SaleDetail>>, AppError> {
    let controller = SaleController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn create_sale(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(request): ApiJson<CreateSaleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SaleCreatedResponse>>), AppError> {
    info!("Alta de venta solicitada por {}", user.email);
    let controller = SaleController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_sale(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SaleDetail>, AppError> {
    let controller = SaleController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn delete_sale(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    info!("Baja de venta {} solicitada por {}", id, user.email);
    let controller = SaleController::new(state.pool.clone());
    let response = controller.delete(id).await?;
    Ok(Json(response))
}
