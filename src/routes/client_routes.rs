use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::client_controller::ClientController;
use crate::dto::client_dto::{ClientFilter, ClientRequest};
use crate::dto::ApiResponse;
use crate::models::Client;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::{ApiJson, ApiQuery};

pub fn create_client_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_clients).post(create_client))
        .route(
            "/:id",
            get(get_client).put(update_client).delete(delete_client),
        )
}

async fn list_clients(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<ClientFilter>,
) -> Result<Json<Vec<Client>>, AppError> {
    let controller = ClientController::new(state.pool.clone());
    let response = controller.list(filter.buscar.as_deref()).await?;
    Ok(Json(response))
}

async fn create_client(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ClientRequest>,
) -> Result<Json<ApiResponse<Client>>, AppError> {
    let controller = ClientController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Client>, AppError> {
    let controller = ClientController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(request): ApiJson<ClientRequest>,
) -> Result<Json<ApiResponse<Client>>, AppError> {
    let controller = ClientController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = ClientController::new(state.pool.clone());
    let response = controller.delete(id).await?;
    Ok(Json(response))
}
