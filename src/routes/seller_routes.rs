use axum::{extract::State, routing::get, Json, Router};

use crate::controllers::seller_controller::SellerController;
use crate::models::UserResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_seller_router() -> Router<AppState> {
    Router::new().route("/", get(list_sellers))
}

async fn list_sellers(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, AppError> {
    let controller = SellerController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}
