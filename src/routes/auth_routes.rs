//! Login / logout (públicos)

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::LoginRequest;
use crate::dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::ApiJson;
use crate::utils::jwt::{clear_session_cookie, session_cookie};

pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/logout", post(logout))
}

/// Destino de la redirección de `/api` sin sesión
async fn login_page() -> Json<serde_json::Value> {
    Json(json!({
        "success": false,
        "message": "Se requiere iniciar sesión",
        "login": "POST /login {email, password}"
    }))
}

async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Response, AppError> {
    let controller = AuthController::new(state.pool.clone(), state.jwt_config());
    let (response, token) = controller.login(request).await?;

    let cookie = session_cookie(&token, response.expires_in, state.config.is_production());
    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie).map_err(|e| AppError::Internal(e.to_string()))?,
    );

    Ok((
        headers,
        Json(ApiResponse::success_with_message(response, "Sesión iniciada")),
    )
        .into_response())
}

async fn logout() -> Response {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&clear_session_cookie()) {
        headers.insert(header::SET_COOKIE, value);
    }
    (headers, Redirect::to("/login")).into_response()
}
