//! Middleware de sesión
//!
//! Protege todo `/api`. Sin sesión válida la respuesta es una redirección
//! 303 a `/login`, nunca un 401 suelto.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;
use uuid::Uuid;

use crate::services::auth_service::AuthService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{extract_cookie, SESSION_COOKIE};

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub full_name: String,
    pub email: String,
}

/// Token de la cookie `session`, o en su defecto del header `Authorization: Bearer`
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let from_cookie = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|cookies| extract_cookie(cookies, SESSION_COOKIE));

    from_cookie
        .or_else(|| {
            headers
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.strip_prefix("Bearer "))
        })
        .map(str::to_string)
}

pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = session_token(request.headers()) else {
        debug!("Request sin sesión a {}", request.uri().path());
        return Redirect::to("/login").into_response();
    };

    let auth = AuthService::new(state.pool.clone(), state.jwt_config());
    match auth.authenticate(&token).await {
        Ok(user) => {
            request.extensions_mut().insert(AuthenticatedUser {
                user_id: user.id,
                full_name: user.full_name,
                email: user.email,
            });
            next.run(request).await
        }
        Err(AppError::Jwt(_)) | Err(AppError::Unauthorized(_)) => {
            debug!("Sesión inválida o vencida en {}", request.uri().path());
            Redirect::to("/login").into_response()
        }
        Err(e) => e.into_response(),
    }
}
