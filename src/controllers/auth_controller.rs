use sqlx::PgPool;
use validator::Validate;

use crate::dto::auth_dto::{LoginRequest, LoginResponse};
use crate::models::UserResponse;
use crate::services::auth_service::AuthService;
use crate::utils::errors::AppResult;
use crate::utils::jwt::JwtConfig;

pub struct AuthController {
    service: AuthService,
    ttl_seconds: u64,
}

impl AuthController {
    pub fn new(pool: PgPool, jwt: JwtConfig) -> Self {
        let ttl_seconds = jwt.expiration;
        Self {
            service: AuthService::new(pool, jwt),
            ttl_seconds,
        }
    }

    /// Devuelve la respuesta y el token a poner en la cookie
    pub async fn login(&self, request: LoginRequest) -> AppResult<(LoginResponse, String)> {
        request.validate()?;
        let (user, token) = self.service.login(&request).await?;

        let response = LoginResponse {
            user: UserResponse::from(user),
            expires_in: self.ttl_seconds,
        };
        Ok((response, token))
    }
}
