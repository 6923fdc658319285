//! Autenticación de vendedores
//!
//! Verifica email + contraseña (bcrypt) y emite el token de sesión.

use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::dto::auth_dto::LoginRequest;
use crate::models::User;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::jwt::{generate_token, verify_token, JwtConfig};

const INVALID_CREDENTIALS: &str = "Email o contraseña incorrectos";

pub struct AuthService {
    users: UserRepository,
    jwt: JwtConfig,
}

impl AuthService {
    pub fn new(pool: PgPool, jwt: JwtConfig) -> Self {
        Self {
            users: UserRepository::new(pool),
            jwt,
        }
    }

    /// Devuelve el usuario y su token de sesión
    pub async fn login(&self, request: &LoginRequest) -> AppResult<(User, String)> {
        let user = self
            .users
            .find_by_email(&request.email)
            .await?
            .filter(|u| u.active)
            .ok_or_else(|| {
                warn!("Login fallido para {}", request.email);
                AppError::Unauthorized(INVALID_CREDENTIALS.to_string())
            })?;

        let valid = bcrypt::verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Hash(e.to_string()))?;
        if !valid {
            warn!("Contraseña incorrecta para {}", request.email);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let token = generate_token(user.id, &self.jwt)?;
        info!("🔐 Sesión iniciada: {}", user.email);
        Ok((user, token))
    }

    /// Usuario activo dueño del token, si el token es válido
    pub async fn authenticate(&self, token: &str) -> AppResult<User> {
        let user_id: Uuid = verify_token(token, &self.jwt)?;
        self.users
            .find_active_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Usuario inexistente o inactivo".to_string()))
    }
}
