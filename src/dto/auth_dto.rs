use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::UserResponse;

// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Email inválido"))]
    pub email: String,
    #[validate(length(min = 1, message = "La contraseña es requerida"))]
    pub password: String,
}

// Login response; el token viaja en la cookie de sesión
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: UserResponse,
    pub expires_in: u64,
}
