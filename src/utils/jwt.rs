//! Utilidades JWT para el token de sesión
//!
//! El token viaja en la cookie `session` (HttpOnly). Sólo lleva el id del
//! usuario; los datos del vendedor se releen de la base en cada request.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{config::environment::EnvironmentConfig, utils::errors::AppError};

/// Nombre de la cookie de sesión
pub const SESSION_COOKIE: &str = "session";

/// Claims del token de sesión
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String, // user_id
    pub exp: usize,  // expiration timestamp
    pub iat: usize,  // issued at timestamp
}

/// Configuración de JWT
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration: u64,
}

impl From<&EnvironmentConfig> for JwtConfig {
    fn from(config: &EnvironmentConfig) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
            expiration: config.session_ttl_seconds,
        }
    }
}

/// Generar token de sesión para un usuario
pub fn generate_token(user_id: Uuid, config: &JwtConfig) -> Result<String, AppError> {
    let now = chrono::Utc::now();
    let expires_at = now + chrono::Duration::seconds(config.expiration as i64);

    let claims = SessionClaims {
        sub: user_id.to_string(),
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    let encoding_key = EncodingKey::from_secret(config.secret.as_ref());

    encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| AppError::Jwt(format!("Error generando token: {}", e)))
}

/// Verificar y decodificar token de sesión, devolviendo el id del usuario
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<Uuid, AppError> {
    let decoding_key = DecodingKey::from_secret(config.secret.as_ref());

    let token_data = decode::<SessionClaims>(token, &decoding_key, &Validation::default())
        .map_err(|e| AppError::Jwt(format!("Token inválido: {}", e)))?;

    Uuid::parse_str(&token_data.claims.sub)
        .map_err(|_| AppError::Jwt("ID de usuario inválido en el token".to_string()))
}

/// Extraer el valor de una cookie del header `Cookie`
pub fn extract_cookie<'a>(cookie_header: &'a str, name: &str) -> Option<&'a str> {
    cookie_header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

/// Header `Set-Cookie` para abrir la sesión
pub fn session_cookie(token: &str, max_age: u64, secure: bool) -> String {
    format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}{}",
        SESSION_COOKIE,
        token,
        max_age,
        if secure { "; Secure" } else { "" }
    )
}

/// Header `Set-Cookie` que borra la sesión
pub fn clear_session_cookie() -> String {
    format!("{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0", SESSION_COOKIE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "test_secret".to_string(),
            expiration: 3600,
        }
    }

    #[test]
    fn test_token_roundtrip_returns_user() {
        let user_id = Uuid::new_v4();
        let token = generate_token(user_id, &config()).unwrap();
        assert_eq!(verify_token(&token, &config()).unwrap(), user_id);
    }

    #[test]
    fn test_token_with_other_secret_is_rejected() {
        let token = generate_token(Uuid::new_v4(), &config()).unwrap();
        let other = JwtConfig {
            secret: "otro".to_string(),
            expiration: 3600,
        };
        assert!(matches!(verify_token(&token, &other), Err(AppError::Jwt(_))));
    }

    #[test]
    fn test_extract_cookie() {
        let header = "theme=dark; session=abc.def.ghi; lang=es";
        assert_eq!(extract_cookie(header, "session"), Some("abc.def.ghi"));
        assert_eq!(extract_cookie(header, "missing"), None);
        assert_eq!(extract_cookie("session=", "session"), None);
    }

    #[test]
    fn test_session_cookie_flags() {
        let cookie = session_cookie("tok", 60, true);
        assert!(cookie.starts_with("session=tok;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.ends_with("; Secure"));
        assert!(clear_session_cookie().contains("Max-Age=0"));
    }
}
