use sqlx::PgPool;

use crate::models::UserResponse;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::AppResult;

pub struct SellerController {
    repository: UserRepository,
}

impl SellerController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UserRepository::new(pool),
        }
    }

    /// Vendedores activos, para los selects del front-end
    pub async fn list(&self) -> AppResult<Vec<UserResponse>> {
        let users = self.repository.list_active().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }
}
