use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::client_dto::ClientRequest;
use crate::dto::ApiResponse;
use crate::models::Client;
use crate::repositories::client_repository::ClientRepository;
use crate::utils::errors::{conflict_error, AppError, AppResult};

pub struct ClientController {
    repository: ClientRepository,
}

impl ClientController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ClientRepository::new(pool),
        }
    }

    pub async fn list(&self, search: Option<&str>) -> AppResult<Vec<Client>> {
        self.repository.list(search).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Client> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::ClientNotFound(format!("El cliente {} no existe", id)))
    }

    pub async fn create(&self, request: ClientRequest) -> AppResult<ApiResponse<Client>> {
        let request = request.normalized();
        request.validate()?;

        if self.repository.dni_exists(&request.dni, None).await? {
            return Err(conflict_error("Cliente", "DNI", &request.dni));
        }

        let client = self.repository.create(&request).await?;
        info!("👤 Cliente {} registrado", client.full_name());

        Ok(ApiResponse::success_with_message(
            client,
            "Cliente creado exitosamente",
        ))
    }

    pub async fn update(&self, id: Uuid, request: ClientRequest) -> AppResult<ApiResponse<Client>> {
        let request = request.normalized();
        request.validate()?;

        if self.repository.dni_exists(&request.dni, Some(id)).await? {
            return Err(conflict_error("Cliente", "DNI", &request.dni));
        }

        let client = self
            .repository
            .update(id, &request)
            .await?
            .ok_or_else(|| AppError::ClientNotFound(format!("El cliente {} no existe", id)))?;

        Ok(ApiResponse::success_with_message(
            client,
            "Cliente actualizado exitosamente",
        ))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<ApiResponse<()>> {
        let client = self.get_by_id(id).await?;

        if self.repository.has_sales(id).await? {
            return Err(AppError::DomainRule(
                "No se puede eliminar un cliente con ventas registradas".to_string(),
            ));
        }

        self.repository.delete(id).await?;
        info!("🗑️ Cliente {} eliminado", client.full_name());
        Ok(ApiResponse::message_only("Cliente eliminado exitosamente"))
    }
}
