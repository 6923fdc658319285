use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::vehicle_dto::VehicleRequest;
use crate::dto::ApiResponse;
use crate::models::{Vehicle, VehicleExpense, VehicleStatus};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{conflict_error, AppError, AppResult};

pub struct VehicleController {
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
        }
    }

    pub async fn list(&self, status: Option<VehicleStatus>) -> AppResult<Vec<Vehicle>> {
        self.repository.list(status).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Vehicle> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::VehicleNotFound(format!("El vehículo {} no existe", id)))
    }

    pub async fn create(&self, request: VehicleRequest) -> AppResult<ApiResponse<Vehicle>> {
        let request = request.normalized();
        request.validate()?;

        // La patente es única en todo el inventario
        if self
            .repository
            .license_plate_exists(&request.license_plate, None)
            .await?
        {
            return Err(conflict_error("Vehículo", "patente", &request.license_plate));
        }

        let id = self.repository.create(&request).await?;
        let vehicle = self.get_by_id(id).await?;
        info!("🚗 Vehículo {} ingresado ({})", vehicle.license_plate, vehicle.id);

        Ok(ApiResponse::success_with_message(
            vehicle,
            "Vehículo creado exitosamente",
        ))
    }

    pub async fn update(&self, id: Uuid, request: VehicleRequest) -> AppResult<ApiResponse<Vehicle>> {
        let request = request.normalized();
        request.validate()?;

        if self
            .repository
            .license_plate_exists(&request.license_plate, Some(id))
            .await?
        {
            return Err(conflict_error("Vehículo", "patente", &request.license_plate));
        }

        if !self.repository.update(id, &request).await? {
            return Err(AppError::VehicleNotFound(format!("El vehículo {} no existe", id)));
        }

        let vehicle = self.get_by_id(id).await?;
        Ok(ApiResponse::success_with_message(
            vehicle,
            "Vehículo actualizado exitosamente",
        ))
    }

    /// Un vehículo con ventas no se puede borrar
    pub async fn delete(&self, id: Uuid) -> AppResult<ApiResponse<()>> {
        let vehicle = self.get_by_id(id).await?;

        if self.repository.has_sales(id).await? {
            return Err(AppError::DomainRule(
                "No se puede eliminar un vehículo con ventas registradas".to_string(),
            ));
        }

        self.repository.delete(id).await?;
        info!("🗑️ Vehículo {} eliminado", vehicle.license_plate);
        Ok(ApiResponse::message_only("Vehículo eliminado exitosamente"))
    }

    pub async fn expenses(&self, id: Uuid) -> AppResult<Vec<VehicleExpense>> {
        self.get_by_id(id).await?;
        self.repository.expenses(id).await
    }
}
