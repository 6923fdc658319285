use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::expense_dto::{CurrentExpenseRequest, VehicleExpenseRequest};
use crate::dto::ApiResponse;
use crate::models::{CurrentExpense, VehicleExpense};
use crate::repositories::expense_repository::{
    CurrentExpenseRepository, VehicleExpenseRepository,
};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{not_found_error, validation_error, AppError, AppResult};

pub struct CurrentExpenseController {
    repository: CurrentExpenseRepository,
}

impl CurrentExpenseController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CurrentExpenseRepository::new(pool),
        }
    }

    pub async fn list(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> AppResult<Vec<CurrentExpense>> {
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(validation_error(
                    "desde",
                    "La fecha inicial no puede ser posterior a la final",
                ));
            }
        }
        self.repository.list(from, to).await
    }

    pub async fn create(
        &self,
        request: CurrentExpenseRequest,
    ) -> AppResult<ApiResponse<CurrentExpense>> {
        request.validate()?;
        let expense = self.repository.create(&request).await?;
        Ok(ApiResponse::success_with_message(
            expense,
            "Gasto registrado exitosamente",
        ))
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: CurrentExpenseRequest,
    ) -> AppResult<ApiResponse<CurrentExpense>> {
        request.validate()?;
        let expense = self
            .repository
            .update(id, &request)
            .await?
            .ok_or_else(|| not_found_error("Gasto corriente", &id.to_string()))?;
        Ok(ApiResponse::success_with_message(
            expense,
            "Gasto actualizado exitosamente",
        ))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<ApiResponse<()>> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Gasto corriente", &id.to_string()));
        }
        Ok(ApiResponse::message_only("Gasto eliminado exitosamente"))
    }
}

pub struct VehicleExpenseController {
    repository: VehicleExpenseRepository,
    vehicles: VehicleRepository,
}

impl VehicleExpenseController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleExpenseRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
        }
    }

    pub async fn list(&self) -> AppResult<Vec<VehicleExpense>> {
        self.repository.list().await
    }

    async fn ensure_vehicle(&self, id: Uuid) -> AppResult<()> {
        match self.vehicles.find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::VehicleNotFound(format!(
                "El vehículo {} no existe",
                id
            ))),
        }
    }

    pub async fn create(
        &self,
        request: VehicleExpenseRequest,
    ) -> AppResult<ApiResponse<VehicleExpense>> {
        request.validate()?;
        self.ensure_vehicle(request.vehicle_id).await?;

        let expense = self.repository.create(&request).await?;
        Ok(ApiResponse::success_with_message(
            expense,
            "Gasto de vehículo registrado exitosamente",
        ))
    }

    /// Editar un gasto no recalcula la ganancia de ventas ya cerradas
    pub async fn update(
        &self,
        id: Uuid,
        request: VehicleExpenseRequest,
    ) -> AppResult<ApiResponse<VehicleExpense>> {
        request.validate()?;
        self.ensure_vehicle(request.vehicle_id).await?;

        let expense = self
            .repository
            .update(id, &request)
            .await?
            .ok_or_else(|| not_found_error("Gasto de vehículo", &id.to_string()))?;
        Ok(ApiResponse::success_with_message(
            expense,
            "Gasto de vehículo actualizado exitosamente",
        ))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<ApiResponse<()>> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Gasto de vehículo", &id.to_string()));
        }
        Ok(ApiResponse::message_only("Gasto de vehículo eliminado exitosamente"))
    }
}
