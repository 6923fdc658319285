use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::sale_dto::{CreateSaleRequest, SaleCreatedResponse};
use crate::dto::ApiResponse;
use crate::models::SaleDetail;
use crate::repositories::sale_repository::SaleRepository;
use crate::services::sale_service::SaleService;
use crate::utils::errors::{not_found_error, AppResult};

pub struct SaleController {
    repository: SaleRepository,
    service: SaleService,
}

impl SaleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: SaleRepository::new(pool.clone()),
            service: SaleService::new(pool),
        }
    }

    pub async fn list(&self) -> AppResult<Vec<SaleDetail>> {
        self.repository.list().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<SaleDetail> {
        self.repository
            .find_detail(id)
            .await?
            .ok_or_else(|| not_found_error("Venta", &id.to_string()))
    }

    pub async fn create(
        &self,
        request: CreateSaleRequest,
    ) -> AppResult<ApiResponse<SaleCreatedResponse>> {
        request.validate()?;

        let (sale, profit) = self.service.create(&request).await?;

        Ok(ApiResponse::success_with_message(
            SaleCreatedResponse::new(sale, profit),
            "Venta registrada exitosamente",
        ))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<ApiResponse<()>> {
        self.service.delete(id).await?;
        Ok(ApiResponse::message_only("Venta eliminada exitosamente"))
    }
}
