//! Ciclo de vida de una venta
//!
//! Alta y baja corren en una sola transacción junto con el cambio de estado
//! del vehículo y la clasificación del cliente:
//!
//! - alta: vehículo `disponible → vendido`, cliente `→ comprador`
//! - baja: vehículo `vendido → disponible`, cliente `→ interesado`
//!
//! La baja vuelve al cliente a `interesado` aunque tenga otras compras.

use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::dto::sale_dto::CreateSaleRequest;
use crate::models::{ClientClassification, Sale, VehicleStatus};
use crate::repositories::sale_repository::{NewSale, SaleRepository};
use crate::services::profit_calculator::{calculate_profit, DualAmount, ProfitBreakdown};
use crate::utils::errors::{AppError, AppResult};

pub struct SaleService {
    pool: PgPool,
}

impl SaleService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Registrar una venta y calcular su ganancia con los gastos acumulados
    /// del vehículo al momento de vender
    pub async fn create(&self, request: &CreateSaleRequest) -> AppResult<(Sale, ProfitBreakdown)> {
        let mut tx = self.pool.begin().await?;

        let vehicle = SaleRepository::lock_vehicle(&mut *tx, request.vehicle_id)
            .await?
            .ok_or_else(|| {
                AppError::VehicleNotFound(format!("El vehículo {} no existe", request.vehicle_id))
            })?;

        if vehicle.status == VehicleStatus::Sold {
            warn!("Intento de vender dos veces el vehículo {}", vehicle.id);
            return Err(AppError::DomainRule(
                "El vehículo ya fue vendido".to_string(),
            ));
        }

        if !SaleRepository::client_exists(&mut *tx, request.client_id).await? {
            return Err(AppError::ClientNotFound(format!(
                "El cliente {} no existe",
                request.client_id
            )));
        }

        if !SaleRepository::seller_exists(&mut *tx, request.seller_id).await? {
            return Err(AppError::SellerNotFound(format!(
                "El vendedor {} no existe o está inactivo",
                request.seller_id
            )));
        }

        let expenses = SaleRepository::vehicle_expense_totals(&mut *tx, vehicle.id).await?;
        let sale_price = DualAmount::new(request.sale_price_ars, request.sale_price_usd);
        let profit = calculate_profit(vehicle.acquisition(), expenses, sale_price);

        let sale = SaleRepository::insert(
            &mut *tx,
            NewSale {
                vehicle_id: vehicle.id,
                client_id: request.client_id,
                seller_id: request.seller_id,
                sale_price,
                profit: &profit,
                sale_date: request.sale_date,
                notes: request.notes.as_deref(),
            },
        )
        .await?;

        SaleRepository::set_vehicle_status(&mut *tx, vehicle.id, VehicleStatus::Sold).await?;
        SaleRepository::set_client_classification(
            &mut *tx,
            request.client_id,
            ClientClassification::Buyer,
        )
        .await?;

        tx.commit().await?;

        info!(
            "💰 Venta {} registrada: vehículo {}, ganancia ARS {}",
            sale.id, sale.vehicle_id, sale.gain_ars
        );
        Ok((sale, profit))
    }

    /// Eliminar una venta y revertir vehículo y cliente
    pub async fn delete(&self, id: Uuid) -> AppResult<Sale> {
        let mut tx = self.pool.begin().await?;

        let sale = SaleRepository::lock_sale(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("La venta {} no existe", id)))?;

        SaleRepository::delete(&mut *tx, sale.id).await?;
        SaleRepository::set_vehicle_status(&mut *tx, sale.vehicle_id, VehicleStatus::Available)
            .await?;
        SaleRepository::set_client_classification(
            &mut *tx,
            sale.client_id,
            ClientClassification::Interested,
        )
        .await?;

        tx.commit().await?;

        info!("🗑️ Venta {} eliminada, vehículo {} disponible", sale.id, sale.vehicle_id);
        Ok(sale)
    }
}
