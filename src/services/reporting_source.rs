//! Fuente de datos de solo lectura para los reportes
//!
//! El facade de estadísticas no habla SQL: pide registros fechados a un
//! `ReportingSource` y agrega en memoria. En producción la fuente es
//! `repositories::stats_repository::PgReportingSource`. La versión en memoria
//! (`InMemoryReportingSource`) existe sólo para tests: se compila con
//! `cfg(test)` o con el feature `test-support`.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::services::monthly_bucketer::Dated;
use crate::services::profit_calculator::DualAmount;
use crate::utils::errors::AppResult;

#[cfg(any(test, feature = "test-support"))]
mod memory;
#[cfg(any(test, feature = "test-support"))]
pub use memory::InMemoryReportingSource;

/// Venta con el costo de adquisición del vehículo vendido
#[derive(Debug, Clone, FromRow)]
pub struct SaleRecord {
    pub sale_id: Uuid,
    pub seller_id: Uuid,
    pub sale_date: NaiveDate,
    pub sale_price_ars: Decimal,
    pub sale_price_usd: Decimal,
    pub gain_ars: Decimal,
    pub gain_usd: Decimal,
    pub acquisition_price_ars: Decimal,
    pub acquisition_price_usd: Decimal,
}

impl SaleRecord {
    pub fn sale_price(&self) -> DualAmount {
        DualAmount::new(self.sale_price_ars, self.sale_price_usd)
    }

    pub fn gain(&self) -> DualAmount {
        DualAmount::new(self.gain_ars, self.gain_usd)
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct CurrentExpenseRecord {
    pub expense_date: NaiveDate,
    pub amount: Decimal,
}

#[derive(Debug, Clone, FromRow)]
pub struct VehicleExpenseRecord {
    pub expense_date: NaiveDate,
    pub amount_ars: Decimal,
    pub amount_usd: Decimal,
}

#[derive(Debug, Clone, FromRow)]
pub struct VehicleIntakeRecord {
    pub vehicle_id: Uuid,
    pub acquisition_date: NaiveDate,
}

/// Vendedor tal como aparece en el balance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct SellerRef {
    #[serde(rename = "vendedorId")]
    pub id: Uuid,
    #[serde(rename = "nombre")]
    pub full_name: String,
}

impl Dated for SaleRecord {
    fn date(&self) -> NaiveDate {
        self.sale_date
    }
}

impl Dated for CurrentExpenseRecord {
    fn date(&self) -> NaiveDate {
        self.expense_date
    }
}

impl Dated for VehicleExpenseRecord {
    fn date(&self) -> NaiveDate {
        self.expense_date
    }
}

impl Dated for VehicleIntakeRecord {
    fn date(&self) -> NaiveDate {
        self.acquisition_date
    }
}

/// Consultas que necesita el facade. Los rangos son inclusivos en ambos extremos.
#[async_trait]
pub trait ReportingSource: Send + Sync {
    async fn sales_between(&self, from: NaiveDate, to: NaiveDate) -> AppResult<Vec<SaleRecord>>;

    async fn current_expenses_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<CurrentExpenseRecord>>;

    async fn vehicle_expenses_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<VehicleExpenseRecord>>;

    async fn vehicle_intakes_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<VehicleIntakeRecord>>;

    async fn count_available_vehicles(&self) -> AppResult<i64>;

    /// Años con al menos una venta, de mayor a menor
    async fn sale_years(&self) -> AppResult<Vec<i32>>;

    /// Vendedores activos más los que tienen ventas registradas
    async fn sellers(&self) -> AppResult<Vec<SellerRef>>;
}
