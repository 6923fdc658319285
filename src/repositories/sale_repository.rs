//! Ventas
//!
//! Las lecturas van contra el pool. Las escrituras reciben una conexión
//! (`&mut *tx`) porque siempre corren dentro de la transacción de
//! `services::sale_service`.

use rust_decimal::Decimal;
use sqlx::{FromRow, PgConnection, PgPool};
use uuid::Uuid;

use crate::models::{ClientClassification, Sale, SaleDetail, VehicleStatus};
use crate::services::profit_calculator::{DualAmount, ProfitBreakdown};
use crate::utils::errors::AppResult;

const SALE_DETAIL_SELECT: &str = r#"
    SELECT s.id, s.vehicle_id, v.license_plate,
           v.brand || ' ' || v.model || ' ' || v.year::text AS vehicle_description,
           s.client_id, c.first_name || ' ' || c.last_name AS client_name, c.dni AS client_dni,
           s.seller_id, u.full_name AS seller_name,
           s.sale_price_ars, s.sale_price_usd, s.gain_ars, s.gain_usd,
           s.sale_date, s.notes
    FROM sales s
    JOIN vehicles v ON v.id = s.vehicle_id
    JOIN clients c ON c.id = s.client_id
    JOIN users u ON u.id = s.seller_id
"#;

/// Vehículo bloqueado con `FOR UPDATE` durante el alta de una venta
#[derive(Debug, FromRow)]
pub struct LockedVehicle {
    pub id: Uuid,
    pub status: VehicleStatus,
    pub acquisition_price_ars: Decimal,
    pub acquisition_price_usd: Decimal,
}

impl LockedVehicle {
    pub fn acquisition(&self) -> DualAmount {
        DualAmount::new(self.acquisition_price_ars, self.acquisition_price_usd)
    }
}

/// Datos ya validados de una venta a insertar
pub struct NewSale<'a> {
    pub vehicle_id: Uuid,
    pub client_id: Uuid,
    pub seller_id: Uuid,
    pub sale_price: DualAmount,
    pub profit: &'a ProfitBreakdown,
    pub sale_date: chrono::NaiveDate,
    pub notes: Option<&'a str>,
}

pub struct SaleRepository {
    pool: PgPool,
}

impl SaleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<SaleDetail>> {
        let sql = format!("{} ORDER BY s.sale_date DESC, s.created_at DESC", SALE_DETAIL_SELECT);
        let sales = sqlx::query_as::<_, SaleDetail>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(sales)
    }

    pub async fn find_detail(&self, id: Uuid) -> AppResult<Option<SaleDetail>> {
        let sql = format!("{} WHERE s.id = $1", SALE_DETAIL_SELECT);
        let sale = sqlx::query_as::<_, SaleDetail>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(sale)
    }

    pub async fn lock_vehicle(conn: &mut PgConnection, id: Uuid) -> AppResult<Option<LockedVehicle>> {
        let vehicle = sqlx::query_as::<_, LockedVehicle>(
            r#"
            SELECT id, status, acquisition_price_ars, acquisition_price_usd
            FROM vehicles
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(conn)
        .await?;

        Ok(vehicle)
    }

    pub async fn client_exists(conn: &mut PgConnection, id: Uuid) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM clients WHERE id = $1)")
            .bind(id)
            .fetch_one(conn)
            .await?;

        Ok(result.0)
    }

    /// Sólo un usuario activo puede figurar como vendedor
    pub async fn seller_exists(conn: &mut PgConnection, id: Uuid) -> AppResult<bool> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1 AND active)")
                .bind(id)
                .fetch_one(conn)
                .await?;

        Ok(result.0)
    }

    /// Gastos acumulados del vehículo hasta este momento
    pub async fn vehicle_expense_totals(conn: &mut PgConnection, id: Uuid) -> AppResult<DualAmount> {
        let (ars, usd): (Decimal, Decimal) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(amount_ars), 0), COALESCE(SUM(amount_usd), 0)
            FROM vehicle_expenses
            WHERE vehicle_id = $1
            "#,
        )
        .bind(id)
        .fetch_one(conn)
        .await?;

        Ok(DualAmount::new(ars, usd))
    }

    pub async fn insert(conn: &mut PgConnection, sale: NewSale<'_>) -> AppResult<Sale> {
        let created = sqlx::query_as::<_, Sale>(
            r#"
            INSERT INTO sales (id, vehicle_id, client_id, seller_id,
                               sale_price_ars, sale_price_usd, gain_ars, gain_usd,
                               sale_date, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(sale.vehicle_id)
        .bind(sale.client_id)
        .bind(sale.seller_id)
        .bind(sale.sale_price.ars)
        .bind(sale.sale_price.usd)
        .bind(sale.profit.gain_ars)
        .bind(sale.profit.gain_usd)
        .bind(sale.sale_date)
        .bind(sale.notes)
        .fetch_one(conn)
        .await?;

        Ok(created)
    }

    pub async fn lock_sale(conn: &mut PgConnection, id: Uuid) -> AppResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>("SELECT * FROM sales WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(conn)
            .await?;

        Ok(sale)
    }

    pub async fn delete(conn: &mut PgConnection, id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM sales WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;

        Ok(())
    }

    pub async fn set_vehicle_status(
        conn: &mut PgConnection,
        id: Uuid,
        status: VehicleStatus,
    ) -> AppResult<()> {
        sqlx::query("UPDATE vehicles SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(conn)
            .await?;

        Ok(())
    }

    pub async fn set_client_classification(
        conn: &mut PgConnection,
        id: Uuid,
        classification: ClientClassification,
    ) -> AppResult<()> {
        sqlx::query("UPDATE clients SET classification = $2 WHERE id = $1")
            .bind(id)
            .bind(classification)
            .execute(conn)
            .await?;

        Ok(())
    }
}
