//! `ReportingSource` sobre PostgreSQL
//!
//! Sólo filtra por fecha; los totales mensuales los arma `StatsService`.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::services::reporting_source::{
    CurrentExpenseRecord, ReportingSource, SaleRecord, SellerRef, VehicleExpenseRecord,
    VehicleIntakeRecord,
};
use crate::utils::errors::AppResult;

#[derive(Clone)]
pub struct PgReportingSource {
    pool: PgPool,
}

impl PgReportingSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportingSource for PgReportingSource {
    async fn sales_between(&self, from: NaiveDate, to: NaiveDate) -> AppResult<Vec<SaleRecord>> {
        let sales = sqlx::query_as::<_, SaleRecord>(
            r#"
            SELECT s.id AS sale_id, s.seller_id, s.sale_date,
                   s.sale_price_ars, s.sale_price_usd, s.gain_ars, s.gain_usd,
                   v.acquisition_price_ars, v.acquisition_price_usd
            FROM sales s
            JOIN vehicles v ON v.id = s.vehicle_id
            WHERE s.sale_date BETWEEN $1 AND $2
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    async fn current_expenses_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<CurrentExpenseRecord>> {
        let expenses = sqlx::query_as::<_, CurrentExpenseRecord>(
            "SELECT expense_date, amount FROM current_expenses WHERE expense_date BETWEEN $1 AND $2",
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(expenses)
    }

    async fn vehicle_expenses_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<VehicleExpenseRecord>> {
        let expenses = sqlx::query_as::<_, VehicleExpenseRecord>(
            r#"
            SELECT expense_date, amount_ars, amount_usd
            FROM vehicle_expenses
            WHERE expense_date BETWEEN $1 AND $2
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(expenses)
    }

    async fn vehicle_intakes_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<VehicleIntakeRecord>> {
        let intakes = sqlx::query_as::<_, VehicleIntakeRecord>(
            r#"
            SELECT id AS vehicle_id, acquisition_date
            FROM vehicles
            WHERE acquisition_date BETWEEN $1 AND $2
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(intakes)
    }

    async fn count_available_vehicles(&self) -> AppResult<i64> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM vehicles WHERE status = 'disponible'")
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    async fn sale_years(&self) -> AppResult<Vec<i32>> {
        let years: Vec<(i32,)> = sqlx::query_as(
            r#"
            SELECT DISTINCT EXTRACT(YEAR FROM sale_date)::int AS year
            FROM sales
            ORDER BY year DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(years.into_iter().map(|(year,)| year).collect())
    }

    async fn sellers(&self) -> AppResult<Vec<SellerRef>> {
        let sellers = sqlx::query_as::<_, SellerRef>(
            r#"
            SELECT u.id, u.full_name
            FROM users u
            WHERE u.active OR EXISTS (SELECT 1 FROM sales s WHERE s.seller_id = u.id)
            ORDER BY u.full_name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(sellers)
    }
}
