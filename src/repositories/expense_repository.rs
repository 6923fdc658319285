use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::expense_dto::{CurrentExpenseRequest, VehicleExpenseRequest};
use crate::models::{CurrentExpense, VehicleExpense};
use crate::utils::errors::{on_foreign_key_violation, AppError, AppResult};

/// El vehículo pudo borrarse entre el chequeo del controller y el INSERT
fn missing_vehicle(err: sqlx::Error, vehicle_id: Uuid) -> AppError {
    on_foreign_key_violation(err, || {
        AppError::VehicleNotFound(format!("El vehículo {} no existe", vehicle_id))
    })
}

pub struct CurrentExpenseRepository {
    pool: PgPool,
}

impl CurrentExpenseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gastos entre `from` y `to` (inclusive); cualquiera de los dos puede faltar
    pub async fn list(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> AppResult<Vec<CurrentExpense>> {
        let expenses = sqlx::query_as::<_, CurrentExpense>(
            r#"
            SELECT * FROM current_expenses
            WHERE ($1::date IS NULL OR expense_date >= $1)
              AND ($2::date IS NULL OR expense_date <= $2)
            ORDER BY expense_date DESC, created_at DESC
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(expenses)
    }

    pub async fn create(&self, request: &CurrentExpenseRequest) -> AppResult<CurrentExpense> {
        let expense = sqlx::query_as::<_, CurrentExpense>(
            r#"
            INSERT INTO current_expenses (id, expense_date, description, category, amount, operator)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.expense_date)
        .bind(&request.description)
        .bind(&request.category)
        .bind(request.amount)
        .bind(&request.operator)
        .fetch_one(&self.pool)
        .await?;

        Ok(expense)
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: &CurrentExpenseRequest,
    ) -> AppResult<Option<CurrentExpense>> {
        let expense = sqlx::query_as::<_, CurrentExpense>(
            r#"
            UPDATE current_expenses
            SET expense_date = $2, description = $3, category = $4, amount = $5, operator = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.expense_date)
        .bind(&request.description)
        .bind(&request.category)
        .bind(request.amount)
        .bind(&request.operator)
        .fetch_optional(&self.pool)
        .await?;

        Ok(expense)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM current_expenses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

pub struct VehicleExpenseRepository {
    pool: PgPool,
}

impl VehicleExpenseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<VehicleExpense>> {
        let expenses = sqlx::query_as::<_, VehicleExpense>(
            "SELECT * FROM vehicle_expenses ORDER BY expense_date DESC, created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(expenses)
    }

    pub async fn create(&self, request: &VehicleExpenseRequest) -> AppResult<VehicleExpense> {
        let expense = sqlx::query_as::<_, VehicleExpense>(
            r#"
            INSERT INTO vehicle_expenses (id, vehicle_id, expense_date, description, category, amount_ars, amount_usd)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.vehicle_id)
        .bind(request.expense_date)
        .bind(&request.description)
        .bind(&request.category)
        .bind(request.amount_ars)
        .bind(request.amount_usd)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| missing_vehicle(e, request.vehicle_id))?;

        Ok(expense)
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: &VehicleExpenseRequest,
    ) -> AppResult<Option<VehicleExpense>> {
        let expense = sqlx::query_as::<_, VehicleExpense>(
            r#"
            UPDATE vehicle_expenses
            SET vehicle_id = $2, expense_date = $3, description = $4, category = $5,
                amount_ars = $6, amount_usd = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.vehicle_id)
        .bind(request.expense_date)
        .bind(&request.description)
        .bind(&request.category)
        .bind(request.amount_ars)
        .bind(request.amount_usd)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| missing_vehicle(e, request.vehicle_id))?;

        Ok(expense)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM vehicle_expenses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
