use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::vehicle_dto::VehicleRequest;
use crate::models::{Vehicle, VehicleExpense, VehicleStatus};
use crate::utils::errors::{
    conflict_error, on_foreign_key_violation, on_unique_violation, AppError, AppResult,
};

/// SELECT base con los gastos acumulados del vehículo
const VEHICLE_SELECT: &str = r#"
    SELECT v.id, v.brand, v.model, v.year, v.license_plate,
           v.acquisition_price_ars, v.acquisition_price_usd,
           v.suggested_price_ars, v.suggested_price_usd,
           v.status, v.acquisition_date,
           COALESCE(g.total_ars, 0) AS expenses_ars,
           COALESCE(g.total_usd, 0) AS expenses_usd,
           v.created_at
    FROM vehicles v
    LEFT JOIN (
        SELECT vehicle_id, SUM(amount_ars) AS total_ars, SUM(amount_usd) AS total_usd
        FROM vehicle_expenses
        GROUP BY vehicle_id
    ) g ON g.vehicle_id = v.id
"#;

fn plate_conflict(err: sqlx::Error, plate: &str) -> AppError {
    on_unique_violation(err, || conflict_error("Vehículo", "patente", plate))
}

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, status: Option<VehicleStatus>) -> AppResult<Vec<Vehicle>> {
        let sql = format!(
            "{} WHERE ($1::vehicle_status IS NULL OR v.status = $1) \
             ORDER BY v.acquisition_date DESC, v.created_at DESC",
            VEHICLE_SELECT
        );
        let vehicles = sqlx::query_as::<_, Vehicle>(&sql)
            .bind(status)
            .fetch_all(&self.pool)
            .await?;

        Ok(vehicles)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let sql = format!("{} WHERE v.id = $1", VEHICLE_SELECT);
        let vehicle = sqlx::query_as::<_, Vehicle>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    /// ¿Existe otro vehículo con la misma patente?
    pub async fn license_plate_exists(&self, plate: &str, exclude: Option<Uuid>) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM vehicles WHERE license_plate = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(plate)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn create(&self, request: &VehicleRequest) -> AppResult<Uuid> {
        let (id,): (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO vehicles (id, brand, model, year, license_plate,
                                  acquisition_price_ars, acquisition_price_usd,
                                  suggested_price_ars, suggested_price_usd,
                                  status, acquisition_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'disponible', $10)
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&request.brand)
        .bind(&request.model)
        .bind(request.year)
        .bind(&request.license_plate)
        .bind(request.acquisition_price_ars)
        .bind(request.acquisition_price_usd)
        .bind(request.suggested_price_ars)
        .bind(request.suggested_price_usd)
        .bind(request.acquisition_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| plate_conflict(e, &request.license_plate))?;

        Ok(id)
    }

    /// Actualiza todo menos el estado. Devuelve `false` si el id no existe.
    pub async fn update(&self, id: Uuid, request: &VehicleRequest) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE vehicles
            SET brand = $2, model = $3, year = $4, license_plate = $5,
                acquisition_price_ars = $6, acquisition_price_usd = $7,
                suggested_price_ars = $8, suggested_price_usd = $9,
                acquisition_date = $10
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&request.brand)
        .bind(&request.model)
        .bind(request.year)
        .bind(&request.license_plate)
        .bind(request.acquisition_price_ars)
        .bind(request.acquisition_price_usd)
        .bind(request.suggested_price_ars)
        .bind(request.suggested_price_usd)
        .bind(request.acquisition_date)
        .execute(&self.pool)
        .await
        .map_err(|e| plate_conflict(e, &request.license_plate))?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn has_sales(&self, id: Uuid) -> AppResult<bool> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM sales WHERE vehicle_id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    /// Borra el vehículo y, por cascada, sus gastos
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                on_foreign_key_violation(e, || {
                    AppError::DomainRule(
                        "No se puede eliminar un vehículo con ventas registradas".to_string(),
                    )
                })
            })?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn expenses(&self, id: Uuid) -> AppResult<Vec<VehicleExpense>> {
        let expenses = sqlx::query_as::<_, VehicleExpense>(
            "SELECT * FROM vehicle_expenses WHERE vehicle_id = $1 ORDER BY expense_date DESC",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(expenses)
    }
}
