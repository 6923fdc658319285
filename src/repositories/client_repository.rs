use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::client_dto::ClientRequest;
use crate::models::Client;
use crate::utils::errors::{
    conflict_error, on_foreign_key_violation, on_unique_violation, AppError, AppResult,
};

pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Listado, opcionalmente filtrado por nombre, apellido o DNI
    pub async fn list(&self, search: Option<&str>) -> AppResult<Vec<Client>> {
        let pattern = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", s));

        let clients = sqlx::query_as::<_, Client>(
            r#"
            SELECT * FROM clients
            WHERE $1::text IS NULL
               OR (first_name || ' ' || last_name) ILIKE $1
               OR dni ILIKE $1
            ORDER BY last_name, first_name
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(clients)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Client>> {
        let client = sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(client)
    }

    pub async fn dni_exists(&self, dni: &str, exclude: Option<Uuid>) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM clients WHERE dni = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(dni)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn create(&self, request: &ClientRequest) -> AppResult<Client> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (id, first_name, last_name, dni, phone, email, address, classification)
            VALUES ($1, $2, $3, $4, $5, $6, $7, 'interesado')
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.dni)
        .bind(&request.phone)
        .bind(&request.email)
        .bind(&request.address)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| on_unique_violation(e, || conflict_error("Cliente", "DNI", &request.dni)))?;

        Ok(client)
    }

    pub async fn update(&self, id: Uuid, request: &ClientRequest) -> AppResult<Option<Client>> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            UPDATE clients
            SET first_name = $2, last_name = $3, dni = $4, phone = $5, email = $6, address = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.dni)
        .bind(&request.phone)
        .bind(&request.email)
        .bind(&request.address)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| on_unique_violation(e, || conflict_error("Cliente", "DNI", &request.dni)))?;

        Ok(client)
    }

    pub async fn has_sales(&self, id: Uuid) -> AppResult<bool> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM sales WHERE client_id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                on_foreign_key_violation(e, || {
                    AppError::DomainRule(
                        "No se puede eliminar un cliente con ventas registradas".to_string(),
                    )
                })
            })?;

        Ok(result.rows_affected() > 0)
    }
}
