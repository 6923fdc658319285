//! Alta y baja de ventas contra PostgreSQL
//!
//! Corren cuando `DATABASE_URL` está definida al compilar (ver `build.rs`);
//! sin base quedan ignorados.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use sqlx::PgPool;
use uuid::Uuid;

use dealership_backoffice::dto::sale_dto::CreateSaleRequest;
use dealership_backoffice::models::{ClientClassification, VehicleStatus};
use dealership_backoffice::services::sale_service::SaleService;
use dealership_backoffice::utils::errors::AppError;

struct Fixture {
    vehicle_id: Uuid,
    client_id: Uuid,
    seller_id: Uuid,
}

async fn seed(pool: &PgPool) -> Fixture {
    let seller_id = Uuid::new_v4();
    let password_hash = bcrypt::hash("secreto", 4).unwrap();
    sqlx::query(
        "INSERT INTO users (id, full_name, email, password_hash, active) VALUES ($1, 'Ana Gómez', 'ana@example.com', $2, true)",
    )
    .bind(seller_id)
    .bind(password_hash)
    .execute(pool)
    .await
    .unwrap();

    let client_id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO clients (id, first_name, last_name, dni, classification) VALUES ($1, 'Juan', 'Pérez', '12345678', 'interesado')",
    )
    .bind(client_id)
    .execute(pool)
    .await
    .unwrap();

    let vehicle_id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO vehicles (id, brand, model, year, license_plate,
                              acquisition_price_ars, acquisition_price_usd,
                              suggested_price_ars, suggested_price_usd,
                              status, acquisition_date)
        VALUES ($1, 'Ford', 'Focus', 2018, 'ABC123', 1000, 100, 1500, 150, 'disponible', '2024-01-05')
        "#,
    )
    .bind(vehicle_id)
    .execute(pool)
    .await
    .unwrap();

    sqlx::query(
        r#"
        INSERT INTO vehicle_expenses (id, vehicle_id, expense_date, description, category, amount_ars, amount_usd)
        VALUES ($1, $2, '2024-01-10', 'Service', 'mecanica', 100, 10)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(vehicle_id)
    .execute(pool)
    .await
    .unwrap();

    Fixture {
        vehicle_id,
        client_id,
        seller_id,
    }
}

fn request(fixture: &Fixture) -> CreateSaleRequest {
    CreateSaleRequest {
        vehicle_id: fixture.vehicle_id,
        client_id: fixture.client_id,
        seller_id: fixture.seller_id,
        sale_price_ars: dec!(1200),
        sale_price_usd: dec!(120),
        sale_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        notes: None,
    }
}

async fn states(pool: &PgPool, fixture: &Fixture) -> (VehicleStatus, ClientClassification) {
    let (status,): (VehicleStatus,) = sqlx::query_as("SELECT status FROM vehicles WHERE id = $1")
        .bind(fixture.vehicle_id)
        .fetch_one(pool)
        .await
        .unwrap();
    let (classification,): (ClientClassification,) =
        sqlx::query_as("SELECT classification FROM clients WHERE id = $1")
            .bind(fixture.client_id)
            .fetch_one(pool)
            .await
            .unwrap();
    (status, classification)
}

#[sqlx::test(migrations = "./migrations")]
#[cfg_attr(not(database_tests), ignore = "requiere DATABASE_URL")]
async fn test_sale_create_and_delete_flip_vehicle_and_client(pool: PgPool) {
    let fixture = seed(&pool).await;
    let service = SaleService::new(pool.clone());

    let (sale, profit) = service.create(&request(&fixture)).await.unwrap();
    assert_eq!(sale.gain_ars, dec!(100));
    assert_eq!(sale.gain_usd, dec!(10));
    assert_eq!(profit.margin_pct_ars, Some(dec!(10)));
    assert_eq!(
        states(&pool, &fixture).await,
        (VehicleStatus::Sold, ClientClassification::Buyer)
    );

    service.delete(sale.id).await.unwrap();
    assert_eq!(
        states(&pool, &fixture).await,
        (VehicleStatus::Available, ClientClassification::Interested)
    );
}

#[sqlx::test(migrations = "./migrations")]
#[cfg_attr(not(database_tests), ignore = "requiere DATABASE_URL")]
async fn test_vehicle_cannot_be_sold_twice(pool: PgPool) {
    let fixture = seed(&pool).await;
    let service = SaleService::new(pool.clone());

    service.create(&request(&fixture)).await.unwrap();
    let second = service.create(&request(&fixture)).await;

    assert!(matches!(second, Err(AppError::DomainRule(_))));
}

#[sqlx::test(migrations = "./migrations")]
#[cfg_attr(not(database_tests), ignore = "requiere DATABASE_URL")]
async fn test_unknown_references_are_reported_by_field(pool: PgPool) {
    let fixture = seed(&pool).await;
    let service = SaleService::new(pool.clone());

    let mut req = request(&fixture);
    req.client_id = Uuid::new_v4();
    assert!(matches!(
        service.create(&req).await,
        Err(AppError::ClientNotFound(_))
    ));

    let mut req = request(&fixture);
    req.vehicle_id = Uuid::new_v4();
    assert!(matches!(
        service.create(&req).await,
        Err(AppError::VehicleNotFound(_))
    ));

    // Un rechazo no deja al vehículo vendido
    assert_eq!(
        states(&pool, &fixture).await,
        (VehicleStatus::Available, ClientClassification::Interested)
    );
}

#[sqlx::test(migrations = "./migrations")]
#[cfg_attr(not(database_tests), ignore = "requiere DATABASE_URL")]
async fn test_failed_write_rolls_back_the_whole_sale(pool: PgPool) {
    let fixture = seed(&pool).await;
    let service = SaleService::new(pool.clone());

    // La última escritura de la transacción (clasificación del cliente) falla
    sqlx::query(
        r#"
        CREATE FUNCTION reject_client_update() RETURNS trigger AS $$
        BEGIN
            RAISE EXCEPTION 'cliente bloqueado';
        END;
        $$ LANGUAGE plpgsql
        "#,
    )
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query(
        "CREATE TRIGGER clients_locked BEFORE UPDATE ON clients FOR EACH ROW EXECUTE FUNCTION reject_client_update()",
    )
    .execute(&pool)
    .await
    .unwrap();

    let result = service.create(&request(&fixture)).await;
    assert!(matches!(result, Err(AppError::Database(_))));

    let (sales,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sales")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(sales, 0);
    assert_eq!(
        states(&pool, &fixture).await,
        (VehicleStatus::Available, ClientClassification::Interested)
    );
}
