//! Constraints de la base como última barrera ante altas concurrentes
//!
//! Se llama directo al repositorio, salteando el chequeo previo del
//! controller, para reproducir lo que pasa cuando dos requests se cruzan.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use sqlx::PgPool;
use uuid::Uuid;

use dealership_backoffice::dto::client_dto::ClientRequest;
use dealership_backoffice::dto::expense_dto::VehicleExpenseRequest;
use dealership_backoffice::dto::vehicle_dto::VehicleRequest;
use dealership_backoffice::repositories::client_repository::ClientRepository;
use dealership_backoffice::repositories::expense_repository::VehicleExpenseRepository;
use dealership_backoffice::repositories::vehicle_repository::VehicleRepository;
use dealership_backoffice::utils::errors::AppError;

fn client(dni: &str) -> ClientRequest {
    ClientRequest {
        first_name: "Juan".to_string(),
        last_name: "Pérez".to_string(),
        dni: dni.to_string(),
        phone: None,
        email: None,
        address: None,
    }
}

fn vehicle(plate: &str) -> VehicleRequest {
    VehicleRequest {
        brand: "Ford".to_string(),
        model: "Focus".to_string(),
        year: 2018,
        license_plate: plate.to_string(),
        acquisition_price_ars: dec!(1000),
        acquisition_price_usd: dec!(100),
        suggested_price_ars: dec!(1500),
        suggested_price_usd: dec!(150),
        acquisition_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
    }
}

#[sqlx::test(migrations = "./migrations")]
#[cfg_attr(not(database_tests), ignore = "requiere DATABASE_URL")]
async fn test_duplicate_dni_is_a_conflict(pool: PgPool) {
    let repository = ClientRepository::new(pool);
    repository.create(&client("12345678")).await.unwrap();

    let second = repository.create(&client("12345678")).await;
    assert!(matches!(second, Err(AppError::Conflict(_))));

    let other = repository.create(&client("87654321")).await.unwrap();
    let renamed = repository.update(other.id, &client("12345678")).await;
    assert!(matches!(renamed, Err(AppError::Conflict(_))));
}

#[sqlx::test(migrations = "./migrations")]
#[cfg_attr(not(database_tests), ignore = "requiere DATABASE_URL")]
async fn test_duplicate_plate_is_a_conflict(pool: PgPool) {
    let repository = VehicleRepository::new(pool);
    repository.create(&vehicle("ABC123")).await.unwrap();

    let second = repository.create(&vehicle("ABC123")).await;
    assert!(matches!(second, Err(AppError::Conflict(_))));
}

#[sqlx::test(migrations = "./migrations")]
#[cfg_attr(not(database_tests), ignore = "requiere DATABASE_URL")]
async fn test_deleting_a_sold_vehicle_is_a_domain_rule(pool: PgPool) {
    let vehicles = VehicleRepository::new(pool.clone());
    let clients = ClientRepository::new(pool.clone());
    let vehicle_id = vehicles.create(&vehicle("ABC123")).await.unwrap();
    let client = clients.create(&client("12345678")).await.unwrap();

    let seller_id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO users (id, full_name, email, password_hash, active) VALUES ($1, 'Ana Gómez', 'ana@example.com', 'x', true)",
    )
    .bind(seller_id)
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query(
        r#"
        INSERT INTO sales (id, vehicle_id, client_id, seller_id, sale_date,
                           sale_price_ars, sale_price_usd, gain_ars, gain_usd)
        VALUES ($1, $2, $3, $4, '2024-02-01', 1200, 120, 200, 20)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(vehicle_id)
    .bind(client.id)
    .bind(seller_id)
    .execute(&pool)
    .await
    .unwrap();

    assert!(matches!(
        vehicles.delete(vehicle_id).await,
        Err(AppError::DomainRule(_))
    ));
    assert!(matches!(
        clients.delete(client.id).await,
        Err(AppError::DomainRule(_))
    ));
}

#[sqlx::test(migrations = "./migrations")]
#[cfg_attr(not(database_tests), ignore = "requiere DATABASE_URL")]
async fn test_expense_for_missing_vehicle_is_not_found(pool: PgPool) {
    let repository = VehicleExpenseRepository::new(pool);
    let request = VehicleExpenseRequest {
        vehicle_id: Uuid::new_v4(),
        expense_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        description: "Service".to_string(),
        category: "mecanica".to_string(),
        amount_ars: dec!(100),
        amount_usd: dec!(10),
    };

    assert!(matches!(
        repository.create(&request).await,
        Err(AppError::VehicleNotFound(_))
    ));
}
