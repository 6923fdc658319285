//! Modelo de Client

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Clasificación comercial del cliente - mapea al ENUM client_classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "client_classification")]
pub enum ClientClassification {
    #[serde(rename = "interesado")]
    #[sqlx(rename = "interesado")]
    Interested,
    #[serde(rename = "comprador")]
    #[sqlx(rename = "comprador")]
    Buyer,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Client {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub dni: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub classification: ClientClassification,
    pub created_at: DateTime<Utc>,
}

impl Client {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
