//! Payloads de los endpoints de estadísticas
//!
//! Los nombres de campo siguen los que consume el dashboard
//! (`mes`, `nombreMes`, `gastosCorrientes`, ...).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::services::monthly_bucketer::{MonthBucket, YearMonth};
use crate::services::reporting_source::SellerRef;
use crate::services::trend::{Trend, TrendComparison};
use crate::utils::errors::{field_error, AppResult};

/// `?anio=` opcional de los reportes por año
///
/// Se recibe como texto para decidir acá qué hacer con `?anio=` vacío o
/// con basura: las series responden 422 y el balance cae al año actual.
#[derive(Debug, Default, Deserialize)]
pub struct YearQuery {
    pub anio: Option<String>,
}

impl YearQuery {
    /// Año pedido; vacío cuenta como ausente
    pub fn year(&self) -> AppResult<Option<i32>> {
        match self.anio.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse::<i32>()
                .map(Some)
                .map_err(|_| field_error("anio", format!("'{}' no es un año válido", raw))),
        }
    }

    /// Variante del balance: lo que no se pueda leer se ignora
    pub fn lenient_year(&self) -> Option<i32> {
        self.year().unwrap_or_else(|_| {
            warn!("Año de balance ilegible ({:?}), se usa el actual", self.anio);
            None
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleStats {
    pub disponibles: i64,
    pub ingresados_mes_actual: i64,
    pub ingresados_mes_anterior: i64,
    pub porcentaje: Decimal,
    pub tendencia: Trend,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesStats {
    pub cantidad_mes_actual: i64,
    pub cantidad_mes_anterior: i64,
    pub porcentaje: Decimal,
    pub tendencia: Trend,
    pub monto_ars_mes_actual: Decimal,
    pub monto_usd_mes_actual: Decimal,
    pub monto_ars_mes_anterior: Decimal,
    pub monto_usd_mes_anterior: Decimal,
    pub porcentaje_monto: Decimal,
    pub tendencia_monto: Trend,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseStats {
    pub total_mes_actual: Decimal,
    pub total_mes_anterior: Decimal,
    pub gastos_corrientes_mes_actual: Decimal,
    pub gastos_vehiculos_mes_actual: Decimal,
    pub porcentaje: Decimal,
    pub tendencia: Trend,
}

/// Punto de una serie histórica: `{mes, nombreMes, total}`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalPoint {
    pub mes: String,
    pub nombre_mes: String,
    pub total: Decimal,
}

impl From<MonthBucket<Decimal>> for HistoricalPoint {
    fn from(bucket: MonthBucket<Decimal>) -> Self {
        Self {
            mes: bucket.year_month().key(),
            nombre_mes: bucket.label.to_string(),
            total: bucket.total,
        }
    }
}

/// Punto de la serie combinada ventas vs. gastos
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesExpensesPoint {
    pub mes: String,
    pub nombre_mes: String,
    pub ventas: Decimal,
    pub gastos_corrientes: Decimal,
    pub gastos_vehiculos: Decimal,
    pub costo_adquisicion: Decimal,
    pub gasto_total: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitSummary {
    pub desde: NaiveDate,
    pub hasta: NaiveDate,
    pub cantidad_ventas: i64,
    pub ganancia_ars: Decimal,
    pub ganancia_usd: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentMonthProfit {
    #[serde(flatten)]
    pub resumen: ProfitSummary,
    pub ganancia_mes_anterior_ars: Decimal,
    pub porcentaje: Decimal,
    pub tendencia: Trend,
}

impl CurrentMonthProfit {
    pub fn new(resumen: ProfitSummary, comparison: TrendComparison) -> Self {
        Self {
            resumen,
            ganancia_mes_anterior_ars: comparison.previous,
            porcentaje: comparison.percentage,
            tendencia: comparison.trend,
        }
    }
}

/// Números de un vendedor en un mes
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerMonthBalance {
    pub vendedor_id: Uuid,
    pub nombre: String,
    pub cantidad: i64,
    pub total_ventas_ars: Decimal,
    pub total_ventas_usd: Decimal,
    pub ganancia_ars: Decimal,
    pub ganancia_usd: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceMonth {
    pub mes: String,
    pub nombre_mes: String,
    pub vendedores: Vec<SellerMonthBalance>,
    pub cantidad: i64,
    pub total_ventas_ars: Decimal,
    pub total_ventas_usd: Decimal,
    pub ganancia_ars: Decimal,
    pub ganancia_usd: Decimal,
}

impl BalanceMonth {
    pub fn empty(ym: YearMonth) -> Self {
        Self {
            mes: ym.key(),
            nombre_mes: ym.label().to_string(),
            vendedores: Vec::new(),
            cantidad: 0,
            total_ventas_ars: Decimal::ZERO,
            total_ventas_usd: Decimal::ZERO,
            ganancia_ars: Decimal::ZERO,
            ganancia_usd: Decimal::ZERO,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceTotals {
    pub cantidad: i64,
    pub total_ventas_ars: Decimal,
    pub total_ventas_usd: Decimal,
    pub ganancia_ars: Decimal,
    pub ganancia_usd: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceReport {
    pub anio: i32,
    pub anios_disponibles: Vec<i32>,
    pub vendedores: Vec<SellerRef>,
    pub meses: Vec<BalanceMonth>,
    pub totales: BalanceTotals,
}
