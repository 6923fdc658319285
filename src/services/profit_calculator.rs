//! Cálculo de ganancia por venta
//!
//! ARS y USD se calculan de forma independiente: no hay conversión de moneda
//! en ningún punto.
//!
//! ```text
//! ganancia = precio_venta − precio_adquisición − gastos_acumulados
//! margen % = ganancia / precio_adquisición × 100   (None si adquisición = 0)
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Monto expresado en las dos monedas de la concesionaria
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DualAmount {
    pub ars: Decimal,
    pub usd: Decimal,
}

impl DualAmount {
    pub fn new(ars: Decimal, usd: Decimal) -> Self {
        Self { ars, usd }
    }

    pub fn zero() -> Self {
        Self::default()
    }
}

impl std::ops::Add for DualAmount {
    type Output = DualAmount;

    fn add(self, rhs: DualAmount) -> DualAmount {
        DualAmount::new(self.ars + rhs.ars, self.usd + rhs.usd)
    }
}

impl std::ops::Sub for DualAmount {
    type Output = DualAmount;

    fn sub(self, rhs: DualAmount) -> DualAmount {
        DualAmount::new(self.ars - rhs.ars, self.usd - rhs.usd)
    }
}

impl std::iter::Sum for DualAmount {
    fn sum<I: Iterator<Item = DualAmount>>(iter: I) -> Self {
        iter.fold(DualAmount::zero(), |acc, x| acc + x)
    }
}

/// Resultado del cálculo para una venta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitBreakdown {
    pub gain_ars: Decimal,
    pub gain_usd: Decimal,
    /// `None` cuando el precio de adquisición en ARS es 0
    pub margin_pct_ars: Option<Decimal>,
    /// `None` cuando el precio de adquisición en USD es 0
    pub margin_pct_usd: Option<Decimal>,
}

/// Porcentaje de `part` sobre `base`; `None` si la base es 0
pub fn percentage_of(part: Decimal, base: Decimal) -> Option<Decimal> {
    if base.is_zero() {
        return None;
    }
    part.checked_div(base)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(|pct| pct.normalize())
}

pub fn calculate_profit(
    acquisition: DualAmount,
    expenses: DualAmount,
    sale_price: DualAmount,
) -> ProfitBreakdown {
    let gain = sale_price - acquisition - expenses;

    ProfitBreakdown {
        gain_ars: gain.ars,
        gain_usd: gain.usd,
        margin_pct_ars: percentage_of(gain.ars, acquisition.ars),
        margin_pct_usd: percentage_of(gain.usd, acquisition.usd),
    }
}
