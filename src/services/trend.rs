//! Comparación período actual vs. período anterior
//!
//! Reglas de porcentaje (se respetan tal cual, incluido el trato asimétrico
//! de los ceros):
//!
//! | anterior | actual | porcentaje | tendencia |
//! |----------|--------|------------|-----------|
//! | 0        | > 0    | 100        | positive  |
//! | 0        | 0      | 0          | neutral   |
//! | 0        | < 0    | -100       | negative  |
//! | > 0      | 0      | -100       | negative  |
//! | otro     | otro   | (a−p)/p×100 redondeado a 2 decimales | por signo |

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Positive,
    Negative,
    Neutral,
}

impl Trend {
    fn from_sign(value: Decimal) -> Self {
        if value > Decimal::ZERO {
            Trend::Positive
        } else if value < Decimal::ZERO {
            Trend::Negative
        } else {
            Trend::Neutral
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendComparison {
    pub current: Decimal,
    pub previous: Decimal,
    pub delta: Decimal,
    pub percentage: Decimal,
    pub trend: Trend,
}

pub fn compare(current: Decimal, previous: Decimal) -> TrendComparison {
    let delta = current - previous;

    let (percentage, trend) = if previous.is_zero() {
        if current > Decimal::ZERO {
            (Decimal::ONE_HUNDRED, Trend::Positive)
        } else if current.is_zero() {
            (Decimal::ZERO, Trend::Neutral)
        } else {
            (-Decimal::ONE_HUNDRED, Trend::Negative)
        }
    } else if current.is_zero() && previous > Decimal::ZERO {
        (-Decimal::ONE_HUNDRED, Trend::Negative)
    } else {
        let percentage = (delta / previous * Decimal::ONE_HUNDRED).round_dp(2);
        (percentage, Trend::from_sign(percentage))
    };

    TrendComparison {
        current,
        previous,
        delta,
        percentage,
        trend,
    }
}

/// Variante para conteos (vehículos ingresados, cantidad de ventas)
pub fn compare_counts(current: i64, previous: i64) -> TrendComparison {
    compare(Decimal::from(current), Decimal::from(previous))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_both_zero_is_neutral() {
        let result = compare(dec!(0), dec!(0));
        assert_eq!(result.percentage, dec!(0));
        assert_eq!(result.trend, Trend::Neutral);
    }

    #[test]
    fn test_growth_from_zero_is_one_hundred_percent() {
        let result = compare(dec!(1000), dec!(0));
        assert_eq!(result.percentage, dec!(100));
        assert_eq!(result.trend, Trend::Positive);
        assert_eq!(result.delta, dec!(1000));
    }

    #[test]
    fn test_drop_to_zero_is_minus_one_hundred_percent() {
        let result = compare(dec!(0), dec!(1000));
        assert_eq!(result.percentage, dec!(-100));
        assert_eq!(result.trend, Trend::Negative);
    }

    #[test]
    fn test_loss_from_zero_is_minus_one_hundred_percent() {
        let result = compare(dec!(-50), dec!(0));
        assert_eq!(result.percentage, dec!(-100));
        assert_eq!(result.trend, Trend::Negative);
        assert_eq!(result.delta, dec!(-50));
    }

    #[test]
    fn test_regular_percentages() {
        let up = compare(dec!(1500), dec!(1000));
        assert_eq!(up.percentage, dec!(50));
        assert_eq!(up.trend, Trend::Positive);

        let down = compare(dec!(750), dec!(1000));
        assert_eq!(down.percentage, dec!(-25));
        assert_eq!(down.trend, Trend::Negative);

        let flat = compare(dec!(1000), dec!(1000));
        assert_eq!(flat.percentage, dec!(0));
        assert_eq!(flat.trend, Trend::Neutral);
    }

    #[test]
    fn test_percentage_is_rounded_to_two_decimals() {
        let result = compare(dec!(4), dec!(3));
        assert_eq!(result.percentage, dec!(33.33));
    }

    #[test]
    fn test_counts() {
        let result = compare_counts(3, 2);
        assert_eq!(result.percentage, dec!(50));
        assert_eq!(result.trend, Trend::Positive);
    }

    #[test]
    fn test_trend_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Trend::Positive).unwrap(), "\"positive\"");
    }
}
