//! Agrupación mensual de registros monetarios
//!
//! Convierte un conjunto de registros fechados en una serie de meses
//! calendario, en orden cronológico y con relleno en cero: un mes sin
//! registros aparece igual, con total 0.
//!
//! La pertenencia a un mes se decide por el par (año, mes) de la fecha,
//! no por tiempo transcurrido.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

/// Nombres de mes usados en las etiquetas de los gráficos
pub const MONTH_NAMES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

/// Registro con fecha y monto, lo mínimo que necesita el agrupador
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

/// Un mes calendario
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self::new(self.year - 1, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }

    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Último día del mes (el día anterior al primero del mes siguiente)
    pub fn last_day(self) -> Option<NaiveDate> {
        self.next().first_day().and_then(|d| d.pred_opt())
    }

    /// Nombre del mes en castellano
    pub fn label(self) -> &'static str {
        MONTH_NAMES[(self.month.clamp(1, 12) - 1) as usize]
    }

    /// Clave "YYYY-MM" usada en los payloads (`mes`)
    pub fn key(self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// Una celda de la serie mensual
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthBucket<T> {
    pub year: i32,
    pub month: u32,
    pub label: &'static str,
    pub total: T,
}

impl<T> MonthBucket<T> {
    pub fn year_month(&self) -> YearMonth {
        YearMonth::new(self.year, self.month)
    }
}

/// Meses de `from` a `to`, ambos inclusive. Vacío si `from > to`.
pub fn months_between(from: YearMonth, to: YearMonth) -> Vec<YearMonth> {
    let mut months = Vec::new();
    let mut current = from;
    while current <= to {
        months.push(current);
        current = current.next();
    }
    months
}

/// Agrupar sobre una lista de meses dada, sumando con `amount`
pub fn bucket_months<R, T, F>(months: &[YearMonth], records: &[R], amount: F) -> Vec<MonthBucket<T>>
where
    R: Dated,
    T: Default + Copy + std::ops::Add<Output = T>,
    F: Fn(&R) -> T,
{
    let mut buckets: Vec<MonthBucket<T>> = months
        .iter()
        .map(|ym| MonthBucket {
            year: ym.year,
            month: ym.month,
            label: ym.label(),
            total: T::default(),
        })
        .collect();

    for record in records {
        let ym = YearMonth::of(record.date());
        if let Some(index) = months.iter().position(|m| *m == ym) {
            let bucket = &mut buckets[index];
            bucket.total = bucket.total + amount(record);
        }
    }

    buckets
}

/// Serie de 12 meses (enero a diciembre) para `year`
pub fn bucket_by_year<R, T, F>(year: i32, records: &[R], amount: F) -> Vec<MonthBucket<T>>
where
    R: Dated,
    T: Default + Copy + std::ops::Add<Output = T>,
    F: Fn(&R) -> T,
{
    let months = months_between(YearMonth::new(year, 1), YearMonth::new(year, 12));
    bucket_months(&months, records, amount)
}

/// Serie para un rango explícito de fechas (meses inclusive)
pub fn bucket_by_range<R, T, F>(
    from: NaiveDate,
    to: NaiveDate,
    records: &[R],
    amount: F,
) -> Vec<MonthBucket<T>>
where
    R: Dated,
    T: Default + Copy + std::ops::Add<Output = T>,
    F: Fn(&R) -> T,
{
    let months = months_between(YearMonth::of(from), YearMonth::of(to));
    bucket_months(&months, records, amount)
}

/// Serie que cubre desde el mes del registro más viejo al del más nuevo.
/// Sin registros no hay meses que mostrar.
pub fn bucket_spanning<R, T, F>(records: &[R], amount: F) -> Vec<MonthBucket<T>>
where
    R: Dated,
    T: Default + Copy + std::ops::Add<Output = T>,
    F: Fn(&R) -> T,
{
    let min = records.iter().map(Dated::date).min();
    let max = records.iter().map(Dated::date).max();
    match (min, max) {
        (Some(from), Some(to)) => bucket_by_range(from, to, records, amount),
        _ => Vec::new(),
    }
}

/// Atajo para el caso más común: sumar un `Decimal`
pub fn sum_by_year<R, F>(year: i32, records: &[R], amount: F) -> Vec<MonthBucket<Decimal>>
where
    R: Dated,
    F: Fn(&R) -> Decimal,
{
    bucket_by_year(year, records, amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    struct Entry {
        date: NaiveDate,
        amount: Decimal,
    }

    impl Dated for Entry {
        fn date(&self) -> NaiveDate {
            self.date
        }
    }

    fn entry(y: i32, m: u32, d: u32, amount: Decimal) -> Entry {
        Entry {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            amount,
        }
    }

    #[test]
    fn test_empty_year_has_twelve_zero_buckets() {
        let buckets = sum_by_year(2024, &Vec::<Entry>::new(), |e| e.amount);

        assert_eq!(buckets.len(), 12);
        assert!(buckets.iter().all(|b| b.total == Decimal::ZERO));
        assert_eq!(buckets[0].label, "Enero");
        assert_eq!(buckets[11].label, "Diciembre");
        assert!(buckets.windows(2).all(|w| w[0].year_month() < w[1].year_month()));
    }

    #[test]
    fn test_records_land_in_their_calendar_month() {
        let records = vec![
            entry(2024, 3, 1, dec!(100)),
            entry(2024, 3, 31, dec!(50)),
            entry(2024, 4, 1, dec!(10)),
            entry(2023, 3, 15, dec!(999)), // otro año, se ignora
            entry(2025, 1, 1, dec!(999)),
        ];

        let buckets = sum_by_year(2024, &records, |e| e.amount);

        assert_eq!(buckets[2].total, dec!(150));
        assert_eq!(buckets[3].total, dec!(10));
        let total: Decimal = buckets.iter().map(|b| b.total).sum();
        assert_eq!(total, dec!(160));
    }

    #[test]
    fn test_range_crosses_year_boundary() {
        let records = vec![entry(2023, 11, 20, dec!(5)), entry(2024, 2, 2, dec!(7))];

        let buckets = bucket_by_range(
            NaiveDate::from_ymd_opt(2023, 11, 15).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            &records,
            |e| e.amount,
        );

        let keys: Vec<String> = buckets.iter().map(|b| b.year_month().key()).collect();
        assert_eq!(keys, vec!["2023-11", "2023-12", "2024-01", "2024-02"]);
        assert_eq!(buckets[0].total, dec!(5));
        assert_eq!(buckets[1].total, Decimal::ZERO);
        assert_eq!(buckets[3].total, dec!(7));
    }

    #[test]
    fn test_spanning_uses_min_and_max_dates() {
        let records = vec![
            entry(2024, 6, 30, dec!(1)),
            entry(2024, 4, 1, dec!(2)),
            entry(2024, 6, 1, dec!(3)),
        ];

        let buckets = bucket_spanning(&records, |e| e.amount);

        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets[0].label, "Abril");
        assert_eq!(buckets[1].total, Decimal::ZERO);
        assert_eq!(buckets[2].total, dec!(4));

        assert!(bucket_spanning(&Vec::<Entry>::new(), |e| e.amount).is_empty());
    }

    #[test]
    fn test_counting_with_integer_totals() {
        let records = vec![entry(2024, 5, 1, dec!(1)), entry(2024, 5, 9, dec!(1))];
        let buckets: Vec<MonthBucket<i64>> = bucket_by_year(2024, &records, |_| 1);
        assert_eq!(buckets[4].total, 2);
    }

    #[test]
    fn test_year_month_helpers() {
        let dec_2023 = YearMonth::new(2023, 12);
        assert_eq!(dec_2023.next(), YearMonth::new(2024, 1));
        assert_eq!(YearMonth::new(2024, 1).previous(), dec_2023);
        assert_eq!(
            YearMonth::new(2024, 2).last_day(),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert!(months_between(YearMonth::new(2024, 5), YearMonth::new(2024, 4)).is_empty());
    }
}
