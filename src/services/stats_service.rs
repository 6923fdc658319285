//! Facade de reportes financieros
//!
//! Compone el agrupador mensual, el comparador de tendencias y los datos de
//! un `ReportingSource` para armar los payloads del dashboard. Nunca falla
//! por falta de datos: sin registros todas las series salen en cero.
//!
//! `today` se recibe como parámetro para que los resultados no dependan del
//! reloj del servidor.

use std::ops::Add;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use futures::try_join;
use rust_decimal::Decimal;
use tracing::debug;

use crate::dto::stats_dto::{
    BalanceMonth, BalanceReport, BalanceTotals, CurrentMonthProfit, ExpenseStats,
    HistoricalPoint, ProfitSummary, SalesExpensesPoint, SalesStats, SellerMonthBalance,
    VehicleStats,
};
use crate::services::monthly_bucketer::{
    bucket_by_year, months_between, sum_by_year, MonthBucket, YearMonth,
};
use crate::services::profit_calculator::DualAmount;
use crate::services::reporting_source::{ReportingSource, SaleRecord};
use crate::services::trend::{compare, compare_counts};
use crate::utils::errors::{AppError, AppResult};

/// Acumulado de ventas de un vendedor en un mes
#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct Tally {
    count: i64,
    sales: DualAmount,
    gain: DualAmount,
}

impl Tally {
    fn of(sale: &SaleRecord) -> Self {
        Self {
            count: 1,
            sales: sale.sale_price(),
            gain: sale.gain(),
        }
    }
}

impl Add for Tally {
    type Output = Tally;

    fn add(self, rhs: Tally) -> Tally {
        Tally {
            count: self.count + rhs.count,
            sales: self.sales + rhs.sales,
            gain: self.gain + rhs.gain,
        }
    }
}

/// Primer y último día de un mes
fn month_window(ym: YearMonth) -> AppResult<(NaiveDate, NaiveDate)> {
    match (ym.first_day(), ym.last_day()) {
        (Some(from), Some(to)) => Ok((from, to)),
        _ => Err(AppError::Internal(format!("Mes inválido: {}", ym.key()))),
    }
}

/// 1 de enero y 31 de diciembre de un año
fn year_window(year: i32) -> AppResult<(NaiveDate, NaiveDate)> {
    let (from, _) = month_window(YearMonth::new(year, 1))?;
    let (_, to) = month_window(YearMonth::new(year, 12))?;
    Ok((from, to))
}

fn sum_sales(sales: &[SaleRecord]) -> (DualAmount, DualAmount) {
    let price = sales.iter().map(SaleRecord::sale_price).sum();
    let gain = sales.iter().map(SaleRecord::gain).sum();
    (price, gain)
}

/// Año del reporte: el pedido o, si no vino, el actual
pub fn resolve_year(requested: Option<i32>, today: NaiveDate) -> i32 {
    requested.unwrap_or_else(|| today.year())
}

pub struct StatsService {
    source: Arc<dyn ReportingSource>,
}

impl StatsService {
    pub fn new(source: Arc<dyn ReportingSource>) -> Self {
        Self { source }
    }

    /// Vehículos ingresados este mes vs. el anterior, y stock disponible
    pub async fn vehicle_stats(&self, today: NaiveDate) -> AppResult<VehicleStats> {
        let current = YearMonth::of(today);
        let (current_from, current_to) = month_window(current)?;
        let (previous_from, previous_to) = month_window(current.previous())?;

        let (current_intakes, previous_intakes, available) = try_join!(
            self.source.vehicle_intakes_between(current_from, current_to),
            self.source.vehicle_intakes_between(previous_from, previous_to),
            self.source.count_available_vehicles(),
        )?;

        let current_count = current_intakes.len() as i64;
        let previous_count = previous_intakes.len() as i64;
        let comparison = compare_counts(current_count, previous_count);

        Ok(VehicleStats {
            disponibles: available,
            ingresados_mes_actual: current_count,
            ingresados_mes_anterior: previous_count,
            porcentaje: comparison.percentage,
            tendencia: comparison.trend,
        })
    }

    /// Cantidad y monto de ventas de este mes vs. el anterior
    pub async fn sales_stats(&self, today: NaiveDate) -> AppResult<SalesStats> {
        let current = YearMonth::of(today);
        let (previous_from, _) = month_window(current.previous())?;
        let (_, current_to) = month_window(current)?;

        let sales = self.source.sales_between(previous_from, current_to).await?;
        let (current_sales, previous_sales): (Vec<SaleRecord>, Vec<SaleRecord>) = sales
            .into_iter()
            .partition(|s| YearMonth::of(s.sale_date) == current);

        let (current_amount, _) = sum_sales(&current_sales);
        let (previous_amount, _) = sum_sales(&previous_sales);

        let by_count = compare_counts(current_sales.len() as i64, previous_sales.len() as i64);
        let by_amount = compare(current_amount.ars, previous_amount.ars);

        Ok(SalesStats {
            cantidad_mes_actual: current_sales.len() as i64,
            cantidad_mes_anterior: previous_sales.len() as i64,
            porcentaje: by_count.percentage,
            tendencia: by_count.trend,
            monto_ars_mes_actual: current_amount.ars,
            monto_usd_mes_actual: current_amount.usd,
            monto_ars_mes_anterior: previous_amount.ars,
            monto_usd_mes_anterior: previous_amount.usd,
            porcentaje_monto: by_amount.percentage,
            tendencia_monto: by_amount.trend,
        })
    }

    /// Gastos corrientes + gastos de vehículos (ARS) de este mes vs. el anterior
    pub async fn expense_stats(&self, today: NaiveDate) -> AppResult<ExpenseStats> {
        let current = YearMonth::of(today);
        let (previous_from, _) = month_window(current.previous())?;
        let (_, current_to) = month_window(current)?;

        let (current_expenses, vehicle_expenses) = try_join!(
            self.source.current_expenses_between(previous_from, current_to),
            self.source.vehicle_expenses_between(previous_from, current_to),
        )?;

        let mut current_general = Decimal::ZERO;
        let mut previous_general = Decimal::ZERO;
        for expense in &current_expenses {
            if YearMonth::of(expense.expense_date) == current {
                current_general += expense.amount;
            } else {
                previous_general += expense.amount;
            }
        }

        let mut current_vehicle = Decimal::ZERO;
        let mut previous_vehicle = Decimal::ZERO;
        for expense in &vehicle_expenses {
            if YearMonth::of(expense.expense_date) == current {
                current_vehicle += expense.amount_ars;
            } else {
                previous_vehicle += expense.amount_ars;
            }
        }

        let current_total = current_general + current_vehicle;
        let previous_total = previous_general + previous_vehicle;
        let comparison = compare(current_total, previous_total);

        Ok(ExpenseStats {
            total_mes_actual: current_total,
            total_mes_anterior: previous_total,
            gastos_corrientes_mes_actual: current_general,
            gastos_vehiculos_mes_actual: current_vehicle,
            porcentaje: comparison.percentage,
            tendencia: comparison.trend,
        })
    }

    /// Ventas (precio de venta ARS) por mes del año
    pub async fn sales_history(&self, year: i32) -> AppResult<Vec<HistoricalPoint>> {
        let (from, to) = year_window(year)?;
        let sales = self.source.sales_between(from, to).await?;
        debug!("Serie de ventas {}: {} registros", year, sales.len());

        Ok(sum_by_year(year, &sales, |s| s.sale_price_ars)
            .into_iter()
            .map(HistoricalPoint::from)
            .collect())
    }

    /// Gastos corrientes por mes del año
    pub async fn current_expense_history(&self, year: i32) -> AppResult<Vec<HistoricalPoint>> {
        let (from, to) = year_window(year)?;
        let expenses = self.source.current_expenses_between(from, to).await?;

        Ok(sum_by_year(year, &expenses, |e| e.amount)
            .into_iter()
            .map(HistoricalPoint::from)
            .collect())
    }

    /// Gastos de vehículos (ARS) por mes del año
    pub async fn vehicle_expense_history(&self, year: i32) -> AppResult<Vec<HistoricalPoint>> {
        let (from, to) = year_window(year)?;
        let expenses = self.source.vehicle_expenses_between(from, to).await?;

        Ok(sum_by_year(year, &expenses, |e| e.amount_ars)
            .into_iter()
            .map(HistoricalPoint::from)
            .collect())
    }

    /// Serie combinada: ventas contra el costo total del mes
    ///
    /// `costoAdquisicion` es lo que se pagó por los vehículos vendidos en el
    /// mes; `gastoTotal` suma corrientes + vehículos + adquisición.
    pub async fn sales_vs_expenses(&self, year: i32) -> AppResult<Vec<SalesExpensesPoint>> {
        let (from, to) = year_window(year)?;

        let (sales, current_expenses, vehicle_expenses) = try_join!(
            self.source.sales_between(from, to),
            self.source.current_expenses_between(from, to),
            self.source.vehicle_expenses_between(from, to),
        )?;

        let sales_series = sum_by_year(year, &sales, |s| s.sale_price_ars);
        let acquisition_series = sum_by_year(year, &sales, |s| s.acquisition_price_ars);
        let current_series = sum_by_year(year, &current_expenses, |e| e.amount);
        let vehicle_series = sum_by_year(year, &vehicle_expenses, |e| e.amount_ars);

        let points = sales_series
            .into_iter()
            .zip(acquisition_series)
            .zip(current_series)
            .zip(vehicle_series)
            .map(|(((sale, acquisition), current), vehicle)| {
                let ym = sale.year_month();
                SalesExpensesPoint {
                    mes: ym.key(),
                    nombre_mes: sale.label.to_string(),
                    ventas: sale.total,
                    gastos_corrientes: current.total,
                    gastos_vehiculos: vehicle.total,
                    costo_adquisicion: acquisition.total,
                    gasto_total: current.total + vehicle.total + acquisition.total,
                }
            })
            .collect();

        Ok(points)
    }

    async fn profit_between(&self, from: NaiveDate, to: NaiveDate) -> AppResult<ProfitSummary> {
        let sales = self.source.sales_between(from, to).await?;
        let (_, gain) = sum_sales(&sales);

        Ok(ProfitSummary {
            desde: from,
            hasta: to,
            cantidad_ventas: sales.len() as i64,
            ganancia_ars: gain.ars,
            ganancia_usd: gain.usd,
        })
    }

    /// Ganancia acumulada del año hasta hoy
    pub async fn accumulated_profit(&self, today: NaiveDate) -> AppResult<ProfitSummary> {
        let (from, _) = year_window(today.year())?;
        self.profit_between(from, today).await
    }

    /// Ganancia del mes en curso hasta hoy, comparada con el mes anterior completo
    pub async fn current_month_profit(&self, today: NaiveDate) -> AppResult<CurrentMonthProfit> {
        let current = YearMonth::of(today);
        let (from, _) = month_window(current)?;
        let (previous_from, previous_to) = month_window(current.previous())?;

        let (summary, previous) = try_join!(
            self.profit_between(from, today),
            self.profit_between(previous_from, previous_to),
        )?;

        let comparison = compare(summary.ganancia_ars, previous.ganancia_ars);
        Ok(CurrentMonthProfit::new(summary, comparison))
    }

    /// Balance anual por vendedor y por mes
    ///
    /// Sin ventas en el año pedido igual devuelve los 12 meses con cada
    /// vendedor en cero. Sin ventas en ningún año, el único año disponible es
    /// el actual.
    pub async fn balance_report(
        &self,
        requested_year: Option<i32>,
        today: NaiveDate,
    ) -> AppResult<BalanceReport> {
        let year = resolve_year(requested_year, today);
        let (from, to) = year_window(year)?;

        let (mut years, sellers, sales) = try_join!(
            self.source.sale_years(),
            self.source.sellers(),
            self.source.sales_between(from, to),
        )?;

        if years.is_empty() {
            years.push(today.year());
        }

        let mut months: Vec<BalanceMonth> =
            months_between(YearMonth::new(year, 1), YearMonth::new(year, 12))
                .into_iter()
                .map(BalanceMonth::empty)
                .collect();

        let mut totals = BalanceTotals::default();

        for seller in &sellers {
            let seller_sales: Vec<SaleRecord> = sales
                .iter()
                .filter(|s| s.seller_id == seller.id)
                .cloned()
                .collect();
            let buckets: Vec<MonthBucket<Tally>> = bucket_by_year(year, &seller_sales, Tally::of);

            for (month, bucket) in months.iter_mut().zip(buckets) {
                let tally = bucket.total;
                month.vendedores.push(SellerMonthBalance {
                    vendedor_id: seller.id,
                    nombre: seller.full_name.clone(),
                    cantidad: tally.count,
                    total_ventas_ars: tally.sales.ars,
                    total_ventas_usd: tally.sales.usd,
                    ganancia_ars: tally.gain.ars,
                    ganancia_usd: tally.gain.usd,
                });
                month.cantidad += tally.count;
                month.total_ventas_ars += tally.sales.ars;
                month.total_ventas_usd += tally.sales.usd;
                month.ganancia_ars += tally.gain.ars;
                month.ganancia_usd += tally.gain.usd;
            }
        }

        for month in &months {
            totals.cantidad += month.cantidad;
            totals.total_ventas_ars += month.total_ventas_ars;
            totals.total_ventas_usd += month.total_ventas_usd;
            totals.ganancia_ars += month.ganancia_ars;
            totals.ganancia_usd += month.ganancia_usd;
        }

        Ok(BalanceReport {
            anio: year,
            anios_disponibles: years,
            vendedores: sellers,
            meses: months,
            totales: totals,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::reporting_source::{
        CurrentExpenseRecord, InMemoryReportingSource, SellerRef, VehicleExpenseRecord,
        VehicleIntakeRecord,
    };
    use crate::services::trend::Trend;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sale(seller_id: Uuid, on: NaiveDate, price: Decimal, gain: Decimal) -> SaleRecord {
        SaleRecord {
            sale_id: Uuid::new_v4(),
            seller_id,
            sale_date: on,
            sale_price_ars: price,
            sale_price_usd: price / dec!(1000),
            gain_ars: gain,
            gain_usd: gain / dec!(1000),
            acquisition_price_ars: price - gain,
            acquisition_price_usd: (price - gain) / dec!(1000),
        }
    }

    fn service(source: &InMemoryReportingSource) -> StatsService {
        StatsService::new(Arc::new(source.clone()))
    }

    #[tokio::test]
    async fn test_empty_source_yields_zero_series() {
        let source = InMemoryReportingSource::new();
        let stats = service(&source);

        let history = stats.current_expense_history(2024).await.unwrap();
        assert_eq!(history.len(), 12);
        assert!(history.iter().all(|p| p.total == Decimal::ZERO));
        assert_eq!(history[0].mes, "2024-01");
        assert_eq!(history[0].nombre_mes, "Enero");

        let combined = stats.sales_vs_expenses(2024).await.unwrap();
        assert_eq!(combined.len(), 12);
        assert!(combined.iter().all(|p| p.gasto_total == Decimal::ZERO));

        let sales = stats.sales_stats(date(2024, 6, 10)).await.unwrap();
        assert_eq!(sales.cantidad_mes_actual, 0);
        assert_eq!(sales.tendencia, Trend::Neutral);
    }

    #[tokio::test]
    async fn test_accumulated_profit_sums_gains() {
        let source = InMemoryReportingSource::new();
        let seller = Uuid::new_v4();
        source
            .add_sale(sale(seller, date(2024, 2, 10), dec!(1000000), dec!(50000)))
            .await;
        source
            .add_sale(sale(seller, date(2024, 5, 3), dec!(800000), dec!(30000)))
            .await;
        // fuera del año en curso
        source
            .add_sale(sale(seller, date(2023, 12, 30), dec!(500000), dec!(99999)))
            .await;

        let profit = service(&source)
            .accumulated_profit(date(2024, 6, 1))
            .await
            .unwrap();

        assert_eq!(profit.ganancia_ars, dec!(80000));
        assert_eq!(profit.cantidad_ventas, 2);
        assert_eq!(profit.desde, date(2024, 1, 1));
    }

    #[tokio::test]
    async fn test_current_month_profit_against_previous_month() {
        let source = InMemoryReportingSource::new();
        let seller = Uuid::new_v4();
        source
            .add_sale(sale(seller, date(2024, 4, 20), dec!(900000), dec!(40000)))
            .await;
        source
            .add_sale(sale(seller, date(2024, 5, 2), dec!(900000), dec!(60000)))
            .await;
        // posterior a "hoy", no cuenta
        source
            .add_sale(sale(seller, date(2024, 5, 25), dec!(900000), dec!(10000)))
            .await;

        let profit = service(&source)
            .current_month_profit(date(2024, 5, 15))
            .await
            .unwrap();

        assert_eq!(profit.resumen.ganancia_ars, dec!(60000));
        assert_eq!(profit.ganancia_mes_anterior_ars, dec!(40000));
        assert_eq!(profit.porcentaje, dec!(50));
        assert_eq!(profit.tendencia, Trend::Positive);
    }

    #[tokio::test]
    async fn test_sales_vs_expenses_adds_acquisition_cost() {
        let source = InMemoryReportingSource::new();
        source
            .add_sale(sale(Uuid::new_v4(), date(2024, 3, 5), dec!(1200), dec!(100)))
            .await;
        source
            .add_current_expense(CurrentExpenseRecord {
                expense_date: date(2024, 3, 1),
                amount: dec!(300),
            })
            .await;
        source
            .add_vehicle_expense(VehicleExpenseRecord {
                expense_date: date(2024, 3, 20),
                amount_ars: dec!(100),
                amount_usd: dec!(10),
            })
            .await;

        let series = service(&source).sales_vs_expenses(2024).await.unwrap();
        let march = &series[2];

        assert_eq!(march.nombre_mes, "Marzo");
        assert_eq!(march.ventas, dec!(1200));
        assert_eq!(march.costo_adquisicion, dec!(1100));
        assert_eq!(march.gastos_corrientes, dec!(300));
        assert_eq!(march.gastos_vehiculos, dec!(100));
        assert_eq!(march.gasto_total, dec!(1500));
        assert_eq!(series[3].gasto_total, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_vehicle_and_expense_stats() {
        let source = InMemoryReportingSource::new();
        for day in [3, 9] {
            source
                .add_intake(VehicleIntakeRecord {
                    vehicle_id: Uuid::new_v4(),
                    acquisition_date: date(2024, 7, day),
                })
                .await;
        }
        source
            .add_intake(VehicleIntakeRecord {
                vehicle_id: Uuid::new_v4(),
                acquisition_date: date(2024, 6, 28),
            })
            .await;
        source.mark_sold().await;
        source
            .add_current_expense(CurrentExpenseRecord {
                expense_date: date(2024, 6, 10),
                amount: dec!(1000),
            })
            .await;

        let stats = service(&source);
        let vehicles = stats.vehicle_stats(date(2024, 7, 15)).await.unwrap();
        assert_eq!(vehicles.disponibles, 2);
        assert_eq!(vehicles.ingresados_mes_actual, 2);
        assert_eq!(vehicles.ingresados_mes_anterior, 1);
        assert_eq!(vehicles.porcentaje, dec!(100));

        let expenses = stats.expense_stats(date(2024, 7, 15)).await.unwrap();
        assert_eq!(expenses.total_mes_actual, Decimal::ZERO);
        assert_eq!(expenses.total_mes_anterior, dec!(1000));
        assert_eq!(expenses.porcentaje, dec!(-100));
        assert_eq!(expenses.tendencia, Trend::Negative);
    }

    #[tokio::test]
    async fn test_balance_without_data_is_zero_filled_per_seller() {
        let source = InMemoryReportingSource::new();
        let ana = SellerRef {
            id: Uuid::new_v4(),
            full_name: "Ana Gómez".to_string(),
        };
        source.add_seller(ana.clone()).await;

        let report = service(&source)
            .balance_report(None, date(2025, 3, 1))
            .await
            .unwrap();

        assert_eq!(report.anio, 2025);
        assert_eq!(report.anios_disponibles, vec![2025]);
        assert_eq!(report.meses.len(), 12);
        for month in &report.meses {
            assert_eq!(month.vendedores.len(), 1);
            assert_eq!(month.vendedores[0].vendedor_id, ana.id);
            assert_eq!(month.vendedores[0].cantidad, 0);
            assert_eq!(month.ganancia_ars, Decimal::ZERO);
        }
        assert_eq!(report.totales.cantidad, 0);
    }

    #[tokio::test]
    async fn test_balance_groups_by_seller_and_month() {
        let source = InMemoryReportingSource::new();
        let ana = SellerRef {
            id: Uuid::new_v4(),
            full_name: "Ana".to_string(),
        };
        let beto = SellerRef {
            id: Uuid::new_v4(),
            full_name: "Beto".to_string(),
        };
        source.add_seller(ana.clone()).await;
        source.add_seller(beto.clone()).await;
        source
            .add_sale(sale(ana.id, date(2023, 2, 1), dec!(1000), dec!(100)))
            .await;
        source
            .add_sale(sale(ana.id, date(2023, 2, 15), dec!(2000), dec!(200)))
            .await;
        source
            .add_sale(sale(beto.id, date(2023, 11, 5), dec!(500), dec!(50)))
            .await;
        source
            .add_sale(sale(beto.id, date(2024, 1, 5), dec!(700), dec!(70)))
            .await;

        let report = service(&source)
            .balance_report(Some(2023), date(2024, 6, 1))
            .await
            .unwrap();

        assert_eq!(report.anios_disponibles, vec![2024, 2023]);
        let february = &report.meses[1];
        assert_eq!(february.cantidad, 2);
        assert_eq!(february.vendedores[0].ganancia_ars, dec!(300));
        assert_eq!(february.vendedores[1].cantidad, 0);
        assert_eq!(report.meses[10].vendedores[1].total_ventas_ars, dec!(500));
        assert_eq!(report.totales.cantidad, 3);
        assert_eq!(report.totales.ganancia_ars, dec!(350));
    }
}
