use chrono::{Datelike, NaiveDate};
use tracing::warn;

use crate::dto::stats_dto::{
    BalanceReport, CurrentMonthProfit, ExpenseStats, HistoricalPoint, ProfitSummary,
    SalesExpensesPoint, SalesStats, VehicleStats,
};
use crate::services::stats_service::StatsService;
use crate::utils::errors::{validation_error, AppResult};
use crate::utils::validation::validate_report_year;

pub struct StatsController {
    service: StatsService,
    today: NaiveDate,
}

impl StatsController {
    /// `today` es la fecha de negocio (ver `EnvironmentConfig::today`)
    pub fn at(service: StatsService, today: NaiveDate) -> Self {
        Self { service, today }
    }

    /// Año de las series: el pedido (si es razonable) o el actual
    fn series_year(&self, requested: Option<i32>) -> AppResult<i32> {
        match requested {
            Some(year) => {
                validate_report_year(year)
                    .map_err(|_| validation_error("anio", "Año de reporte fuera de rango"))?;
                Ok(year)
            }
            None => Ok(self.today.year()),
        }
    }

    pub async fn vehicles(&self) -> AppResult<VehicleStats> {
        self.service.vehicle_stats(self.today).await
    }

    pub async fn sales(&self) -> AppResult<SalesStats> {
        self.service.sales_stats(self.today).await
    }

    pub async fn expenses(&self) -> AppResult<ExpenseStats> {
        self.service.expense_stats(self.today).await
    }

    pub async fn sales_history(&self, year: Option<i32>) -> AppResult<Vec<HistoricalPoint>> {
        let year = self.series_year(year)?;
        self.service.sales_history(year).await
    }

    pub async fn current_expense_history(
        &self,
        year: Option<i32>,
    ) -> AppResult<Vec<HistoricalPoint>> {
        let year = self.series_year(year)?;
        self.service.current_expense_history(year).await
    }

    pub async fn vehicle_expense_history(
        &self,
        year: Option<i32>,
    ) -> AppResult<Vec<HistoricalPoint>> {
        let year = self.series_year(year)?;
        self.service.vehicle_expense_history(year).await
    }

    pub async fn sales_vs_expenses(&self, year: Option<i32>) -> AppResult<Vec<SalesExpensesPoint>> {
        let year = self.series_year(year)?;
        self.service.sales_vs_expenses(year).await
    }

    pub async fn accumulated_profit(&self) -> AppResult<ProfitSummary> {
        self.service.accumulated_profit(self.today).await
    }

    pub async fn current_month_profit(&self) -> AppResult<CurrentMonthProfit> {
        self.service.current_month_profit(self.today).await
    }

    /// Un año fuera de rango no es error: el balance cae al año actual
    pub async fn balance(&self, year: Option<i32>) -> AppResult<BalanceReport> {
        let year = year.filter(|y| match validate_report_year(*y) {
            Ok(()) => true,
            Err(_) => {
                warn!("Año de balance inválido ({}), se usa el actual", y);
                false
            }
        });
        self.service.balance_report(year, self.today).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::reporting_source::InMemoryReportingSource;
    use crate::utils::errors::AppError;
    use std::sync::Arc;

    fn controller() -> StatsController {
        let service = StatsService::new(Arc::new(InMemoryReportingSource::new()));
        StatsController::at(service, NaiveDate::from_ymd_opt(2024, 8, 20).unwrap())
    }

    #[tokio::test]
    async fn test_series_default_to_current_year() {
        let points = controller().sales_history(None).await.unwrap();
        assert_eq!(points[0].mes, "2024-01");
    }

    #[tokio::test]
    async fn test_series_reject_absurd_year() {
        let result = controller().current_expense_history(Some(1890)).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_balance_falls_back_to_current_year() {
        let report = controller().balance(Some(1890)).await.unwrap();
        assert_eq!(report.anio, 2024);
        assert_eq!(report.meses.len(), 12);
    }
}
