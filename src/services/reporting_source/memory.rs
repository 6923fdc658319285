//! Fuente de reportes en memoria para tests

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use tokio::sync::RwLock;

use super::{
    CurrentExpenseRecord, ReportingSource, SaleRecord, SellerRef, VehicleExpenseRecord,
    VehicleIntakeRecord,
};
use crate::utils::errors::AppResult;

#[derive(Debug, Default)]
struct MemoryData {
    sales: Vec<SaleRecord>,
    current_expenses: Vec<CurrentExpenseRecord>,
    vehicle_expenses: Vec<VehicleExpenseRecord>,
    intakes: Vec<VehicleIntakeRecord>,
    available_vehicles: i64,
    sellers: Vec<SellerRef>,
}

/// Fuente en memoria; los datos se cargan con los `add_*`
#[derive(Debug, Clone, Default)]
pub struct InMemoryReportingSource {
    data: Arc<RwLock<MemoryData>>,
}

fn within(date: NaiveDate, from: NaiveDate, to: NaiveDate) -> bool {
    date >= from && date <= to
}

impl InMemoryReportingSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_sale(&self, sale: SaleRecord) {
        self.data.write().await.sales.push(sale);
    }

    pub async fn add_current_expense(&self, expense: CurrentExpenseRecord) {
        self.data.write().await.current_expenses.push(expense);
    }

    pub async fn add_vehicle_expense(&self, expense: VehicleExpenseRecord) {
        self.data.write().await.vehicle_expenses.push(expense);
    }

    /// Registra el ingreso de un vehículo; queda disponible hasta `mark_sold`
    pub async fn add_intake(&self, intake: VehicleIntakeRecord) {
        let mut data = self.data.write().await;
        data.intakes.push(intake);
        data.available_vehicles += 1;
    }

    pub async fn mark_sold(&self) {
        let mut data = self.data.write().await;
        data.available_vehicles = (data.available_vehicles - 1).max(0);
    }

    pub async fn add_seller(&self, seller: SellerRef) {
        self.data.write().await.sellers.push(seller);
    }
}

#[async_trait]
impl ReportingSource for InMemoryReportingSource {
    async fn sales_between(&self, from: NaiveDate, to: NaiveDate) -> AppResult<Vec<SaleRecord>> {
        let data = self.data.read().await;
        Ok(data
            .sales
            .iter()
            .filter(|s| within(s.sale_date, from, to))
            .cloned()
            .collect())
    }

    async fn current_expenses_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<CurrentExpenseRecord>> {
        let data = self.data.read().await;
        Ok(data
            .current_expenses
            .iter()
            .filter(|e| within(e.expense_date, from, to))
            .cloned()
            .collect())
    }

    async fn vehicle_expenses_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<VehicleExpenseRecord>> {
        let data = self.data.read().await;
        Ok(data
            .vehicle_expenses
            .iter()
            .filter(|e| within(e.expense_date, from, to))
            .cloned()
            .collect())
    }

    async fn vehicle_intakes_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<VehicleIntakeRecord>> {
        let data = self.data.read().await;
        Ok(data
            .intakes
            .iter()
            .filter(|v| within(v.acquisition_date, from, to))
            .cloned()
            .collect())
    }

    async fn count_available_vehicles(&self) -> AppResult<i64> {
        Ok(self.data.read().await.available_vehicles)
    }

    async fn sale_years(&self) -> AppResult<Vec<i32>> {
        let data = self.data.read().await;
        let mut years: Vec<i32> = data.sales.iter().map(|s| s.sale_date.year()).collect();
        years.sort_unstable_by(|a, b| b.cmp(a));
        years.dedup();
        Ok(years)
    }

    async fn sellers(&self) -> AppResult<Vec<SellerRef>> {
        let data = self.data.read().await;
        let mut sellers = data.sellers.clone();
        sellers.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(sellers)
    }
}
