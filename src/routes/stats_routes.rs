//! Endpoints del dashboard (`/api/estadisticas/...`), todos de sólo lectura

use axum::{
    extract::State,
    routing::get,
    Json, Router,
};

use crate::controllers::stats_controller::StatsController;
use crate::dto::stats_dto::{
    BalanceReport, CurrentMonthProfit, ExpenseStats, HistoricalPoint, ProfitSummary,
    SalesExpensesPoint, SalesStats, VehicleStats, YearQuery,
};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::ApiQuery;

pub fn create_stats_router() -> Router<AppState> {
    Router::new()
        .route("/vehiculos-actuales", get(current_vehicles))
        .route("/ventas-actuales", get(current_sales))
        .route("/gastos-actuales", get(current_expenses))
        .route("/ventas-historicas", get(sales_history))
        .route("/gastos-corrientes-historicos", get(current_expense_history))
        .route("/gastos-vehiculos-historicos", get(vehicle_expense_history))
        .route("/ventas-gastos", get(sales_vs_expenses))
        .route("/ganancia-acumulada", get(accumulated_profit))
        .route("/ganancia-mes-actual", get(current_month_profit))
        .route("/balance", get(balance))
}

fn controller(state: &AppState) -> StatsController {
    StatsController::at(state.stats(), state.config.today())
}

async fn current_vehicles(State(state): State<AppState>) -> Result<Json<VehicleStats>, AppError> {
    Ok(Json(controller(&state).vehicles().await?))
}

async fn current_sales(State(state): State<AppState>) -> Result<Json<SalesStats>, AppError> {
    Ok(Json(controller(&state).sales().await?))
}

async fn current_expenses(State(state): State<AppState>) -> Result<Json<ExpenseStats>, AppError> {
    Ok(Json(controller(&state).expenses().await?))
}

async fn sales_history(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<YearQuery>,
) -> Result<Json<Vec<HistoricalPoint>>, AppError> {
    Ok(Json(controller(&state).sales_history(query.year()?).await?))
}

async fn current_expense_history(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<YearQuery>,
) -> Result<Json<Vec<HistoricalPoint>>, AppError> {
    Ok(Json(
        controller(&state)
            .current_expense_history(query.year()?)
            .await?,
    ))
}

async fn vehicle_expense_history(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<YearQuery>,
) -> Result<Json<Vec<HistoricalPoint>>, AppError> {
    Ok(Json(
        controller(&state)
            .vehicle_expense_history(query.year()?)
            .await?,
    ))
}

async fn sales_vs_expenses(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<YearQuery>,
) -> Result<Json<Vec<SalesExpensesPoint>>, AppError> {
    Ok(Json(controller(&state).sales_vs_expenses(query.year()?).await?))
}

async fn accumulated_profit(
    State(state): State<AppState>,
) -> Result<Json<ProfitSummary>, AppError> {
    Ok(Json(controller(&state).accumulated_profit().await?))
}

async fn current_month_profit(
    State(state): State<AppState>,
) -> Result<Json<CurrentMonthProfit>, AppError> {
    Ok(Json(controller(&state).current_month_profit().await?))
}

/// El año del balance nunca es error: un query ilegible se trata como ausente
async fn balance(
    State(state): State<AppState>,
    query: Option<ApiQuery<YearQuery>>,
) -> Result<Json<BalanceReport>, AppError> {
    let year = query.and_then(|ApiQuery(query)| query.lenient_year());
    Ok(Json(controller(&state).balance(year).await?))
}
