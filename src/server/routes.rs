use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use budgetwise_core::{BudgetGoalForm, TransactionForm, TransactionQueryParams};
use budgetwise_domain::{
    BudgetGoal, BudgetProgress, Dashboard, FinancialReport, Transaction,
};

use super::AppState;
use crate::{
    actions::{ActionResponse, ActionResult, CategoryCatalog},
    errors::ErrorKind,
    insights::{InsightInput, InsightOutput},
    utils::build_info::{self, BuildInfo},
};

type Reply<T> = (StatusCode, Json<ActionResponse<T>>);

fn reply<T>(result: ActionResult<T>, success: StatusCode) -> Reply<T> {
    let status = match &result {
        Ok(_) => success,
        Err(error) => status_for(error.kind()),
    };
    (status, Json(ActionResponse::from(result)))
}

pub(crate) fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Upstream => StatusCode::BAD_GATEWAY,
        ErrorKind::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub build: BuildInfo,
}

pub async fn health() -> Json<HealthResponse> {
    let build = build_info::current();
    Json(HealthResponse {
        status: "ok",
        version: build.version,
        build,
    })
}

pub async fn categories(State(state): State<Arc<AppState>>) -> Json<CategoryCatalog> {
    Json(state.actions.categories())
}

pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TransactionQueryParams>,
) -> Reply<Vec<Transaction>> {
    reply(state.actions.query_transactions(params), StatusCode::OK)
}

pub async fn add_transaction(
    State(state): State<Arc<AppState>>,
    Json(form): Json<TransactionForm>,
) -> Reply<Transaction> {
    reply(state.actions.add_transaction(&form), StatusCode::CREATED)
}

pub async fn edit_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(form): Json<TransactionForm>,
) -> Reply<Transaction> {
    reply(state.actions.edit_transaction(&id, &form), StatusCode::OK)
}

pub async fn delete_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Reply<Transaction> {
    reply(state.actions.delete_transaction(&id), StatusCode::OK)
}

pub async fn list_budget_goals(State(state): State<Arc<AppState>>) -> Reply<Vec<BudgetGoal>> {
    reply(state.actions.list_budget_goals(), StatusCode::OK)
}

pub async fn set_budget_goal(
    State(state): State<Arc<AppState>>,
    Json(form): Json<BudgetGoalForm>,
) -> Reply<BudgetGoal> {
    reply(state.actions.set_budget_goal(&form), StatusCode::OK)
}

pub async fn budget_progress(State(state): State<Arc<AppState>>) -> Reply<Vec<BudgetProgress>> {
    reply(state.actions.budget_progress(), StatusCode::OK)
}

pub async fn dashboard(State(state): State<Arc<AppState>>) -> Reply<Dashboard> {
    reply(state.actions.dashboard(), StatusCode::OK)
}

pub async fn report(State(state): State<Arc<AppState>>) -> Reply<FinancialReport> {
    reply(state.actions.report(), StatusCode::OK)
}

pub async fn insights(
    State(state): State<Arc<AppState>>,
    Json(input): Json<InsightInput>,
) -> Reply<InsightOutput> {
    // Cancelled when the server shuts down or the client goes away and this future is dropped.
    let token = state.shutdown.child_token();
    let _guard = token.clone().drop_guard();
    reply(state.actions.insights(&input, &token).await, StatusCode::OK)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TimelineRequest {
    pub timeline: String,
}

pub async fn current_insights(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TimelineRequest>,
) -> Reply<InsightOutput> {
    let token = state.shutdown.child_token();
    let _guard = token.clone().drop_guard();
    reply(
        state
            .actions
            .insights_for_timeline(&request.timeline, &token)
            .await,
        StatusCode::OK,
    )
}
