//! The action boundary: validated store mutations, read models and insight requests.
//!
//! Every operation returns `Result<T, ActionError>`. [`ActionResponse`] turns that
//! result into the `{success, data, error}` envelope shared by the HTTP API and the CLI.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use budgetwise_core::{
    sample::{sample_drafts, sample_goals},
    BudgetGoalForm, BudgetGoalStore, BudgetService, InMemoryStore, QueryService, SummaryService,
    TransactionForm, TransactionQueryParams, TransactionStore,
};
use budgetwise_domain::{
    BudgetGoal, BudgetProgress, Category, Dashboard, Displayable, FinancialReport, Transaction,
    TransactionType,
};

use crate::{
    errors::{ActionError, ErrorKind},
    insights::{GeneratorError, InsightError, InsightInput, InsightOutput, InsightService},
};

const DEFAULT_RECENT_LIMIT: usize = 5;
const EDIT_NOT_FOUND: &str = "Transaction not found.";
const DELETE_NOT_FOUND: &str = "Transaction not found or already deleted.";

pub type ActionResult<T> = Result<T, ActionError>;

/// Structured result returned across the boundary. Failures never panic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<String>,
}

impl<T> ActionResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            error_kind: None,
            issues: Vec::new(),
        }
    }

    pub fn failure(error: &ActionError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.to_string()),
            error_kind: Some(error.kind()),
            issues: error.issues().to_vec(),
        }
    }
}

impl<T> From<ActionResult<T>> for ActionResponse<T> {
    fn from(result: ActionResult<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(error) => Self::failure(&error),
        }
    }
}

/// Category lists for form pickers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCatalog {
    pub expense: Vec<Category>,
    pub income: Vec<Category>,
}

/// Entry point for every user-facing operation.
#[derive(Clone)]
pub struct BudgetActions {
    transactions: Arc<dyn TransactionStore>,
    goals: Arc<dyn BudgetGoalStore>,
    insights: Option<InsightService>,
    recent_limit: usize,
}

impl BudgetActions {
    pub fn new(transactions: Arc<dyn TransactionStore>, goals: Arc<dyn BudgetGoalStore>) -> Self {
        Self {
            transactions,
            goals,
            insights: None,
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }

    /// Uses one store for both transactions and goals.
    pub fn with_store<S>(store: Arc<S>) -> Self
    where
        S: TransactionStore + BudgetGoalStore + 'static,
    {
        Self::new(store.clone(), store)
    }

    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(InMemoryStore::new()))
    }

    pub fn with_insights(mut self, service: InsightService) -> Self {
        self.insights = Some(service);
        self
    }

    pub fn with_recent_limit(mut self, limit: usize) -> Self {
        self.recent_limit = limit;
        self
    }

    pub fn categories(&self) -> CategoryCatalog {
        CategoryCatalog {
            expense: Category::for_kind(TransactionType::Expense).to_vec(),
            income: Category::for_kind(TransactionType::Income).to_vec(),
        }
    }

    pub fn add_transaction(&self, form: &TransactionForm) -> ActionResult<Transaction> {
        let draft = form.validate().map_err(|errors| {
            warn!(%errors, "rejected new transaction");
            ActionError::from(errors)
        })?;
        let stored = self.transactions.insert(draft)?;
        info!(
            id = %stored.id,
            category = %stored.category,
            amount = stored.amount,
            "transaction added"
        );
        Ok(stored)
    }

    pub fn edit_transaction(&self, id: &str, form: &TransactionForm) -> ActionResult<Transaction> {
        let draft = form.validate().map_err(|errors| {
            warn!(id, %errors, "rejected transaction edit");
            ActionError::from(errors)
        })?;
        let id = parse_id(id).ok_or_else(|| ActionError::not_found(EDIT_NOT_FOUND))?;
        let updated = self
            .transactions
            .update(id, draft)?
            .ok_or_else(|| ActionError::not_found(EDIT_NOT_FOUND))?;
        info!(id = %updated.id, "transaction updated");
        Ok(updated)
    }

    pub fn delete_transaction(&self, id: &str) -> ActionResult<Transaction> {
        let not_found = || {
            warn!(id, "delete of unknown transaction");
            ActionError::not_found(DELETE_NOT_FOUND)
        };
        let id = parse_id(id).ok_or_else(not_found)?;
        let removed = self.transactions.remove(id)?.ok_or_else(not_found)?;
        info!(id = %removed.id, label = %removed.display_label(), "transaction deleted");
        Ok(removed)
    }

    /// Creates or overwrites the goal for the form's category.
    pub fn set_budget_goal(&self, form: &BudgetGoalForm) -> ActionResult<BudgetGoal> {
        let goal = form.validate().map_err(|errors| {
            warn!(%errors, "rejected budget goal");
            ActionError::from(errors)
        })?;
        let stored = self.goals.upsert_goal(goal.category, goal.amount)?;
        info!(goal = %stored.display_label(), "budget goal set");
        Ok(stored)
    }

    /// Snapshot sorted by date, newest first.
    pub fn list_transactions(&self) -> ActionResult<Vec<Transaction>> {
        let snapshot = self.transactions.transactions()?;
        debug!(count = snapshot.len(), "listing transactions");
        Ok(QueryService::newest_first(&snapshot))
    }

    pub fn query_transactions(
        &self,
        params: TransactionQueryParams,
    ) -> ActionResult<Vec<Transaction>> {
        let query = params.into_query()?;
        let snapshot = self.transactions.transactions()?;
        let result = QueryService::apply(&snapshot, &query);
        debug!(matched = result.len(), total = snapshot.len(), "transaction query");
        Ok(result)
    }

    pub fn list_budget_goals(&self) -> ActionResult<Vec<BudgetGoal>> {
        Ok(self.goals.goals()?)
    }

    pub fn budget_progress(&self) -> ActionResult<Vec<BudgetProgress>> {
        let goals = self.goals.goals()?;
        let transactions = self.transactions.transactions()?;
        Ok(BudgetService::goal_progress(&goals, &transactions))
    }

    pub fn dashboard(&self) -> ActionResult<Dashboard> {
        let transactions = self.transactions.transactions()?;
        let goals = self.goals.goals()?;
        Ok(SummaryService::dashboard(
            &transactions,
            &goals,
            self.recent_limit,
        ))
    }

    pub fn report(&self) -> ActionResult<FinancialReport> {
        let transactions = self.transactions.transactions()?;
        let goals = self.goals.goals()?;
        Ok(SummaryService::report(&transactions, &goals))
    }

    /// Adds the demonstration transactions and goals. Returns the number of transactions added.
    pub fn seed_sample_data(&self) -> ActionResult<usize> {
        let drafts = sample_drafts();
        let count = drafts.len();
        for draft in drafts {
            self.transactions.insert(draft)?;
        }
        for (category, amount) in sample_goals() {
            self.goals.upsert_goal(category, amount)?;
        }
        info!(transactions = count, "sample data loaded");
        Ok(count)
    }

    pub async fn insights(
        &self,
        input: &InsightInput,
        cancel: &CancellationToken,
    ) -> ActionResult<InsightOutput> {
        input.validate().map_err(|err| {
            warn!(error = %err, "rejected insight request");
            ActionError::from(err)
        })?;
        let service = self.insights.as_ref().ok_or_else(|| {
            ActionError::from(InsightError::Upstream(GeneratorError::not_configured("")))
        })?;
        let output = service.request(input, cancel).await?;
        info!(chars = output.insights.len(), "AI insights generated");
        Ok(output)
    }

    /// Builds the insight input from the current transactions and goals.
    pub async fn insights_for_timeline(
        &self,
        timeline: &str,
        cancel: &CancellationToken,
    ) -> ActionResult<InsightOutput> {
        let transactions = self.transactions.transactions()?;
        let goals = self.goals.goals()?;
        let input = InsightInput::from_snapshots(&transactions, &goals, timeline).map_err(|err| {
            tracing::error!(error = %err, "failed to serialize insight input");
            ActionError::Unexpected
        })?;
        self.insights(&input, cancel).await
    }
}

/// Identifiers that are not UUIDs cannot match any record.
fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}
