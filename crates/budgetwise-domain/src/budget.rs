//! Per-category monthly budget goals.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{category::Category, common::*};

/// A monthly spending cap for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetGoal {
    pub id: Uuid,
    pub category: Category,
    pub amount: f64,
}

impl BudgetGoal {
    pub fn new(category: Category, amount: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            category,
            amount,
        }
    }
}

impl Identifiable for BudgetGoal {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for BudgetGoal {
    fn display_label(&self) -> String {
        format!("{}: {:.2}/month", self.category, self.amount)
    }
}
