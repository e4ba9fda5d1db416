use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::plan::{MealSelection, Plan};

/// Identifier for a meal in the catalog.
pub type MealId = String;

/// One party member: their name, chosen plan, and selected meals.
///
/// The `advanced` flag is the auto-advance guard; it is persisted with the
/// snapshot and resets when the selection becomes incomplete again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Person {
    #[serde(rename = "Name", default)]
    pub name: String,

    #[serde(rename = "Plan", default)]
    pub plan: Option<Plan>,

    #[serde(rename = "Meals", default)]
    pub meals: BTreeMap<MealId, MealSelection>,

    #[serde(rename = "Advanced", default)]
    pub advanced: bool,
}

impl Person {
    /// A fresh person with no name, plan, or meals.
    pub fn blank() -> Self {
        Self::default()
    }

    /// Display name, falling back to "Person {n}" (1-based).
    pub fn display_name(&self, index: usize) -> String {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            format!("Person {}", index + 1)
        } else {
            trimmed.to_string()
        }
    }

    /// Plan capacity, or 0 when no plan is assigned.
    pub fn capacity(&self) -> u32 {
        self.plan.as_ref().map(|p| p.size).unwrap_or(0)
    }

    /// Sum of all selected meal quantities.
    pub fn selected_total(&self) -> u32 {
        self.meals.values().map(|m| m.qty).sum()
    }

    /// Completion predicate: a plan is assigned and its capacity is filled.
    pub fn is_complete(&self) -> bool {
        let cap = self.capacity();
        cap > 0 && self.selected_total() >= cap
    }

    /// Whether the person-detail step considers this person filled in:
    /// a non-empty trimmed name and a selected plan.
    pub fn has_details(&self) -> bool {
        !self.name.trim().is_empty() && self.plan.is_some()
    }

    /// Enforce the capacity invariant after a plan change: trim quantities
    /// until the selected total fits, removing entries that reach zero.
    pub fn clamp_meals_to_capacity(&mut self) {
        let cap = self.capacity();
        if cap == 0 {
            return;
        }
        let mut excess = self.selected_total().saturating_sub(cap);
        if excess == 0 {
            return;
        }
        let ids: Vec<MealId> = self.meals.keys().rev().cloned().collect();
        for id in ids {
            if excess == 0 {
                break;
            }
            if let Some(entry) = self.meals.get_mut(&id) {
                let cut = entry.qty.min(excess);
                entry.qty -= cut;
                excess -= cut;
                if entry.qty == 0 {
                    self.meals.remove(&id);
                }
            }
        }
    }

    /// Selection progress as a percentage, capped at 100.
    pub fn progress_percent(&self) -> u32 {
        let cap = self.capacity();
        if cap == 0 {
            return 0;
        }
        let pct = (self.selected_total() as f64 / cap as f64 * 100.0).round() as u32;
        pct.min(100)
    }
}
