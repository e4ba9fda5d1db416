use crate::error::{Result, WizardError};
use crate::models::{MealSelection, Plan};
use crate::store::KeyValueStore;
use crate::wizard::events::WizardEvent;
use crate::wizard::steps::Wizard;

/// Result of a quantity update.
#[derive(Debug, Clone, PartialEq)]
pub enum QuantityOutcome {
    /// The desired quantity was stored as-is.
    Updated { qty: u32 },

    /// The request exceeded the plan capacity: the stored quantity was
    /// clamped to what remained and the excess recorded. The caller must
    /// run the upgrade-prompt flow; the engine never auto-advances here.
    Clamped {
        stored: u32,
        overflow: u32,
        offer: Option<UpgradeOffer>,
    },
}

/// A larger plan proposed when a selection would exceed capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct UpgradeOffer {
    pub plan: Plan,

    /// Price difference against the current plan size, when both prices
    /// are known.
    pub price_delta: Option<f64>,
}

/// A scheduled move to the next person, fired by the presentation layer
/// after its delay. The precondition is re-checked on fire, so a stale
/// task is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAdvance {
    pub person_index: usize,
    pub target_index: usize,
    pub delay_ms: u64,
}

impl<S: KeyValueStore> Wizard<S> {
    /// Set a person's quantity for one meal.
    ///
    /// Negative input normalizes to 0; zero removes the entry. When the
    /// request exceeds the remaining capacity the stored quantity is
    /// clamped and a `Clamped` outcome (with an upgrade offer, if the
    /// catalog has one) is returned. Decreasing never clamps.
    pub fn set_quantity(
        &mut self,
        person_index: usize,
        meal_id: &str,
        desired: i64,
    ) -> Result<QuantityOutcome> {
        let meal_name = self.catalog.meals.name_for(meal_id);
        let person = self
            .state
            .person_mut(person_index)
            .ok_or(WizardError::PersonNotFound(person_index))?;

        let mut desired = desired.max(0) as u32;
        let capacity = person.capacity();
        let current = person.meals.get(meal_id).map(|m| m.qty).unwrap_or(0);

        let mut overflow = 0u32;
        if capacity > 0 {
            let selected_without_this = person.selected_total() - current;
            let remaining = capacity.saturating_sub(selected_without_this);
            if desired > remaining {
                overflow = desired - remaining;
                desired = remaining;
            }
        }

        if desired > 0 {
            person.meals.insert(
                meal_id.to_string(),
                MealSelection {
                    name: meal_name,
                    qty: desired,
                },
            );
        } else {
            person.meals.remove(meal_id);
        }

        self.persist();

        if overflow > 0 {
            let selected_total = self
                .state
                .person(person_index)
                .map(|p| p.selected_total())
                .unwrap_or(0);
            let offer = self.compute_upgrade_offer(capacity, selected_total, overflow);
            return Ok(QuantityOutcome::Clamped {
                stored: desired,
                overflow,
                offer,
            });
        }

        self.maybe_schedule_advance(person_index);
        Ok(QuantityOutcome::Updated { qty: desired })
    }

    /// Smallest catalog plan that fits `max(current_size, selected_total +
    /// overflow)` meals, or None when the catalog tops out below the target.
    pub fn compute_upgrade_offer(
        &self,
        current_size: u32,
        selected_total: u32,
        overflow: u32,
    ) -> Option<UpgradeOffer> {
        let target = current_size.max(selected_total + overflow);
        let next_size = self
            .catalog
            .plans
            .all_sizes()
            .into_iter()
            .find(|size| *size >= target)?;
        let plan = self.catalog.plans.plan_for_size(next_size)?;

        let current_price = self
            .catalog
            .plans
            .plan_for_size(current_size)
            .and_then(|p| p.price);
        let price_delta = match (plan.price, current_price) {
            (Some(next), Some(cur)) => Some(next - cur),
            _ => None,
        };

        Some(UpgradeOffer { plan, price_delta })
    }

    /// Replace a person's plan with the offered one, preserving the meals
    /// already selected (they fit within the larger capacity).
    pub fn apply_upgrade(&mut self, person_index: usize, offer: &UpgradeOffer) -> Result<()> {
        let person = self
            .state
            .person_mut(person_index)
            .ok_or(WizardError::PersonNotFound(person_index))?;

        let mut plan = offer.plan.clone();
        if plan.price.is_none() {
            plan.price = person.plan.as_ref().and_then(|p| p.price);
        }
        person.plan = Some(plan);

        // The bigger plan usually reopens the selection.
        if !person.is_complete() {
            person.advanced = false;
        }
        if self
            .pending
            .is_some_and(|p| p.person_index == person_index)
        {
            self.pending = None;
        }

        self.persist();
        Ok(())
    }

    pub fn is_person_complete(&self, person_index: usize) -> bool {
        self.state
            .person(person_index)
            .map(|p| p.is_complete())
            .unwrap_or(false)
    }

    /// Moving forward requires more than one person, a next person, and a
    /// complete selection for the current one.
    pub fn can_next_person(&self) -> bool {
        let index = self.state.current_person_index();
        self.state.persons.len() > 1
            && index + 1 < self.state.persons.len()
            && self.is_person_complete(index)
    }

    pub fn can_prev_person(&self) -> bool {
        self.state.persons.len() > 1 && self.state.current_person_index() > 0
    }

    pub fn next_person(&mut self) -> bool {
        if !self.can_next_person() {
            return false;
        }
        let target = self.state.current_person_index() + 1;
        self.move_to_person(target);
        true
    }

    pub fn prev_person(&mut self) -> bool {
        if !self.can_prev_person() {
            return false;
        }
        let target = self.state.current_person_index() - 1;
        self.move_to_person(target);
        true
    }

    /// The checkout step opens once the current person is complete and no
    /// further person follows.
    pub fn can_continue_to_checkout(&self) -> bool {
        let index = self.state.current_person_index();
        self.is_person_complete(index) && index + 1 >= self.state.persons.len()
    }

    pub fn pending_advance(&self) -> Option<&PendingAdvance> {
        self.pending.as_ref()
    }

    pub fn cancel_pending_advance(&mut self) {
        self.pending = None;
    }

    /// Fire the scheduled advance, re-checking its precondition first.
    ///
    /// Returns false (leaving state untouched) when the task has gone
    /// stale: the person changed, the selection reopened, or the target
    /// no longer exists.
    pub fn fire_pending_advance(&mut self) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };

        let still_valid = self.state.current_person_index() == pending.person_index
            && pending.target_index < self.state.persons.len()
            && self.is_person_complete(pending.person_index);
        if !still_valid {
            return false;
        }

        self.move_to_person(pending.target_index);
        true
    }

    fn move_to_person(&mut self, target: usize) {
        // Any manual move supersedes a scheduled one.
        self.pending = None;
        self.state.set_current_person(target);
        self.persist();
        self.events.emit(WizardEvent::PersonChanged {
            person_index: self.state.current_person_index(),
        });
    }

    /// Schedule an auto-advance after a successful quantity update, exactly
    /// once per completion. The per-person `advanced` flag suppresses
    /// repeat triggers until the selection becomes incomplete again.
    fn maybe_schedule_advance(&mut self, person_index: usize) {
        if !self.options.auto_advance {
            return;
        }

        let (complete, advanced) = match self.state.person(person_index) {
            Some(p) => (p.is_complete(), p.advanced),
            None => return,
        };

        if !complete {
            if advanced {
                if let Some(person) = self.state.person_mut(person_index) {
                    person.advanced = false;
                }
                self.persist();
            }
            if self
                .pending
                .is_some_and(|p| p.person_index == person_index)
            {
                self.pending = None;
            }
            return;
        }

        if advanced {
            return;
        }
        if let Some(person) = self.state.person_mut(person_index) {
            person.advanced = true;
        }
        self.persist();

        let target = person_index + 1;
        if target < self.state.persons.len()
            && person_index == self.state.current_person_index()
        {
            self.pending = Some(PendingAdvance {
                person_index,
                target_index: target,
                delay_ms: self.options.auto_advance_delay_ms,
            });
        }
    }
}
