use crate::catalog::Catalog;
use crate::error::{Result, WizardError};
use crate::models::{default_steps, Step, StepKind};
use crate::store::{self, KeyValueStore};
use crate::wizard::events::{EventQueue, FieldRef, WizardEvent};
use crate::wizard::selection::PendingAdvance;
use crate::wizard::state::WizardState;

/// Maximum declared party size.
pub const MAX_PARTY_SIZE: usize = 50;

/// Behavior switches for one wizard instance.
#[derive(Debug, Clone)]
pub struct WizardOptions {
    /// Automatically move to the next person once a selection completes.
    pub auto_advance: bool,

    /// Delay before a scheduled advance fires. Carried on the pending task
    /// so the presentation layer knows how long to wait.
    pub auto_advance_delay_ms: u64,
}

impl Default for WizardOptions {
    fn default() -> Self {
        Self {
            auto_advance: false,
            auto_advance_delay_ms: 700,
        }
    }
}

/// One wizard instance: the step controller owning the state, the store
/// handle, the catalogs, and the notification queue.
///
/// Every mutation follows the same fixed order: update in-memory state,
/// persist the snapshot, then recompute/notify. The persisted snapshot is
/// therefore never older than what the caller observes.
pub struct Wizard<S: KeyValueStore> {
    form_id: String,
    steps: Vec<Step>,
    pub(crate) state: WizardState,
    pub(crate) catalog: Catalog,
    pub(crate) options: WizardOptions,
    pub(crate) store: S,
    pub(crate) events: EventQueue,
    pub(crate) pending: Option<PendingAdvance>,
}

impl<S: KeyValueStore> Wizard<S> {
    /// Create a wizard, rehydrating any persisted snapshot for `form_id`
    /// and consuming a pending edit request (jumping straight to meal
    /// selection for the requested person).
    pub fn new(
        form_id: impl Into<String>,
        catalog: Catalog,
        options: WizardOptions,
        mut store: S,
    ) -> Self {
        let form_id = form_id.into();
        let steps = default_steps();

        let mut state = store::load_snapshot(&store, &form_id).unwrap_or_default();
        state.cur_step = state.cur_step.min(steps.len() - 1);

        if let Some(request) = store::take_edit_request(&mut store, &form_id) {
            state.ensure_persons();
            state.set_current_person(request.person_index);
            if let Some(index) = steps.iter().position(|s| s.kind == StepKind::MealSelection) {
                state.cur_step = index;
            }
        }

        let mut wizard = Self {
            form_id,
            steps,
            state,
            catalog,
            options,
            store,
            events: EventQueue::new(),
            pending: None,
        };
        wizard.persist();
        wizard
    }

    pub fn form_id(&self) -> &str {
        &self.form_id
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }

    pub fn current_step_index(&self) -> usize {
        self.state.cur_step
    }

    pub fn current_step(&self) -> &Step {
        &self.steps[self.state.cur_step]
    }

    pub fn step_index_of(&self, kind: StepKind) -> Option<usize> {
        self.steps.iter().position(|s| s.kind == kind)
    }

    /// Progress through the step sequence as a percentage.
    pub fn progress_percent(&self) -> u32 {
        if self.steps.len() <= 1 {
            return 100;
        }
        (self.state.cur_step as f64 / (self.steps.len() - 1) as f64 * 100.0).round() as u32
    }

    /// Take all queued notifications, oldest first.
    pub fn drain_events(&mut self) -> Vec<WizardEvent> {
        self.events.drain()
    }

    /// Jump to step `n`, clamped to the step range.
    ///
    /// A no-op when `n` resolves to the current step; otherwise persists
    /// and emits exactly one `StepChanged`.
    pub fn go_to(&mut self, n: usize) -> bool {
        let clamped = n.min(self.steps.len() - 1);
        if clamped == self.state.cur_step {
            return false;
        }
        self.state.cur_step = clamped;

        // Person-driven steps need at least one person to render.
        if matches!(
            self.current_step().kind,
            StepKind::PersonDetails | StepKind::MealSelection
        ) {
            self.state.ensure_persons();
        }

        self.persist();
        self.events.emit(WizardEvent::StepChanged {
            step_index: clamped,
            steps_total: self.steps.len(),
        });
        true
    }

    /// Advance one step if the current step validates.
    pub fn next(&mut self) -> bool {
        if self.validate_current_step().is_some() {
            return false;
        }
        self.go_to(self.state.cur_step + 1)
    }

    /// Go back one step. Never validates.
    pub fn back(&mut self) -> bool {
        self.go_to(self.state.cur_step.saturating_sub(1))
    }

    /// Check the current step, emitting `ValidationFailed` for the first
    /// invalid field (fail-fast, not fail-all).
    pub fn validate_current_step(&mut self) -> Option<FieldRef> {
        let field = self.first_invalid_field();
        if let Some(field) = field {
            self.events.emit(WizardEvent::ValidationFailed {
                step_index: self.state.cur_step,
                field,
            });
        }
        field
    }

    fn first_invalid_field(&self) -> Option<FieldRef> {
        match self.current_step().kind {
            StepKind::PartySize => {
                if self.state.persons.is_empty() {
                    Some(FieldRef::PartySize)
                } else {
                    None
                }
            }
            StepKind::PersonDetails => {
                if self.state.persons.is_empty() {
                    return Some(FieldRef::PartySize);
                }
                for (i, person) in self.state.persons.iter().enumerate() {
                    if person.name.trim().is_empty() {
                        return Some(FieldRef::PersonName(i));
                    }
                    if person.plan.is_none() {
                        return Some(FieldRef::PersonPlan(i));
                    }
                }
                None
            }
            // Meal selection is gated by `can_continue_to_checkout`, not
            // field validation; checkout has no required fields.
            StepKind::MealSelection | StepKind::Checkout => None,
        }
    }

    /// Declare the party size, resizing the persons list (entries are
    /// preserved by index).
    pub fn set_party_size(&mut self, count: usize) {
        let count = count.clamp(1, MAX_PARTY_SIZE);
        self.state.resize_persons(count);
        self.persist();
    }

    pub fn party_size(&self) -> usize {
        self.state.persons.len()
    }

    pub fn set_person_name(&mut self, person_index: usize, name: &str) -> Result<()> {
        let person = self
            .state
            .person_mut(person_index)
            .ok_or(WizardError::PersonNotFound(person_index))?;
        person.name = name.trim().to_string();
        self.persist();
        Ok(())
    }

    /// Assign the catalog plan of the given size to a person, keeping their
    /// meals. Quantities are trimmed if the new capacity is smaller.
    pub fn set_person_plan(&mut self, person_index: usize, size: u32) -> Result<()> {
        let plan = self
            .catalog
            .plans
            .plan_for_size(size)
            .ok_or(WizardError::UnknownPlanSize(size))?;
        let person = self
            .state
            .person_mut(person_index)
            .ok_or(WizardError::PersonNotFound(person_index))?;
        person.plan = Some(plan);
        person.clamp_meals_to_capacity();
        if !person.is_complete() {
            person.advanced = false;
        }
        self.persist();
        Ok(())
    }

    pub(crate) fn persist(&mut self) {
        store::save_snapshot(&mut self.store, &self.form_id, &self.state);
    }
}
