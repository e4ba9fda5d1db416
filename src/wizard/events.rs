use std::collections::VecDeque;

/// A reference to the field that blocked validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRef {
    /// The declared party size (no persons exist).
    PartySize,
    /// A person card's name input (person index).
    PersonName(usize),
    /// A person card's plan choice (person index).
    PersonPlan(usize),
}

/// Notifications a wizard instance emits to its subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardEvent {
    /// A successful step transition.
    StepChanged {
        step_index: usize,
        steps_total: usize,
    },
    /// Forward navigation was blocked by the first invalid field.
    ValidationFailed {
        step_index: usize,
        field: FieldRef,
    },
    /// The active person in meal selection changed.
    PersonChanged { person_index: usize },
}

/// Per-wizard notification channel. Events queue up in order and are
/// drained by the presentation layer; no global bus exists.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<WizardEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, event: WizardEvent) {
        self.events.push_back(event);
    }

    /// Take all queued events, oldest first.
    pub fn drain(&mut self) -> Vec<WizardEvent> {
        self.events.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
