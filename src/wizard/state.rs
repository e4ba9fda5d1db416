use serde::{Deserialize, Serialize};

use crate::models::Person;

/// The in-memory model one wizard instance owns: the ordered persons,
/// which person is active in meal selection, and which step is showing.
///
/// The live struct is the source of truth during a session; the store only
/// holds a serialized snapshot of it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WizardState {
    #[serde(rename = "Persons", default)]
    pub persons: Vec<Person>,

    #[serde(rename = "CurPerson", default)]
    cur_person: usize,

    #[serde(rename = "CurStep", default)]
    pub cur_step: usize,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The active person index, clamped to the persons list on every read.
    pub fn current_person_index(&self) -> usize {
        self.cur_person.min(self.persons.len().saturating_sub(1))
    }

    pub fn set_current_person(&mut self, index: usize) {
        self.cur_person = index.min(self.persons.len().saturating_sub(1));
    }

    pub fn person(&self, index: usize) -> Option<&Person> {
        self.persons.get(index)
    }

    pub fn person_mut(&mut self, index: usize) -> Option<&mut Person> {
        self.persons.get_mut(index)
    }

    pub fn current_person(&self) -> Option<&Person> {
        self.persons.get(self.current_person_index())
    }

    pub fn current_person_mut(&mut self) -> Option<&mut Person> {
        let index = self.current_person_index();
        self.persons.get_mut(index)
    }

    /// Resize to the declared party size, preserving existing entries by
    /// index: grow with blank persons, truncate from the end.
    pub fn resize_persons(&mut self, count: usize) {
        let count = count.max(1);
        while self.persons.len() < count {
            self.persons.push(Person::blank());
        }
        self.persons.truncate(count);
        self.cur_person = self.current_person_index();
    }

    /// Guarantee at least one person exists.
    pub fn ensure_persons(&mut self) {
        if self.persons.is_empty() {
            self.persons.push(Person::blank());
        }
    }

    /// How many persons have a name and a plan selected.
    pub fn completed_person_count(&self) -> usize {
        self.persons.iter().filter(|p| p.has_details()).count()
    }

    /// Whether every person's meal selection is complete.
    pub fn all_selections_complete(&self) -> bool {
        !self.persons.is_empty() && self.persons.iter().all(|p| p.is_complete())
    }

    /// Sum of all persons' plan prices.
    pub fn plan_subtotal(&self) -> f64 {
        self.persons
            .iter()
            .filter_map(|p| p.plan.as_ref())
            .filter_map(|plan| plan.price)
            .sum()
    }
}
