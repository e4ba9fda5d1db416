pub mod cart;
pub mod catalog;
pub mod cli;
pub mod error;
pub mod interface;
pub mod models;
pub mod schedule;
pub mod store;
pub mod wizard;

pub use error::{Result, WizardError};
pub use models::{MealSelection, Person, Plan, Step, StepKind};
pub use wizard::{Wizard, WizardOptions, WizardState};
