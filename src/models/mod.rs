pub mod person;
pub mod plan;
pub mod step;

pub use person::{MealId, Person};
pub use plan::{MealSelection, Plan};
pub use step::{default_steps, Step, StepKind};
