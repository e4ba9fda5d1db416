pub mod events;
pub mod selection;
pub mod state;
pub mod steps;

pub use events::{EventQueue, FieldRef, WizardEvent};
pub use selection::{PendingAdvance, QuantityOutcome, UpgradeOffer};
pub use state::WizardState;
pub use steps::{Wizard, WizardOptions, MAX_PARTY_SIZE};
