use thiserror::Error;

#[derive(Debug, Error)]
pub enum WizardError {
    #[error("Person not found at index {0}")]
    PersonNotFound(usize),

    #[error("No plan with size {0} in the catalog")]
    UnknownPlanSize(u32),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, WizardError>;
