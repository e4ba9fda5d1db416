use clap::{Parser, Subcommand};

/// MealSignupWizard — A step-by-step signup flow for multi-person meal plans.
#[derive(Parser, Debug)]
#[command(name = "meal_signup_wizard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the catalog JSON file (plans, meals, discounts).
    #[arg(short, long, default_value = "catalog.json")]
    pub catalog: String,

    /// Directory holding persisted wizard snapshots.
    #[arg(long, default_value = ".wizard_state")]
    pub state_dir: String,

    /// Form instance the snapshot is keyed by.
    #[arg(long, default_value = "default")]
    pub form_id: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Walk through the signup steps (resumes a saved session).
    Select {
        /// Jump straight to meal selection for this person (1-based).
        #[arg(long)]
        person: Option<usize>,

        /// Move to the next person automatically when a selection completes.
        #[arg(long)]
        auto_advance: bool,
    },

    /// Show the current cart and totals.
    Cart {
        /// Discount code to apply.
        #[arg(long)]
        code: Option<String>,
    },

    /// Export the current order as CSV.
    Export {
        /// Output file.
        #[arg(long, default_value = "order_summary.csv")]
        out: String,
    },

    /// List upcoming delivery Saturdays.
    Schedule {
        /// How many weeks ahead to show.
        #[arg(long, default_value_t = 8)]
        weeks: usize,
    },

    /// Discard the saved session for this form.
    Reset,
}

impl Default for Command {
    fn default() -> Self {
        Command::Select {
            person: None,
            auto_advance: false,
        }
    }
}
