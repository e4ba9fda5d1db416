/// The kind of panel a wizard step represents.
///
/// Steps carry an explicit tag rather than relying on their position, so
/// "the meal-selection step" stays meaningful if the order ever changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    PartySize,
    PersonDetails,
    MealSelection,
    Checkout,
}

impl StepKind {
    pub fn label(&self) -> &'static str {
        match self {
            StepKind::PartySize => "Party size",
            StepKind::PersonDetails => "Plan selection",
            StepKind::MealSelection => "Meal selection",
            StepKind::Checkout => "Checkout",
        }
    }
}

/// Descriptor for one step in the ordered wizard sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub kind: StepKind,
    pub title: &'static str,
}

/// The default four-step signup sequence.
pub fn default_steps() -> Vec<Step> {
    vec![
        Step {
            kind: StepKind::PartySize,
            title: "How many people are you ordering for?",
        },
        Step {
            kind: StepKind::PersonDetails,
            title: "Choose a plan for each person",
        },
        Step {
            kind: StepKind::MealSelection,
            title: "Pick your meals",
        },
        Step {
            kind: StepKind::Checkout,
            title: "Review your order",
        },
    ]
}
