use serde::{Deserialize, Serialize};

/// A meal-plan tier: how many meals it includes and what it costs per week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(rename = "Name")]
    pub name: String,

    /// Capacity: the maximum total meal quantity this plan permits.
    #[serde(rename = "Size")]
    pub size: u32,

    #[serde(rename = "Price")]
    pub price: Option<f64>,
}

impl Plan {
    /// Display name, falling back to "{size} meal plan" when unnamed.
    pub fn display_name(&self) -> String {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            format!("{} meal plan", self.size)
        } else {
            trimmed.to_string()
        }
    }
}

/// One selected meal for a person: display name plus quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealSelection {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Qty")]
    pub qty: u32,
}
