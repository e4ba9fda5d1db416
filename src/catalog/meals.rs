use serde::{Deserialize, Serialize};

/// One meal on the menu.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealOption {
    #[serde(rename = "Id")]
    pub id: String,

    #[serde(rename = "Name")]
    pub name: String,

    /// Category labels; an entry may hold several tokens separated by
    /// commas, semicolons, slashes, or pipes.
    #[serde(rename = "Categories", default)]
    pub categories: Vec<String>,
}

impl MealOption {
    /// Normalized category tokens for this meal.
    pub fn category_tokens(&self) -> Vec<String> {
        let mut tokens: Vec<String> = self
            .categories
            .iter()
            .flat_map(|raw| split_tokens(raw))
            .collect();
        tokens.sort();
        tokens.dedup();
        tokens
    }
}

/// How multiple selected category filters combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Match meals carrying any selected category.
    Any,
    /// Match meals carrying every selected category.
    All,
}

/// The menu of meals a person can pick from.
#[derive(Debug, Clone, Default)]
pub struct MealCatalog {
    options: Vec<MealOption>,
}

impl MealCatalog {
    pub fn new(options: Vec<MealOption>) -> Self {
        Self { options }
    }

    pub fn all(&self) -> &[MealOption] {
        &self.options
    }

    pub fn get(&self, id: &str) -> Option<&MealOption> {
        self.options.iter().find(|m| m.id == id)
    }

    /// Display name for a meal id, falling back to the id itself.
    pub fn name_for(&self, id: &str) -> String {
        self.get(id)
            .map(|m| m.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    /// All category tokens across the menu, sorted and deduplicated.
    pub fn categories(&self) -> Vec<String> {
        let mut cats: Vec<String> = self
            .options
            .iter()
            .flat_map(|m| m.category_tokens())
            .collect();
        cats.sort();
        cats.dedup();
        cats
    }

    /// Meals matching the selected category tokens. An empty selection
    /// matches everything.
    pub fn filter_by_categories(&self, selected: &[String], mode: FilterMode) -> Vec<&MealOption> {
        let selected: Vec<String> = selected.iter().map(|s| normalize_token(s)).collect();
        self.options
            .iter()
            .filter(|m| {
                if selected.is_empty() {
                    return true;
                }
                let tokens = m.category_tokens();
                match mode {
                    FilterMode::Any => selected.iter().any(|t| tokens.contains(t)),
                    FilterMode::All => selected.iter().all(|t| tokens.contains(t)),
                }
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

/// Canonical form for a category token: trimmed and lowercased.
pub fn normalize_token(s: &str) -> String {
    s.trim().to_lowercase()
}

fn split_tokens(raw: &str) -> Vec<String> {
    raw.split([',', ';', '/', '|'])
        .map(normalize_token)
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_meals() -> Vec<MealOption> {
        vec![
            MealOption {
                id: "m-lasagne".to_string(),
                name: "Lasagne".to_string(),
                categories: vec!["Vegetarian, Gluten Free".to_string()],
            },
            MealOption {
                id: "m-chili".to_string(),
                name: "Chili Con Carne".to_string(),
                categories: vec!["Spicy".to_string(), "Gluten Free".to_string()],
            },
            MealOption {
                id: "m-katsu".to_string(),
                name: "Katsu Curry".to_string(),
                categories: vec![],
            },
        ]
    }

    #[test]
    fn test_category_tokens_split_and_normalize() {
        let meals = sample_meals();
        assert_eq!(
            meals[0].category_tokens(),
            vec!["gluten free".to_string(), "vegetarian".to_string()]
        );
    }

    #[test]
    fn test_categories_collected() {
        let catalog = MealCatalog::new(sample_meals());
        assert_eq!(
            catalog.categories(),
            vec!["gluten free", "spicy", "vegetarian"]
        );
    }

    #[test]
    fn test_filter_any_vs_all() {
        let catalog = MealCatalog::new(sample_meals());

        let selected = vec!["gluten free".to_string(), "spicy".to_string()];
        let any = catalog.filter_by_categories(&selected, FilterMode::Any);
        assert_eq!(any.len(), 2);

        let all = catalog.filter_by_categories(&selected, FilterMode::All);
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, "m-chili");
    }

    #[test]
    fn test_empty_selection_matches_everything() {
        let catalog = MealCatalog::new(sample_meals());
        let visible = catalog.filter_by_categories(&[], FilterMode::Any);
        assert_eq!(visible.len(), 3);
    }
}
