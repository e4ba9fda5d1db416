use chrono::NaiveDate;
use dialoguer::{Confirm, Input, MultiSelect, Select};
use strsim::jaro_winkler;

use crate::cart::format_gbp;
use crate::catalog::{FilterMode, MealCatalog, MealOption, PlanCatalog};
use crate::error::{Result, WizardError};
use crate::schedule::format_long;
use crate::wizard::{UpgradeOffer, MAX_PARTY_SIZE};

/// Prompt for the party size.
pub fn prompt_party_size(current: usize) -> Result<usize> {
    let input: String = Input::new()
        .with_prompt(format!(
            "How many people is this meal plan for? (1-{})",
            MAX_PARTY_SIZE
        ))
        .default(current.max(1).to_string())
        .interact_text()?;

    let count: usize = input
        .trim()
        .parse()
        .map_err(|_| WizardError::InvalidInput("Invalid number".to_string()))?;

    if count == 0 || count > MAX_PARTY_SIZE {
        return Err(WizardError::InvalidInput(format!(
            "Party size must be between 1 and {}",
            MAX_PARTY_SIZE
        )));
    }

    Ok(count)
}

/// Prompt for one person's name.
pub fn prompt_person_name(label: &str, current: &str) -> Result<String> {
    let input: String = Input::new()
        .with_prompt(format!("Name for {}", label))
        .default(current.to_string())
        .allow_empty(true)
        .interact_text()?;

    Ok(input.trim().to_string())
}

/// Prompt for one person's plan, offering every catalog plan.
pub fn prompt_plan_choice(plans: &PlanCatalog, label: &str) -> Result<u32> {
    let options = plans.options();
    if options.is_empty() {
        return Err(WizardError::InvalidInput(
            "No plans available in the catalog".to_string(),
        ));
    }

    let items: Vec<String> = options
        .iter()
        .map(|opt| match &opt.price {
            Some(price) => format!("{} ({})", opt.name, price),
            None => opt.name.clone(),
        })
        .collect();

    let selection = Select::new()
        .with_prompt(format!("Choose a plan for {}", label))
        .items(&items)
        .default(0)
        .interact()?;

    Ok(options[selection].size)
}

/// Prompt for a meal by name with fuzzy matching against the catalog.
///
/// Returns None when the user presses Enter on an empty line or rejects
/// every suggestion.
pub fn prompt_meal(meals: &[&MealOption]) -> Result<Option<String>> {
    let input: String = Input::new()
        .with_prompt("Enter a meal (or press Enter to go back)")
        .allow_empty(true)
        .interact_text()?;

    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    // Try exact match first (case-insensitive)
    let exact_match = meals
        .iter()
        .find(|m| m.name.to_lowercase() == input.to_lowercase());

    if let Some(meal) = exact_match {
        return Ok(Some(meal.id.clone()));
    }

    // Try fuzzy matching
    let mut candidates: Vec<(&MealOption, f64)> = meals
        .iter()
        .map(|m| {
            (
                *m,
                jaro_winkler(&m.name.to_lowercase(), &input.to_lowercase()),
            )
        })
        .filter(|(_, score)| *score > 0.7)
        .collect();

    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    if candidates.is_empty() {
        println!("No matching meal found for '{}'", input);
        return Ok(None);
    }

    if candidates.len() == 1 {
        let meal = candidates[0].0;
        let confirm = Confirm::new()
            .with_prompt(format!("Did you mean '{}'?", meal.name))
            .default(true)
            .interact()?;

        return Ok(confirm.then(|| meal.id.clone()));
    }

    // Multiple matches - let user select
    let options: Vec<&MealOption> = candidates.iter().take(5).map(|(m, _)| *m).collect();

    let mut selection_options: Vec<String> = options.iter().map(|m| m.name.clone()).collect();
    selection_options.push("None of these".to_string());

    let selection = Select::new()
        .with_prompt("Which did you mean?")
        .items(&selection_options)
        .default(0)
        .interact()?;

    if selection < options.len() {
        Ok(Some(options[selection].id.clone()))
    } else {
        Ok(None)
    }
}

/// Prompt for a meal quantity.
pub fn prompt_quantity(meal_name: &str, current: u32) -> Result<i64> {
    let input: String = Input::new()
        .with_prompt(format!("How many of '{}'? (0 removes it)", meal_name))
        .default(current.max(1).to_string())
        .interact_text()?;

    input
        .trim()
        .parse()
        .map_err(|_| WizardError::InvalidInput("Invalid number".to_string()))
}

/// Offer the larger plan after a clamped selection. Returns true when the
/// user takes the upgrade.
pub fn prompt_upgrade_decision(offer: &UpgradeOffer, overflow: u32) -> Result<bool> {
    let delta = match offer.price_delta {
        Some(delta) if delta > 0.0 => format!(" for {} more", format_gbp(delta)),
        _ => String::new(),
    };

    let items = vec![
        format!("Upgrade to the {}{}", offer.plan.display_name(), delta),
        "Keep my current plan".to_string(),
    ];

    let selection = Select::new()
        .with_prompt(format!(
            "That's {} more than your plan holds. Upgrade?",
            overflow
        ))
        .items(&items)
        .default(0)
        .interact()?;

    Ok(selection == 0)
}

/// Prompt for category filters. Empty selection keeps every meal visible.
pub fn prompt_category_filter(meals: &MealCatalog) -> Result<(Vec<String>, FilterMode)> {
    let categories = meals.categories();
    if categories.is_empty() {
        return Ok((Vec::new(), FilterMode::Any));
    }

    let picked = MultiSelect::new()
        .with_prompt("Filter by category (space to toggle, Enter to apply)")
        .items(&categories)
        .interact()?;

    let selected: Vec<String> = picked.into_iter().map(|i| categories[i].clone()).collect();
    if selected.len() < 2 {
        return Ok((selected, FilterMode::Any));
    }

    let mode = Select::new()
        .with_prompt("Match meals in any category, or all of them?")
        .items(&["Any of them", "All of them"])
        .default(0)
        .interact()?;

    let mode = if mode == 1 {
        FilterMode::All
    } else {
        FilterMode::Any
    };
    Ok((selected, mode))
}

/// Prompt for a discount code. Empty input means no code.
pub fn prompt_discount_code(current: Option<&str>) -> Result<Option<String>> {
    let input: String = Input::new()
        .with_prompt("Discount code (press Enter to skip)")
        .default(current.unwrap_or("").to_string())
        .allow_empty(true)
        .interact_text()?;

    let code = input.trim().to_uppercase();
    if code.is_empty() {
        Ok(None)
    } else {
        Ok(Some(code))
    }
}

/// Prompt for the delivery Saturday.
pub fn prompt_delivery_date(options: &[NaiveDate]) -> Result<NaiveDate> {
    if options.is_empty() {
        return Err(WizardError::InvalidInput(
            "No delivery dates available".to_string(),
        ));
    }

    let items: Vec<String> = options.iter().map(|d| format_long(*d)).collect();
    let selection = Select::new()
        .with_prompt("Choose a delivery date")
        .items(&items)
        .default(0)
        .interact()?;

    Ok(options[selection])
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
