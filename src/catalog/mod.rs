pub mod discounts;
pub mod meals;
pub mod plans;

pub use discounts::{normalize_code, DiscountCatalog, DiscountCode};
pub use meals::{normalize_token, FilterMode, MealCatalog, MealOption};
pub use plans::{parse_price, PlanCatalog, PlanOption};

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// Everything the wizard needs to know about the offering: plan tiers,
/// the meal menu, and accepted discount codes.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub plans: PlanCatalog,
    pub meals: MealCatalog,
    pub discounts: DiscountCatalog,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(rename = "Plans")]
    plans: Vec<PlanOption>,

    #[serde(rename = "Meals", default)]
    meals: Vec<MealOption>,

    /// Plain percent amounts, turned into SAVE{N} codes.
    #[serde(rename = "DiscountAmounts", default)]
    discount_amounts: Vec<u32>,

    /// Fully-specified codes, merged on top of the derived ones.
    #[serde(rename = "Discounts", default)]
    discounts: Vec<DiscountCode>,
}

/// Load a catalog from a JSON file.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let content = fs::read_to_string(path)?;
    let file: CatalogFile = serde_json::from_str(&content)?;

    let mut codes: Vec<DiscountCode> = file
        .discount_amounts
        .iter()
        .filter(|a| (1..=100).contains(*a))
        .map(|a| DiscountCode {
            code: format!("SAVE{}", a),
            percent_off: *a as f64,
            cap: None,
            min_subtotal: 0.0,
        })
        .collect();
    codes.extend(file.discounts);

    Ok(Catalog {
        plans: PlanCatalog::new(file.plans),
        meals: MealCatalog::new(file.meals),
        discounts: DiscountCatalog::new(codes),
    })
}
