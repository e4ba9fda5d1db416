use crate::catalog::DiscountCatalog;
use crate::wizard::WizardState;

/// One plan line in the cart: a person and what their plan costs.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanLine {
    pub person_index: usize,
    pub person_label: String,
    pub plan_name: String,
    pub price: f64,
}

/// One meal line in the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct MealLine {
    pub person_index: usize,
    pub person_label: String,
    pub meal_name: String,
    pub qty: u32,
}

/// A pure projection of the wizard state: plan lines, meal lines, and the
/// plan-price subtotal. Building a cart never mutates state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    pub plan_lines: Vec<PlanLine>,
    pub meal_lines: Vec<MealLine>,
    pub subtotal: f64,
}

/// Checkout totals after applying a discount code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartTotals {
    pub subtotal: f64,
    pub discount: f64,
    pub total: f64,
}

/// Derive the cart from the current state.
pub fn build_cart(state: &WizardState) -> Cart {
    let mut cart = Cart::default();

    for (index, person) in state.persons.iter().enumerate() {
        let label = person.display_name(index);
        let plan_name = person
            .plan
            .as_ref()
            .map(|p| p.display_name())
            .unwrap_or_else(|| "Meal plan".to_string());
        let price = person.plan.as_ref().and_then(|p| p.price).unwrap_or(0.0);

        cart.plan_lines.push(PlanLine {
            person_index: index,
            person_label: label.clone(),
            plan_name,
            price,
        });

        for selection in person.meals.values() {
            if selection.qty == 0 {
                continue;
            }
            cart.meal_lines.push(MealLine {
                person_index: index,
                person_label: label.clone(),
                meal_name: selection.name.clone(),
                qty: selection.qty,
            });
        }
    }

    cart.subtotal = state.plan_subtotal();
    cart
}

/// Apply a discount code to a cart. An empty or unknown code leaves the
/// total equal to the subtotal.
pub fn cart_totals(cart: &Cart, discounts: &DiscountCatalog, code: Option<&str>) -> CartTotals {
    let subtotal = cart.subtotal;
    let discount = match code.map(str::trim).filter(|c| !c.is_empty()) {
        Some(code) => discounts.compute_discount(subtotal, code),
        None => 0.0,
    };
    CartTotals {
        subtotal,
        discount,
        total: (subtotal - discount).max(0.0),
    }
}

/// Format an amount as GBP with thousands separators, e.g. "£1,299.50".
pub fn format_gbp(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{}£{}.{:02}", sign, grouped, frac)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DiscountCatalog;
    use crate::models::{MealSelection, Plan};
    use assert_float_eq::assert_float_absolute_eq;

    fn two_person_state() -> WizardState {
        let mut state = WizardState::new();
        state.resize_persons(2);
        state.persons[0].name = "Ada".to_string();
        state.persons[0].plan = Some(Plan {
            name: "Solo".to_string(),
            size: 4,
            price: Some(32.0),
        });
        state.persons[0].meals.insert(
            "m-1".to_string(),
            MealSelection {
                name: "Lasagne".to_string(),
                qty: 2,
            },
        );
        state.persons[1].plan = Some(Plan {
            name: "Duo".to_string(),
            size: 6,
            price: Some(45.0),
        });
        state
    }

    #[test]
    fn test_build_cart_lines_and_subtotal() {
        let cart = build_cart(&two_person_state());

        assert_eq!(cart.plan_lines.len(), 2);
        assert_eq!(cart.plan_lines[0].person_label, "Ada");
        assert_eq!(cart.plan_lines[1].person_label, "Person 2");

        assert_eq!(cart.meal_lines.len(), 1);
        assert_eq!(cart.meal_lines[0].meal_name, "Lasagne");
        assert_eq!(cart.meal_lines[0].qty, 2);

        assert_float_absolute_eq!(cart.subtotal, 77.0, 0.001);
    }

    #[test]
    fn test_cart_totals_with_discount() {
        let mut state = two_person_state();
        state.persons[0].plan.as_mut().unwrap().price = Some(55.0);
        // Subtotal is now 100.
        let cart = build_cart(&state);
        let discounts = DiscountCatalog::from_amounts(&[10]);

        let totals = cart_totals(&cart, &discounts, Some("SAVE10"));
        assert_float_absolute_eq!(totals.discount, 10.0, 0.001);
        assert_float_absolute_eq!(totals.total, 90.0, 0.001);

        let unknown = cart_totals(&cart, &discounts, Some("NOPE"));
        assert_float_absolute_eq!(unknown.discount, 0.0, 0.001);
        assert_float_absolute_eq!(unknown.total, totals.subtotal, 0.001);

        let none = cart_totals(&cart, &discounts, None);
        assert_float_absolute_eq!(none.total, totals.subtotal, 0.001);
    }

    #[test]
    fn test_format_gbp() {
        assert_eq!(format_gbp(0.0), "£0.00");
        assert_eq!(format_gbp(45.0), "£45.00");
        assert_eq!(format_gbp(1299.5), "£1,299.50");
        assert_eq!(format_gbp(-13.0), "-£13.00");
    }
}
