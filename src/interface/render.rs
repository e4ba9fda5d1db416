use crate::cart::{format_gbp, Cart, CartTotals};
use crate::catalog::MealOption;
use crate::models::{Person, Step};

/// Display the step header with overall progress.
pub fn display_step_header(step: &Step, step_index: usize, total_steps: usize, percent: u32) {
    println!();
    println!(
        "=== Step {} of {}: {} ({}%) ===",
        step_index + 1,
        total_steps,
        step.kind.label(),
        percent
    );
    println!("{}", step.title);
    println!();
}

/// Display one person's selection progress.
pub fn display_progress(person: &Person, index: usize) {
    let capacity = person.capacity();
    let selected = person.selected_total();

    if person.is_complete() {
        println!(
            "{}: 🎉Yay! Your selection is completed!✅",
            person.display_name(index)
        );
    } else {
        println!(
            "{}: {} of {} meals selected",
            person.display_name(index),
            selected,
            capacity
        );
    }
}

/// Display the visible meals, with selected quantities alongside.
pub fn display_meal_grid(meals: &[&MealOption], person: &Person) {
    if meals.is_empty() {
        println!("No meals match the current filter.");
        return;
    }

    println!();
    println!("=== Meals ({} shown) ===", meals.len());
    println!();

    let max_name_len = meals.iter().map(|m| m.name.len()).max().unwrap_or(10);

    for meal in meals {
        let qty = person.meals.get(&meal.id).map(|m| m.qty).unwrap_or(0);
        let qty_str = if qty > 0 {
            format!("  x{}", qty)
        } else {
            String::new()
        };
        let categories = if meal.categories.is_empty() {
            String::new()
        } else {
            format!("  [{}]", meal.categories.join(", "))
        };

        println!(
            "  {:<width$}{}{}",
            meal.name,
            qty_str,
            categories,
            width = max_name_len
        );
    }

    println!();
}

/// Display the cart with per-person lines and totals.
pub fn display_cart(cart: &Cart, totals: &CartTotals, code: Option<&str>) {
    println!();
    println!("=== Your Order ===");
    println!();

    if cart.plan_lines.is_empty() {
        println!("(empty)");
        println!();
        return;
    }

    for line in &cart.plan_lines {
        println!(
            "  {} - {} ({})",
            line.person_label,
            line.plan_name,
            format_gbp(line.price)
        );
        for meal in cart
            .meal_lines
            .iter()
            .filter(|m| m.person_index == line.person_index)
        {
            println!("      {} x{}", meal.meal_name, meal.qty);
        }
    }

    println!();
    println!("--- Totals ---");
    println!("Subtotal: {}", format_gbp(totals.subtotal));
    if totals.discount > 0.0 {
        let label = code.unwrap_or("discount");
        println!("Discount ({}): -{}", label, format_gbp(totals.discount));
    }
    println!("Total: {}", format_gbp(totals.total));
    println!();
}

/// Display upcoming delivery Saturdays.
pub fn display_schedule(dates: &[chrono::NaiveDate]) {
    if dates.is_empty() {
        println!("No delivery dates available.");
        return;
    }

    println!();
    println!("=== Upcoming delivery dates ===");
    println!();
    for date in dates {
        println!("  {}", crate::schedule::format_long(*date));
    }
    println!();
}
