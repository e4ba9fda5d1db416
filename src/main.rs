use clap::Parser;
use dialoguer::Select;
use std::path::Path;
use std::thread;
use std::time::Duration;

use meal_signup_wizard_rs::cart::{build_cart, cart_totals, format_gbp};
use meal_signup_wizard_rs::catalog::{load_catalog, Catalog, FilterMode};
use meal_signup_wizard_rs::cli::{Cli, Command};
use meal_signup_wizard_rs::error::{Result, WizardError};
use meal_signup_wizard_rs::interface::{
    display_cart, display_meal_grid, display_progress, display_schedule, display_step_header,
    prompt_category_filter, prompt_delivery_date, prompt_discount_code, prompt_meal,
    prompt_party_size, prompt_person_name, prompt_plan_choice, prompt_quantity,
    prompt_upgrade_decision, prompt_yes_no,
};
use meal_signup_wizard_rs::models::StepKind;
use meal_signup_wizard_rs::schedule::{default_delivery_saturday, delivery_options, format_long};
use meal_signup_wizard_rs::store::{
    self, EditRequest, FileStore, KeyValueStore,
};
use meal_signup_wizard_rs::wizard::{
    FieldRef, QuantityOutcome, Wizard, WizardEvent, WizardOptions,
};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut cli = Cli::parse();
    let command = cli.command.take().unwrap_or_default();

    match command {
        Command::Select {
            person,
            auto_advance,
        } => cmd_select(&cli, person, auto_advance),
        Command::Cart { code } => cmd_cart(&cli, code.as_deref()),
        Command::Export { out } => cmd_export(&cli, &out),
        Command::Schedule { weeks } => cmd_schedule(weeks),
        Command::Reset => cmd_reset(&cli),
    }
}

fn load_catalog_or_hint(path: &str) -> Result<Option<Catalog>> {
    if !Path::new(path).exists() {
        eprintln!("Catalog file not found: {}", path);
        eprintln!("Please ensure catalog.json exists in the current directory.");
        return Ok(None);
    }
    Ok(Some(load_catalog(path)?))
}

/// Walk the signup steps interactively.
fn cmd_select(cli: &Cli, person: Option<usize>, auto_advance: bool) -> Result<()> {
    let Some(catalog) = load_catalog_or_hint(&cli.catalog)? else {
        return Ok(());
    };

    let mut store = FileStore::new(&cli.state_dir);
    if let Some(person) = person {
        store::store_edit_request(
            &mut store,
            &cli.form_id,
            &EditRequest {
                person_index: person.saturating_sub(1),
            },
        );
    }

    let options = WizardOptions {
        auto_advance,
        ..WizardOptions::default()
    };
    let mut wizard = Wizard::new(cli.form_id.clone(), catalog, options, store);

    loop {
        let step = *wizard.current_step();
        display_step_header(
            &step,
            wizard.current_step_index(),
            wizard.total_steps(),
            wizard.progress_percent(),
        );

        match step.kind {
            StepKind::PartySize => step_party_size(&mut wizard)?,
            StepKind::PersonDetails => step_person_details(&mut wizard)?,
            StepKind::MealSelection => step_meal_selection(&mut wizard)?,
            StepKind::Checkout => {
                step_checkout(&mut wizard)?;
                break;
            }
        }

        report_events(&mut wizard);
    }

    Ok(())
}

fn step_party_size<S: KeyValueStore>(wizard: &mut Wizard<S>) -> Result<()> {
    let count = prompt_party_size(wizard.party_size())?;
    wizard.set_party_size(count);
    wizard.next();
    Ok(())
}

fn step_person_details<S: KeyValueStore>(wizard: &mut Wizard<S>) -> Result<()> {
    let done = wizard.state().completed_person_count();
    if done > 0 {
        println!(
            "{} of {} people already have a name and plan.",
            done,
            wizard.party_size()
        );
    }

    for index in 0..wizard.party_size() {
        let (label, current_name) = {
            let person = &wizard.state().persons[index];
            (person.display_name(index), person.name.clone())
        };

        let name = prompt_person_name(&label, &current_name)?;
        wizard.set_person_name(index, &name)?;

        let label = wizard.state().persons[index].display_name(index);
        let size = prompt_plan_choice(&wizard.catalog().plans, &label)?;
        wizard.set_person_plan(index, size)?;
    }

    if !wizard.next() {
        let back = prompt_yes_no("Some details are missing. Go back a step?", false)?;
        if back {
            wizard.back();
        }
    }
    Ok(())
}

fn step_meal_selection<S: KeyValueStore>(wizard: &mut Wizard<S>) -> Result<()> {
    let mut filter: (Vec<String>, FilterMode) = (Vec::new(), FilterMode::Any);

    loop {
        let person_index = wizard.state().current_person_index();
        {
            let person = &wizard.state().persons[person_index];
            display_progress(person, person_index);

            let visible = wizard
                .catalog()
                .meals
                .filter_by_categories(&filter.0, filter.1);
            display_meal_grid(&visible, person);
        }

        let mut actions = vec!["Add or change a meal".to_string()];
        if !wizard.catalog().meals.categories().is_empty() {
            actions.push("Filter meals".to_string());
        }
        if wizard.can_next_person() {
            actions.push("Next person".to_string());
        }
        if wizard.can_prev_person() {
            actions.push("Previous person".to_string());
        }
        if wizard.can_continue_to_checkout() {
            actions.push("Continue to checkout".to_string());
        }
        actions.push("Back".to_string());

        let selection = Select::new()
            .with_prompt("What next?")
            .items(&actions)
            .default(0)
            .interact()
            .map_err(WizardError::Prompt)?;

        match actions[selection].as_str() {
            "Add or change a meal" => {
                let visible = wizard
                    .catalog()
                    .meals
                    .filter_by_categories(&filter.0, filter.1);
                let Some(meal_id) = prompt_meal(&visible)? else {
                    continue;
                };

                let current = wizard.state().persons[person_index]
                    .meals
                    .get(&meal_id)
                    .map(|m| m.qty)
                    .unwrap_or(0);
                let meal_name = wizard.catalog().meals.name_for(&meal_id);
                let desired = prompt_quantity(&meal_name, current)?;

                match wizard.set_quantity(person_index, &meal_id, desired)? {
                    QuantityOutcome::Updated { qty } => {
                        println!("Set '{}' to {}", meal_name, qty);
                    }
                    QuantityOutcome::Clamped {
                        stored,
                        overflow,
                        offer,
                    } => {
                        println!("Set '{}' to {} (your plan is full)", meal_name, stored);
                        if let Some(offer) = offer {
                            if prompt_upgrade_decision(&offer, overflow)? {
                                wizard.apply_upgrade(person_index, &offer)?;
                                println!("Upgraded to the {}.", offer.plan.display_name());
                            }
                        }
                    }
                }

                fire_advance_if_due(wizard);
            }
            "Filter meals" => {
                filter = prompt_category_filter(&wizard.catalog().meals)?;
            }
            "Next person" => {
                wizard.next_person();
            }
            "Previous person" => {
                wizard.prev_person();
            }
            "Continue to checkout" => {
                wizard.next();
                return Ok(());
            }
            _ => {
                wizard.back();
                return Ok(());
            }
        }

        report_events(wizard);
    }
}

/// Wait out the scheduled delay, then fire the advance. The engine
/// re-checks the precondition, so a stale task simply does nothing.
fn fire_advance_if_due<S: KeyValueStore>(wizard: &mut Wizard<S>) {
    let Some(pending) = wizard.pending_advance().copied() else {
        return;
    };
    thread::sleep(Duration::from_millis(pending.delay_ms));
    if wizard.fire_pending_advance() {
        let index = wizard.state().current_person_index();
        let label = wizard.state().persons[index].display_name(index);
        println!("Moving on to {}...", label);
    }
}

fn step_checkout<S: KeyValueStore>(wizard: &mut Wizard<S>) -> Result<()> {
    if !wizard.state().all_selections_complete() {
        println!("Heads up: not every person has filled their plan yet.");
    }

    let cart = build_cart(wizard.state());
    let form_id = wizard.form_id().to_string();

    let saved_code = store::load_discount_code(wizard.store(), &form_id);
    let code = prompt_discount_code(saved_code.as_deref())?;

    match &code {
        Some(code) => store::save_discount_code(wizard.store_mut(), &form_id, code),
        None => store::clear_discount_code(wizard.store_mut(), &form_id),
    }

    let totals = cart_totals(&cart, &wizard.catalog().discounts, code.as_deref());
    display_cart(&cart, &totals, code.as_deref());

    if let Some(code) = &code {
        if totals.discount == 0.0 {
            println!("Code '{}' did not apply to this order.", code);
        }
    }

    let now = chrono::Local::now().naive_local();
    let dates = delivery_options(default_delivery_saturday(now), 8);
    let delivery = prompt_delivery_date(&dates)?;

    println!();
    println!(
        "Order of {} confirmed for {}.",
        format_gbp(totals.total),
        format_long(delivery)
    );

    let fresh = prompt_yes_no("Clear this session for a new order?", false)?;
    if fresh {
        store::clear_snapshot(wizard.store_mut(), &form_id);
        println!("Session cleared.");
    }

    Ok(())
}

fn report_events<S: KeyValueStore>(wizard: &mut Wizard<S>) {
    for event in wizard.drain_events() {
        if let WizardEvent::ValidationFailed { field, .. } = event {
            match field {
                FieldRef::PartySize => println!("Please choose how many people first."),
                FieldRef::PersonName(i) => {
                    println!("Person {} still needs a name.", i + 1)
                }
                FieldRef::PersonPlan(i) => {
                    println!("Person {} still needs a plan.", i + 1)
                }
            }
        }
    }
}

/// Show the current cart and totals without entering the wizard.
fn cmd_cart(cli: &Cli, code: Option<&str>) -> Result<()> {
    let Some(catalog) = load_catalog_or_hint(&cli.catalog)? else {
        return Ok(());
    };

    let store = FileStore::new(&cli.state_dir);
    let Some(state) = store::load_snapshot(&store, &cli.form_id) else {
        println!("No saved session for form '{}'.", cli.form_id);
        return Ok(());
    };

    let code = match code {
        Some(code) => Some(code.to_uppercase()),
        None => store::load_discount_code(&store, &cli.form_id),
    };

    let cart = build_cart(&state);
    let totals = cart_totals(&cart, &catalog.discounts, code.as_deref());
    display_cart(&cart, &totals, code.as_deref());

    Ok(())
}

/// Export the current order as CSV.
fn cmd_export(cli: &Cli, out: &str) -> Result<()> {
    let Some(catalog) = load_catalog_or_hint(&cli.catalog)? else {
        return Ok(());
    };

    let store = FileStore::new(&cli.state_dir);
    let Some(state) = store::load_snapshot(&store, &cli.form_id) else {
        println!("No saved session for form '{}'.", cli.form_id);
        return Ok(());
    };

    let code = store::load_discount_code(&store, &cli.form_id);
    let cart = build_cart(&state);
    let totals = cart_totals(&cart, &catalog.discounts, code.as_deref());

    let mut writer = csv::Writer::from_path(out)?;
    writer.write_record(["Person", "Item", "Quantity", "Price"])?;

    for line in &cart.plan_lines {
        let price = format!("{:.2}", line.price);
        writer.write_record([
            line.person_label.as_str(),
            line.plan_name.as_str(),
            "1",
            price.as_str(),
        ])?;
        for meal in cart
            .meal_lines
            .iter()
            .filter(|m| m.person_index == line.person_index)
        {
            let qty = meal.qty.to_string();
            writer.write_record([
                meal.person_label.as_str(),
                meal.meal_name.as_str(),
                qty.as_str(),
                "",
            ])?;
        }
    }

    let subtotal = format!("{:.2}", totals.subtotal);
    writer.write_record(["", "Subtotal", "", subtotal.as_str()])?;
    if totals.discount > 0.0 {
        let discount = format!("-{:.2}", totals.discount);
        writer.write_record(["", "Discount", "", discount.as_str()])?;
    }
    let total = format!("{:.2}", totals.total);
    writer.write_record(["", "Total", "", total.as_str()])?;
    writer.flush()?;

    println!("Order exported to {}", out);
    Ok(())
}

/// List upcoming delivery Saturdays.
fn cmd_schedule(weeks: usize) -> Result<()> {
    let now = chrono::Local::now().naive_local();
    let dates = delivery_options(default_delivery_saturday(now), weeks.max(1));
    display_schedule(&dates);
    Ok(())
}

/// Discard the saved session for this form.
fn cmd_reset(cli: &Cli) -> Result<()> {
    let mut store = FileStore::new(&cli.state_dir);
    store::clear_snapshot(&mut store, &cli.form_id);
    println!("Cleared saved session for form '{}'.", cli.form_id);
    Ok(())
}
