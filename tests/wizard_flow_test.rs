use meal_signup_wizard_rs::catalog::{
    Catalog, DiscountCatalog, MealCatalog, MealOption, PlanCatalog, PlanOption,
};
use meal_signup_wizard_rs::store::MemoryStore;
use meal_signup_wizard_rs::wizard::{
    FieldRef, QuantityOutcome, Wizard, WizardEvent, WizardOptions,
};

fn plan(name: &str, size: u32, price: &str) -> PlanOption {
    PlanOption {
        name: name.to_string(),
        size,
        price: Some(price.to_string()),
    }
}

fn meal(id: &str, name: &str) -> MealOption {
    MealOption {
        id: id.to_string(),
        name: name.to_string(),
        categories: vec![],
    }
}

fn sample_catalog() -> Catalog {
    Catalog {
        plans: PlanCatalog::new(vec![
            plan("Solo", 4, "£32.00"),
            plan("Duo", 6, "£45.00"),
            plan("Family", 8, "£56.00"),
        ]),
        meals: MealCatalog::new(vec![
            meal("m-lasagne", "Lasagne"),
            meal("m-chili", "Chili Con Carne"),
            meal("m-katsu", "Katsu Curry"),
        ]),
        discounts: DiscountCatalog::from_amounts(&[10]),
    }
}

fn new_wizard(options: WizardOptions) -> Wizard<MemoryStore> {
    Wizard::new("test", sample_catalog(), options, MemoryStore::new())
}

#[test]
fn test_selected_total_never_exceeds_capacity() {
    let mut wizard = new_wizard(WizardOptions::default());
    wizard.set_party_size(1);
    wizard.set_person_plan(0, 4).unwrap();

    let moves: [(&str, i64); 6] = [
        ("m-lasagne", 3),
        ("m-chili", 5),
        ("m-lasagne", 0),
        ("m-katsu", 10),
        ("m-chili", 1),
        ("m-lasagne", -2),
    ];

    for (meal_id, desired) in moves {
        wizard.set_quantity(0, meal_id, desired).unwrap();
        let total = wizard.state().persons[0].selected_total();
        assert!(total <= 4, "total {} exceeded capacity after {}", total, meal_id);
    }
}

#[test]
fn test_go_to_same_step_is_a_no_op() {
    let mut wizard = new_wizard(WizardOptions::default());
    wizard.drain_events();

    assert!(wizard.go_to(2));
    let events = wizard.drain_events();
    assert_eq!(events.len(), 1);
    assert_eq!(
        events[0],
        WizardEvent::StepChanged {
            step_index: 2,
            steps_total: 4,
        }
    );

    assert!(!wizard.go_to(2));
    assert!(wizard.drain_events().is_empty());

    // Out-of-range targets clamp to the last step.
    assert!(wizard.go_to(99));
    assert_eq!(wizard.current_step_index(), 3);
    assert!(!wizard.go_to(99));
}

#[test]
fn test_current_person_stays_in_bounds_after_resize() {
    let mut wizard = new_wizard(WizardOptions::default());
    wizard.set_party_size(3);
    wizard.set_person_plan(0, 4).unwrap();
    wizard.set_quantity(0, "m-lasagne", 4).unwrap();

    assert!(wizard.next_person());
    assert_eq!(wizard.state().current_person_index(), 1);

    wizard.set_party_size(1);
    assert_eq!(wizard.state().current_person_index(), 0);
}

#[test]
fn test_overflow_clamps_and_offers_next_size_up() {
    let mut wizard = new_wizard(WizardOptions::default());
    wizard.set_party_size(1);
    wizard.set_person_plan(0, 4).unwrap();

    let first = wizard.set_quantity(0, "m-lasagne", 3).unwrap();
    assert_eq!(first, QuantityOutcome::Updated { qty: 3 });

    let second = wizard.set_quantity(0, "m-lasagne", 6).unwrap();
    match second {
        QuantityOutcome::Clamped {
            stored,
            overflow,
            offer,
        } => {
            assert_eq!(stored, 4);
            assert_eq!(overflow, 2);

            let offer = offer.expect("a 6-meal plan exists");
            assert_eq!(offer.plan.size, 6);
            assert_eq!(offer.plan.name, "Duo");
            assert!((offer.price_delta.unwrap() - 13.0).abs() < 0.001);
        }
        other => panic!("expected Clamped, got {:?}", other),
    }

    // The stored state respects the clamp.
    assert_eq!(wizard.state().persons[0].selected_total(), 4);
}

#[test]
fn test_upgrade_keeps_selected_meals() {
    let mut wizard = new_wizard(WizardOptions::default());
    wizard.set_party_size(1);
    wizard.set_person_plan(0, 4).unwrap();
    wizard.set_quantity(0, "m-lasagne", 4).unwrap();

    let outcome = wizard.set_quantity(0, "m-chili", 2).unwrap();
    let QuantityOutcome::Clamped { offer, .. } = outcome else {
        panic!("expected Clamped");
    };
    let offer = offer.unwrap();
    assert_eq!(offer.plan.size, 6);

    wizard.apply_upgrade(0, &offer).unwrap();
    let person = &wizard.state().persons[0];
    assert_eq!(person.capacity(), 6);
    assert_eq!(person.selected_total(), 4);
    assert!(!person.is_complete());
}

#[test]
fn test_auto_advance_fires_exactly_once() {
    let options = WizardOptions {
        auto_advance: true,
        ..WizardOptions::default()
    };
    let mut wizard = new_wizard(options);
    wizard.set_party_size(2);
    wizard.set_person_plan(0, 4).unwrap();
    wizard.set_person_plan(1, 4).unwrap();

    wizard.set_quantity(0, "m-lasagne", 4).unwrap();
    assert!(wizard.pending_advance().is_some());

    // A repeat update while still complete does not re-arm the task.
    wizard.set_quantity(0, "m-lasagne", 4).unwrap();

    assert!(wizard.fire_pending_advance());
    assert_eq!(wizard.state().current_person_index(), 1);

    assert!(!wizard.fire_pending_advance());
    assert_eq!(wizard.state().current_person_index(), 1);

    // Revisiting the already-completed person does not advance again.
    assert!(wizard.prev_person());
    wizard.set_quantity(0, "m-chili", 0).unwrap();
    assert!(wizard.pending_advance().is_none());
    assert!(!wizard.fire_pending_advance());
}

#[test]
fn test_reopened_selection_cancels_pending_advance() {
    let options = WizardOptions {
        auto_advance: true,
        ..WizardOptions::default()
    };
    let mut wizard = new_wizard(options);
    wizard.set_party_size(2);
    wizard.set_person_plan(0, 4).unwrap();
    wizard.set_person_plan(1, 4).unwrap();

    wizard.set_quantity(0, "m-lasagne", 4).unwrap();
    assert!(wizard.pending_advance().is_some());

    // Dropping below capacity reopens the selection and disarms the task.
    wizard.set_quantity(0, "m-lasagne", 2).unwrap();
    assert!(wizard.pending_advance().is_none());
    assert!(!wizard.fire_pending_advance());
    assert_eq!(wizard.state().current_person_index(), 0);

    // Completing again re-arms it: the guard reset with the reopen.
    wizard.set_quantity(0, "m-lasagne", 4).unwrap();
    assert!(wizard.pending_advance().is_some());
    assert!(wizard.fire_pending_advance());
    assert_eq!(wizard.state().current_person_index(), 1);
}

#[test]
fn test_missing_details_block_forward_navigation() {
    let mut wizard = new_wizard(WizardOptions::default());
    wizard.set_party_size(2);
    wizard.go_to(1);
    wizard.drain_events();

    assert!(!wizard.next());
    assert_eq!(wizard.current_step_index(), 1);
    let events = wizard.drain_events();
    assert_eq!(
        events[0],
        WizardEvent::ValidationFailed {
            step_index: 1,
            field: FieldRef::PersonName(0),
        }
    );

    wizard.set_person_name(0, "Ada").unwrap();
    wizard.set_person_name(1, "Grace").unwrap();
    assert!(!wizard.next());
    let events = wizard.drain_events();
    assert_eq!(
        events[0],
        WizardEvent::ValidationFailed {
            step_index: 1,
            field: FieldRef::PersonPlan(0),
        }
    );

    wizard.set_person_plan(0, 4).unwrap();
    wizard.set_person_plan(1, 6).unwrap();
    assert!(wizard.next());
    assert_eq!(wizard.current_step_index(), 2);
}

#[test]
fn test_back_never_validates() {
    let mut wizard = new_wizard(WizardOptions::default());
    wizard.set_party_size(2);
    wizard.go_to(1);

    // Details are missing, yet going back is always allowed.
    assert!(wizard.back());
    assert_eq!(wizard.current_step_index(), 0);
    assert!(!wizard.back());
}

#[test]
fn test_checkout_gate_requires_last_complete_person() {
    let mut wizard = new_wizard(WizardOptions::default());
    wizard.set_party_size(2);
    wizard.set_person_plan(0, 4).unwrap();
    wizard.set_person_plan(1, 4).unwrap();

    wizard.set_quantity(0, "m-lasagne", 4).unwrap();
    assert!(!wizard.can_continue_to_checkout());
    assert!(wizard.can_next_person());

    assert!(wizard.next_person());
    assert!(!wizard.can_continue_to_checkout());

    wizard.set_quantity(1, "m-chili", 4).unwrap();
    assert!(wizard.can_continue_to_checkout());
}

#[test]
fn test_smaller_plan_trims_meals_to_fit() {
    let mut wizard = new_wizard(WizardOptions::default());
    wizard.set_party_size(1);
    wizard.set_person_plan(0, 8).unwrap();
    wizard.set_quantity(0, "m-lasagne", 5).unwrap();
    wizard.set_quantity(0, "m-chili", 3).unwrap();

    wizard.set_person_plan(0, 4).unwrap();
    let person = &wizard.state().persons[0];
    assert!(person.selected_total() <= 4);
    assert_eq!(person.capacity(), 4);
}
