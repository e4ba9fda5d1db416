pub mod prompts;
pub mod render;

pub use prompts::{
    prompt_category_filter, prompt_delivery_date, prompt_discount_code, prompt_meal,
    prompt_party_size, prompt_person_name, prompt_plan_choice, prompt_quantity,
    prompt_upgrade_decision, prompt_yes_no,
};
pub use render::{
    display_cart, display_meal_grid, display_progress, display_schedule, display_step_header,
};
