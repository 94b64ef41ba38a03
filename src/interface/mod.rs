pub mod export;
pub mod prompts;
pub mod render;

pub use export::{write_plan_csv, write_plan_csv_to};
pub use prompts::{prompt_profile_update, prompt_yes_no};
pub use render::{
    display_cart, display_dashboard, display_day, display_order, display_product,
    display_product_list, display_profile, display_progress, display_report, display_targets,
    display_week,
};
