use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::catalog::{CatalogFilter, NutritionFilter};
use crate::models::{ActivityLevel, Category, ProfileUpdate, Weekday};

/// Fresh Mart grocery catalog with a weekly nutrition planner and cart.
#[derive(Parser, Debug)]
#[command(name = "fresh-mart")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the mock database JSON file (users, products, orders).
    #[arg(long, global = true, env = "MART_DATA", default_value = "mart_db.json")]
    pub data: PathBuf,

    /// Path to the device key-value store (plan, routine flag, cart).
    #[arg(long, global = true, env = "MART_STORAGE", default_value = "mart_storage.json")]
    pub storage: PathBuf,

    /// Signed-in user id. Defaults to the first user in the database.
    #[arg(long, global = true, env = "MART_USER")]
    pub user: Option<String>,

    /// Log filter, e.g. `info` or `fresh_mart_rs=debug`. Overrides RUST_LOG.
    #[arg(long, global = true, env = "MART_LOG")]
    pub log_level: Option<String>,
}

/// Catalog filter flags shared by `catalog` and `plan select-all`.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Category aisle (vegetables, fruits, salads, ice creams) or `all`.
    #[arg(short, long)]
    pub category: Option<String>,

    /// Case-insensitive product name search.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Nutrition shortcut filter.
    #[arg(short, long, value_enum, default_value_t = NutritionFilter::All)]
    pub nutrition: NutritionFilter,
}

impl FilterArgs {
    pub fn to_filter(&self) -> CatalogFilter {
        let category = self
            .category
            .as_deref()
            .filter(|c| !c.trim().eq_ignore_ascii_case("all"))
            .map(Category::from_label);

        CatalogFilter {
            category,
            search: self.search.clone().filter(|s| !s.trim().is_empty()),
            nutrition: self.nutrition,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Browse the product catalog.
    Catalog {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show one product's details and top nutrients.
    Product {
        /// Product id or name.
        query: String,
    },

    /// Trending and recommended products plus the weekly summary.
    Dashboard {
        /// Seed for the trending shuffle.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show or edit the user profile.
    Profile {
        #[command(subcommand)]
        action: Option<ProfileCommand>,
    },

    /// Show daily nutrient targets for the profile.
    Targets,

    /// Weekly nutrition planner.
    Plan {
        /// Selected planner day.
        #[arg(short, long, global = true, default_value = "Monday")]
        day: Weekday,

        #[command(subcommand)]
        action: Option<PlanCommand>,
    },

    /// Shopping cart.
    Cart {
        #[command(subcommand)]
        action: Option<CartCommand>,
    },

    /// Weekly nutrition report from order history.
    Report,
}

impl Default for Command {
    fn default() -> Self {
        Command::Dashboard { seed: None }
    }
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    /// Print the profile.
    Show,

    /// Edit the profile interactively.
    Edit,

    /// Update individual profile fields.
    Set(ProfileArgs),
}

#[derive(Args, Debug, Default)]
pub struct ProfileArgs {
    #[arg(long)]
    pub name: Option<String>,

    /// Weight in kg.
    #[arg(long)]
    pub weight: Option<f64>,

    /// Height in cm.
    #[arg(long)]
    pub height: Option<f64>,

    #[arg(long)]
    pub age: Option<u32>,

    /// low, moderate or high.
    #[arg(long)]
    pub activity: Option<String>,

    #[arg(long)]
    pub city: Option<String>,
}

impl ProfileArgs {
    pub fn to_update(&self) -> ProfileUpdate {
        ProfileUpdate {
            name: self.name.clone(),
            weight: self.weight,
            height: self.height,
            age: self.age,
            activity_level: self.activity.as_deref().map(ActivityLevel::from_label),
            city: self.city.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum PlanCommand {
    /// Show the selected day's table and progress.
    Show,

    /// One line per weekday plus the week total.
    Week,

    /// Add one unit of a product to the day.
    Add { product: String },

    /// Remove one unit of a product from the day.
    Remove { product: String },

    /// Set a product's quantity on the day. Zero or less removes it.
    Set {
        product: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Replace the day with every product matching the filter.
    SelectAll {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Remove every item from the day.
    Clear {
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },

    /// Replace the whole week with a generated sample plan.
    Auto,

    /// Export the week as CSV.
    Export {
        #[arg(default_value = "weekly_plan.csv")]
        path: PathBuf,
    },

    /// Show or set the weekly routine flag.
    Routine {
        #[arg(value_enum)]
        state: Option<Toggle>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

#[derive(Subcommand, Debug)]
pub enum CartCommand {
    /// Show the cart with pricing and nutrition.
    Show,

    /// Add units of a product.
    Add {
        product: String,
        #[arg(default_value_t = 1)]
        quantity: u32,
    },

    /// Remove a product entirely.
    Remove { product: String },

    /// Set the quantity of a product already in the cart.
    Set {
        product: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Empty the cart.
    Clear,

    /// Place an order for the cart contents.
    Checkout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_day_after_subcommand() {
        let cli = Cli::try_parse_from(["fresh-mart", "plan", "add", "kale", "--day", "wed"]).unwrap();
        match cli.command {
            Some(Command::Plan { day, action: Some(PlanCommand::Add { product }) }) => {
                assert_eq!(day, Weekday::Wednesday);
                assert_eq!(product, "kale");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_plan_day_defaults_to_monday() {
        let cli = Cli::try_parse_from(["fresh-mart", "plan"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Plan { day: Weekday::Monday, action: None })));
    }

    #[test]
    fn test_negative_quantity_parses() {
        let cli = Cli::try_parse_from(["fresh-mart", "cart", "set", "fruit-apple", "-1"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Cart { action: Some(CartCommand::Set { quantity: -1, .. }) })
        ));
    }

    #[test]
    fn test_filter_args() {
        let args = FilterArgs {
            category: Some("All".to_string()),
            search: Some("  ".to_string()),
            nutrition: NutritionFilter::HighFiber,
        };
        let filter = args.to_filter();
        assert_eq!(filter.category, None);
        assert_eq!(filter.search, None);

        let args = FilterArgs {
            category: Some("ice creams".to_string()),
            ..Default::default()
        };
        assert_eq!(args.to_filter().category, Some(Category::IceCreams));
    }

    #[test]
    fn test_profile_args_to_update() {
        let args = ProfileArgs {
            weight: Some(72.5),
            activity: Some("HIGH".to_string()),
            ..Default::default()
        };
        let update = args.to_update();
        assert_eq!(update.weight, Some(72.5));
        assert_eq!(update.activity_level, Some(ActivityLevel::High));
        assert!(update.name.is_none());
    }
}
