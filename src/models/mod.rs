mod order;
mod plan;
mod product;
mod profile;

pub use order::{CartEntry, Order, OrderItem, OrderStatus};
pub use plan::{PlanEntry, WeeklyPlan, Weekday};
pub use product::{Category, NutrientProfile, Product};
pub use profile::{ActivityLevel, ProfileUpdate, UserProfile};
