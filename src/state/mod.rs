mod cart;
mod persistence;
mod plan_store;
mod session;

pub use cart::{Cart, CartPricing};
pub use persistence::{
    CART_KEY, KvStore, MartDatabase, PLAN_KEY, ROUTINE_KEY, load_database, load_or_seed,
    load_routine, save_database, save_routine,
};
pub use plan_store::WeeklyPlanStore;
pub use session::Session;
