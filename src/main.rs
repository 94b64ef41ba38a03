use chrono::{Local, NaiveDateTime};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use fresh_mart_rs::catalog::{Dashboard, ProductSource, filter_products, resolve_product};
use fresh_mart_rs::cli::{CartCommand, Cli, Command, PlanCommand, ProfileCommand, Toggle};
use fresh_mart_rs::config::AppConfig;
use fresh_mart_rs::error::{MartError, Result};
use fresh_mart_rs::interface::{
    display_cart, display_dashboard, display_day, display_order, display_product,
    display_product_list, display_profile, display_progress, display_report, display_targets,
    display_week, prompt_profile_update, prompt_yes_no, write_plan_csv,
};
use fresh_mart_rs::models::{Category, Weekday};
use fresh_mart_rs::planner::{aggregate_week, weekly_report};
use fresh_mart_rs::planner::constants::DAYS_PER_WEEK;
use fresh_mart_rs::state::{
    Cart, KvStore, Session, WeeklyPlanStore, load_or_seed, load_routine, save_database,
    save_routine,
};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(config: &AppConfig) {
    let directive = config.log_directive(std::env::var("RUST_LOG").ok());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::from_cli(&cli);
    init_logging(&config);
    debug!("config: {:?}", config);

    let command = cli.command.unwrap_or_default();
    let now = Local::now().naive_local();

    let db = load_or_seed(&config.data_path)?;
    let mut session = Session::open(db, config.user_id.as_deref())?;
    let mut store = KvStore::open(&config.storage_path)?;

    let db_changed = match command {
        Command::Catalog { filter } => {
            let filter = filter.to_filter();
            if filter.is_unfiltered() {
                for category in Category::ALL {
                    display_product_list(&session.catalog().by_category(category), category.label());
                }
            } else {
                let products = filter_products(session.catalog(), &filter);
                display_product_list(&products, "Catalog");
            }
            false
        }
        Command::Product { query } => {
            let product = resolve_product(session.catalog(), &query)?;
            display_product(product);
            let planned = WeeklyPlanStore::load(&store).plan().quantity_across_week(&product.id);
            if planned > 0 {
                println!("Planned this week: {}", planned);
            }
            false
        }
        Command::Dashboard { seed } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            display_dashboard(&Dashboard::build(&session, now, &mut rng));
            false
        }
        Command::Profile { action } => {
            cmd_profile(&mut session, action.unwrap_or(ProfileCommand::Show))?
        }
        Command::Targets => {
            display_targets(&session.daily_targets(), &session.comparison_targets());
            false
        }
        Command::Plan { day, action } => {
            cmd_plan(&session, &mut store, day, action.unwrap_or(PlanCommand::Show))?;
            false
        }
        Command::Cart { action } => {
            cmd_cart(&mut session, &mut store, now, action.unwrap_or(CartCommand::Show))?
        }
        Command::Report => {
            cmd_report(&session, now);
            false
        }
    };

    if db_changed {
        save_database(&config.data_path, &session.into_database())?;
        debug!("saved database to {}", config.data_path.display());
    }

    Ok(())
}

/// Profile commands. Returns whether the database changed.
fn cmd_profile(session: &mut Session, action: ProfileCommand) -> Result<bool> {
    let update = match action {
        ProfileCommand::Show => {
            display_profile(session.profile());
            return Ok(false);
        }
        ProfileCommand::Edit => prompt_profile_update(session.profile())?,
        ProfileCommand::Set(args) => args.to_update(),
    };

    if update.is_empty() {
        println!("No changes.");
        return Ok(false);
    }

    if update.weight.is_some_and(|w| w < 0.0) || update.height.is_some_and(|h| h < 0.0) {
        return Err(MartError::InvalidInput(
            "Height and weight must be non-negative".to_string(),
        ));
    }

    let profile = session.update_profile(update);
    display_profile(profile);
    display_targets(&session.daily_targets(), &session.comparison_targets());
    Ok(true)
}

fn save_plan(plan: &WeeklyPlanStore, store: &mut KvStore) -> Result<()> {
    plan.save(store)?;
    store.flush()
}

fn cmd_plan(session: &Session, store: &mut KvStore, day: Weekday, action: PlanCommand) -> Result<()> {
    let catalog = session.catalog();
    let targets = session.comparison_targets();

    let mut plan = WeeklyPlanStore::load(store);
    if plan.seed_if_empty(catalog.all_products()) {
        save_plan(&plan, store)?;
    }
    plan.select_day(day);

    match action {
        PlanCommand::Show => {}
        PlanCommand::Week => {
            let routine = load_routine(store);
            display_week(plan.plan(), catalog, routine);
            println!("Week total vs {} days of targets:", DAYS_PER_WEEK);
            let week = aggregate_week(plan.plan(), catalog);
            display_progress(&week.progress(&targets.scaled(DAYS_PER_WEEK)));
            return Ok(());
        }
        PlanCommand::Add { product } => {
            let product = resolve_product(catalog, &product)?;
            plan.add_one(&product.id);
            save_plan(&plan, store)?;
        }
        PlanCommand::Remove { product } => {
            let product = resolve_product(catalog, &product)?;
            plan.remove_one(&product.id);
            save_plan(&plan, store)?;
        }
        PlanCommand::Set { product, quantity } => {
            let product = resolve_product(catalog, &product)?;
            plan.set_quantity(&product.id, quantity);
            save_plan(&plan, store)?;
        }
        PlanCommand::SelectAll { filter } => {
            let products = filter_products(catalog, &filter.to_filter());
            plan.select_all_filtered(&products);
            save_plan(&plan, store)?;
            println!("Selected {} products for {}.", products.len(), day);
        }
        PlanCommand::Clear { yes } => {
            let confirmed = yes || prompt_yes_no(&format!("Clear all items for {}?", day), false)?;
            if !confirmed {
                println!("Nothing cleared.");
                return Ok(());
            }
            plan.clear_day();
            save_plan(&plan, store)?;
        }
        PlanCommand::Auto => {
            plan.auto_generate(catalog.all_products());
            save_plan(&plan, store)?;
            display_week(plan.plan(), catalog, load_routine(store));
            return Ok(());
        }
        PlanCommand::Export { path } => {
            let rows = write_plan_csv(plan.plan(), catalog, &path)?;
            println!("Wrote {} rows to {}", rows, path.display());
            return Ok(());
        }
        PlanCommand::Routine { state } => {
            if let Some(state) = state {
                save_routine(store, state == Toggle::On);
                store.flush()?;
            }
            println!(
                "Weekly routine is {}.",
                if load_routine(store) { "on" } else { "off" }
            );
            return Ok(());
        }
    }

    display_day(&plan, catalog, &targets);
    Ok(())
}

/// Cart commands. Returns whether the database changed.
fn cmd_cart(
    session: &mut Session,
    store: &mut KvStore,
    now: NaiveDateTime,
    action: CartCommand,
) -> Result<bool> {
    let mut cart = Cart::load(store);

    match action {
        CartCommand::Show => {
            display_cart(&cart, session.catalog(), &session.comparison_targets());
            return Ok(false);
        }
        CartCommand::Add { product, quantity } => {
            let id = resolve_product(session.catalog(), &product)?.id.clone();
            cart.add(&id, quantity);
        }
        CartCommand::Remove { product } => {
            let id = resolve_product(session.catalog(), &product)?.id.clone();
            cart.remove(&id);
        }
        CartCommand::Set { product, quantity } => {
            let id = resolve_product(session.catalog(), &product)?.id.clone();
            cart.update_quantity(&id, quantity);
        }
        CartCommand::Clear => cart.clear(),
        CartCommand::Checkout => {
            let order = cart.checkout(session, now)?;
            cart.save(store)?;
            store.flush()?;
            display_order(&order);
            return Ok(true);
        }
    }

    cart.save(store)?;
    store.flush()?;
    display_cart(&cart, session.catalog(), &session.comparison_targets());
    Ok(false)
}

fn cmd_report(session: &Session, now: NaiveDateTime) {
    let report = weekly_report(
        now,
        session.all_orders_for_user(),
        session.catalog(),
        &session.comparison_targets(),
    );
    display_report(&report);
}
