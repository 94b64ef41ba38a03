pub mod aggregation;
pub mod constants;
pub mod normalize;
pub mod ranking;
pub mod report;
pub mod sample;
pub mod targets;

pub use aggregation::{
    MetricProgress, NutrientTotals, Portion, aggregate, aggregate_day, aggregate_week,
};
pub use normalize::{normalize_plan, normalize_plan_str};
pub use ranking::{NutrientReading, primary_nutrient, top_nutrients};
pub use report::{ReportWindow, WeeklyReport, order_date, order_instant, weekly_report};
pub use sample::sample_week;
pub use targets::{ComparisonTargets, NutrientTargets, compute_targets};
