//! Chiffrage des plannings : coût par créneau, agrégats, suggestions budgétaires,
//! prévision.

mod calculator;
mod forecast;
mod optimize;
mod types;

pub use calculator::{calculate_schedule_cost, calculate_shift_cost};
pub use forecast::{forecast_costs, DEFAULT_FORECAST_PERIOD_DAYS};
pub use optimize::{optimize_costs, RATE_SPREAD_THRESHOLD};
pub use types::*;
