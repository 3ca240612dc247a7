use crate::model::{EmployeeId, ShiftId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Multiplicateurs de majoration ; seule la part au-delà de 1.0 est ajoutée au coût de base.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CostOptions {
    pub overtime_multiplier: f64,
    pub night_shift_multiplier: f64,
    pub weekend_multiplier: f64,
    pub holiday_multiplier: f64,
}

impl Default for CostOptions {
    fn default() -> Self {
        Self {
            overtime_multiplier: 1.5,
            night_shift_multiplier: 1.2,
            weekend_multiplier: 1.5,
            holiday_multiplier: 2.0,
        }
    }
}

/// Détail du coût d'un créneau.
/// `total_cost` = base + heures sup + nuit + week-end + férié.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub base_hours: f64,
    pub base_rate: f64,
    pub base_cost: f64,
    pub overtime_hours: f64,
    pub overtime_cost: f64,
    pub night_shift_bonus: f64,
    pub weekend_bonus: f64,
    pub holiday_bonus: f64,
    pub total_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeCost {
    pub employee_id: EmployeeId,
    pub employee_name: String,
    pub shift_count: u32,
    pub total_hours: f64,
    pub overtime_hours: f64,
    pub total_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftCost {
    pub shift_id: ShiftId,
    pub employee_id: EmployeeId,
    pub employee_name: String,
    pub date: NaiveDate,
    #[serde(flatten)]
    pub breakdown: CostBreakdown,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleCost {
    pub total_cost: f64,
    pub total_hours: f64,
    pub total_overtime_hours: f64,
    pub average_cost_per_hour: f64,
    pub employee_costs: Vec<EmployeeCost>,
    pub shift_costs: Vec<ShiftCost>,
    /// Créneaux ignorés faute de salarié connu.
    pub skipped_shifts: usize,
}

/// Priorité d'une suggestion ; l'ordre de déclaration est l'ordre de tri.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuggestionKind {
    ReduceOvertime,
    ReorganizeNightShifts,
    BalanceStaffRates,
    FixCompliance,
    ReduceCost,
    BalanceWorkload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub priority: Priority,
    pub message: String,
    /// Estimation indicative, pas une garantie.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub potential_savings: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostOptimization {
    pub needs_optimization: bool,
    pub current_cost: f64,
    pub budget: f64,
    /// Dépassement (0 si dans le budget).
    pub overage: f64,
    /// Marge restante quand le budget est tenu.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savings: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostForecast {
    pub forecasted_cost: f64,
    pub daily_average: f64,
    pub confidence: Confidence,
    pub historical_cost: f64,
    pub historical_days: i64,
    pub forecast_period_days: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
