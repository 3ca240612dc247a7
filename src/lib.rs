#![forbid(unsafe_code)]
//! Roulement : génération de plannings d'équipe, contrôle du droit du travail
//! et chiffrage des coûts, sans base de données.
//!
//! - Génération gloutonne multi-critères (jour par jour, modèle par modèle).
//! - Contrôle de conformité : repos quotidien/hebdomadaire, heures sup, nuit.
//! - Chiffrage avec majorations, suggestions budgétaires, prévision linéaire.
//! - Tout en mémoire ; la persistance reste à la charge de l'appelant.

pub mod compliance;
pub mod cost;
pub mod generator;
pub mod io;
pub mod model;
pub mod storage;
pub mod time;

pub use compliance::{
    validate_schedule, Period, Rule, Severity, ValidationOptions, ValidationReport,
    ValidationSummary, Violation,
};
pub use cost::{
    calculate_schedule_cost, calculate_shift_cost, forecast_costs, optimize_costs, Confidence,
    CostBreakdown, CostForecast, CostOptimization, CostOptions, Priority, ScheduleCost,
    Suggestion, SuggestionKind,
};
pub use generator::{
    generate_intelligent_schedule, optimize_existing_schedule, AnalysisConstraints,
    CancellationToken, EmployeeWorkload, ForecastData, GenerationError, GenerationRequest,
    GenerationResult, ScheduleAnalysis, ScheduleConstraints,
};
pub use model::{
    ApprovalStatus, Availability, AvailabilityKind, Employee, EmployeeId, Leave, ModelError,
    PreferredShift, Shift, ShiftId, ShiftKind, ShiftTemplate, ShiftType,
};
pub use storage::{Dataset, JsonStorage, Storage};
