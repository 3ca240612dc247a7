//! Contrôle de conformité d'un planning au droit du travail.
//!
//! Fonctions pures : chaque règle regroupe les créneaux travaillés par salarié,
//! les trie par date, et renvoie ses violations. Rien ne lève d'erreur.

mod rules;
mod types;

pub use rules::{
    validate_daily_rest, validate_max_daily_hours, validate_max_weekly_hours,
    validate_night_work, validate_overtime, validate_weekly_rest,
};
pub use types::*;

use crate::model::Shift;

/// Contrôle complet ; le planning est valide ssi aucune violation de sévérité `error`.
pub fn validate_schedule(shifts: &[Shift], options: &ValidationOptions) -> ValidationReport {
    let mut violations = Vec::new();

    if options.check_daily_rest {
        violations.extend(validate_daily_rest(shifts));
    }
    if options.check_max_hours {
        violations.extend(validate_max_daily_hours(shifts));
        violations.extend(validate_max_weekly_hours(shifts));
    }
    if options.check_overtime {
        violations.extend(validate_overtime(shifts, options.period));
    }
    if options.check_night_work {
        violations.extend(validate_night_work(shifts));
    }
    if options.check_weekly_rest {
        violations.extend(validate_weekly_rest(shifts));
    }

    let report = ValidationReport::from_violations(violations);
    tracing::debug!(
        shifts = shifts.len(),
        errors = report.summary.errors,
        warnings = report.summary.warnings,
        "schedule validated"
    );
    report
}
