//! Outils horaires : heures "HH:MM", durées avec passage de minuit,
//! classification de nuit, clés de semaine ISO.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Début de la plage de nuit (22:00), en minutes.
pub const NIGHT_START_MINUTES: u32 = 22 * 60;
/// Fin de la plage de nuit (06:00), en minutes.
pub const NIGHT_END_MINUTES: u32 = 6 * 60;

/// Convertit "HH:MM" en minutes depuis minuit.
///
/// Tolérant : une entrée vide, mal formée ou hors plage (`24:00`, `25:99`)
/// donne 0. Les entrées non fiables doivent passer par [`parse_time`] en amont.
pub fn to_minutes(time: &str) -> u32 {
    parse_time(time).unwrap_or(0)
}

/// Variante stricte de [`to_minutes`] : `None` si l'heure n'est pas un "HH:MM" valide.
pub fn parse_time(time: &str) -> Option<u32> {
    let (h, m) = time.trim().split_once(':')?;
    let h: u32 = h.trim().parse().ok()?;
    let m: u32 = m.trim().parse().ok()?;
    (h < 24 && m < 60).then_some(h * 60 + m)
}

/// Durée d'un créneau en minutes, avec passage de minuit si `end < start`.
pub fn shift_duration_minutes(start: &str, end: &str) -> u32 {
    let start = to_minutes(start);
    let mut end = to_minutes(end);
    if end < start {
        end += MINUTES_PER_DAY;
    }
    end - start
}

/// Durée d'un créneau en heures (toujours >= 0).
pub fn shift_duration_hours(start: &str, end: &str) -> f64 {
    f64::from(shift_duration_minutes(start, end)) / 60.0
}

/// Créneau de nuit : début à partir de 22:00 ou fin au plus tard à 06:00.
///
/// La règle ne mesure pas le recouvrement réel avec la plage 22:00-06:00 ;
/// elle conditionne les majorations et ne doit pas être resserrée.
pub fn is_night_shift(start: &str, end: &str) -> bool {
    to_minutes(start) >= NIGHT_START_MINUTES || to_minutes(end) <= NIGHT_END_MINUTES
}

/// Clé de semaine ISO 8601, ex. `2025-W01`.
pub fn week_key(date: NaiveDate) -> String {
    let iso = date.iso_week();
    format!("{}-W{:02}", iso.year(), iso.week())
}

/// Jour de la semaine, 0 = dimanche … 6 = samedi.
pub fn day_of_week(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Horodatages de début et de fin d'un créneau posé sur `date`.
/// La fin tombe le lendemain pour un créneau de nuit traversant minuit.
pub fn shift_bounds(date: NaiveDate, start: &str, end: &str) -> (NaiveDateTime, NaiveDateTime) {
    let midnight = date.and_time(NaiveTime::default());
    let start_at = midnight + Duration::minutes(i64::from(to_minutes(start)));
    let end_at = start_at + Duration::minutes(i64::from(shift_duration_minutes(start, end)));
    (start_at, end_at)
}
