//! Règles d'éligibilité pures — seule source de vérité consultée par tous
//! les chemins de placement (drop manuel, auto-assignation, swap).

use crate::model::{DayOff, Department, Post, Staff};
use chrono::{Datelike, NaiveDate};

/// Libellé réservé : seul poste ouvert au personnel RAMP.
pub const FLIGHT_MANAGER_POST: &str = "Flight Manager";

/// Faux uniquement pour un membre RAMP sur un poste autre que
/// "Flight Manager" ; vrai dans tous les autres cas.
pub fn is_eligible(staff: &Staff, post: &Post) -> bool {
    !(staff.department == Department::Ramp && post.name != FLIGHT_MANAGER_POST)
}

/// Indisponible si le repos hebdomadaire tombe ce jour-là, ou si une
/// absence ponctuelle existe pour (staff, date).
pub fn is_unavailable(staff: &Staff, date: NaiveDate, days_off: &[DayOff]) -> bool {
    staff.week_off_day == Some(date.weekday())
        || days_off
            .iter()
            .any(|d| d.staff_id == staff.id && d.date == date)
}

/// Nom anglais du jour via une table fixe (calendrier pur, aucun fuseau).
pub fn weekday_name(date: NaiveDate) -> &'static str {
    const DAYS: [&str; 7] = [
        "Sunday",
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
    ];
    DAYS[date.weekday().num_days_from_sunday() as usize]
}
