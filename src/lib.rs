#![forbid(unsafe_code)]
//! Duty-roster — affectation journalière du personnel à des postes de
//! service, locale (sans BD).
//!
//! - Stockage fichier (JSON), import CSV fusionnant par nom.
//! - Auto-assignation gloutonne : verrous, minimums par shift, reliquat.
//! - Règle métier unique : RAMP ⇒ poste "Flight Manager" seulement.
//! - Une allocation par membre et par poste pour une date donnée.

pub mod io;
pub mod model;
pub mod rules;
pub mod scheduler;
pub mod storage;

pub use io::{export_board_csv, export_board_json, import_staff_csv, ImportSummary};
pub use model::{
    Allocation, DayOff, Department, Post, PostId, Roster, Shift, ShiftId, Staff, StaffId,
};
pub use rules::{is_eligible, is_unavailable, weekday_name, FLIGHT_MANAGER_POST};
pub use scheduler::{AssignSummary, DayBoard, RosterError, Scheduler};
pub use storage::{JsonStorage, Storage};
