use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("unknown staff: {0}")]
    UnknownStaff(String),
    #[error("unknown shift: {0}")]
    UnknownShift(String),
    #[error("unknown post: {0}")]
    UnknownPost(String),
    #[error("{staff} is off on {date}")]
    Unavailable { staff: String, date: NaiveDate },
    #[error("{staff} ({department}) cannot take the \"{post}\" post")]
    Ineligible {
        staff: String,
        department: String,
        post: String,
    },
    #[error("post \"{post}\" is already filled by {occupant}")]
    Occupied { post: String, occupant: String },
    #[error("{staff} has no allocation on {date}")]
    NotAllocated { staff: String, date: NaiveDate },
    #[error("cannot swap a staff member with themself")]
    SelfSwap,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Bilan d'une auto-assignation (une date).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AssignSummary {
    /// Allocations posées, passes verrouillée + minimums + reliquat.
    pub placed: usize,
    /// Membres disponibles restés sans poste.
    pub unassigned_staff: usize,
    /// Postes restés vacants.
    pub unfilled_posts: usize,
}
