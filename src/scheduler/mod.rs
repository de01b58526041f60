mod assignment;
mod mutate;
mod types;
mod views;

pub use types::{AssignSummary, RosterError};
pub use views::{DayBoard, OffCard, OffReason, PostSlot, ShiftBoard, StaffCard};

use crate::model::{PostId, Roster, StaffId};
use chrono::NaiveDate;
use rand::Rng;

/// Scheduler : encapsule le Roster et porte toutes les opérations
/// de placement. Les vérifications (éligibilité, occupation,
/// disponibilité) sont centralisées ici, aucun appelant ne peut les
/// contourner.
#[derive(Debug, Default)]
pub struct Scheduler {
    roster: Roster,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            roster: Roster::default(),
        }
    }

    pub fn with_roster(roster: Roster) -> Self {
        Self { roster }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }
    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }

    /// Place un membre sur un poste à une date. Le shift est dérivé du
    /// poste, jamais fourni par l'appelant. Toute allocation existante du
    /// membre pour cette date est remplacée.
    pub fn place(
        &mut self,
        staff_id: &StaffId,
        post_id: &PostId,
        date: NaiveDate,
    ) -> Result<(), RosterError> {
        mutate::place(self, staff_id, post_id, date)
    }

    /// Retire l'allocation de (staff, date) si elle existe.
    pub fn remove_allocation(&mut self, staff_id: &StaffId, date: NaiveDate) -> bool {
        mutate::remove_allocation(self, staff_id, date)
    }

    /// Pose une absence ponctuelle ; retire d'abord l'allocation du jour.
    pub fn set_day_off(&mut self, staff_id: &StaffId, date: NaiveDate) -> Result<(), RosterError> {
        mutate::set_day_off(self, staff_id, date)
    }

    /// Lève une absence ponctuelle. Ne restaure aucune allocation.
    pub fn clear_day_off(&mut self, staff_id: &StaffId, date: NaiveDate) -> bool {
        mutate::clear_day_off(self, staff_id, date)
    }

    /// Bascule l'absence ponctuelle ; renvoie vrai si le membre est
    /// désormais absent.
    pub fn toggle_day_off(
        &mut self,
        staff_id: &StaffId,
        date: NaiveDate,
    ) -> Result<bool, RosterError> {
        mutate::toggle_day_off(self, staff_id, date)
    }

    /// Remplit la journée : passe verrouillée, puis minimums par shift,
    /// puis reliquat. Réinitialise d'abord toutes les allocations de la
    /// date. Le générateur aléatoire est injecté (seedable en test).
    pub fn auto_assign<R: Rng + ?Sized>(&mut self, date: NaiveDate, rng: &mut R) -> AssignSummary {
        assignment::auto_assign(self, date, rng)
    }

    /// Échange les postes de deux membres déjà alloués à cette date.
    pub fn swap(
        &mut self,
        a: &StaffId,
        b: &StaffId,
        date: NaiveDate,
    ) -> Result<(), RosterError> {
        mutate::swap(self, a, b, date)
    }

    /// Vue lecture seule de la journée pour un collaborateur de rendu.
    pub fn day_board(&self, date: NaiveDate) -> DayBoard {
        views::day_board(self, date)
    }
}
