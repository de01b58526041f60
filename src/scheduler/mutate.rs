use super::{RosterError, Scheduler};
use crate::model::{Allocation, DayOff, PostId, Roster, StaffId};
use crate::rules;
use chrono::NaiveDate;

pub(super) fn place(
    scheduler: &mut Scheduler,
    staff_id: &StaffId,
    post_id: &PostId,
    date: NaiveDate,
) -> Result<(), RosterError> {
    let roster = &mut scheduler.roster;
    let staff = roster
        .find_staff(staff_id)
        .ok_or_else(|| RosterError::UnknownStaff(staff_id.as_str().to_string()))?;
    let post = roster
        .find_post(post_id)
        .ok_or_else(|| RosterError::UnknownPost(post_id.as_str().to_string()))?;

    if rules::is_unavailable(staff, date, &roster.days_off) {
        return Err(RosterError::Unavailable {
            staff: staff.name.clone(),
            date,
        });
    }
    if !rules::is_eligible(staff, post) {
        return Err(RosterError::Ineligible {
            staff: staff.name.clone(),
            department: staff.department.to_string(),
            post: post.name.clone(),
        });
    }
    if let Some(existing) = roster.occupant_of(post_id, date) {
        if &existing.staff_id != staff_id {
            return Err(RosterError::Occupied {
                post: post.name.clone(),
                occupant: staff_label(roster, &existing.staff_id),
            });
        }
    }

    // Le shift est copié depuis le poste : l'invariant
    // allocation.shift_id == post.shift_id tient par construction.
    let alloc = Allocation {
        staff_id: staff_id.clone(),
        shift_id: post.shift_id.clone(),
        post_id: post_id.clone(),
        date,
    };
    roster
        .allocations
        .retain(|a| !(&a.staff_id == staff_id && a.date == date));
    roster.allocations.push(alloc);
    Ok(())
}

pub(super) fn remove_allocation(
    scheduler: &mut Scheduler,
    staff_id: &StaffId,
    date: NaiveDate,
) -> bool {
    let allocations = &mut scheduler.roster.allocations;
    let before = allocations.len();
    allocations.retain(|a| !(&a.staff_id == staff_id && a.date == date));
    allocations.len() != before
}

pub(super) fn set_day_off(
    scheduler: &mut Scheduler,
    staff_id: &StaffId,
    date: NaiveDate,
) -> Result<(), RosterError> {
    if scheduler.roster.find_staff(staff_id).is_none() {
        return Err(RosterError::UnknownStaff(staff_id.as_str().to_string()));
    }
    if scheduler.roster.has_day_off(staff_id, date) {
        return Ok(());
    }
    // L'indisponibilité prime : on libère d'abord le poste du jour.
    remove_allocation(scheduler, staff_id, date);
    scheduler.roster.days_off.push(DayOff {
        staff_id: staff_id.clone(),
        date,
    });
    Ok(())
}

pub(super) fn clear_day_off(
    scheduler: &mut Scheduler,
    staff_id: &StaffId,
    date: NaiveDate,
) -> bool {
    let days_off = &mut scheduler.roster.days_off;
    let before = days_off.len();
    days_off.retain(|d| !(&d.staff_id == staff_id && d.date == date));
    days_off.len() != before
}

pub(super) fn toggle_day_off(
    scheduler: &mut Scheduler,
    staff_id: &StaffId,
    date: NaiveDate,
) -> Result<bool, RosterError> {
    if scheduler.roster.has_day_off(staff_id, date) {
        clear_day_off(scheduler, staff_id, date);
        Ok(false)
    } else {
        set_day_off(scheduler, staff_id, date)?;
        Ok(true)
    }
}

pub(super) fn swap(
    scheduler: &mut Scheduler,
    a: &StaffId,
    b: &StaffId,
    date: NaiveDate,
) -> Result<(), RosterError> {
    if a == b {
        return Err(RosterError::SelfSwap);
    }
    let roster = &mut scheduler.roster;

    let idx_a = allocation_index(roster, a, date)?;
    let idx_b = allocation_index(roster, b, date)?;

    let staff_a = roster
        .find_staff(a)
        .ok_or_else(|| RosterError::UnknownStaff(a.as_str().to_string()))?;
    let staff_b = roster
        .find_staff(b)
        .ok_or_else(|| RosterError::UnknownStaff(b.as_str().to_string()))?;
    let post_a = roster
        .find_post(&roster.allocations[idx_a].post_id)
        .ok_or_else(|| {
            RosterError::UnknownPost(roster.allocations[idx_a].post_id.as_str().to_string())
        })?;
    let post_b = roster
        .find_post(&roster.allocations[idx_b].post_id)
        .ok_or_else(|| {
            RosterError::UnknownPost(roster.allocations[idx_b].post_id.as_str().to_string())
        })?;

    // Chaque membre doit être éligible au poste de l'autre ; au moindre
    // refus l'opération entière est rejetée, sans mutation.
    if !rules::is_eligible(staff_a, post_b) {
        return Err(RosterError::Ineligible {
            staff: staff_a.name.clone(),
            department: staff_a.department.to_string(),
            post: post_b.name.clone(),
        });
    }
    if !rules::is_eligible(staff_b, post_a) {
        return Err(RosterError::Ineligible {
            staff: staff_b.name.clone(),
            department: staff_b.department.to_string(),
            post: post_a.name.clone(),
        });
    }

    let shift_a = roster.allocations[idx_a].shift_id.clone();
    let post_id_a = roster.allocations[idx_a].post_id.clone();
    let shift_b = roster.allocations[idx_b].shift_id.clone();
    let post_id_b = roster.allocations[idx_b].post_id.clone();

    roster.allocations[idx_a].shift_id = shift_b;
    roster.allocations[idx_a].post_id = post_id_b;
    roster.allocations[idx_b].shift_id = shift_a;
    roster.allocations[idx_b].post_id = post_id_a;
    Ok(())
}

fn allocation_index(
    roster: &Roster,
    staff_id: &StaffId,
    date: NaiveDate,
) -> Result<usize, RosterError> {
    roster
        .allocations
        .iter()
        .position(|x| &x.staff_id == staff_id && x.date == date)
        .ok_or_else(|| RosterError::NotAllocated {
            staff: staff_label(roster, staff_id),
            date,
        })
}

fn staff_label(roster: &Roster, id: &StaffId) -> String {
    roster
        .find_staff(id)
        .map(|s| s.name.clone())
        .unwrap_or_else(|| id.as_str().to_string())
}
