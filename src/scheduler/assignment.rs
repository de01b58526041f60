use super::{AssignSummary, Scheduler};
use crate::model::{Allocation, PostId, ShiftId, StaffId};
use crate::rules;
use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;

/// Heuristique gloutonne, sans retour arrière : verrous d'abord, puis
/// minimums par shift dans l'ordre de stockage, puis reliquat. L'ordre
/// des passes est porteur de sens (il décide quel shift reste en
/// sous-effectif quand le personnel manque) et ne doit pas changer.
pub(super) fn auto_assign<R: Rng + ?Sized>(
    scheduler: &mut Scheduler,
    date: NaiveDate,
    rng: &mut R,
) -> AssignSummary {
    let roster = &mut scheduler.roster;

    // 1. Pool de disponibilité, dans l'ordre de stockage.
    let mut pool: Vec<StaffId> = roster
        .staff
        .iter()
        .filter(|s| !rules::is_unavailable(s, date, &roster.days_off))
        .map(|s| s.id.clone())
        .collect();

    // 2. La journée repart de zéro.
    roster.allocations.retain(|a| a.date != date);

    // 3. Tous les postes sont ouverts (les shifts ne sont pas filtrés
    //    par date).
    let mut open_posts: Vec<PostId> = roster.posts.iter().map(|p| p.id.clone()).collect();

    // 4. Passe verrouillée : premier poste éligible libre du shift imposé.
    //    Sans poste éligible, le membre reste dans le pool (best effort).
    let locked: Vec<StaffId> = pool
        .iter()
        .filter(|id| {
            roster
                .find_staff(id)
                .is_some_and(|s| s.locked_shift.is_some())
        })
        .cloned()
        .collect();
    for staff_id in locked {
        let Some(staff) = roster.find_staff(&staff_id).cloned() else {
            continue;
        };
        let Some(shift_id) = staff.locked_shift.clone() else {
            continue;
        };
        if roster.find_shift(&shift_id).is_none() {
            continue;
        }
        let target = open_posts.iter().position(|pid| {
            roster
                .find_post(pid)
                .is_some_and(|p| p.shift_id == shift_id && rules::is_eligible(&staff, p))
        });
        if let Some(i) = target {
            let post_id = open_posts.remove(i);
            roster.allocations.push(Allocation {
                staff_id: staff_id.clone(),
                shift_id,
                post_id,
                date,
            });
            pool.retain(|id| id != &staff_id);
        }
    }

    // 5. Mélange du pool restant.
    pool.shuffle(rng);

    // 6. Minimums, shift par shift dans l'ordre de stockage. `needed` est
    //    figé au moment où le shift est traité.
    let shift_ids: Vec<ShiftId> = roster.shifts.iter().map(|s| s.id.clone()).collect();
    for shift_id in shift_ids {
        let Some(min_staff) = roster.find_shift(&shift_id).map(|s| s.min_staff) else {
            continue;
        };
        let current = roster
            .allocations_for(date)
            .filter(|a| a.shift_id == shift_id)
            .count() as u32;
        let mut needed = min_staff.saturating_sub(current);

        while needed > 0 {
            let pair = pool.iter().enumerate().find_map(|(si, staff_id)| {
                let staff = roster.find_staff(staff_id)?;
                let pi = open_posts.iter().position(|pid| {
                    roster
                        .find_post(pid)
                        .is_some_and(|p| p.shift_id == shift_id && rules::is_eligible(staff, p))
                })?;
                Some((si, pi))
            });
            // Un scan complet sans paire valide clôt ce shift.
            let Some((si, pi)) = pair else { break };
            let staff_id = pool.remove(si);
            let post_id = open_posts.remove(pi);
            roster.allocations.push(Allocation {
                staff_id,
                shift_id: shift_id.clone(),
                post_id,
                date,
            });
            needed -= 1;
        }
    }

    // 7. Reliquat : premier poste éligible libre, tous shifts confondus.
    let leftovers: Vec<StaffId> = pool.clone();
    for staff_id in leftovers {
        let Some(staff) = roster.find_staff(&staff_id).cloned() else {
            continue;
        };
        let found = open_posts.iter().enumerate().find_map(|(pi, pid)| {
            let post = roster.find_post(pid)?;
            rules::is_eligible(&staff, post)
                .then(|| (pi, post.shift_id.clone()))
        });
        if let Some((pi, shift_id)) = found {
            let post_id = open_posts.remove(pi);
            roster.allocations.push(Allocation {
                staff_id: staff_id.clone(),
                shift_id,
                post_id,
                date,
            });
            pool.retain(|id| id != &staff_id);
        }
    }

    AssignSummary {
        placed: roster.allocations_for(date).count(),
        unassigned_staff: pool.len(),
        unfilled_posts: open_posts.len(),
    }
}
