use super::Scheduler;
use crate::model::{Department, PostId, Roster, ShiftId, Staff, StaffId};
use crate::rules;
use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::Serialize;

/// Vue lecture seule d'une journée : shifts et occupants, membres non
/// assignés, membres absents. Consommée après chaque mutation par le
/// collaborateur de rendu (page, CLI, export).
#[derive(Debug, Clone, Serialize)]
pub struct DayBoard {
    pub date: NaiveDate,
    pub day_name: &'static str,
    pub shifts: Vec<ShiftBoard>,
    pub unassigned: Vec<StaffCard>,
    pub off: Vec<OffCard>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShiftBoard {
    pub shift_id: ShiftId,
    pub name: String,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub allocated: u32,
    pub min_staff: u32,
    pub short_staffed: bool,
    pub posts: Vec<PostSlot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostSlot {
    pub post_id: PostId,
    pub name: String,
    pub occupant: Option<StaffCard>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StaffCard {
    pub staff_id: StaffId,
    pub name: String,
    pub department: Department,
    /// Nom du shift imposé, s'il existe encore.
    pub locked_shift: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OffCard {
    #[serde(flatten)]
    pub staff: StaffCard,
    pub reason: OffReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OffReason {
    Weekly,
    AdHoc,
}

pub(super) fn day_board(scheduler: &Scheduler, date: NaiveDate) -> DayBoard {
    let roster = scheduler.roster();

    let mut unassigned = Vec::new();
    let mut off = Vec::new();
    for staff in &roster.staff {
        let week_off = staff.week_off_day == Some(date.weekday());
        let ad_hoc = roster.has_day_off(&staff.id, date);
        if week_off || ad_hoc {
            off.push(OffCard {
                staff: card(roster, staff),
                reason: if week_off {
                    OffReason::Weekly
                } else {
                    OffReason::AdHoc
                },
            });
        } else if roster.allocation_for(&staff.id, date).is_none() {
            unassigned.push(card(roster, staff));
        }
    }

    let shifts = roster
        .shifts
        .iter()
        .map(|shift| {
            let allocated = roster
                .allocations_for(date)
                .filter(|a| a.shift_id == shift.id)
                .count() as u32;
            let posts = roster
                .posts_in_shift(&shift.id)
                .map(|post| PostSlot {
                    post_id: post.id.clone(),
                    name: post.name.clone(),
                    // Référence de staff disparue : la case reste vide.
                    occupant: roster
                        .occupant_of(&post.id, date)
                        .and_then(|a| roster.find_staff(&a.staff_id))
                        .map(|s| card(roster, s)),
                })
                .collect();
            ShiftBoard {
                shift_id: shift.id.clone(),
                name: shift.name.clone(),
                start: shift.start,
                end: shift.end,
                allocated,
                min_staff: shift.min_staff,
                short_staffed: allocated < shift.min_staff,
                posts,
            }
        })
        .collect();

    DayBoard {
        date,
        day_name: rules::weekday_name(date),
        shifts,
        unassigned,
        off,
    }
}

fn card(roster: &Roster, staff: &Staff) -> StaffCard {
    StaffCard {
        staff_id: staff.id.clone(),
        name: staff.name.clone(),
        department: staff.department,
        locked_shift: staff
            .locked_shift
            .as_ref()
            .and_then(|id| roster.find_shift(id))
            .map(|s| s.name.clone()),
    }
}
