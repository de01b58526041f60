use crate::model::{Department, Roster, ShiftId, Staff};
use crate::scheduler::DayBoard;
use anyhow::{bail, Context};
use chrono::{NaiveTime, Weekday};
use csv::{ReaderBuilder, WriterBuilder};
use std::path::Path;
use std::str::FromStr;

/// Bilan d'une fusion d'import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
}

/// Import de personnel depuis un CSV, fusionné par nom (insensible à la
/// casse) : les noms connus sont écrasés sur place (id conservé), les
/// autres créent un nouveau membre.
///
/// En-tête requis : `name, department, lockedShift, weekOffDay` (casse et
/// ordre libres). En-tête incomplet : l'import entier échoue avant la
/// première ligne. Ligne invalide : ignorée, jamais fatale.
pub fn import_staff_csv<P: AsRef<Path>>(path: P, roster: &mut Roster) -> anyhow::Result<ImportSummary> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(&path)
        .with_context(|| format!("opening {}", path.as_ref().display()))?;

    let headers = rdr.headers().context("reading CSV header")?;
    let normalized: Vec<String> = headers
        .iter()
        .map(|h| h.to_ascii_lowercase().replace(char::is_whitespace, ""))
        .collect();
    let column = |name: &str| normalized.iter().position(|h| h == name);
    let (Some(c_name), Some(c_dept), Some(c_lock), Some(c_week)) = (
        column("name"),
        column("department"),
        column("lockedshift"),
        column("weekoffday"),
    ) else {
        bail!("invalid CSV headers: expected name, department, lockedShift, weekOffDay");
    };

    let mut summary = ImportSummary::default();
    for rec in rdr.records() {
        let Ok(rec) = rec else {
            summary.skipped += 1;
            continue;
        };
        let cell = |i: usize| rec.get(i).unwrap_or("").trim();
        let name = cell(c_name);
        let Some(department) = Department::parse(cell(c_dept)) else {
            summary.skipped += 1;
            continue;
        };
        if name.is_empty() {
            summary.skipped += 1;
            continue;
        }

        let locked_shift = resolve_locked_shift(roster, cell(c_lock));
        let week_off_day = Weekday::from_str(cell(c_week)).ok();

        match roster.find_staff_by_name_mut(name) {
            Some(existing) => {
                existing.name = name.to_string();
                existing.department = department;
                existing.locked_shift = locked_shift;
                existing.week_off_day = week_off_day;
                summary.updated += 1;
            }
            None => {
                let mut staff = Staff::new(name, department);
                staff.locked_shift = locked_shift;
                staff.week_off_day = week_off_day;
                roster.staff.push(staff);
                summary.created += 1;
            }
        }
    }
    Ok(summary)
}

/// Résout une cellule "HH:MM-HH:MM" contre les horaires exacts d'un
/// shift. Aucune correspondance n'est jamais une erreur.
fn resolve_locked_shift(roster: &Roster, cell: &str) -> Option<ShiftId> {
    let (start_raw, end_raw) = cell.split_once('-')?;
    let start = NaiveTime::parse_from_str(start_raw.trim(), "%H:%M").ok()?;
    let end = NaiveTime::parse_from_str(end_raw.trim(), "%H:%M").ok()?;
    roster.find_shift_by_times(start, end).map(|s| s.id.clone())
}

/// Export JSON d'une vue journée (jolie mise en forme)
pub fn export_board_json<P: AsRef<Path>>(path: P, board: &DayBoard) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(board)?;
    std::fs::write(path, s)?;
    Ok(())
}

/// Export CSV d'une vue journée : header `shift,post,start,end,staff,department`
pub fn export_board_csv<P: AsRef<Path>>(path: P, board: &DayBoard) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["shift", "post", "start", "end", "staff", "department"])?;
    for shift in &board.shifts {
        let start = shift.start.format("%H:%M").to_string();
        let end = shift.end.format("%H:%M").to_string();
        for post in &shift.posts {
            let (staff, dept) = post
                .occupant
                .as_ref()
                .map(|o| (o.name.as_str(), o.department.as_str()))
                .unwrap_or(("", ""));
            w.write_record([
                shift.name.as_str(),
                post.name.as_str(),
                start.as_str(),
                end.as_str(),
                staff,
                dept,
            ])?;
        }
    }
    w.flush()?;
    Ok(())
}
