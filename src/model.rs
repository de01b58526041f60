use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifiant fort pour Staff
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StaffId(String);

impl StaffId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifiant fort pour Shift
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShiftId(String);

impl ShiftId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifiant fort pour Post
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostId(String);

impl PostId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Département d'un membre du personnel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Department {
    #[serde(rename = "CS")]
    Cs,
    #[serde(rename = "RAMP")]
    Ramp,
}

impl Department {
    /// Parsing insensible à la casse ("cs", "RAMP", ...).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CS" => Some(Self::Cs),
            "RAMP" => Some(Self::Ramp),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cs => "CS",
            Self::Ramp => "RAMP",
        }
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Membre du personnel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staff {
    pub id: StaffId,
    pub name: String,
    pub department: Department,
    /// Shift imposé : appliqué en priorité lors de l'auto-assignation.
    #[serde(default)]
    pub locked_shift: Option<ShiftId>,
    /// Jour de repos hebdomadaire récurrent.
    #[serde(default)]
    pub week_off_day: Option<Weekday>,
}

impl Staff {
    pub fn new<N: Into<String>>(name: N, department: Department) -> Self {
        Self {
            id: StaffId::random(),
            name: name.into(),
            department,
            locked_shift: None,
            week_off_day: None,
        }
    }
}

/// Vacation journalière (peut passer minuit : `end <= start` est légal)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub id: ShiftId,
    pub name: String,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub min_staff: u32,
}

impl Shift {
    pub fn new<N: Into<String>>(name: N, start: NaiveTime, end: NaiveTime, min_staff: u32) -> Self {
        Self {
            id: ShiftId::random(),
            name: name.into(),
            start,
            end,
            min_staff,
        }
    }
}

/// Poste de service, rattaché à exactement un shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub name: String,
    pub shift_id: ShiftId,
}

impl Post {
    pub fn new<N: Into<String>>(name: N, shift_id: ShiftId) -> Self {
        Self {
            id: PostId::random(),
            name: name.into(),
            shift_id,
        }
    }
}

/// "Ce membre occupe ce poste, dans ce shift, à cette date."
///
/// Clé logique : (staff_id, date) et (post_id, date) sont uniques.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub staff_id: StaffId,
    pub shift_id: ShiftId,
    pub post_id: PostId,
    pub date: NaiveDate,
}

/// Absence ponctuelle (une seule date), indépendante du repos hebdomadaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayOff {
    pub staff_id: StaffId,
    pub date: NaiveDate,
}

/// Store complet des entités
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Roster {
    pub staff: Vec<Staff>,
    pub shifts: Vec<Shift>,
    pub posts: Vec<Post>,
    #[serde(default)]
    pub allocations: Vec<Allocation>,
    #[serde(default)]
    pub days_off: Vec<DayOff>,
}

impl Roster {
    pub fn find_staff<'a>(&'a self, id: &StaffId) -> Option<&'a Staff> {
        self.staff.iter().find(|s| &s.id == id)
    }
    pub fn find_staff_mut(&mut self, id: &StaffId) -> Option<&mut Staff> {
        self.staff.iter_mut().find(|s| &s.id == id)
    }
    /// Recherche par nom exact, insensible à la casse.
    pub fn find_staff_by_name<'a>(&'a self, name: &str) -> Option<&'a Staff> {
        self.staff.iter().find(|s| s.name.eq_ignore_ascii_case(name))
    }
    pub fn find_staff_by_name_mut(&mut self, name: &str) -> Option<&mut Staff> {
        self.staff
            .iter_mut()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }
    pub fn find_shift<'a>(&'a self, id: &ShiftId) -> Option<&'a Shift> {
        self.shifts.iter().find(|s| &s.id == id)
    }
    pub fn find_shift_by_name<'a>(&'a self, name: &str) -> Option<&'a Shift> {
        self.shifts.iter().find(|s| s.name == name)
    }
    /// Résolution d'un shift par sa paire horaire exacte (import CSV).
    pub fn find_shift_by_times<'a>(
        &'a self,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Option<&'a Shift> {
        self.shifts.iter().find(|s| s.start == start && s.end == end)
    }
    pub fn find_post<'a>(&'a self, id: &PostId) -> Option<&'a Post> {
        self.posts.iter().find(|p| &p.id == id)
    }
    pub fn posts_in_shift<'a>(&'a self, shift_id: &'a ShiftId) -> impl Iterator<Item = &'a Post> {
        self.posts.iter().filter(move |p| &p.shift_id == shift_id)
    }

    pub fn allocations_for(&self, date: NaiveDate) -> impl Iterator<Item = &Allocation> {
        self.allocations.iter().filter(move |a| a.date == date)
    }
    pub fn allocation_for<'a>(
        &'a self,
        staff_id: &StaffId,
        date: NaiveDate,
    ) -> Option<&'a Allocation> {
        self.allocations
            .iter()
            .find(|a| &a.staff_id == staff_id && a.date == date)
    }
    pub fn occupant_of<'a>(&'a self, post_id: &PostId, date: NaiveDate) -> Option<&'a Allocation> {
        self.allocations
            .iter()
            .find(|a| &a.post_id == post_id && a.date == date)
    }
    pub fn has_day_off(&self, staff_id: &StaffId, date: NaiveDate) -> bool {
        self.days_off
            .iter()
            .any(|d| &d.staff_id == staff_id && d.date == date)
    }

    /// Supprime un membre et, en cascade, ses allocations et absences.
    pub fn remove_staff(&mut self, id: &StaffId) -> bool {
        let before = self.staff.len();
        self.staff.retain(|s| &s.id != id);
        if self.staff.len() == before {
            return false;
        }
        self.allocations.retain(|a| &a.staff_id != id);
        self.days_off.retain(|d| &d.staff_id != id);
        true
    }

    /// Supprime un shift, ses postes, leurs allocations, et libère les
    /// verrous `locked_shift` qui le référencent.
    pub fn remove_shift(&mut self, id: &ShiftId) -> bool {
        let before = self.shifts.len();
        self.shifts.retain(|s| &s.id != id);
        if self.shifts.len() == before {
            return false;
        }
        self.posts.retain(|p| &p.shift_id != id);
        self.allocations.retain(|a| &a.shift_id != id);
        for staff in &mut self.staff {
            if staff.locked_shift.as_ref() == Some(id) {
                staff.locked_shift = None;
            }
        }
        true
    }

    /// Supprime un poste et ses allocations.
    pub fn remove_post(&mut self, id: &PostId) -> bool {
        let before = self.posts.len();
        self.posts.retain(|p| &p.id != id);
        if self.posts.len() == before {
            return false;
        }
        self.allocations.retain(|a| &a.post_id != id);
        true
    }
}
