#![forbid(unsafe_code)]
use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDate, NaiveTime, Weekday};
use clap::{Parser, Subcommand};
use duty_roster::{
    io,
    model::{Department, Post, PostId, Roster, Shift, ShiftId, Staff, StaffId},
    rules::FLIGHT_MANAGER_POST,
    scheduler::Scheduler,
    storage::{JsonStorage, Storage},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::str::FromStr;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste d'affectation de postes (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du roster
    #[arg(long, global = true, default_value = "roster.json")]
    store: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Afficher la journée (postes, non-assignés, absents)
    Board {
        /// Date AAAA-MM-JJ (défaut : aujourd'hui)
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Placer un membre sur un poste
    Place {
        #[arg(long)]
        staff: String,
        #[arg(long)]
        shift: String,
        #[arg(long)]
        post: String,
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Retirer l'allocation d'un membre
    Unassign {
        #[arg(long)]
        staff: String,
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Basculer l'absence ponctuelle d'un membre
    DayOff {
        #[arg(long)]
        staff: String,
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Remplir la journée automatiquement
    AutoAssign {
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Graine du mélange (reproductible) ; défaut : aléa système
        #[arg(long)]
        rng_seed: Option<u64>,
    },

    /// Échanger les postes de deux membres alloués
    Swap {
        #[arg(long)]
        staff: String,
        #[arg(long)]
        with: String,
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Importer du personnel depuis un CSV (fusion par nom)
    ImportStaff {
        #[arg(long)]
        csv: String,
    },

    /// Lister le personnel
    ListStaff,

    /// Ajouter un membre
    AddStaff {
        #[arg(long)]
        name: String,
        /// CS ou RAMP
        #[arg(long)]
        department: String,
        /// Nom du shift imposé (optionnel)
        #[arg(long)]
        locked_shift: Option<String>,
        /// Jour de repos hebdomadaire, ex. "sunday" (optionnel)
        #[arg(long)]
        week_off: Option<String>,
    },

    /// Supprimer un membre (cascade allocations et absences)
    RemoveStaff {
        #[arg(long)]
        name: String,
    },

    /// Ajouter un shift
    AddShift {
        #[arg(long)]
        name: String,
        /// HH:MM
        #[arg(long)]
        start: String,
        /// HH:MM (peut précéder start : passage de minuit)
        #[arg(long)]
        end: String,
        #[arg(long, default_value_t = 1)]
        min_staff: u32,
    },

    /// Supprimer un shift (cascade postes, allocations, verrous)
    RemoveShift {
        #[arg(long)]
        name: String,
    },

    /// Ajouter un poste à un shift
    AddPost {
        #[arg(long)]
        name: String,
        #[arg(long)]
        shift: String,
    },

    /// Supprimer un poste
    RemovePost {
        #[arg(long)]
        name: String,
        #[arg(long)]
        shift: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.store)?;
    let mut scheduler = match storage.load()? {
        Some(r) => Scheduler::with_roster(r),
        None => {
            // Support vierge : jeu de données initial de déploiement.
            let seeded = Scheduler::with_roster(seed_roster());
            storage.save(seeded.roster())?;
            seeded
        }
    };

    let code = match cli.cmd {
        Commands::Board {
            date,
            out_json,
            out_csv,
        } => {
            let board = scheduler.day_board(pick_date(date));
            if let Some(path) = out_json {
                io::export_board_json(path, &board)?;
            }
            if let Some(path) = out_csv {
                io::export_board_csv(path, &board)?;
            }
            print_board(&board);
            0
        }
        Commands::Place {
            staff,
            shift,
            post,
            date,
        } => {
            let staff_id = staff_id_by_name(scheduler.roster(), &staff)?;
            let post_id = post_id_by_names(scheduler.roster(), &shift, &post)?;
            scheduler.place(&staff_id, &post_id, pick_date(date))?;
            storage.save(scheduler.roster())?;
            0
        }
        Commands::Unassign { staff, date } => {
            let staff_id = staff_id_by_name(scheduler.roster(), &staff)?;
            let removed = scheduler.remove_allocation(&staff_id, pick_date(date));
            if removed {
                storage.save(scheduler.roster())?;
            } else {
                println!("{staff} had no allocation that day");
            }
            0
        }
        Commands::DayOff { staff, date } => {
            let staff_id = staff_id_by_name(scheduler.roster(), &staff)?;
            let now_off = scheduler.toggle_day_off(&staff_id, pick_date(date))?;
            storage.save(scheduler.roster())?;
            println!(
                "{staff} is now {}",
                if now_off { "off" } else { "available" }
            );
            0
        }
        Commands::AutoAssign { date, rng_seed } => {
            let date = pick_date(date);
            let summary = match rng_seed {
                Some(seed) => {
                    let mut rng = StdRng::seed_from_u64(seed);
                    scheduler.auto_assign(date, &mut rng)
                }
                None => scheduler.auto_assign(date, &mut rand::thread_rng()),
            };
            storage.save(scheduler.roster())?;
            println!(
                "placed {} | unassigned staff {} | empty posts {}",
                summary.placed, summary.unassigned_staff, summary.unfilled_posts
            );
            let board = scheduler.day_board(date);
            let short: Vec<&str> = board
                .shifts
                .iter()
                .filter(|s| s.short_staffed)
                .map(|s| s.name.as_str())
                .collect();
            if short.is_empty() {
                0
            } else {
                eprintln!("short-staffed: {}", short.join(", "));
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
        Commands::Swap { staff, with, date } => {
            let a = staff_id_by_name(scheduler.roster(), &staff)?;
            let b = staff_id_by_name(scheduler.roster(), &with)?;
            scheduler.swap(&a, &b, pick_date(date))?;
            storage.save(scheduler.roster())?;
            0
        }
        Commands::ImportStaff { csv } => {
            let summary = io::import_staff_csv(csv, scheduler.roster_mut())?;
            storage.save(scheduler.roster())?;
            println!(
                "imported: {} new, {} updated, {} skipped",
                summary.created, summary.updated, summary.skipped
            );
            0
        }
        Commands::ListStaff => {
            for s in &scheduler.roster().staff {
                let lock = s
                    .locked_shift
                    .as_ref()
                    .and_then(|id| scheduler.roster().find_shift(id))
                    .map(|sh| sh.name.as_str())
                    .unwrap_or("-");
                let week_off = s
                    .week_off_day
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{} | {} | lock: {} | week off: {}",
                    s.name, s.department, lock, week_off
                );
            }
            0
        }
        Commands::AddStaff {
            name,
            department,
            locked_shift,
            week_off,
        } => {
            let department = Department::parse(&department)
                .ok_or_else(|| anyhow!("department must be CS or RAMP, got {department}"))?;
            let mut staff = Staff::new(name, department);
            if let Some(shift_name) = locked_shift {
                staff.locked_shift = Some(shift_id_by_name(scheduler.roster(), &shift_name)?);
            }
            if let Some(day) = week_off {
                staff.week_off_day = Some(
                    Weekday::from_str(&day).map_err(|_| anyhow!("invalid weekday: {day}"))?,
                );
            }
            scheduler.roster_mut().staff.push(staff);
            storage.save(scheduler.roster())?;
            0
        }
        Commands::RemoveStaff { name } => {
            let staff_id = staff_id_by_name(scheduler.roster(), &name)?;
            scheduler.roster_mut().remove_staff(&staff_id);
            storage.save(scheduler.roster())?;
            0
        }
        Commands::AddShift {
            name,
            start,
            end,
            min_staff,
        } => {
            let start = parse_time(&start)?;
            let end = parse_time(&end)?;
            scheduler
                .roster_mut()
                .shifts
                .push(Shift::new(name, start, end, min_staff));
            storage.save(scheduler.roster())?;
            0
        }
        Commands::RemoveShift { name } => {
            let shift_id = shift_id_by_name(scheduler.roster(), &name)?;
            scheduler.roster_mut().remove_shift(&shift_id);
            storage.save(scheduler.roster())?;
            0
        }
        Commands::AddPost { name, shift } => {
            let shift_id = shift_id_by_name(scheduler.roster(), &shift)?;
            scheduler.roster_mut().posts.push(Post::new(name, shift_id));
            storage.save(scheduler.roster())?;
            0
        }
        Commands::RemovePost { name, shift } => {
            let post_id = post_id_by_names(scheduler.roster(), &shift, &name)?;
            scheduler.roster_mut().remove_post(&post_id);
            storage.save(scheduler.roster())?;
            0
        }
    };

    std::process::exit(code);
}

fn pick_date(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| Local::now().date_naive())
}

fn parse_time(raw: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M").map_err(|_| anyhow!("invalid time: {raw}"))
}

fn staff_id_by_name(roster: &Roster, name: &str) -> Result<StaffId> {
    roster
        .find_staff_by_name(name)
        .map(|s| s.id.clone())
        .ok_or_else(|| anyhow!("unknown staff: {name}"))
}

fn shift_id_by_name(roster: &Roster, name: &str) -> Result<ShiftId> {
    roster
        .find_shift_by_name(name)
        .map(|s| s.id.clone())
        .ok_or_else(|| anyhow!("unknown shift: {name}"))
}

fn post_id_by_names(roster: &Roster, shift: &str, post: &str) -> Result<PostId> {
    let shift_id = shift_id_by_name(roster, shift)?;
    let result = roster
        .posts_in_shift(&shift_id)
        .find(|p| p.name == post)
        .map(|p| p.id.clone())
        .ok_or_else(|| anyhow!("unknown post {post} in shift {shift}"));
    result
}

fn print_board(board: &duty_roster::DayBoard) {
    println!("{} ({})", board.date, board.day_name);
    for shift in &board.shifts {
        let flag = if shift.short_staffed { " [SHORT]" } else { "" };
        println!(
            "{} ({} - {}) staff {}/{}{}",
            shift.name,
            shift.start.format("%H:%M"),
            shift.end.format("%H:%M"),
            shift.allocated,
            shift.min_staff,
            flag
        );
        for post in &shift.posts {
            let who = post
                .occupant
                .as_ref()
                .map(|o| o.name.as_str())
                .unwrap_or("-");
            println!("  {} : {}", post.name, who);
        }
    }
    let names = |cards: &[duty_roster::scheduler::StaffCard]| {
        cards
            .iter()
            .map(|c| c.name.clone())
            .collect::<Vec<_>>()
            .join(", ")
    };
    println!("unassigned: {}", names(&board.unassigned));
    let off: Vec<String> = board
        .off
        .iter()
        .map(|o| {
            format!(
                "{} ({})",
                o.staff.name,
                match o.reason {
                    duty_roster::scheduler::OffReason::Weekly => "weekly off",
                    duty_roster::scheduler::OffReason::AdHoc => "day off",
                }
            )
        })
        .collect();
    println!("off: {}", off.join(", "));
}

/// Jeu de données de déploiement : cinq membres, trois shifts, et le jeu
/// standard de sept postes par shift.
fn seed_roster() -> Roster {
    let mut roster = Roster::default();

    let morning = Shift::new(
        "Morning Shift",
        NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
        1,
    );
    let evening = Shift::new(
        "Evening Shift",
        NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
        1,
    );
    let night = Shift::new(
        "Night Shift",
        NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
        1,
    );
    let morning_id = morning.id.clone();
    roster.shifts = vec![morning, evening, night];

    let post_names = [
        "SIC",
        "TICKETING",
        "CTR",
        "CTR closing",
        "CTR/GATES",
        "ARRIVALS",
        FLIGHT_MANAGER_POST,
    ];
    for shift in &roster.shifts {
        for name in post_names {
            roster.posts.push(Post::new(name, shift.id.clone()));
        }
    }

    let mut john = Staff::new("John Doe", Department::Cs);
    john.week_off_day = Some(Weekday::Sun);
    let mut jane = Staff::new("Jane Smith", Department::Cs);
    jane.week_off_day = Some(Weekday::Mon);
    let mut peter = Staff::new("Peter Jones", Department::Ramp);
    peter.week_off_day = Some(Weekday::Tue);
    let mary = Staff::new("Mary Williams", Department::Cs);
    let mut david = Staff::new("David Brown", Department::Ramp);
    david.locked_shift = Some(morning_id);
    david.week_off_day = Some(Weekday::Sat);
    roster.staff = vec![john, jane, peter, mary, david];

    roster
}
