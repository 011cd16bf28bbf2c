//! Demo dataset: eight supplements, one goal each, and a week of history.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, Days, Duration, Local, Utc};
use supp_core::day::local_midnight_to_utc;
use supp_core::{Category, IntakeStore, SupplementId, TimeSlot};
use supp_db::{Database, NewIntakeLog, NewSupplement};
use tracing::debug;

struct SeedSupplement {
    name: &'static str,
    brand: &'static str,
    unit: &'static str,
    dose: f64,
    icon: &'static str,
    color: &'static str,
    category: Category,
    notes: &'static str,
    slot: TimeSlot,
}

static SUPPLEMENTS: [SeedSupplement; 8] = [
    SeedSupplement {
        name: "Vitamin D3",
        brand: "NOW Foods",
        unit: "IU",
        dose: 2000.0,
        icon: "☀️",
        color: "#f59e0b",
        category: Category::Vitamin,
        notes: "Take after a meal; fat helps absorption",
        slot: TimeSlot::Morning,
    },
    SeedSupplement {
        name: "Fish Oil Omega-3",
        brand: "Nordic Naturals",
        unit: "mg",
        dose: 1000.0,
        icon: "🐟",
        color: "#3b82f6",
        category: Category::FattyAcid,
        notes: "Take after meals",
        slot: TimeSlot::Morning,
    },
    SeedSupplement {
        name: "Vitamin B Complex",
        brand: "Thorne",
        unit: "capsule",
        dose: 1.0,
        icon: "⚡",
        color: "#f97316",
        category: Category::Vitamin,
        notes: "After breakfast",
        slot: TimeSlot::Morning,
    },
    SeedSupplement {
        name: "Magnesium",
        brand: "Doctor's Best",
        unit: "mg",
        dose: 400.0,
        icon: "🌙",
        color: "#8b5cf6",
        category: Category::Mineral,
        notes: "Before bed",
        slot: TimeSlot::Bedtime,
    },
    SeedSupplement {
        name: "Probiotic",
        brand: "Culturelle",
        unit: "capsule",
        dose: 1.0,
        icon: "🦠",
        color: "#10b981",
        category: Category::Probiotic,
        notes: "On an empty stomach",
        slot: TimeSlot::Morning,
    },
    SeedSupplement {
        name: "Vitamin C",
        brand: "Nature's Way",
        unit: "mg",
        dose: 500.0,
        icon: "🍊",
        color: "#ef4444",
        category: Category::Vitamin,
        notes: "With meals",
        slot: TimeSlot::Afternoon,
    },
    SeedSupplement {
        name: "Lutein",
        brand: "FloraGLO",
        unit: "mg",
        dose: 20.0,
        icon: "👁️",
        color: "#eab308",
        category: Category::Other,
        notes: "After meals",
        slot: TimeSlot::Morning,
    },
    SeedSupplement {
        name: "Zinc",
        brand: "Solgar",
        unit: "mg",
        dose: 15.0,
        icon: "🛡️",
        color: "#6366f1",
        category: Category::Mineral,
        notes: "With meals",
        slot: TimeSlot::Evening,
    },
];

/// Days of history, today included.
const HISTORY_DAYS: u32 = 7;

const fn slot_hour(slot: TimeSlot) -> i64 {
    match slot {
        TimeSlot::Morning => 8,
        TimeSlot::Afternoon => 12,
        TimeSlot::Evening => 18,
        TimeSlot::Bedtime => 22,
    }
}

/// How many supplements were taken `offset` days ago, and which one first.
///
/// Today always has three; earlier days vary between three and seven.
fn day_plan(offset: u32) -> (usize, usize) {
    let taken = if offset == 0 {
        3
    } else {
        3 + (offset * 3 % 5) as usize
    };
    let first = (offset * 3) as usize % SUPPLEMENTS.len();
    (taken, first)
}

/// Replaces all data with the demo dataset.
pub fn run<W: Write>(writer: &mut W, db: &mut Database) -> Result<()> {
    run_at(writer, db, Utc::now())
}

fn run_at<W: Write>(writer: &mut W, db: &mut Database, now: DateTime<Utc>) -> Result<()> {
    db.clear().context("failed to clear existing data")?;

    let mut created: Vec<(SupplementId, &SeedSupplement)> = Vec::with_capacity(SUPPLEMENTS.len());
    for seed in &SUPPLEMENTS {
        let supplement = db.insert_supplement(&NewSupplement {
            name: seed.name.to_string(),
            brand: Some(seed.brand.to_string()),
            dosage_unit: seed.unit.to_string(),
            default_dose: seed.dose,
            icon: seed.icon.to_string(),
            color: seed.color.to_string(),
            category: seed.category,
            notes: Some(seed.notes.to_string()),
            time_slot: Some(seed.slot),
        })?;
        created.push((supplement.id, seed));
    }

    let today = now.with_timezone(&Local).date_naive();
    for offset in (0..HISTORY_DAYS).rev() {
        let day = today - Days::new(u64::from(offset));
        let midnight = local_midnight_to_utc(day);
        let (taken, first) = day_plan(offset);

        for i in 0..taken {
            let (id, seed) = &created[(first + i) % created.len()];
            let minute = i64::from((offset * 7 + u32::try_from(i)? * 13) % 60);
            db.insert_intake_log(&NewIntakeLog {
                supplement_id: id.clone(),
                dose: seed.dose,
                time_slot: seed.slot,
                taken_at: midnight
                    + Duration::hours(slot_hour(seed.slot))
                    + Duration::minutes(minute),
            })?;
        }
        debug!(%day, taken, "seeded day");
    }

    let goal_count = db.count_active_goals()?;
    let log_count = db.count_intake_logs(None)?;
    writeln!(writer, "Seed completed")?;
    writeln!(writer, "  Supplements: {}", created.len())?;
    writeln!(writer, "  Daily goals: {goal_count}")?;
    writeln!(writer, "  Intake logs: {log_count}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;
    use insta::assert_snapshot;
    use supp_core::{AdherenceEngine, EngineConfig, TimeRange};

    fn now() -> DateTime<Utc> {
        let today = NaiveDate::from_ymd_opt(2025, 6, 18).unwrap();
        local_midnight_to_utc(today) + Duration::hours(12)
    }

    #[test]
    fn day_plan_varies_between_three_and_seven() {
        assert_eq!(day_plan(0), (3, 0));
        for offset in 1..HISTORY_DAYS {
            let (taken, first) = day_plan(offset);
            assert!((3..=7).contains(&taken), "offset {offset}: {taken}");
            assert!(first < SUPPLEMENTS.len());
        }
    }

    #[test]
    fn seed_creates_demo_dataset() {
        let mut db = Database::open_in_memory().unwrap();
        let mut output = Vec::new();
        run_at(&mut output, &mut db, now()).unwrap();

        assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        Seed completed
          Supplements: 8
          Daily goals: 8
          Intake logs: 34
        ");

        let today = NaiveDate::from_ymd_opt(2025, 6, 18).unwrap();
        let todays = db.list_intake_log_details(TimeRange::day(today)).unwrap();
        assert_eq!(todays.len(), 3);
    }

    #[test]
    fn seed_replaces_existing_data() {
        let mut db = Database::open_in_memory().unwrap();
        db.insert_supplement(&NewSupplement::new("Leftover", 1.0))
            .unwrap();

        run_at(&mut Vec::new(), &mut db, now()).unwrap();
        run_at(&mut Vec::new(), &mut db, now()).unwrap();

        let names: Vec<String> = db
            .list_supplements()
            .unwrap()
            .into_iter()
            .map(|summary| summary.supplement.name)
            .collect();
        assert_eq!(names.len(), 8);
        assert_eq!(names[0], "Vitamin D3");
        assert!(!names.contains(&"Leftover".to_string()));
        assert_eq!(db.count_intake_logs(None).unwrap(), 34);
    }

    #[test]
    fn seeded_history_has_full_week_streak() {
        let mut db = Database::open_in_memory().unwrap();
        run_at(&mut Vec::new(), &mut db, now()).unwrap();

        let today = NaiveDate::from_ymd_opt(2025, 6, 18).unwrap();
        let overview = AdherenceEngine::new(&db, EngineConfig::default())
            .overview(today)
            .unwrap();
        assert_eq!(overview.current_streak, 7);
        assert_eq!(overview.total_logs, 34);
        assert_eq!(overview.weekly_chart.iter().map(|d| d.count).sum::<usize>(), 34);
        // 34 of 56 expected doses
        assert_eq!(overview.weekly_rate, 61);
    }
}
