//! Daily goal commands.

use std::io::Write;

use anyhow::{Result, bail};
use clap::Args;
use supp_core::{GoalId, SupplementId, TimeSlot};
use supp_db::Database;

#[derive(Debug, Args)]
pub struct AddGoalArgs {
    /// Supplement ID.
    pub supplement_id: String,

    /// Time slot: morning, afternoon, evening, or bedtime.
    #[arg(long)]
    pub slot: TimeSlot,

    /// Target dose. Defaults to the supplement's default dose.
    #[arg(long)]
    pub dose: Option<f64>,
}

/// Lists goals grouped by time slot.
pub fn list<W: Write>(writer: &mut W, db: &Database, all: bool, json: bool) -> Result<()> {
    let goals = db.list_goals(!all)?;

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&goals)?)?;
        return Ok(());
    }

    if goals.is_empty() {
        writeln!(writer, "No daily goals.")?;
        writeln!(
            writer,
            "Hint: Run 'supp goals add <supplement-id> --slot morning' to add one."
        )?;
        return Ok(());
    }

    let mut current_slot = None;
    for detail in &goals {
        let slot = detail.goal.time_slot;
        if current_slot != Some(slot) {
            if current_slot.is_some() {
                writeln!(writer)?;
            }
            writeln!(writer, "{}", slot.as_str().to_uppercase())?;
            current_slot = Some(slot);
        }
        let inactive = if detail.goal.is_active {
            ""
        } else {
            " (inactive)"
        };
        writeln!(
            writer,
            "  {} {}  {} {}{inactive}  [{}]",
            detail.supplement_icon,
            detail.supplement_name,
            detail.goal.target_dose,
            detail.dosage_unit,
            detail.goal.id
        )?;
    }
    Ok(())
}

/// Adds a goal for an existing supplement.
pub fn add<W: Write>(writer: &mut W, db: &mut Database, args: &AddGoalArgs) -> Result<()> {
    let supplement_id = SupplementId::new(args.supplement_id.as_str())?;
    let Some(supplement) = db.get_supplement(&supplement_id)? else {
        bail!("supplement not found: {supplement_id}");
    };
    let dose = args.dose.unwrap_or(supplement.default_dose);
    let goal = db.insert_goal(&supplement_id, dose, args.slot)?;
    writeln!(
        writer,
        "Added goal {}: {} {} {} every {}",
        goal.id, supplement.name, goal.target_dose, supplement.dosage_unit, goal.time_slot
    )?;
    Ok(())
}

/// Activates or deactivates a goal.
pub fn set_active<W: Write>(
    writer: &mut W,
    db: &mut Database,
    id: &str,
    is_active: bool,
) -> Result<()> {
    let id = GoalId::new(id)?;
    db.set_goal_active(&id, is_active)?;
    let state = if is_active { "Activated" } else { "Deactivated" };
    writeln!(writer, "{state} goal {id}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;
    use supp_core::IntakeStore;
    use supp_db::NewSupplement;

    fn supplement(db: &mut Database, name: &str, slot: TimeSlot) -> SupplementId {
        let mut new = NewSupplement::new(name, 100.0);
        new.time_slot = Some(slot);
        db.insert_supplement(&new).unwrap().id
    }

    fn redact_ids(db: &Database, output: &str) -> String {
        db.list_goals(false)
            .unwrap()
            .iter()
            .enumerate()
            .fold(output.to_string(), |acc, (i, detail)| {
                acc.replace(detail.goal.id.as_str(), &format!("goal-{i}"))
            })
    }

    #[test]
    fn list_groups_goals_by_slot_in_day_order() {
        let mut db = Database::open_in_memory().unwrap();
        supplement(&mut db, "Magnesium", TimeSlot::Bedtime);
        supplement(&mut db, "Vitamin D3", TimeSlot::Morning);
        supplement(&mut db, "Fish Oil", TimeSlot::Morning);

        let mut output = Vec::new();
        list(&mut output, &db, false, false).unwrap();
        let output = redact_ids(&db, &String::from_utf8(output).unwrap());
        assert_snapshot!(output, @r"
        MORNING
          💊 Vitamin D3  100 mg  [goal-0]
          💊 Fish Oil  100 mg  [goal-1]

        BEDTIME
          💊 Magnesium  100 mg  [goal-2]
        ");
    }

    #[test]
    fn list_on_empty_database_shows_hint() {
        let db = Database::open_in_memory().unwrap();
        let mut output = Vec::new();
        list(&mut output, &db, false, false).unwrap();
        assert!(String::from_utf8(output).unwrap().starts_with("No daily goals."));
    }

    #[test]
    fn add_defaults_to_supplement_dose() {
        let mut db = Database::open_in_memory().unwrap();
        let id = db
            .insert_supplement(&NewSupplement::new("Zinc", 15.0))
            .unwrap()
            .id;

        let args = AddGoalArgs {
            supplement_id: id.to_string(),
            slot: TimeSlot::Evening,
            dose: None,
        };
        let mut output = Vec::new();
        add(&mut output, &mut db, &args).unwrap();

        let output = redact_ids(&db, &String::from_utf8(output).unwrap());
        assert_snapshot!(output, @"Added goal goal-0: Zinc 15 mg every evening");
    }

    #[test]
    fn add_rejects_unknown_supplement() {
        let mut db = Database::open_in_memory().unwrap();
        let args = AddGoalArgs {
            supplement_id: "ghost".to_string(),
            slot: TimeSlot::Morning,
            dose: Some(1.0),
        };
        let err = add(&mut Vec::new(), &mut db, &args).unwrap_err();
        assert_eq!(err.to_string(), "supplement not found: ghost");
    }

    #[test]
    fn deactivate_and_activate_toggle_counts() {
        let mut db = Database::open_in_memory().unwrap();
        supplement(&mut db, "Zinc", TimeSlot::Evening);
        let goal_id = db.list_goals(true).unwrap()[0].goal.id.to_string();

        set_active(&mut Vec::new(), &mut db, &goal_id, false).unwrap();
        assert_eq!(db.count_active_goals().unwrap(), 0);

        let mut output = Vec::new();
        list(&mut output, &db, true, false).unwrap();
        assert!(String::from_utf8(output).unwrap().contains("(inactive)"));

        let mut output = Vec::new();
        set_active(&mut output, &mut db, &goal_id, true).unwrap();
        assert_eq!(db.count_active_goals().unwrap(), 1);
        let output = redact_ids(&db, &String::from_utf8(output).unwrap());
        assert_snapshot!(output, @"Activated goal goal-0");
    }
}
