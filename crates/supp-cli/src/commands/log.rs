//! Intake logging commands.

use std::io::Write;

use anyhow::{Result, bail};
use chrono::{DateTime, Local, NaiveDate, Utc};
use clap::Args;
use supp_core::{LogId, SupplementId, TimeRange, TimeSlot};
use supp_db::{Database, NewIntakeLog};

#[derive(Debug, Args)]
pub struct TakeArgs {
    /// Supplement ID.
    pub supplement_id: String,

    /// Dose taken. Defaults to the supplement's default dose.
    #[arg(long)]
    pub dose: Option<f64>,

    /// Time slot. Defaults to morning.
    #[arg(long)]
    pub slot: Option<TimeSlot>,
}

/// Records a dose taken now.
pub fn take<W: Write>(writer: &mut W, db: &mut Database, args: &TakeArgs) -> Result<()> {
    take_at(writer, db, args, Utc::now())
}

fn take_at<W: Write>(
    writer: &mut W,
    db: &mut Database,
    args: &TakeArgs,
    now: DateTime<Utc>,
) -> Result<()> {
    let supplement_id = SupplementId::new(args.supplement_id.as_str())?;
    let Some(supplement) = db.get_supplement(&supplement_id)? else {
        bail!("supplement not found: {supplement_id}");
    };

    let log = db.insert_intake_log(&NewIntakeLog {
        supplement_id,
        dose: args.dose.unwrap_or(supplement.default_dose),
        time_slot: args.slot.unwrap_or_default(),
        taken_at: now,
    })?;
    writeln!(
        writer,
        "Took {} {} {} ({}) at {}  [{}]",
        supplement.name,
        log.dose,
        supplement.dosage_unit,
        log.time_slot,
        log.taken_at.with_timezone(&Local).format("%H:%M"),
        log.id
    )?;
    Ok(())
}

/// Lists doses taken on a local date, newest first.
pub fn list<W: Write>(
    writer: &mut W,
    db: &Database,
    date: Option<NaiveDate>,
    json: bool,
) -> Result<()> {
    let date = date.unwrap_or_else(|| Local::now().date_naive());
    let logs = db.list_intake_log_details(TimeRange::day(date))?;

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&logs)?)?;
        return Ok(());
    }

    writeln!(writer, "INTAKE: {}", date.format("%A, %b %-d, %Y"))?;
    if logs.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "Nothing logged this day.")?;
        return Ok(());
    }

    writeln!(writer)?;
    for detail in &logs {
        writeln!(
            writer,
            "{}  {} {}  {} {}  {}  [{}]",
            detail.log.taken_at.with_timezone(&Local).format("%H:%M"),
            detail.supplement_icon,
            detail.supplement_name,
            detail.log.dose,
            detail.dosage_unit,
            detail.log.time_slot,
            detail.log.id
        )?;
    }
    Ok(())
}

/// Deletes a logged dose.
pub fn undo<W: Write>(writer: &mut W, db: &mut Database, id: &str) -> Result<()> {
    let id = LogId::new(id)?;
    db.delete_intake_log(&id)?;
    writeln!(writer, "Removed intake log {id}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Duration;
    use insta::assert_snapshot;
    use supp_core::IntakeStore;
    use supp_core::day::local_midnight_to_utc;
    use supp_db::NewSupplement;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 18).unwrap()
    }

    fn setup() -> (Database, SupplementId) {
        let mut db = Database::open_in_memory().unwrap();
        let mut new = NewSupplement::new("Fish Oil", 1000.0);
        new.icon = "🐟".to_string();
        let id = db.insert_supplement(&new).unwrap().id;
        (db, id)
    }

    fn take_args(id: &SupplementId) -> TakeArgs {
        TakeArgs {
            supplement_id: id.to_string(),
            dose: None,
            slot: None,
        }
    }

    fn redact_logs(db: &Database, output: &str) -> String {
        db.list_intake_log_details(TimeRange::day(date()))
            .unwrap()
            .iter()
            .enumerate()
            .fold(output.to_string(), |acc, (i, detail)| {
                acc.replace(detail.log.id.as_str(), &format!("log-{i}"))
            })
    }

    #[test]
    fn take_uses_supplement_defaults() {
        let (mut db, id) = setup();
        let now = local_midnight_to_utc(date()) + Duration::minutes(8 * 60 + 15);

        let mut output = Vec::new();
        take_at(&mut output, &mut db, &take_args(&id), now).unwrap();

        let output = redact_logs(&db, &String::from_utf8(output).unwrap());
        assert_snapshot!(output, @"Took Fish Oil 1000 mg (morning) at 08:15  [log-0]");
        assert_eq!(db.count_intake_logs(None).unwrap(), 1);
    }

    #[test]
    fn take_rejects_unknown_supplement_and_bad_dose() {
        let (mut db, id) = setup();
        let now = local_midnight_to_utc(date());

        let missing = SupplementId::new("ghost").unwrap();
        let err = take_at(&mut Vec::new(), &mut db, &take_args(&missing), now).unwrap_err();
        assert_eq!(err.to_string(), "supplement not found: ghost");

        let mut args = take_args(&id);
        args.dose = Some(0.0);
        let err = take_at(&mut Vec::new(), &mut db, &args, now).unwrap_err();
        assert!(err.to_string().contains("dose must be a positive number"));
        assert_eq!(db.count_intake_logs(None).unwrap(), 0);
    }

    #[test]
    fn list_shows_day_newest_first() {
        let (mut db, id) = setup();
        let midnight = local_midnight_to_utc(date());
        let mut args = take_args(&id);
        take_at(&mut Vec::new(), &mut db, &args, midnight + Duration::hours(8)).unwrap();
        args.dose = Some(500.0);
        args.slot = Some(TimeSlot::Evening);
        take_at(&mut Vec::new(), &mut db, &args, midnight + Duration::hours(19)).unwrap();
        // Next day, not listed.
        take_at(&mut Vec::new(), &mut db, &args, midnight + Duration::hours(25)).unwrap();

        let mut output = Vec::new();
        list(&mut output, &db, Some(date()), false).unwrap();
        let output = redact_logs(&db, &String::from_utf8(output).unwrap());
        assert_snapshot!(output, @r"
        INTAKE: Wednesday, Jun 18, 2025

        19:00  🐟 Fish Oil  500 mg  evening  [log-0]
        08:00  🐟 Fish Oil  1000 mg  morning  [log-1]
        ");
    }

    #[test]
    fn list_empty_day() {
        let (db, _) = setup();
        let mut output = Vec::new();
        list(&mut output, &db, Some(date()), false).unwrap();
        assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        INTAKE: Wednesday, Jun 18, 2025

        Nothing logged this day.
        ");
    }

    #[test]
    fn list_json_includes_supplement_fields() {
        let (mut db, id) = setup();
        let now = local_midnight_to_utc(date()) + Duration::hours(9);
        take_at(&mut Vec::new(), &mut db, &take_args(&id), now).unwrap();

        let mut output = Vec::new();
        list(&mut output, &db, Some(date()), true).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value[0]["supplement_name"], "Fish Oil");
        assert_eq!(value[0]["time_slot"], "morning");
        assert_eq!(value[0]["dose"], 1000.0);
        assert_eq!(value[0]["supplement_id"], id.as_str());
    }

    #[test]
    fn undo_removes_log() {
        let (mut db, id) = setup();
        let now = local_midnight_to_utc(date()) + Duration::hours(9);
        take_at(&mut Vec::new(), &mut db, &take_args(&id), now).unwrap();
        let log_id = db.list_intake_log_details(TimeRange::day(date())).unwrap()[0]
            .log
            .id
            .to_string();

        let mut output = Vec::new();
        undo(&mut output, &mut db, &log_id).unwrap();
        assert_eq!(db.count_intake_logs(None).unwrap(), 0);
        assert_eq!(
            String::from_utf8(output).unwrap(),
            format!("Removed intake log {log_id}\n")
        );

        assert!(undo(&mut Vec::new(), &mut db, &log_id).is_err());
    }
}
