//! Supplement management commands.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use supp_core::{Category, SupplementId, TimeSlot};
use supp_db::{Database, NewSupplement, SupplementPatch};

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Display name.
    pub name: String,

    /// Default dose, in `unit`.
    #[arg(long)]
    pub dose: f64,

    /// Unit the dose is measured in.
    #[arg(long, default_value = "mg")]
    pub unit: String,

    #[arg(long)]
    pub brand: Option<String>,

    #[arg(long, default_value = "💊")]
    pub icon: String,

    /// Hex display color.
    #[arg(long, default_value = "#6366f1")]
    pub color: String,

    /// vitamin, mineral, fatty-acid, probiotic, or other.
    #[arg(long)]
    pub category: Option<Category>,

    #[arg(long)]
    pub notes: Option<String>,

    /// Also create an active daily goal in this slot.
    #[arg(long)]
    pub slot: Option<TimeSlot>,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Supplement ID.
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub dose: Option<f64>,

    #[arg(long)]
    pub unit: Option<String>,

    #[arg(long)]
    pub brand: Option<String>,

    #[arg(long)]
    pub icon: Option<String>,

    #[arg(long)]
    pub color: Option<String>,

    #[arg(long)]
    pub category: Option<Category>,

    #[arg(long)]
    pub notes: Option<String>,

    /// Mark the supplement active or inactive.
    #[arg(long)]
    pub active: Option<bool>,
}

/// Lists supplements in display order.
pub fn list<W: Write>(writer: &mut W, db: &Database, json: bool) -> Result<()> {
    let supplements = db.list_supplements()?;

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&supplements)?)?;
        return Ok(());
    }

    if supplements.is_empty() {
        writeln!(writer, "No supplements yet.")?;
        writeln!(
            writer,
            "Hint: Run 'supp supplements add <name> --dose <amount>' to add one."
        )?;
        return Ok(());
    }

    writeln!(writer, "SUPPLEMENTS ({})", supplements.len())?;
    for summary in &supplements {
        let s = &summary.supplement;
        let inactive = if s.is_active { "" } else { " (inactive)" };
        writeln!(
            writer,
            "{} {}{inactive}  {} {}  {}  {} logs",
            s.icon, s.name, s.default_dose, s.dosage_unit, s.category, summary.log_count
        )?;
        writeln!(writer, "   id: {}", s.id)?;
    }
    Ok(())
}

/// Adds a supplement, optionally with a daily goal.
pub fn add<W: Write>(writer: &mut W, db: &mut Database, args: &AddArgs) -> Result<()> {
    let new = NewSupplement {
        name: args.name.clone(),
        brand: args.brand.clone(),
        dosage_unit: args.unit.clone(),
        default_dose: args.dose,
        icon: args.icon.clone(),
        color: args.color.clone(),
        category: args.category.unwrap_or_default(),
        notes: args.notes.clone(),
        time_slot: args.slot,
    };
    let supplement = db
        .insert_supplement(&new)
        .context("failed to add supplement")?;

    writeln!(writer, "Added {} ({})", supplement.name, supplement.id)?;
    if let Some(slot) = args.slot {
        writeln!(
            writer,
            "Daily goal: {} {} every {slot}",
            supplement.default_dose, supplement.dosage_unit
        )?;
    }
    Ok(())
}

/// Applies the given changes to a supplement.
pub fn edit<W: Write>(writer: &mut W, db: &mut Database, args: &EditArgs) -> Result<()> {
    let id = SupplementId::new(args.id.as_str())?;
    let patch = SupplementPatch {
        name: args.name.clone(),
        brand: args.brand.clone(),
        dosage_unit: args.unit.clone(),
        default_dose: args.dose,
        icon: args.icon.clone(),
        color: args.color.clone(),
        category: args.category,
        notes: args.notes.clone(),
        is_active: args.active,
    };
    let supplement = db.update_supplement(&id, &patch)?;
    writeln!(writer, "Updated {} ({})", supplement.name, supplement.id)?;
    Ok(())
}

/// Deletes a supplement and everything recorded for it.
pub fn remove<W: Write>(writer: &mut W, db: &mut Database, id: &str) -> Result<()> {
    let id = SupplementId::new(id)?;
    let name = db
        .get_supplement(&id)?
        .map(|supplement| supplement.name)
        .with_context(|| format!("supplement not found: {id}"))?;
    db.delete_supplement(&id)?;
    writeln!(writer, "Removed {name} and its goals and intake history")?;
    Ok(())
}
