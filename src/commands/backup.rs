//! `sdforge backup` - create, list, and inspect NAND backup sets.
//!
//! The NAND dump itself happens on the console; these commands create the
//! destination directory, then validate and report what the user copied
//! into it.

use anyhow::Result;

use crate::backup::{self, BackupSet, BackupStatus, CRITICAL_FILES};
use crate::cli::BackupCommand;
use crate::{paths, restore, ui};

pub fn run(command: &BackupCommand) -> Result<()> {
    match command {
        BackupCommand::Create => create(),
        BackupCommand::List => list(),
        BackupCommand::Show { index } => show(*index),
    }
}

fn create() -> Result<()> {
    paths::ensure_base_dirs()?;
    let dir = backup::create_backup_dir(&paths::backups_dir()?)?;

    ui::header("New backup set");
    ui::kv("Directory", &dir.display().to_string());
    println!();
    ui::info("On the console, boot GodMode9 (hold START at power-on) and dump:");
    for name in CRITICAL_FILES {
        ui::dim(name);
    }
    ui::info("Copy the dumped files from the card's gm9/out into the directory above,");
    ui::info("then run `sdforge backup list` to validate the capture.");

    Ok(())
}

fn list() -> Result<()> {
    let sets = restore::list_backup_sets(&paths::backups_dir()?)?;

    ui::header("Backup sets");
    if sets.is_empty() {
        ui::info("No backup sets found. Run `sdforge backup create` first.");
        return Ok(());
    }

    for (i, set) in sets.iter().enumerate() {
        println!(
            "  {i}. {}  {}  {}/{} critical files  ({})",
            set.id,
            status_label(set.status),
            set.present.len(),
            CRITICAL_FILES.len(),
            ui::format_size(set.total_size)
        );
    }
    Ok(())
}

fn show(index: usize) -> Result<()> {
    let sets = restore::list_backup_sets(&paths::backups_dir()?)?;
    let set = restore::select_backup_set(&sets, index)?;

    print_set(set);
    Ok(())
}

pub(crate) fn print_set(set: &BackupSet) {
    ui::header(&format!("Backup set {}", set.id));
    ui::kv("Directory", &set.directory.display().to_string());
    ui::kv("Status", status_label(set.status));
    ui::kv("Total size", &ui::format_size(set.total_size));
    for name in CRITICAL_FILES {
        if set.present.iter().any(|p| p == name) {
            ui::success(name);
        } else {
            ui::warn(&format!("{name} - missing"));
        }
    }
}

pub(crate) fn status_label(status: BackupStatus) -> &'static str {
    match status {
        BackupStatus::Success => "success",
        BackupStatus::Partial => "partial",
        BackupStatus::Failed => "failed",
    }
}
