//! `sdforge restore` - select a backup set and print the guided steps.
//!
//! Writing a NAND backup back to the console is done by GodMode9 on the
//! device; doing it blind can brick the unit. This command's job ends at
//! addressing a validated backup set and spelling the manual steps out.

use anyhow::Result;

use crate::backup::BackupStatus;
use crate::commands::backup::print_set;
use crate::{paths, restore, ui};

pub fn run(index: usize) -> Result<()> {
    let sets = restore::list_backup_sets(&paths::backups_dir()?)?;
    let set = restore::select_backup_set(&sets, index)?;

    print_set(set);

    println!();
    if set.status == BackupStatus::Failed {
        ui::error("This set contains no critical files; there is nothing to restore.");
        return Ok(());
    }
    if set.status == BackupStatus::Partial {
        ui::warn("This set is incomplete. Only restore it if no better set exists.");
    }

    ui::header("Restore steps (manual)");
    ui::step(1, 4, &format!("Copy the files from {} onto the card's gm9/out", set.directory.display()));
    ui::step(2, 4, "Boot GodMode9 (hold START at power-on)");
    ui::step(3, 4, "Use GodMode9's restore options on the copied .bin files");
    ui::step(4, 4, "Do not power off until GodMode9 reports completion");
    println!();
    ui::warn("Only restore a backup taken from this same console.");

    Ok(())
}
