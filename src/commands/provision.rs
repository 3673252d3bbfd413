//! `sdforge provision` - prepare the device root.
//!
//! Creates the loader's directory layout, then copies the essential files
//! out of the cache. Placement is best-effort: missing downloads are
//! warned about, never fatal.

use anyhow::{bail, Result};

use crate::cli::ProvisionArgs;
use crate::config::Config;
use crate::layout::{self, DEVICE_LAYOUT};
use crate::placement::{self, PLACEMENT_RULES};
use crate::{paths, ui};

pub fn run(config: &mut Config, args: &ProvisionArgs) -> Result<()> {
    let device_root = match &args.device {
        Some(path) => {
            // An explicitly given device path becomes the configured one.
            config.device_path = Some(path.clone());
            config.save()?;
            path.clone()
        }
        None => match &config.device_path {
            Some(path) => path.clone(),
            None => bail!(
                "No device path configured. Run `sdforge config set-device <path>` \
                 or pass --device"
            ),
        },
    };

    ui::header("Provisioning device");
    ui::kv("Device root", &device_root.display().to_string());

    let created = layout::ensure_layout(&device_root, DEVICE_LAYOUT)?;
    if created == 0 {
        ui::dim("directory layout already present");
    } else {
        ui::success(&format!("Created {created} directories"));
    }

    let cache = paths::cache_dir()?;
    let report = placement::place_essential_files(&cache, &device_root, PLACEMENT_RULES)?;

    println!();
    ui::success(&format!("Placed {} essential files", report.placed));
    for name in &report.unmatched {
        ui::warn(&format!("{name}: not found in cache (run `sdforge fetch --all` first)"));
    }

    Ok(())
}
