//! `sdforge doctor` - health checks for the provisioning environment.

use anyhow::Result;

use crate::config::Config;
use crate::{layout, paths, ui};

pub fn run(config: &Config) -> Result<()> {
    ui::header("Health check");
    let mut failures = 0;

    ui::section("Local state");
    let cache = paths::cache_dir()?;
    check("Cache directory", cache.is_dir(), &mut failures);
    check(
        "Backups directory",
        paths::backups_dir()?.is_dir(),
        &mut failures,
    );

    ui::section("Network");
    check("Mirror host reachable", github_reachable(), &mut failures);

    ui::section("Device");
    match &config.device_path {
        Some(path) => {
            let writable = layout::check_device_root(path).is_ok();
            ui::kv("Configured path", &path.display().to_string());
            check("Device root writable", writable, &mut failures);
        }
        None => {
            ui::warn("No device path configured (`sdforge config set-device <path>`)");
        }
    }

    ui::section("Cached archives");
    let mut cached = 0;
    for key in config.mirrors.keys() {
        let path = cache.join(Config::artifact_filename(key));
        if let Ok(meta) = std::fs::metadata(&path) {
            ui::kv(key, &ui::format_size(meta.len()));
            cached += 1;
        }
    }
    if cached == 0 {
        ui::dim("none yet; run `sdforge fetch --all`");
    }

    println!();
    if failures == 0 {
        ui::success("All checks passed");
    } else {
        ui::warn(&format!("{failures} checks failed"));
    }
    Ok(())
}

fn check(label: &str, ok: bool, failures: &mut usize) {
    if ok {
        ui::success(label);
    } else {
        ui::error(label);
        *failures += 1;
    }
}

/// Best-effort reachability probe against the default mirror host.
fn github_reachable() -> bool {
    ureq::Agent::new_with_defaults()
        .head("https://github.com")
        .call()
        .is_ok()
}
