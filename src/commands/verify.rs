//! `sdforge verify` - integrity facts for a file, or a cache inventory.

use std::path::Path;

use anyhow::Result;

use crate::cli::VerifyArgs;
use crate::config::Config;
use crate::{paths, ui, verify};

pub fn run(config: &Config, args: &VerifyArgs) -> Result<()> {
    match &args.path {
        Some(path) => verify_file(path, args.expected_size, args.hash),
        None => list_cached_artifacts(config),
    }
}

fn verify_file(path: &Path, expected_size: Option<u64>, with_hash: bool) -> Result<()> {
    let result = verify::verify(path, expected_size, with_hash)?;

    ui::header("Verification");
    ui::kv("Path", &result.path.display().to_string());

    if !result.exists {
        ui::error("file not found");
        return Ok(());
    }

    ui::kv("Size", &format!("{} bytes", result.size_bytes));
    match result.size_ok {
        Some(true) => ui::success("size matches expected"),
        Some(false) => ui::warn(&format!(
            "size mismatch: expected {} bytes, found {}",
            expected_size.unwrap_or(0),
            result.size_bytes
        )),
        None => {}
    }
    if let Some(hash) = &result.content_hash {
        ui::kv("BLAKE3", hash);
    }

    Ok(())
}

/// Inventory of the expected artifact archives in the cache.
fn list_cached_artifacts(config: &Config) -> Result<()> {
    let cache = paths::cache_dir()?;

    ui::header("Cached artifacts");
    let mut missing = 0;
    for key in config.mirrors.keys() {
        let path = cache.join(Config::artifact_filename(key));
        match std::fs::metadata(&path) {
            Ok(meta) => ui::kv(key, &ui::format_size(meta.len())),
            Err(_) => {
                ui::kv(key, "missing");
                missing += 1;
            }
        }
    }

    println!();
    if missing == 0 {
        ui::success("All catalog artifacts are cached");
    } else {
        ui::warn(&format!("{missing} artifacts missing; run `sdforge fetch --all`"));
    }
    Ok(())
}
