//! `sdforge fetch` - download mirror artifacts into the cache.

use anyhow::{bail, Result};

use crate::cli::FetchArgs;
use crate::config::Config;
use crate::download::Downloader;
use crate::{paths, ui};

pub fn run(config: &Config, args: &FetchArgs) -> Result<()> {
    paths::ensure_base_dirs()?;
    let downloader = Downloader::new(paths::cache_dir()?);

    if args.all {
        return fetch_all(config, &downloader);
    }

    let Some(key) = args.key.as_deref() else {
        bail!("Specify an artifact key or use --all (see `sdforge config show` for the catalog)");
    };
    let Some(url) = config.mirror(key) else {
        bail!(crate::error::Error::UnknownArtifact(key.to_string()));
    };

    fetch_one(&downloader, key, url)?;
    Ok(())
}

fn fetch_all(config: &Config, downloader: &Downloader) -> Result<()> {
    ui::header("Fetching all artifacts");

    let total = config.mirrors.len();
    let mut succeeded = 0;
    for (i, (key, url)) in config.mirrors.iter().enumerate() {
        ui::step(i + 1, total, key);
        match fetch_one(downloader, key, url) {
            Ok(()) => succeeded += 1,
            Err(err) => ui::error(&format!("{key}: {err}")),
        }
    }

    println!();
    if succeeded == total {
        ui::success(&format!("Downloads complete: {succeeded}/{total}"));
    } else {
        ui::warn(&format!("Downloads complete: {succeeded}/{total}"));
    }
    Ok(())
}

fn fetch_one(downloader: &Downloader, key: &str, url: &str) -> Result<()> {
    let artifact = downloader.fetch(key, url)?;
    ui::success(&format!(
        "{} ({})",
        artifact.local_path.display(),
        ui::format_size(artifact.bytes_written)
    ));
    if let Some(package) = &artifact.extracted {
        ui::dim(&format!(
            "extracted {} entries into {}",
            package.files.len(),
            package.target_dir.display()
        ));
    }
    Ok(())
}
