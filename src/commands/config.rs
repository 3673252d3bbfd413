//! `sdforge config` - show and mutate the persisted configuration.

use anyhow::{bail, Result};

use crate::cli::ConfigCommand;
use crate::config::Config;
use crate::ui;

pub fn run(config: &mut Config, command: &ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show => show(config),
        ConfigCommand::SetDevice { path } => {
            if !path.is_dir() {
                bail!("{} is not a mounted directory", path.display());
            }
            config.device_path = Some(path.clone());
            config.save()?;
            ui::success(&format!("Device path set to {}", path.display()));
            Ok(())
        }
        ConfigCommand::AutoDetect { enabled } => {
            config.auto_detect_device = *enabled;
            config.save()?;
            ui::success(&format!(
                "Automatic device detection {}",
                if *enabled { "enabled" } else { "disabled" }
            ));
            Ok(())
        }
        ConfigCommand::Reset => {
            let defaults = Config::default();
            defaults.save()?;
            ui::success("Configuration reset to defaults");
            Ok(())
        }
    }
}

fn show(config: &Config) -> Result<()> {
    ui::header("Configuration");
    ui::kv(
        "Device path",
        &config
            .device_path
            .as_ref()
            .map_or_else(|| "not set".to_string(), |p| p.display().to_string()),
    );
    ui::kv("Auto-detect device", &config.auto_detect_device.to_string());

    ui::section("Mirror catalog");
    for (key, url) in &config.mirrors {
        ui::kv(key, url);
    }
    Ok(())
}
