//! Write a default preset document

use std::path::Path;

use anyhow::{bail, Context};
use kontrol_driver::{save_preset, ConfigurationModel, Settings};

use super::CommandResult;

/// Write a default preset to `path`
///
/// With `settings_path`, the preset's directory is also stored as the
/// default preset directory in the settings file.
pub fn init(
    path: &Path,
    force: bool,
    settings: &Settings,
    settings_path: Option<&Path>,
) -> CommandResult {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    save_preset(path, &ConfigurationModel::default())?;
    println!("Wrote default preset to {}", path.display());

    if let Some(settings_path) = settings_path {
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let dir = dir
            .canonicalize()
            .with_context(|| format!("Failed to resolve {}", dir.display()))?;
        let updated = Settings {
            preset_dir: Some(dir.clone()),
            ..settings.clone()
        };
        updated.save(settings_path)?;
        println!(
            "Default preset directory is now {} ({})",
            dir.display(),
            settings_path.display()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kontrol_driver::load_preset;

    #[test]
    fn test_init_writes_default_preset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("default.toml");
        init(&path, false, &Settings::default(), None).unwrap();
        assert_eq!(load_preset(&path).unwrap(), ConfigurationModel::default());

        // Refuses to overwrite without force
        assert!(init(&path, false, &Settings::default(), None).is_err());
        init(&path, true, &Settings::default(), None).unwrap();
    }

    #[test]
    fn test_init_records_preset_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("presets").join("lead.toml");
        let settings_path = dir.path().join("config").join("settings.toml");
        let settings = Settings {
            poll_interval_ms: 20,
            ..Default::default()
        };

        init(&path, false, &settings, Some(&settings_path)).unwrap();

        let saved = Settings::load(&settings_path).unwrap();
        assert_eq!(saved.poll_interval_ms, 20);
        let preset_dir = saved.preset_dir.clone().unwrap();
        assert_eq!(
            preset_dir,
            dir.path().join("presets").canonicalize().unwrap()
        );
        assert_eq!(
            saved.resolve_preset(Path::new("lead")),
            preset_dir.join("lead.toml")
        );
    }
}
