//! Preset documents and preset-directory navigation
//!
//! A preset is a TOML rendering of [`ConfigurationModel`]. The hardware
//! preset buttons walk the other presets in the same directory, in file
//! name order.

use std::path::{Path, PathBuf};

use image::DynamicImage;
use tracing::{debug, info};

use crate::error::PresetError;
use crate::model::ConfigurationModel;
use crate::session::PresetPosition;

/// File extension of preset documents
pub const PRESET_EXTENSION: &str = "toml";

/// Load a preset document
pub fn load_preset(path: &Path) -> Result<ConfigurationModel, PresetError> {
    let content = std::fs::read_to_string(path).map_err(|source| PresetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let model = toml::from_str(&content).map_err(|source| PresetError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Loaded preset {}", path.display());
    Ok(model)
}

/// Save a preset document, creating the parent directory if needed
pub fn save_preset(path: &Path, model: &ConfigurationModel) -> Result<(), PresetError> {
    let io_err = |source| PresetError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let content = toml::to_string_pretty(model)?;
    std::fs::write(path, content).map_err(io_err)?;
    Ok(())
}

/// Load the left and right background images named by a preset
///
/// Relative image paths are resolved against the preset's directory.
pub fn load_backgrounds(
    model: &ConfigurationModel,
    preset_path: &Path,
) -> Result<[Option<DynamicImage>; 2], PresetError> {
    let base = preset_path.parent().unwrap_or_else(|| Path::new(""));
    let load = |image: &Option<PathBuf>| -> Result<Option<DynamicImage>, PresetError> {
        let Some(image) = image else {
            return Ok(None);
        };
        let path = base.join(image);
        let img = image::open(&path).map_err(|source| PresetError::Image {
            path: path.clone(),
            source,
        })?;
        debug!("Loaded background {}", path.display());
        Ok(Some(img))
    };
    Ok([
        load(&model.display.left_image)?,
        load(&model.display.right_image)?,
    ])
}

/// Direction of a hardware preset step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the start of the list
    Up,
    /// Towards the end of the list
    Down,
}

/// Sorted preset files of one directory, with a cursor
#[derive(Debug, Clone)]
pub struct PresetLibrary {
    entries: Vec<PathBuf>,
    index: usize,
}

impl PresetLibrary {
    /// List the presets next to `current` and point at it
    pub fn open(current: &Path) -> Result<Self, PresetError> {
        let dir = match current.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let read = std::fs::read_dir(&dir).map_err(|source| PresetError::Io {
            path: dir.clone(),
            source,
        })?;

        let mut entries: Vec<PathBuf> = read
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == PRESET_EXTENSION))
            .collect();

        let current_name = current.file_name();
        if !entries.iter().any(|p| p.file_name() == current_name) {
            entries.push(dir.join(current.file_name().unwrap_or_default()));
        }
        entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        let index = entries
            .iter()
            .position(|p| p.file_name() == current_name)
            .unwrap_or(0);

        debug!("Preset library {}: {} entries", dir.display(), entries.len());
        Ok(Self { entries, index })
    }

    pub fn position(&self) -> PresetPosition {
        PresetPosition {
            index: self.index,
            count: self.entries.len(),
        }
    }

    pub fn current(&self) -> Option<&Path> {
        self.entries.get(self.index).map(PathBuf::as_path)
    }

    /// Move one step if possible and return the new current path
    pub fn step(&mut self, direction: Direction) -> Option<&Path> {
        let next = match direction {
            Direction::Up => self.index.checked_sub(1)?,
            Direction::Down => self.index + 1,
        };
        if next >= self.entries.len() {
            return None;
        }
        self.index = next;
        self.current()
    }
}
