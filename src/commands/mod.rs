//! Command handlers for the CLI application.
//!
//! - `list`: enumerate connected keyboards
//! - `apply`, `run`: send a preset once, or keep following the keyboard
//! - `screen`: push an image to a display
//! - `dump`, `init`: offline preset tools
//! - `raw`: send one hand-written report

pub mod apply;
pub mod dump;
pub mod init;
pub mod list;
pub mod raw;
pub mod run;
pub mod screen;

use anyhow::Context;
use kontrol_transport::{HidDiscovery, OutputFormat, PacketFilter, PrinterConfig, Transport};
use tracing::info;

/// Result type for command handlers
pub type CommandResult = anyhow::Result<()>;

/// Open the first connected keyboard
/// If `printer_config` is Some, the transport is wrapped for monitoring.
pub fn open_transport(
    printer_config: Option<PrinterConfig>,
) -> anyhow::Result<Box<dyn Transport>> {
    let discovery = match printer_config {
        Some(config) => HidDiscovery::with_printer_config(config),
        None => HidDiscovery::new(),
    };
    let transport = discovery.probe().context("No keyboard available")?;

    let info = transport.device_info();
    info!(
        "Using {} ({:04X}:{:04X})",
        info.product_name.as_deref().unwrap_or(info.size.name()),
        info.vid,
        info.pid
    );
    Ok(transport)
}

/// Create printer config from CLI flags
pub fn create_printer_config(
    monitor: bool,
    hex: bool,
    json: bool,
    filter: Option<&str>,
) -> anyhow::Result<Option<PrinterConfig>> {
    if !monitor {
        return Ok(None);
    }

    let filter = match filter {
        Some(f) => f.parse::<PacketFilter>().map_err(anyhow::Error::msg)?,
        None => PacketFilter::All,
    };
    let format = if json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    Ok(Some(
        PrinterConfig::default()
            .with_hex(hex)
            .with_filter(filter)
            .with_format(format),
    ))
}
