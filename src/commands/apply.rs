//! One-shot apply of a preset

use std::path::Path;

use kontrol_driver::{Session, Settings};
use kontrol_transport::PrinterConfig;

use super::{open_transport, CommandResult};

pub fn apply(
    preset: &Path,
    page: u8,
    settings: &Settings,
    printer_config: Option<PrinterConfig>,
) -> CommandResult {
    let transport = open_transport(printer_config)?;
    let mut session =
        Session::open_preset(transport, preset)?.with_bulk_interface(settings.bulk_interface);

    let report = session.set_page(page)?;
    println!(
        "Applied {} page {}: {} frames",
        preset.display(),
        page,
        report.frames_sent
    );
    for screen in &report.failed_screens {
        println!("  {:?} display was not updated", screen);
    }
    Ok(())
}
