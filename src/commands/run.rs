//! Apply a preset, then follow the keyboard until Ctrl-C

use std::path::Path;

use anyhow::Context;
use kontrol_driver::{DecodedEvent, Session, Settings};
use kontrol_transport::PrinterConfig;
use tracing::{info, warn};

use super::{open_transport, CommandResult};

pub fn run(
    preset: &Path,
    page: u8,
    settings: &Settings,
    json: bool,
    printer_config: Option<PrinterConfig>,
) -> CommandResult {
    let transport = open_transport(printer_config)?;
    let mut session =
        Session::open_preset(transport, preset)?.with_bulk_interface(settings.bulk_interface);
    session.set_page(page)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start runtime")?;

    info!("Running {} (Ctrl-C to stop)", preset.display());
    runtime.block_on(session.run(
        settings.poll_interval(),
        shutdown_signal(),
        |event| print_event(&event, json),
    ))?;
    Ok(())
}

fn print_event(event: &DecodedEvent, json: bool) {
    if json {
        match serde_json::to_string(event) {
            Ok(line) => println!("{}", line),
            Err(e) => warn!("Cannot serialize event: {}", e),
        }
    } else {
        println!("{:?}", event);
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Cannot listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
