//! Push an image file to one display

use std::path::Path;

use anyhow::{bail, Context};
use image::imageops::FilterType;
use kontrol_driver::protocol::bitmap::{SCREEN_HEIGHT, SCREEN_WIDTH};
use kontrol_driver::{encode_bitmap, ScreenId, Settings};
use kontrol_transport::PrinterConfig;
use tracing::info;

use super::{open_transport, CommandResult};

pub fn screen(
    path: &Path,
    screen: ScreenId,
    x: u16,
    y: u16,
    settings: &Settings,
    printer_config: Option<PrinterConfig>,
) -> CommandResult {
    let (x32, y32) = (u32::from(x), u32::from(y));
    if x32 >= SCREEN_WIDTH || y32 >= SCREEN_HEIGHT {
        bail!("Position {x},{y} is outside the {SCREEN_WIDTH}x{SCREEN_HEIGHT} display");
    }

    let img = image::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let (room_w, room_h) = (SCREEN_WIDTH - x32, SCREEN_HEIGHT - y32);
    let img = if img.width() > room_w || img.height() > room_h {
        info!(
            "Scaling {}x{} image to fit {}x{}",
            img.width(),
            img.height(),
            room_w,
            room_h
        );
        img.resize(room_w, room_h, FilterType::Lanczos3)
    } else {
        img
    };
    let rgb = img.to_rgb8();

    let frame = encode_bitmap(screen, &rgb, x, y)?;
    let transport = open_transport(printer_config)?;
    transport.send_bulk(&frame, settings.bulk_interface)?;

    println!(
        "Sent {}x{} image to the {:?} display at {},{}",
        rgb.width(),
        rgb.height(),
        screen,
        x,
        y
    );
    Ok(())
}
