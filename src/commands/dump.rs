//! Offline encoding of a preset

use std::path::Path;

use kontrol_driver::lights::ButtonLights;
use kontrol_driver::{decode_key_zones, encode_apply_frames, load_preset, SessionState};
use kontrol_transport::hex_string;
use kontrol_transport::printer::tag_name;

use super::CommandResult;

pub fn dump(preset: &Path, page: u8) -> CommandResult {
    let model = load_preset(preset)?;
    let frames = encode_apply_frames(&model, page)?;

    println!("{} page {}:", preset.display(), page);
    for frame in &frames {
        let tag = frame.first().copied().unwrap_or_default();
        println!("{} ({} bytes)", tag_name(tag), frame.len());
        println!("  {}", hex_string(frame));
    }

    let state = SessionState {
        page,
        ..Default::default()
    };
    let lights = ButtonLights::for_session(&state);
    println!("{} ({} bytes)", tag_name(lights[0]), lights.len());
    println!("  {}", hex_string(&lights));

    if let Some(key_zones) = frames.first() {
        println!("Key zones as the keyboard reads them:");
        for (i, zone) in decode_key_zones(key_zones)?.iter().enumerate() {
            let velocity = if zone.off {
                "off".to_string()
            } else {
                format!("{:?}", zone.velocity).to_lowercase()
            };
            println!(
                "  {:2}: up to note {:3} ch {:2} velocity {:7} {:?}",
                i, zone.note, zone.channel, velocity, zone.color
            );
        }
    }
    Ok(())
}
