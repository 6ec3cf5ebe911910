//! List connected keyboards

use kontrol_transport::HidDiscovery;

use super::CommandResult;

pub fn list() -> CommandResult {
    let devices = HidDiscovery::new().list_devices()?;
    if devices.is_empty() {
        println!("No Komplete Kontrol MK2 keyboard found");
        return Ok(());
    }

    println!("Komplete Kontrol MK2 keyboards:");
    for device in devices {
        let info = device.info;
        println!(
            "  {} VID={:04x} PID={:04x} keys={} serial={} path={}",
            info.product_name.as_deref().unwrap_or(info.size.name()),
            info.vid,
            info.pid,
            info.size.key_count(),
            info.serial.as_deref().unwrap_or("-"),
            info.device_path,
        );
    }
    Ok(())
}
