//! Device discovery for Komplete Kontrol MK2 keyboards

use hidapi::HidApi;
use tracing::{debug, info};

use crate::device_registry::{self, KeyboardSize, PRODUCT_IDS, VENDOR_ID};
use crate::error::TransportError;
use crate::hid_wired::HidWiredTransport;
use crate::printer::{PrinterConfig, PrinterTransport};
use crate::types::{DiscoveredDevice, TransportDeviceInfo};
use crate::Transport;

/// HID device discovery
#[derive(Default)]
pub struct HidDiscovery {
    /// Optional printer config for monitoring mode - wraps transports automatically
    printer_config: Option<PrinterConfig>,
}

impl HidDiscovery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with printer config for monitoring mode
    /// Transports opened via probe() will be wrapped with PrinterTransport
    pub fn with_printer_config(config: PrinterConfig) -> Self {
        Self {
            printer_config: Some(config),
        }
    }

    fn device_info(api: &HidApi, pid: u16) -> Option<TransportDeviceInfo> {
        let size = KeyboardSize::from_pid(pid)?;
        let hid = api
            .device_list()
            .find(|d| d.vendor_id() == VENDOR_ID && d.product_id() == pid)?;
        Some(TransportDeviceInfo {
            vid: VENDOR_ID,
            pid,
            size,
            device_path: hid.path().to_string_lossy().to_string(),
            serial: hid.serial_number().map(|s| s.to_string()),
            product_name: hid.product_string().map(|s| s.to_string()),
        })
    }

    /// List connected keyboards, one entry per product ID
    pub fn list_devices(&self) -> Result<Vec<DiscoveredDevice>, TransportError> {
        let api = HidApi::new()?;
        let mut devices = Vec::new();

        for &pid in PRODUCT_IDS {
            if let Some(info) = Self::device_info(&api, pid) {
                debug!(
                    "Found device: VID={:04X} PID={:04X} size={:?} path={}",
                    info.vid, info.pid, info.size, info.device_path
                );
                devices.push(DiscoveredDevice { info });
            }
        }

        // Anything with our vendor ID but an unknown PID is worth a note
        for d in api.device_list() {
            if d.vendor_id() == VENDOR_ID && !device_registry::is_supported(VENDOR_ID, d.product_id())
            {
                debug!("Skipping unsupported PID {:04X}", d.product_id());
            }
        }

        info!("Found {} devices", devices.len());
        Ok(devices)
    }

    /// Open the first keyboard that answers, trying S49, S61 then S88
    pub fn probe(&self) -> Result<Box<dyn Transport>, TransportError> {
        let api = HidApi::new()?;

        for &pid in PRODUCT_IDS {
            let Some(info) = Self::device_info(&api, pid) else {
                continue;
            };
            match api.open(VENDOR_ID, pid) {
                Ok(hid) => {
                    info!("Opened {} ({:04X}:{:04X})", info.size.name(), VENDOR_ID, pid);
                    let transport = HidWiredTransport::new(hid, info)?;
                    return Ok(self.wrap(Box::new(transport)));
                }
                Err(e) => {
                    let err = TransportError::from(e);
                    // A keyboard we cannot open due to permissions should not be
                    // masked by "not found" on the remaining PIDs
                    if matches!(err, TransportError::HidPermissionDenied(_)) {
                        return Err(err);
                    }
                    debug!("Failed to open PID {:04X}: {}", pid, err);
                }
            }
        }

        Err(TransportError::DeviceNotFound(
            "no Komplete Kontrol MK2 keyboard connected".into(),
        ))
    }

    fn wrap(&self, transport: Box<dyn Transport>) -> Box<dyn Transport> {
        match &self.printer_config {
            Some(config) => PrinterTransport::wrap(transport, config.clone()),
            None => transport,
        }
    }
}
