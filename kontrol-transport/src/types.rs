//! Common types for transport layer

use serde::Serialize;

use crate::device_registry::KeyboardSize;

/// Device identification information
#[derive(Debug, Clone)]
pub struct TransportDeviceInfo {
    /// USB Vendor ID
    pub vid: u16,
    /// USB Product ID
    pub pid: u16,
    /// Keyboard size derived from the PID
    pub size: KeyboardSize,
    /// hidapi device path
    pub device_path: String,
    /// Serial number if available
    pub serial: Option<String>,
    /// Product name if available
    pub product_name: Option<String>,
}

/// Discovered device that can be opened
#[derive(Debug, Clone)]
pub struct DiscoveredDevice {
    /// Device information
    pub info: TransportDeviceInfo,
}

/// Transport/navigation buttons from a `(32, 0x01)` input report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NavButtons {
    pub play: bool,
    pub record: bool,
    pub stop: bool,
    pub preset_up: bool,
    pub preset_down: bool,
    pub page_left: bool,
    pub page_right: bool,
}

/// Classified HID input report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputReport {
    /// Knob/button feedback report, kept whole for snapshot comparison
    KnobFeedback(Vec<u8>),
    /// Transport and navigation buttons
    Navigation(NavButtons),
    /// Report shape the application does not interpret
    Unrecognized { len: usize, first: Option<u8> },
}
