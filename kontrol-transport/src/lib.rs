//! Transport layer for Komplete Kontrol MK2 keyboard communication
//!
//! The keyboard is reached over two channels:
//!
//! - HID reports: configuration frames and button lights out, knob and
//!   navigation reports in (non-blocking reads)
//! - USB bulk: display bitmaps, pushed through a short-lived libusb session
//!
//! Both are hidden behind the [`Transport`] trait so the rest of the driver
//! can be exercised against an in-memory double.

pub mod device_registry;
pub mod error;
pub mod event_parser;
pub mod printer;
pub mod protocol;
pub mod types;

mod bulk;
mod discovery;
mod hid_wired;

pub use bulk::BulkChannel;
pub use device_registry::{is_supported, KeyboardSize, PRODUCT_IDS, VENDOR_ID};
pub use discovery::HidDiscovery;
pub use error::{BulkStage, TransportError};
pub use event_parser::{parse_nav_buttons, parse_report};
pub use hid_wired::HidWiredTransport;
pub use printer::{hex_string, OutputFormat, PacketFilter, PrinterConfig, PrinterTransport};
pub use types::{DiscoveredDevice, InputReport, NavButtons, TransportDeviceInfo};

/// The core transport trait
///
/// All operations are synchronous and non-blocking apart from the bulk
/// write, which is bounded by its timeout.
pub trait Transport: Send {
    /// Write one HID output report; the first byte is the frame tag
    ///
    /// A failed or short write is reported as [`TransportError::DeviceGone`].
    fn send_report(&self, data: &[u8]) -> Result<(), TransportError>;

    /// Read one pending input report of at most `max_len` bytes
    ///
    /// Returns `Ok(None)` immediately when nothing is pending.
    fn poll_report(&self, max_len: usize) -> Result<Option<Vec<u8>>, TransportError>;

    /// Push `data` over the bulk endpoint of `interface`
    fn send_bulk(&self, data: &[u8], interface: u8) -> Result<(), TransportError>;

    /// Identification of the opened keyboard
    fn device_info(&self) -> &TransportDeviceInfo;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send_report(&self, data: &[u8]) -> Result<(), TransportError> {
        (**self).send_report(data)
    }

    fn poll_report(&self, max_len: usize) -> Result<Option<Vec<u8>>, TransportError> {
        (**self).poll_report(max_len)
    }

    fn send_bulk(&self, data: &[u8], interface: u8) -> Result<(), TransportError> {
        (**self).send_bulk(data, interface)
    }

    fn device_info(&self) -> &TransportDeviceInfo {
        (**self).device_info()
    }
}
