//! USB bulk channel for display bitmaps
//!
//! Bitmap frames are far larger than a HID report, so they go out over a
//! vendor bulk endpoint through libusb. The channel is not kept open: every
//! transfer opens its own libusb session, claims the interface, writes once,
//! and releases/closes again on the way out, even when a step fails.

use std::time::Duration;

use rusb::{Context, DeviceHandle, UsbContext};
use tracing::{debug, warn};

use crate::error::{BulkStage, TransportError};
use crate::protocol::bulk;

/// Releases a claimed interface when dropped
struct ClaimedInterface<'a> {
    handle: &'a DeviceHandle<Context>,
    interface: u8,
    released: bool,
}

impl<'a> ClaimedInterface<'a> {
    fn claim(handle: &'a DeviceHandle<Context>, interface: u8) -> Result<Self, TransportError> {
        handle
            .claim_interface(interface)
            .map_err(|e| TransportError::bulk(BulkStage::Claim, e))?;
        Ok(Self {
            handle,
            interface,
            released: false,
        })
    }

    /// Release explicitly so a release failure can be reported
    fn release(mut self) -> Result<(), TransportError> {
        self.released = true;
        self.handle
            .release_interface(self.interface)
            .map_err(|e| TransportError::bulk(BulkStage::Release, e))
    }
}

impl Drop for ClaimedInterface<'_> {
    fn drop(&mut self) {
        if !self.released {
            if let Err(e) = self.handle.release_interface(self.interface) {
                warn!("Failed to release interface {}: {}", self.interface, e);
            }
        }
    }
}

/// Per-transfer bulk channel bound to one VID/PID
#[derive(Debug, Clone)]
pub struct BulkChannel {
    vid: u16,
    pid: u16,
    endpoint: u8,
    timeout: Duration,
}

impl BulkChannel {
    pub fn new(vid: u16, pid: u16) -> Self {
        Self {
            vid,
            pid,
            endpoint: bulk::DISPLAY_ENDPOINT,
            timeout: Duration::from_millis(bulk::WRITE_TIMEOUT_MS),
        }
    }

    /// Open, claim `interface`, write `data` once, release, close
    pub fn transfer(&self, data: &[u8], interface: u8) -> Result<(), TransportError> {
        let context = Context::new().map_err(|e| TransportError::bulk(BulkStage::Open, e))?;
        let handle = context
            .open_device_with_vid_pid(self.vid, self.pid)
            .ok_or_else(|| {
                TransportError::bulk(
                    BulkStage::Open,
                    format!("cannot open {:04X}:{:04X}", self.vid, self.pid),
                )
            })?;

        // Not supported on every platform; the claim below reports real problems
        if let Err(e) = handle.set_auto_detach_kernel_driver(true) {
            debug!("Auto-detach of kernel driver unavailable: {}", e);
        }

        let claimed = ClaimedInterface::claim(&handle, interface)?;
        let written = handle
            .write_bulk(self.endpoint, data, self.timeout)
            .map_err(|e| TransportError::bulk(BulkStage::Write, e));

        let release = claimed.release();
        let written = written?;
        release?;

        if written != data.len() {
            return Err(TransportError::bulk(
                BulkStage::Write,
                format!("short write: {} of {} bytes", written, data.len()),
            ));
        }

        debug!(
            "Bulk transfer of {} bytes on interface {} complete",
            written, interface
        );
        Ok(())
    }
}
