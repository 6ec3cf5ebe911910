//! HID wired transport for the keyboard's USB connection
//!
//! Configuration frames and light buffers are written as HID output reports
//! whose first byte is the frame tag. Input reports are read without
//! blocking. Display bitmaps bypass hidapi and go through [`BulkChannel`].

use std::sync::Mutex;

use hidapi::HidDevice;
use tracing::{debug, trace};

use crate::bulk::BulkChannel;
use crate::error::TransportError;
use crate::types::TransportDeviceInfo;
use crate::Transport;

/// Wired USB transport: non-blocking HID report channel plus bulk channel
pub struct HidWiredTransport {
    device: Mutex<HidDevice>,
    bulk: BulkChannel,
    info: TransportDeviceInfo,
}

impl HidWiredTransport {
    /// Wrap an opened HID device, switching it to non-blocking reads
    pub fn new(device: HidDevice, info: TransportDeviceInfo) -> Result<Self, TransportError> {
        device.set_blocking_mode(false)?;
        let bulk = BulkChannel::new(info.vid, info.pid);
        Ok(Self {
            device: Mutex::new(device),
            bulk,
            info,
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HidDevice>, TransportError> {
        self.device
            .lock()
            .map_err(|_| TransportError::HidError("device lock poisoned".into()))
    }
}

impl Transport for HidWiredTransport {
    fn send_report(&self, data: &[u8]) -> Result<(), TransportError> {
        let device = self.lock()?;
        match device.write(data) {
            Ok(n) if n >= data.len() => {
                trace!("Wrote report tag={:02X?} len={}", data.first(), n);
                Ok(())
            }
            Ok(n) => Err(TransportError::DeviceGone(format!(
                "short report write: {} of {} bytes",
                n,
                data.len()
            ))),
            Err(e) => {
                debug!("Report write failed: {}", e);
                Err(TransportError::DeviceGone(e.to_string()))
            }
        }
    }

    fn poll_report(&self, max_len: usize) -> Result<Option<Vec<u8>>, TransportError> {
        let device = self.lock()?;
        let mut buf = vec![0u8; max_len];
        let n = device
            .read(&mut buf)
            .map_err(|e| TransportError::DeviceGone(e.to_string()))?;
        if n == 0 {
            return Ok(None);
        }
        buf.truncate(n);
        Ok(Some(buf))
    }

    fn send_bulk(&self, data: &[u8], interface: u8) -> Result<(), TransportError> {
        self.bulk.transfer(data, interface)
    }

    fn device_info(&self) -> &TransportDeviceInfo {
        &self.info
    }
}
