//! In-memory transport shared by the integration tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use kontrol_transport::{KeyboardSize, Transport, TransportDeviceInfo, TransportError};

/// Records everything sent and replays scripted input reports
pub struct RecordingTransport {
    info: TransportDeviceInfo,
    reports: Mutex<Vec<Vec<u8>>>,
    bulk: Mutex<Vec<(u8, Vec<u8>)>>,
    input: Mutex<VecDeque<Vec<u8>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self {
            info: TransportDeviceInfo {
                vid: 0x17CC,
                pid: 0x1620,
                size: KeyboardSize::S61,
                device_path: "memory".into(),
                serial: None,
                product_name: Some("Komplete Kontrol S61 MK2".into()),
            },
            reports: Mutex::new(Vec::new()),
            bulk: Mutex::new(Vec::new()),
            input: Mutex::new(VecDeque::new()),
        }
    }

    /// Queue an input report for the next poll
    pub fn push_input(&self, data: Vec<u8>) {
        self.input.lock().unwrap().push_back(data);
    }

    /// Take and clear the recorded HID reports
    pub fn take_reports(&self) -> Vec<Vec<u8>> {
        std::mem::take(&mut *self.reports.lock().unwrap())
    }

    /// Take and clear the recorded bulk pushes as (interface, data)
    pub fn take_bulk(&self) -> Vec<(u8, Vec<u8>)> {
        std::mem::take(&mut *self.bulk.lock().unwrap())
    }
}

impl Transport for RecordingTransport {
    fn send_report(&self, data: &[u8]) -> Result<(), TransportError> {
        self.reports.lock().unwrap().push(data.to_vec());
        Ok(())
    }

    fn poll_report(&self, max_len: usize) -> Result<Option<Vec<u8>>, TransportError> {
        Ok(self.input.lock().unwrap().pop_front().map(|mut data| {
            data.truncate(max_len);
            data
        }))
    }

    fn send_bulk(&self, data: &[u8], interface: u8) -> Result<(), TransportError> {
        self.bulk.lock().unwrap().push((interface, data.to_vec()));
        Ok(())
    }

    fn device_info(&self) -> &TransportDeviceInfo {
        &self.info
    }
}

/// `(51, 0xAA)` knob feedback report with the given knob values
pub fn knob_report(values: &[(usize, u8)]) -> Vec<u8> {
    let mut data = vec![0u8; 51];
    data[0] = 0xAA;
    for &(knob, value) in values {
        data[17 + 2 * knob] = value;
    }
    data
}

/// `(32, 0x01)` navigation report with byte 3 set to `buttons`
pub fn nav_report(buttons: u8) -> Vec<u8> {
    let mut data = vec![0u8; 32];
    data[0] = 0x01;
    data[3] = buttons;
    data
}

pub const PAGE_RIGHT: u8 = 0x20;
pub const PAGE_LEFT: u8 = 0x80;
pub const PRESET_UP: u8 = 0x10;
pub const PRESET_DOWN: u8 = 0x40;
