//! Transport error types

use thiserror::Error;

/// Errors that can occur during transport operations
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    /// A report write was rejected or came up short
    #[error("Device gone: {0}")]
    DeviceGone(String),

    /// One of the libusb steps of a bitmap push failed
    #[error("Bulk transfer failed during {stage}: {reason}")]
    BulkTransferFailed { stage: BulkStage, reason: String },

    // HID-specific errors
    #[error("HID error: {0}")]
    HidError(String),

    #[error("HID permission denied: {0}")]
    HidPermissionDenied(String),

    #[error("USB error: {0}")]
    Usb(#[from] rusb::Error),
}

/// Step of a bulk session at which a failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkStage {
    Open,
    Claim,
    Write,
    Release,
}

impl std::fmt::Display for BulkStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BulkStage::Open => "open",
            BulkStage::Claim => "claim",
            BulkStage::Write => "write",
            BulkStage::Release => "release",
        };
        f.write_str(name)
    }
}

impl TransportError {
    /// Build a bulk failure for the given stage
    pub fn bulk(stage: BulkStage, reason: impl ToString) -> Self {
        TransportError::BulkTransferFailed {
            stage,
            reason: reason.to_string(),
        }
    }
}

impl From<hidapi::HidError> for TransportError {
    fn from(e: hidapi::HidError) -> Self {
        let msg = e.to_string();
        if msg.contains("Permission denied") || msg.contains("EPERM") {
            TransportError::HidPermissionDenied(msg)
        } else {
            TransportError::HidError(msg)
        }
    }
}
