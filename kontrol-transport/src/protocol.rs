//! Protocol constants for the report and bulk channels

/// Read buffer size for input reports (largest report the device emits)
pub const REPORT_READ_SIZE: usize = 91;

/// Inbound report shapes, keyed by (length, first byte)
pub mod report {
    /// Knob/button feedback report length
    pub const KNOB_FEEDBACK_LEN: usize = 51;
    /// Knob/button feedback report marker
    pub const KNOB_FEEDBACK_ID: u8 = 0xAA;
    /// Transport/navigation report length
    pub const NAVIGATION_LEN: usize = 32;
    /// Transport/navigation report marker
    pub const NAVIGATION_ID: u8 = 0x01;

    /// Offset of the first knob value in a feedback report
    pub const KNOB_VALUE_OFFSET: usize = 17;
    /// Distance between consecutive knob values
    pub const KNOB_VALUE_STRIDE: usize = 2;

    /// Offset of the current value of knob position `i` (0-7)
    pub const fn knob_value_offset(i: usize) -> usize {
        KNOB_VALUE_OFFSET + i * KNOB_VALUE_STRIDE
    }
}

/// Navigation report bitmasks
pub mod nav {
    /// Byte holding the play button
    pub const PLAY_BYTE: usize = 2;
    pub const PLAY: u8 = 0x10;

    /// Byte holding record/stop/preset/page buttons
    pub const BUTTON_BYTE: usize = 3;
    pub const STOP: u8 = 0x01;
    pub const RECORD: u8 = 0x02;
    pub const PRESET_UP: u8 = 0x10;
    pub const PAGE_RIGHT: u8 = 0x20;
    pub const PRESET_DOWN: u8 = 0x40;
    pub const PAGE_LEFT: u8 = 0x80;
}

/// Bulk channel used for display bitmaps
pub mod bulk {
    /// Interface claimed for display pushes
    pub const DISPLAY_INTERFACE: u8 = 3;
    /// Bulk OUT endpoint address
    pub const DISPLAY_ENDPOINT: u8 = 0x03;
    /// Timeout for one bulk write (ms)
    pub const WRITE_TIMEOUT_MS: u64 = 1000;
}
