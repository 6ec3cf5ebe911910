// Komplete Kontrol MK2 Protocol Definitions
// Frame tags, lengths and the byte codes of every model enum

use crate::model::{
    ButtonColor, ButtonMode, KnobMode, PedalControlMode, SwitchBehavior, VelocityCurve, ZoneColor,
};

/// Outbound frame tags (first byte of every frame)
pub mod tag {
    pub const BUTTON_LIGHTS: u8 = 0x80;
    pub const BITMAP: u8 = 0x84;
    pub const KNOBS_BUTTONS: u8 = 0xA1;
    pub const SLIDERS: u8 = 0xA2;
    pub const PEDAL_PARAMS: u8 = 0xA3;
    pub const KEY_ZONES: u8 = 0xA4;
    pub const PEDAL_PORT: u8 = 0xF4;
}

/// Exact lengths of every outbound frame
pub mod len {
    pub const KEY_ZONES: usize = 129;
    pub const KNOBS_BUTTONS: usize = 204;
    pub const SLIDERS: usize = 45;
    pub const PEDAL_PORT: usize = 33;
    pub const PEDAL_PARAMS: usize = 73;
    pub const BUTTON_LIGHTS: usize = 105;
    /// Every configuration record is 12 bytes
    pub const RECORD: usize = 12;
    /// Key zone records are 8 bytes
    pub const ZONE_RECORD: usize = 8;
}

/// Key zone codes
pub mod zone {
    /// Code of the softest curve; the rest follow consecutively
    pub const CURVE_BASE: u8 = 0x30;
    /// Velocity switched off
    pub const CURVE_OFF: u8 = 0x83;
}

/// Button-record constants
pub mod button {
    /// Echo byte for every mode except program change
    pub const ECHO_DEFAULT: u8 = 0x7F;
    pub const BEHAVIOR_TOGGLE: u8 = 0x3C;
    pub const BEHAVIOR_MOMENTARY: u8 = 0x3D;
    pub const BEHAVIOR_GATE: u8 = 0x3E;
}

/// Knob-record constant tail after mode/cc/channel
pub const KNOB_RECORD_TAIL: [u8; 9] = [0x3C, 0x00, 0x00, 0x7F, 0x00, 0x00, 0x00, 0x00, 0x00];

/// Slider-record constants
pub mod slider {
    pub const MODE_CC: u8 = 0x03;
    pub const CC_MARKER: u8 = 0x20;
    /// Full pitch-bend record after the channel byte
    pub const PITCH_MODE: u8 = 0x06;
    pub const PITCH_TAIL: [u8; 9] = [0x00, 0x00, 0x00, 0xFF, 0x3F, 0x00, 0x00, 0x01, 0x00];
    /// Fourth byte of the touch-strip trailer in pitch mode
    pub const TOUCHSTRIP_PITCH_MARKER: u8 = 0x02;
    /// Largest touch-strip pitch sub-mode
    pub const TOUCHSTRIP_RANGE_MAX: u8 = 8;
}

/// Pedal frame constants
pub mod pedal {
    /// Second byte of the port frame
    pub const PORT_SUBCOMMAND: u8 = 0x22;
    /// Port selector byte: port 1 is 0x01, port 2 is 0x00
    pub const PORT1_SELECTOR: u8 = 0x01;
    pub const PORT2_SELECTOR: u8 = 0x00;
    pub const PORT_MARKER: u8 = 0x03;

    pub const ROLE_PLAIN: u8 = 0x02;
    pub const ROLE_SWAP: u8 = 0x01;
    pub const ROLE_INVERT: u8 = 0x06;
    pub const ROLE_SWAP_INVERT: u8 = 0x05;
    pub const ROLE_SWITCH: u8 = 0x03;

    /// Marker byte and calibration tail of the port 1 continuous record
    pub const PORT1_MARKER: u8 = 0x94;
    pub const PORT1_TAIL: [u8; 4] = [0x60, 0x50, 0xF1, 0xAC];
    /// Marker byte and calibration tail of the port 2 continuous record
    pub const PORT2_MARKER: u8 = 0x00;
    pub const PORT2_TAIL: [u8; 4] = [0xC0, 0x60, 0x00, 0x00];

    /// Increment behaviour with wrap-around
    pub const BEHAVIOR_INCREMENT_WRAP: u8 = 0x3F;
}

/// Button-light buffer offsets
pub mod lights {
    pub const PRESET_UP: usize = 23;
    pub const PRESET_DOWN: usize = 28;
    pub const PAGE_LEFT: usize = 33;
    pub const PAGE_RIGHT: usize = 34;
    pub const ON: u8 = 0xFF;
}

/// Bitmap frame framing
pub mod bitmap {
    pub const HEADER_LEN: usize = 24;
    /// Fixed bytes after the screen selector
    pub const HEADER_MARKER: [u8; 5] = [0x60, 0x00, 0x00, 0x00, 0x00];
    /// Fixed bytes between the geometry and the payload length
    pub const GEOMETRY_SUFFIX: [u8; 6] = [0x02, 0x00, 0x00, 0x00, 0x00, 0x00];
    pub const TRAILER: [u8; 12] = [
        0x02, 0x00, 0x00, 0x00, 0x03, 0x00, 0x00, 0x00, 0x40, 0x00, 0x00, 0x00,
    ];
    pub const SCREEN_WIDTH: u32 = 480;
    pub const SCREEN_HEIGHT: u32 = 272;
}

impl VelocityCurve {
    pub const fn code(self) -> u8 {
        zone::CURVE_BASE + self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        code.checked_sub(zone::CURVE_BASE)
            .and_then(|index| Self::try_from(index).ok())
    }
}

impl ZoneColor {
    pub const fn code(self) -> [u8; 2] {
        match self {
            ZoneColor::Blue => [0x2C, 0x2E],
            ZoneColor::Red => [0x04, 0x06],
            ZoneColor::Orange => [0x08, 0x0A],
            ZoneColor::Green => [0x1C, 0x1E],
            ZoneColor::Yellow => [0x14, 0x16],
            ZoneColor::Mint => [0x20, 0x22],
            ZoneColor::Purple => [0x38, 0x3A],
            ZoneColor::Cyan => [0x24, 0x26],
            ZoneColor::Black => [0x00, 0x00],
        }
    }

    pub fn from_code(code: [u8; 2]) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }
}

impl ButtonMode {
    pub const fn code(self) -> u8 {
        match self {
            ButtonMode::Off => 0x00,
            ButtonMode::Toggle | ButtonMode::Trigger | ButtonMode::Gate => 0x03,
            ButtonMode::ProgramChange => 0x04,
        }
    }

    pub const fn behavior(self) -> u8 {
        match self {
            ButtonMode::Toggle => button::BEHAVIOR_TOGGLE,
            ButtonMode::Gate => button::BEHAVIOR_GATE,
            _ => button::BEHAVIOR_MOMENTARY,
        }
    }
}

impl ButtonColor {
    pub const fn code(self) -> u8 {
        match self {
            ButtonColor::Off => 0x00,
            ButtonColor::White => 0x1F,
            ButtonColor::Red => 0x01,
            ButtonColor::Blue => 0x0A,
            ButtonColor::Orange => 0x03,
            ButtonColor::Cyan => 0x09,
            ButtonColor::Green => 0x07,
            ButtonColor::Violet => 0x0C,
            ButtonColor::Yellow => 0x05,
            ButtonColor::Magenta => 0x0E,
            ButtonColor::Mint => 0x08,
            ButtonColor::Purple => 0x0D,
            ButtonColor::Pink => 0x10,
        }
    }
}

impl KnobMode {
    pub const fn code(self) -> u8 {
        match self {
            KnobMode::Off => 0x00,
            KnobMode::Preset => 0x04,
            KnobMode::ControlChange => 0x03,
        }
    }
}

impl PedalControlMode {
    pub const fn code(self) -> u8 {
        match self {
            PedalControlMode::Off => 0x00,
            PedalControlMode::ProgramChange => 0x04,
            PedalControlMode::ControlChange => 0x03,
        }
    }
}

impl SwitchBehavior {
    /// Wire code; `wrap` only matters for increment
    pub const fn code(self, wrap: bool) -> u8 {
        match self {
            SwitchBehavior::Gate => 0x36,
            SwitchBehavior::Increment if wrap => pedal::BEHAVIOR_INCREMENT_WRAP,
            SwitchBehavior::Increment => 0x37,
            SwitchBehavior::Trigger => 0x35,
            SwitchBehavior::Toggle => 0x34,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curve_codes() {
        assert_eq!(VelocityCurve::Soft3.code(), 0x30);
        assert_eq!(VelocityCurve::Hard3.code(), 0x36);
        for curve in VelocityCurve::ALL {
            assert_eq!(VelocityCurve::from_code(curve.code()), Some(curve));
        }
        assert_eq!(VelocityCurve::from_code(0x37), None);
        assert_eq!(VelocityCurve::from_code(0x2F), None);
    }

    #[test]
    fn test_zone_color_codes_unique() {
        for a in ZoneColor::ALL {
            for b in ZoneColor::ALL {
                assert_eq!(a == b, a.code() == b.code(), "{:?} vs {:?}", a, b);
            }
        }
    }

    #[test]
    fn test_button_codes() {
        assert_eq!(ButtonMode::Toggle.code(), 0x03);
        assert_eq!(ButtonMode::ProgramChange.code(), 0x04);
        assert_eq!(ButtonMode::Toggle.behavior(), 0x3C);
        assert_eq!(ButtonMode::Gate.behavior(), 0x3E);
        assert_eq!(ButtonMode::Trigger.behavior(), 0x3D);
        assert_eq!(ButtonMode::Off.behavior(), 0x3D);
        assert_eq!(ButtonColor::Pink.code(), 0x10);
        assert_eq!(ButtonColor::White.code(), 0x1F);
    }

    #[test]
    fn test_switch_behavior_codes() {
        assert_eq!(SwitchBehavior::Increment.code(false), 0x37);
        assert_eq!(SwitchBehavior::Increment.code(true), 0x3F);
        // Wrap is ignored outside increment
        assert_eq!(SwitchBehavior::Gate.code(true), 0x36);
        assert_eq!(SwitchBehavior::Toggle.code(false), 0x34);
    }
}
