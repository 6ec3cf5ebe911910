//! Input report classification
//!
//! The keyboard pushes several kinds of HID input reports on the interrupt
//! endpoint. Only two shapes are interpreted, distinguished by length and
//! first byte; every other report is passed through as `Unrecognized` so the
//! caller can ignore it without treating it as an error.

use tracing::trace;

use crate::protocol::{nav, report};
use crate::types::{InputReport, NavButtons};

/// Decode the transport/navigation bitmasks of a `(32, 0x01)` report
pub fn parse_nav_buttons(data: &[u8]) -> NavButtons {
    let play = data.get(nav::PLAY_BYTE).copied().unwrap_or(0);
    let buttons = data.get(nav::BUTTON_BYTE).copied().unwrap_or(0);

    NavButtons {
        play: play & nav::PLAY != 0,
        record: buttons & nav::RECORD != 0,
        stop: buttons & nav::STOP != 0,
        preset_up: buttons & nav::PRESET_UP != 0,
        preset_down: buttons & nav::PRESET_DOWN != 0,
        page_left: buttons & nav::PAGE_LEFT != 0,
        page_right: buttons & nav::PAGE_RIGHT != 0,
    }
}

/// Classify one input report by (length, first byte)
///
/// Report formats:
/// - `(51, 0xAA)`: knob/button feedback, knob `i` value at `17 + 2*i`
/// - `(32, 0x01)`: transport/navigation, bitmasks at bytes 2 and 3
pub fn parse_report(data: &[u8]) -> InputReport {
    match (data.len(), data.first().copied()) {
        (report::KNOB_FEEDBACK_LEN, Some(report::KNOB_FEEDBACK_ID)) => {
            InputReport::KnobFeedback(data.to_vec())
        }
        (report::NAVIGATION_LEN, Some(report::NAVIGATION_ID)) => {
            InputReport::Navigation(parse_nav_buttons(data))
        }
        (len, first) => {
            trace!("Ignoring input report len={} first={:02X?}", len, first);
            InputReport::Unrecognized { len, first }
        }
    }
}
