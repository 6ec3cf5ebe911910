//! Outbound configuration frame encoders
//!
//! Every frame has a fixed length and starts with its tag. The fixed-layout
//! records are `#[repr(C)]` byte structs, so a frame is built by filling a
//! struct and taking `as_bytes()`. Encoders validate every model value they
//! read and never produce a partial frame.

use std::mem::size_of;

use tracing::debug;
use zerocopy::{FromBytes, FromZeros, Immutable, IntoBytes, KnownLayout};

use crate::error::{DecodeError, EncodingError};
use crate::model::{
    page_slice, ButtonMode, ButtonSlot, ConfigurationModel, KeyZoneSlot, KnobSlot, OutputRange,
    PedalContinuousSlot, PedalPort, PedalRole, PedalSwitchSlot, SliderMode, SliderSet, SliderSlot,
    SwitchBehavior, VelocityCurve, ZoneColor, SLOTS_PER_PAGE, SLOT_COUNT, ZONE_COUNT,
};
use crate::protocol::{self, len, pedal, slider, tag, zone};

/// MIDI channel 1-16 to its wire form 0-15
fn channel_byte(field: &'static str, channel: u8) -> Result<u8, EncodingError> {
    if (1..=16).contains(&channel) {
        Ok(channel - 1)
    } else {
        Err(EncodingError::out_of_range(field, channel))
    }
}

/// Any 7-bit MIDI data value
fn data_byte(field: &'static str, value: u8) -> Result<u8, EncodingError> {
    if value <= 127 {
        Ok(value)
    } else {
        Err(EncodingError::out_of_range(field, value))
    }
}

fn range_bytes(field: &'static str, range: &OutputRange) -> Result<(u8, u8), EncodingError> {
    Ok((data_byte(field, range.lower)?, data_byte(field, range.upper)?))
}

// =============================================================================
// Key zones (0xA4)
// =============================================================================

#[derive(Debug, Clone, Copy, IntoBytes, FromBytes, KnownLayout, Immutable)]
#[repr(C)]
struct KeyZoneRecord {
    note: u8,
    _pad0: u8,
    channel: u8,
    curve: u8,
    color: [u8; 2],
    _pad1: [u8; 2],
}

#[derive(Debug, Clone, Copy, IntoBytes, FromBytes, KnownLayout, Immutable)]
#[repr(C)]
struct KeyZonesFrame {
    tag: u8,
    zones: [KeyZoneRecord; ZONE_COUNT],
}

impl KeyZoneRecord {
    fn encode(zone: &KeyZoneSlot) -> Result<Self, EncodingError> {
        let curve = if zone.off {
            zone::CURVE_OFF
        } else {
            zone.velocity.code()
        };
        Ok(Self {
            note: data_byte("zone note", zone.note)?,
            _pad0: 0,
            channel: channel_byte("zone channel", zone.channel)?,
            curve,
            color: zone.color.code(),
            _pad1: [0; 2],
        })
    }

    fn decode(&self) -> Result<KeyZoneSlot, DecodeError> {
        let (velocity, off) = if self.curve == zone::CURVE_OFF {
            (VelocityCurve::default(), true)
        } else {
            let curve = VelocityCurve::from_code(self.curve).ok_or(DecodeError::UnknownCode {
                field: "velocity curve",
                code: self.curve.into(),
            })?;
            (curve, false)
        };
        let color = ZoneColor::from_code(self.color).ok_or(DecodeError::UnknownCode {
            field: "zone color",
            code: u16::from_be_bytes(self.color),
        })?;
        if self.channel > 15 {
            return Err(DecodeError::UnknownCode {
                field: "zone channel",
                code: self.channel.into(),
            });
        }
        Ok(KeyZoneSlot {
            note: self.note,
            channel: self.channel + 1,
            velocity,
            off,
            color,
        })
    }
}

/// Encode all 16 key zones into the 129-byte `0xA4` frame
pub fn encode_key_zones(zones: &[KeyZoneSlot; ZONE_COUNT]) -> Result<Vec<u8>, EncodingError> {
    let mut frame = KeyZonesFrame::new_zeroed();
    frame.tag = tag::KEY_ZONES;
    for (record, zone) in frame.zones.iter_mut().zip(zones) {
        *record = KeyZoneRecord::encode(zone)?;
    }
    Ok(frame.as_bytes().to_vec())
}

/// Recover the key zones from a `0xA4` frame
///
/// A zone whose velocity is switched off comes back with the default curve,
/// since the frame does not carry the curve in that case.
pub fn decode_key_zones(data: &[u8]) -> Result<[KeyZoneSlot; ZONE_COUNT], DecodeError> {
    if data.len() != len::KEY_ZONES {
        return Err(DecodeError::WrongLength {
            expected: len::KEY_ZONES,
            got: data.len(),
        });
    }
    let frame = KeyZonesFrame::read_from_bytes(data).map_err(|_| DecodeError::WrongLength {
        expected: len::KEY_ZONES,
        got: data.len(),
    })?;
    if frame.tag != tag::KEY_ZONES {
        return Err(DecodeError::WrongTag {
            expected: tag::KEY_ZONES,
            got: frame.tag,
        });
    }

    let mut zones: [KeyZoneSlot; ZONE_COUNT] = Default::default();
    for (slot, record) in zones.iter_mut().zip(frame.zones.iter()) {
        *slot = record.decode()?;
    }
    Ok(zones)
}

// =============================================================================
// Knobs and buttons (0xA1)
// =============================================================================

#[derive(Debug, Clone, Copy, IntoBytes, FromBytes, KnownLayout, Immutable)]
#[repr(C)]
struct ButtonRecord {
    mode: u8,
    cc: u8,
    channel: u8,
    behavior: u8,
    _pad0: [u8; 2],
    echo: u8,
    _pad1: [u8; 5],
}

#[derive(Debug, Clone, Copy, IntoBytes, FromBytes, KnownLayout, Immutable)]
#[repr(C)]
struct KnobRecord {
    mode: u8,
    cc: u8,
    channel: u8,
    tail: [u8; 9],
}

#[derive(Debug, Clone, Copy, IntoBytes, FromBytes, KnownLayout, Immutable)]
#[repr(C)]
struct KnobsButtonsFrame {
    tag: u8,
    buttons: [ButtonRecord; SLOTS_PER_PAGE],
    knobs: [KnobRecord; SLOTS_PER_PAGE],
    lights: [u8; SLOTS_PER_PAGE],
    _suffix: [u8; 3],
}

impl ButtonRecord {
    fn encode(button: &ButtonSlot) -> Result<Self, EncodingError> {
        let cc = data_byte("button cc", button.cc)?;
        let echo = match button.mode {
            ButtonMode::ProgramChange => cc,
            _ => protocol::button::ECHO_DEFAULT,
        };
        Ok(Self {
            mode: button.mode.code(),
            cc,
            channel: channel_byte("button channel", button.channel)?,
            behavior: button.mode.behavior(),
            _pad0: [0; 2],
            echo,
            _pad1: [0; 5],
        })
    }
}

impl KnobRecord {
    fn encode(knob: &KnobSlot) -> Result<Self, EncodingError> {
        Ok(Self {
            mode: knob.mode.code(),
            cc: data_byte("knob cc", knob.cc)?,
            channel: channel_byte("knob channel", knob.channel)?,
            tail: protocol::KNOB_RECORD_TAIL,
        })
    }
}

/// Encode the 8 buttons and 8 knobs of `page` into the 204-byte `0xA1` frame
///
/// Only slots `page*8 .. page*8+8` are read.
pub fn encode_knobs_and_buttons(
    page: u8,
    buttons: &[ButtonSlot; SLOT_COUNT],
    knobs: &[KnobSlot; SLOT_COUNT],
) -> Result<Vec<u8>, EncodingError> {
    let page_buttons = page_slice(buttons, page).ok_or(EncodingError::InvalidPage(page))?;
    let page_knobs = page_slice(knobs, page).ok_or(EncodingError::InvalidPage(page))?;

    let mut frame = KnobsButtonsFrame::new_zeroed();
    frame.tag = tag::KNOBS_BUTTONS;
    for (i, button) in page_buttons.iter().enumerate() {
        frame.buttons[i] = ButtonRecord::encode(button)?;
        frame.lights[i] = button.light.code();
    }
    for (record, knob) in frame.knobs.iter_mut().zip(page_knobs) {
        *record = KnobRecord::encode(knob)?;
    }
    Ok(frame.as_bytes().to_vec())
}

// =============================================================================
// Sliders (0xA2)
// =============================================================================

#[derive(Debug, Clone, Copy, IntoBytes, FromBytes, KnownLayout, Immutable)]
#[repr(C)]
struct SliderRecord {
    mode: u8,
    cc: u8,
    channel: u8,
    body: [u8; 9],
}

#[derive(Debug, Clone, Copy, IntoBytes, FromBytes, KnownLayout, Immutable)]
#[repr(C)]
struct SlidersFrame {
    tag: u8,
    sliders: [SliderRecord; 3],
    touchstrip: [u8; 4],
    _pad: [u8; 4],
}

impl SliderRecord {
    fn encode(name: &'static str, slot: &SliderSlot) -> Result<Self, EncodingError> {
        match slot.mode {
            SliderMode::Off => Ok(Self::new_zeroed()),
            SliderMode::ControlChange => {
                let (lower, upper) = range_bytes(name, &slot.range)?;
                Ok(Self {
                    mode: slider::MODE_CC,
                    cc: data_byte(name, slot.cc)?,
                    channel: channel_byte(name, slot.channel)?,
                    body: [slider::CC_MARKER, lower, 0x00, upper, 0, 0, 0, 0, 0],
                })
            }
            SliderMode::PitchBend => Ok(Self {
                mode: slider::PITCH_MODE,
                cc: 0x00,
                channel: channel_byte(name, slot.channel)?,
                body: slider::PITCH_TAIL,
            }),
        }
    }
}

/// Encode pitch wheel, mod wheel and touch strip into the 45-byte `0xA2` frame
pub fn encode_sliders(sliders: &SliderSet) -> Result<Vec<u8>, EncodingError> {
    let range = sliders.touchstrip_pitch_range;
    if range > slider::TOUCHSTRIP_RANGE_MAX {
        return Err(EncodingError::out_of_range("touchstrip_pitch_range", range));
    }

    let mut frame = SlidersFrame::new_zeroed();
    frame.tag = tag::SLIDERS;
    frame.sliders[0] = SliderRecord::encode("pitch wheel", &sliders.pitch_wheel)?;
    frame.sliders[1] = SliderRecord::encode("mod wheel", &sliders.mod_wheel)?;
    frame.sliders[2] = SliderRecord::encode("touch strip", &sliders.touch_strip)?;

    // Only the touch strip carries the pitch sub-mode
    if sliders.touch_strip.mode == SliderMode::PitchBend {
        frame.touchstrip = [
            slider::TOUCHSTRIP_RANGE_MAX - range,
            0x00,
            0x00,
            slider::TOUCHSTRIP_PITCH_MARKER,
        ];
    }
    Ok(frame.as_bytes().to_vec())
}

// =============================================================================
// Pedals (0xF4 per port, 0xA3 parameters)
// =============================================================================

#[derive(Debug, Clone, Copy, IntoBytes, FromBytes, KnownLayout, Immutable)]
#[repr(C)]
struct PedalPortFrame {
    tag: u8,
    subcommand: u8,
    selector: u8,
    marker: u8,
    role: u8,
    _pad: [u8; 28],
}

#[derive(Debug, Clone, Copy, IntoBytes, FromBytes, KnownLayout, Immutable)]
#[repr(C)]
struct ContinuousRecord {
    mode: u8,
    cc: u8,
    channel: u8,
    marker: u8,
    lower: u8,
    _pad0: u8,
    upper: u8,
    _pad1: u8,
    tail: [u8; 4],
}

#[derive(Debug, Clone, Copy, IntoBytes, FromBytes, KnownLayout, Immutable)]
#[repr(C)]
struct SwitchRecord {
    mode: u8,
    cc: u8,
    channel: u8,
    behavior: u8,
    off: u8,
    _pad0: u8,
    on: u8,
    _pad1: [u8; 3],
    step: u8,
    _pad2: u8,
}

#[derive(Debug, Clone, Copy, IntoBytes, FromBytes, KnownLayout, Immutable)]
#[repr(C)]
struct PedalParamsFrame {
    tag: u8,
    continuous: [ContinuousRecord; 2],
    /// tip 1, ring 1, tip 2, ring 2
    switches: [SwitchRecord; 4],
}

fn role_byte(port: &PedalPort) -> u8 {
    match (port.role, port.swap, port.invert) {
        (PedalRole::Switch, _, _) => pedal::ROLE_SWITCH,
        (PedalRole::Continuous, false, false) => pedal::ROLE_PLAIN,
        (PedalRole::Continuous, true, false) => pedal::ROLE_SWAP,
        (PedalRole::Continuous, false, true) => pedal::ROLE_INVERT,
        (PedalRole::Continuous, true, true) => pedal::ROLE_SWAP_INVERT,
    }
}

/// Encode the 33-byte `0xF4` frame describing one pedal jack (1 or 2)
pub fn encode_pedal_port(port_number: u8, port: &PedalPort) -> Result<Vec<u8>, EncodingError> {
    let selector = match port_number {
        1 => pedal::PORT1_SELECTOR,
        2 => pedal::PORT2_SELECTOR,
        n => return Err(EncodingError::out_of_range("pedal port", n)),
    };
    let mut frame = PedalPortFrame::new_zeroed();
    frame.tag = tag::PEDAL_PORT;
    frame.subcommand = pedal::PORT_SUBCOMMAND;
    frame.selector = selector;
    frame.marker = pedal::PORT_MARKER;
    frame.role = role_byte(port);
    Ok(frame.as_bytes().to_vec())
}

impl ContinuousRecord {
    fn encode(slot: &PedalContinuousSlot, marker: u8, tail: [u8; 4]) -> Result<Self, EncodingError> {
        let (lower, upper) = range_bytes("pedal range", &slot.range)?;
        Ok(Self {
            mode: slot.mode.code(),
            cc: data_byte("pedal cc", slot.cc)?,
            channel: channel_byte("pedal channel", slot.channel)?,
            marker,
            lower,
            _pad0: 0,
            upper,
            _pad1: 0,
            tail,
        })
    }
}

impl SwitchRecord {
    fn encode(slot: &PedalSwitchSlot) -> Result<Self, EncodingError> {
        let step = match slot.behavior {
            SwitchBehavior::Increment => data_byte("pedal step", slot.step)?,
            _ => 0x00,
        };
        Ok(Self {
            mode: slot.mode.code(),
            cc: data_byte("pedal cc", slot.cc)?,
            channel: channel_byte("pedal channel", slot.channel)?,
            behavior: slot.behavior.code(slot.wrap),
            off: data_byte("pedal off value", slot.off_value)?,
            _pad0: 0,
            on: data_byte("pedal on value", slot.on_value)?,
            _pad1: [0; 3],
            step,
            _pad2: 0,
        })
    }
}

/// Encode both jacks' pedal assignments into the 73-byte `0xA3` frame
pub fn encode_pedal_parameters(ports: &[PedalPort; 2]) -> Result<Vec<u8>, EncodingError> {
    let mut frame = PedalParamsFrame::new_zeroed();
    frame.tag = tag::PEDAL_PARAMS;
    frame.continuous[0] =
        ContinuousRecord::encode(&ports[0].continuous, pedal::PORT1_MARKER, pedal::PORT1_TAIL)?;
    frame.continuous[1] =
        ContinuousRecord::encode(&ports[1].continuous, pedal::PORT2_MARKER, pedal::PORT2_TAIL)?;
    frame.switches[0] = SwitchRecord::encode(&ports[0].tip)?;
    frame.switches[1] = SwitchRecord::encode(&ports[0].ring)?;
    frame.switches[2] = SwitchRecord::encode(&ports[1].tip)?;
    frame.switches[3] = SwitchRecord::encode(&ports[1].ring)?;
    Ok(frame.as_bytes().to_vec())
}

// Record and frame layouts must match the wire lengths
const _: () = {
    assert!(size_of::<KeyZoneRecord>() == len::ZONE_RECORD);
    assert!(size_of::<ButtonRecord>() == len::RECORD);
    assert!(size_of::<KnobRecord>() == len::RECORD);
    assert!(size_of::<SliderRecord>() == len::RECORD);
    assert!(size_of::<ContinuousRecord>() == len::RECORD);
    assert!(size_of::<SwitchRecord>() == len::RECORD);
    assert!(size_of::<KeyZonesFrame>() == len::KEY_ZONES);
    assert!(size_of::<KnobsButtonsFrame>() == len::KNOBS_BUTTONS);
    assert!(size_of::<SlidersFrame>() == len::SLIDERS);
    assert!(size_of::<PedalPortFrame>() == len::PEDAL_PORT);
    assert!(size_of::<PedalParamsFrame>() == len::PEDAL_PARAMS);
};

// =============================================================================
// Apply cycle
// =============================================================================

/// Encode every configuration frame of one apply cycle, in send order
///
/// Order: key zones, knobs/buttons, sliders, pedal port 1, pedal port 2,
/// pedal parameters. Nothing is returned unless all frames encode.
pub fn encode_apply_frames(
    model: &ConfigurationModel,
    page: u8,
) -> Result<Vec<Vec<u8>>, EncodingError> {
    let frames = vec![
        encode_key_zones(&model.key_zones)?,
        encode_knobs_and_buttons(page, &model.buttons, &model.knobs)?,
        encode_sliders(&model.sliders)?,
        encode_pedal_port(1, &model.pedals[0])?,
        encode_pedal_port(2, &model.pedals[1])?,
        encode_pedal_parameters(&model.pedals)?,
    ];
    debug!("Encoded {} frames for page {}", frames.len(), page);
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ButtonColor, KnobMode, PedalControlMode};

    #[test]
    fn test_frame_lengths() {
        let model = ConfigurationModel::default();
        let frames = encode_apply_frames(&model, 0).unwrap();
        let lengths: Vec<usize> = frames.iter().map(|f| f.len()).collect();
        assert_eq!(lengths, vec![129, 204, 45, 33, 33, 73]);
        let tags: Vec<u8> = frames.iter().map(|f| f[0]).collect();
        assert_eq!(tags, vec![0xA4, 0xA1, 0xA2, 0xF4, 0xF4, 0xA3]);
    }

    #[test]
    fn test_key_zone_layout() {
        let mut zones: [KeyZoneSlot; ZONE_COUNT] = Default::default();
        zones[0] = KeyZoneSlot {
            note: 60,
            channel: 3,
            velocity: VelocityCurve::Hard1,
            off: false,
            color: ZoneColor::Red,
        };
        zones[1].off = true;
        let frame = encode_key_zones(&zones).unwrap();
        assert_eq!(&frame[1..9], &[60, 0x00, 0x02, 0x34, 0x04, 0x06, 0x00, 0x00]);
        assert_eq!(frame[9 + 3], 0x83);
        // Default zone: note 127, channel 1, linear, blue
        assert_eq!(&frame[121..129], &[127, 0x00, 0x00, 0x33, 0x2C, 0x2E, 0x00, 0x00]);
    }

    #[test]
    fn test_key_zones_roundtrip_curves_and_colors() {
        let mut zones: [KeyZoneSlot; ZONE_COUNT] = Default::default();
        for (i, zone) in zones.iter_mut().enumerate() {
            zone.note = (i * 8) as u8;
            zone.channel = (i % 16) as u8 + 1;
            zone.velocity = VelocityCurve::ALL[i % 7];
            zone.color = ZoneColor::ALL[i % 9];
        }
        let frame = encode_key_zones(&zones).unwrap();
        assert_eq!(frame.len(), 129);
        assert_eq!(decode_key_zones(&frame).unwrap(), zones);
    }

    #[test]
    fn test_decode_key_zones_errors() {
        assert_eq!(
            decode_key_zones(&[0xA4; 10]),
            Err(DecodeError::WrongLength {
                expected: 129,
                got: 10
            })
        );
        let mut long = encode_key_zones(&Default::default()).unwrap();
        long.push(0);
        let err = decode_key_zones(&long).unwrap_err();
        assert_eq!(
            err,
            DecodeError::WrongLength {
                expected: 129,
                got: 130
            }
        );
        assert_eq!(err.to_string(), "Unexpected frame length 130, expected 129");

        let mut frame = encode_key_zones(&Default::default()).unwrap();
        frame[0] = 0xA1;
        assert!(matches!(
            decode_key_zones(&frame),
            Err(DecodeError::WrongTag { got: 0xA1, .. })
        ));
        let mut frame = encode_key_zones(&Default::default()).unwrap();
        frame[4] = 0x50;
        assert!(matches!(
            decode_key_zones(&frame),
            Err(DecodeError::UnknownCode { code: 0x50, .. })
        ));
    }

    #[test]
    fn test_key_zone_out_of_range() {
        let mut zones: [KeyZoneSlot; ZONE_COUNT] = Default::default();
        zones[5].channel = 17;
        assert_eq!(
            encode_key_zones(&zones),
            Err(EncodingError::OutOfRange {
                field: "zone channel",
                value: 17
            })
        );
        zones[5].channel = 0;
        assert!(encode_key_zones(&zones).is_err());
        zones[5].channel = 1;
        zones[5].note = 128;
        assert!(encode_key_zones(&zones).is_err());
    }

    #[test]
    fn test_knob_record_offsets() {
        let mut model = ConfigurationModel::default();
        // Fifth knob of page 0
        model.knobs[4].mode = KnobMode::ControlChange;
        model.knobs[4].channel = 1;
        model.knobs[4].cc = 20;
        let frame = encode_knobs_and_buttons(0, &model.buttons, &model.knobs).unwrap();
        // Knob records start after tag + 8 button records
        let start = 1 + 8 * 12 + 4 * 12;
        assert_eq!(start, 145);
        assert_eq!(frame[start], 0x03);
        assert_eq!(frame[start + 1], 0x14);
        assert_eq!(frame[start + 2], 0x00);
        assert_eq!(
            &frame[start + 3..start + 12],
            &[0x3C, 0x00, 0x00, 0x7F, 0x00, 0x00, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn test_button_records() {
        let mut model = ConfigurationModel::default();
        model.buttons[8] = ButtonSlot {
            mode: ButtonMode::ProgramChange,
            channel: 2,
            cc: 12,
            label: "Strings".into(),
            light: ButtonColor::Green,
        };
        model.buttons[9] = ButtonSlot {
            mode: ButtonMode::Toggle,
            channel: 16,
            cc: 64,
            label: String::new(),
            light: ButtonColor::Pink,
        };
        let frame = encode_knobs_and_buttons(1, &model.buttons, &model.knobs).unwrap();
        assert_eq!(
            &frame[1..13],
            &[0x04, 12, 0x01, 0x3D, 0, 0, 12, 0, 0, 0, 0, 0]
        );
        assert_eq!(
            &frame[13..25],
            &[0x03, 64, 0x0F, 0x3C, 0, 0, 0x7F, 0, 0, 0, 0, 0]
        );
        // Light codes after the knob records, then the suffix
        assert_eq!(&frame[193..201], &[0x07, 0x10, 0, 0, 0, 0, 0, 0]);
        assert_eq!(&frame[201..204], &[0, 0, 0]);
    }

    #[test]
    fn test_knobs_only_read_their_page() {
        let mut model = ConfigurationModel::default();
        let before = encode_knobs_and_buttons(2, &model.buttons, &model.knobs).unwrap();
        model.knobs[3].mode = KnobMode::Preset;
        model.buttons[31].mode = ButtonMode::Gate;
        let unchanged = encode_knobs_and_buttons(2, &model.buttons, &model.knobs).unwrap();
        assert_eq!(before, unchanged);
        model.knobs[16].mode = KnobMode::Preset;
        let changed = encode_knobs_and_buttons(2, &model.buttons, &model.knobs).unwrap();
        assert_ne!(before, changed);
    }

    #[test]
    fn test_invalid_page() {
        let model = ConfigurationModel::default();
        assert_eq!(
            encode_knobs_and_buttons(4, &model.buttons, &model.knobs),
            Err(EncodingError::InvalidPage(4))
        );
        assert_eq!(
            encode_apply_frames(&model, 9),
            Err(EncodingError::InvalidPage(9))
        );
    }

    #[test]
    fn test_reencode_is_identical() {
        let model = ConfigurationModel::default();
        assert_eq!(
            encode_apply_frames(&model, 1).unwrap(),
            encode_apply_frames(&model, 1).unwrap()
        );
    }

    #[test]
    fn test_slider_records() {
        let mut sliders = SliderSet::default();
        sliders.mod_wheel.range = OutputRange {
            lower: 10,
            upper: 100,
        };
        sliders.touch_strip.mode = SliderMode::PitchBend;
        sliders.touch_strip.channel = 2;
        sliders.touchstrip_pitch_range = 3;
        let frame = encode_sliders(&sliders).unwrap();
        assert_eq!(frame.len(), 45);
        assert_eq!(
            &frame[1..13],
            &[0x06, 0x00, 0x00, 0x00, 0x00, 0x00, 0xFF, 0x3F, 0x00, 0x00, 0x01, 0x00]
        );
        assert_eq!(
            &frame[13..25],
            &[0x03, 1, 0x00, 0x20, 10, 0x00, 100, 0, 0, 0, 0, 0]
        );
        assert_eq!(frame[25], 0x06);
        assert_eq!(frame[27], 0x01);
        assert_eq!(&frame[37..41], &[5, 0x00, 0x00, 0x02]);
        assert_eq!(&frame[41..45], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_slider_trailer_only_for_touchstrip_pitch() {
        let mut sliders = SliderSet::default();
        // Pitch wheel sends pitch by default, touch strip is off
        let frame = encode_sliders(&sliders).unwrap();
        assert_eq!(&frame[37..45], &[0; 8]);
        assert_eq!(&frame[25..37], &[0; 12]);

        sliders.touchstrip_pitch_range = 9;
        assert_eq!(
            encode_sliders(&sliders),
            Err(EncodingError::OutOfRange {
                field: "touchstrip_pitch_range",
                value: 9
            })
        );
    }

    #[test]
    fn test_pedal_port_frames() {
        let mut port = PedalPort::default();
        let frame = encode_pedal_port(1, &port).unwrap();
        assert_eq!(frame.len(), 33);
        assert_eq!(&frame[..5], &[0xF4, 0x22, 0x01, 0x03, 0x02]);
        assert!(frame[5..].iter().all(|&b| b == 0));

        port.swap = true;
        assert_eq!(encode_pedal_port(2, &port).unwrap()[..5], [0xF4, 0x22, 0x00, 0x03, 0x01]);
        port.invert = true;
        assert_eq!(encode_pedal_port(2, &port).unwrap()[4], 0x05);
        port.swap = false;
        assert_eq!(encode_pedal_port(2, &port).unwrap()[4], 0x06);
        port.role = PedalRole::Switch;
        assert_eq!(encode_pedal_port(1, &port).unwrap()[4], 0x03);

        assert!(encode_pedal_port(0, &port).is_err());
        assert!(encode_pedal_port(3, &port).is_err());
    }

    #[test]
    fn test_pedal_parameters() {
        let mut ports: [PedalPort; 2] = Default::default();
        ports[0].continuous = PedalContinuousSlot {
            mode: PedalControlMode::ControlChange,
            channel: 1,
            cc: 11,
            range: OutputRange {
                lower: 0,
                upper: 127,
            },
        };
        ports[1].ring = PedalSwitchSlot {
            mode: PedalControlMode::ControlChange,
            channel: 4,
            cc: 64,
            behavior: SwitchBehavior::Increment,
            off_value: 0,
            on_value: 100,
            step: 5,
            wrap: true,
        };
        ports[1].tip.step = 9;

        let frame = encode_pedal_parameters(&ports).unwrap();
        assert_eq!(frame.len(), 73);
        assert_eq!(
            &frame[1..13],
            &[0x03, 11, 0x00, 0x94, 0, 0x00, 127, 0x00, 0x60, 0x50, 0xF1, 0xAC]
        );
        assert_eq!(&frame[17..25], &[0x00, 0x00, 0x7F, 0x00, 0xC0, 0x60, 0x00, 0x00]);
        // ring 2 is the last switch record
        assert_eq!(
            &frame[61..73],
            &[0x03, 64, 0x03, 0x3F, 0, 0x00, 100, 0x00, 0x00, 0x00, 5, 0x00]
        );
        // Step is dropped outside increment
        assert_eq!(frame[49 + 10], 0x00);
        assert_eq!(frame[49 + 3], 0x36);
    }
}
