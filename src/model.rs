//! Configuration model for the keyboard's control surface
//!
//! A `ConfigurationModel` is the complete, editable state of one preset:
//! key zones, four pages of knob and button assignments, sliders, pedals
//! and the display look. Encoders and the renderer only ever read it.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::EncodingError;

/// Number of key zones (always transmitted together)
pub const ZONE_COUNT: usize = 16;
/// Number of knob/button pages
pub const PAGE_COUNT: u8 = 4;
/// Knobs (and buttons) visible on one page
pub const SLOTS_PER_PAGE: usize = 8;
/// Knob (and button) slots across all pages
pub const SLOT_COUNT: usize = PAGE_COUNT as usize * SLOTS_PER_PAGE;
/// Highest valid page index
pub const MAX_PAGE: u8 = PAGE_COUNT - 1;

/// Velocity response curve of a key zone, softest to hardest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VelocityCurve {
    Soft3,
    Soft2,
    Soft1,
    #[default]
    Linear,
    Hard1,
    Hard2,
    Hard3,
}

impl VelocityCurve {
    pub const ALL: [VelocityCurve; 7] = [
        VelocityCurve::Soft3,
        VelocityCurve::Soft2,
        VelocityCurve::Soft1,
        VelocityCurve::Linear,
        VelocityCurve::Hard1,
        VelocityCurve::Hard2,
        VelocityCurve::Hard3,
    ];
}

/// Curves are indexed 0 (soft3) to 6 (hard3)
impl TryFrom<u8> for VelocityCurve {
    type Error = EncodingError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(index as usize)
            .copied()
            .ok_or_else(|| EncodingError::out_of_range("velocity_curve", index))
    }
}

/// Key light colour of a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneColor {
    #[default]
    Blue,
    Red,
    Orange,
    Green,
    Yellow,
    Mint,
    Purple,
    Cyan,
    Black,
}

impl ZoneColor {
    pub const ALL: [ZoneColor; 9] = [
        ZoneColor::Blue,
        ZoneColor::Red,
        ZoneColor::Orange,
        ZoneColor::Green,
        ZoneColor::Yellow,
        ZoneColor::Mint,
        ZoneColor::Purple,
        ZoneColor::Cyan,
        ZoneColor::Black,
    ];
}

/// One key zone; zones run in ascending keyboard order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyZoneSlot {
    /// Upper MIDI note of the zone (0-127)
    pub note: u8,
    /// MIDI channel (1-16)
    pub channel: u8,
    pub velocity: VelocityCurve,
    /// Velocity "off" flag, overrides the curve
    pub off: bool,
    pub color: ZoneColor,
}

impl Default for KeyZoneSlot {
    fn default() -> Self {
        Self {
            note: 127,
            channel: 1,
            velocity: VelocityCurve::Linear,
            off: false,
            color: ZoneColor::Blue,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnobMode {
    #[default]
    Off,
    Preset,
    ControlChange,
}

/// One assignable knob
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnobSlot {
    pub mode: KnobMode,
    pub channel: u8,
    pub cc: u8,
    /// Free text shown under the knob label
    pub label: String,
}

impl Default for KnobSlot {
    fn default() -> Self {
        Self {
            mode: KnobMode::Off,
            channel: 1,
            cc: 0,
            label: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonMode {
    #[default]
    Off,
    Toggle,
    Trigger,
    Gate,
    ProgramChange,
}

/// Button backlight colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonColor {
    #[default]
    Off,
    White,
    Red,
    Blue,
    Orange,
    Cyan,
    Green,
    Violet,
    Yellow,
    Magenta,
    Mint,
    Purple,
    Pink,
}

/// One assignable button above the displays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonSlot {
    pub mode: ButtonMode,
    pub channel: u8,
    /// CC number, or program number in program-change mode
    pub cc: u8,
    pub label: String,
    pub light: ButtonColor,
}

impl Default for ButtonSlot {
    fn default() -> Self {
        Self {
            mode: ButtonMode::Off,
            channel: 1,
            cc: 0,
            label: String::new(),
            light: ButtonColor::Off,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SliderMode {
    #[default]
    Off,
    ControlChange,
    PitchBend,
}

/// Output value range (0-127 each)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputRange {
    pub lower: u8,
    pub upper: u8,
}

impl Default for OutputRange {
    fn default() -> Self {
        Self {
            lower: 0,
            upper: 127,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderSlot {
    pub mode: SliderMode,
    pub channel: u8,
    pub cc: u8,
    pub range: OutputRange,
}

impl Default for SliderSlot {
    fn default() -> Self {
        Self::new(SliderMode::Off, 0)
    }
}

impl SliderSlot {
    fn new(mode: SliderMode, cc: u8) -> Self {
        Self {
            mode,
            channel: 1,
            cc,
            range: OutputRange::default(),
        }
    }
}

/// Pitch wheel, mod wheel and touch strip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderSet {
    pub pitch_wheel: SliderSlot,
    pub mod_wheel: SliderSlot,
    pub touch_strip: SliderSlot,
    /// Touch-strip sub-mode used while it sends pitch (0-8)
    pub touchstrip_pitch_range: u8,
}

impl SliderSet {
    /// The three sliders with their on-screen names
    pub fn named(&self) -> [(&'static str, &SliderSlot); 3] {
        [
            ("pitch wheel", &self.pitch_wheel),
            ("mod wheel", &self.mod_wheel),
            ("touch strip", &self.touch_strip),
        ]
    }
}

impl Default for SliderSet {
    fn default() -> Self {
        Self {
            pitch_wheel: SliderSlot::new(SliderMode::PitchBend, 0),
            mod_wheel: SliderSlot::new(SliderMode::ControlChange, 1),
            touch_strip: SliderSlot::new(SliderMode::Off, 0),
            touchstrip_pitch_range: 0,
        }
    }
}

/// What a pedal jack is wired to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PedalRole {
    #[default]
    Continuous,
    Switch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PedalControlMode {
    #[default]
    Off,
    ProgramChange,
    ControlChange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwitchBehavior {
    #[default]
    Gate,
    Increment,
    Trigger,
    Toggle,
}

/// Tip or ring contact of a switch pedal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PedalSwitchSlot {
    pub mode: PedalControlMode,
    pub channel: u8,
    pub cc: u8,
    pub behavior: SwitchBehavior,
    pub off_value: u8,
    pub on_value: u8,
    /// Increment behaviour only
    pub step: u8,
    /// Increment behaviour only
    pub wrap: bool,
}

impl Default for PedalSwitchSlot {
    fn default() -> Self {
        Self {
            mode: PedalControlMode::Off,
            channel: 1,
            cc: 0,
            behavior: SwitchBehavior::Gate,
            off_value: 0,
            on_value: 127,
            step: 1,
            wrap: false,
        }
    }
}

/// Expression pedal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PedalContinuousSlot {
    pub mode: PedalControlMode,
    pub channel: u8,
    pub cc: u8,
    pub range: OutputRange,
}

impl Default for PedalContinuousSlot {
    fn default() -> Self {
        Self {
            mode: PedalControlMode::Off,
            channel: 1,
            cc: 0,
            range: OutputRange::default(),
        }
    }
}

/// One pedal jack
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PedalPort {
    pub role: PedalRole,
    /// Swap tip and ring of an expression pedal
    pub swap: bool,
    /// Invert an expression pedal's direction
    pub invert: bool,
    pub continuous: PedalContinuousSlot,
    pub tip: PedalSwitchSlot,
    pub ring: PedalSwitchSlot,
}

/// RGB colour used for on-screen text and lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Display palette, never transmitted to the keyboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorSet {
    pub slider: Rgb,
    pub cc: Rgb,
    pub parameter: Rgb,
    pub divider: Rgb,
    pub value: Rgb,
}

impl Default for ColorSet {
    fn default() -> Self {
        Self {
            slider: Rgb(255, 63, 127),
            cc: Rgb(255, 255, 0),
            parameter: Rgb(255, 255, 255),
            divider: Rgb(128, 128, 255),
            value: Rgb(0, 255, 0),
        }
    }
}

/// Screen that carries the slider summary and page indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SliderInfoScreen {
    None,
    #[default]
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Background of the left screen, relative to the preset file
    pub left_image: Option<PathBuf>,
    /// Background of the right screen, relative to the preset file
    pub right_image: Option<PathBuf>,
    pub slider_info: SliderInfoScreen,
}

/// Complete preset: everything one apply cycle sends
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigurationModel {
    pub key_zones: [KeyZoneSlot; ZONE_COUNT],
    pub knobs: [KnobSlot; SLOT_COUNT],
    pub buttons: [ButtonSlot; SLOT_COUNT],
    pub sliders: SliderSet,
    pub pedals: [PedalPort; 2],
    pub colors: ColorSet,
    pub display: DisplaySettings,
}

impl ConfigurationModel {
    /// Knobs of one page, or `None` for an invalid page
    pub fn page_knobs(&self, page: u8) -> Option<&[KnobSlot]> {
        page_slice(&self.knobs, page)
    }

    /// Buttons of one page, or `None` for an invalid page
    pub fn page_buttons(&self, page: u8) -> Option<&[ButtonSlot]> {
        page_slice(&self.buttons, page)
    }
}

/// The 8 slots of `page` within a 32-slot array
pub fn page_slice<T>(slots: &[T; SLOT_COUNT], page: u8) -> Option<&[T]> {
    if page > MAX_PAGE {
        return None;
    }
    let start = page as usize * SLOTS_PER_PAGE;
    Some(&slots[start..start + SLOTS_PER_PAGE])
}
