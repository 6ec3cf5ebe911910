//! Stateful input report decoder
//!
//! Knob feedback reports carry the absolute value of every knob on the
//! page. Movement is found by comparing each report against the previous
//! one, so the decoder keeps that snapshot. Preset and page buttons fire
//! once per press: only a bit that was clear in the previous navigation
//! report yields an event, so a held button or a chord that keeps it held
//! does not repeat.

use kontrol_transport::protocol::report;
use kontrol_transport::{parse_report, InputReport, NavButtons};
use serde::Serialize;
use tracing::trace;

use crate::model::{ConfigurationModel, KnobMode, MAX_PAGE, SLOTS_PER_PAGE};

/// Event decoded from one input report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DecodedEvent {
    /// A knob on the active page moved; `slot` is the absolute index (0-31)
    ValueChanged { slot: usize, value: u8 },
    Play,
    Record,
    Stop,
    PresetUp,
    PresetDown,
    PageLeft,
    PageRight,
}

/// Turns raw input reports into events
#[derive(Debug, Clone)]
pub struct ReportDecoder {
    snapshot: [u8; report::KNOB_FEEDBACK_LEN],
    last_nav: NavButtons,
}

impl Default for ReportDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportDecoder {
    /// Decoder with an all-zero snapshot
    pub fn new() -> Self {
        Self {
            snapshot: [0; report::KNOB_FEEDBACK_LEN],
            last_nav: NavButtons::default(),
        }
    }

    /// Last knob feedback report seen
    pub fn snapshot(&self) -> &[u8] {
        &self.snapshot
    }

    /// Decode one report against the active page of `model`
    pub fn decode(
        &mut self,
        data: &[u8],
        model: &ConfigurationModel,
        page: u8,
    ) -> Vec<DecodedEvent> {
        match parse_report(data) {
            InputReport::KnobFeedback(raw) => self.knob_feedback(&raw, model, page),
            InputReport::Navigation(buttons) => {
                let events = navigation_events(buttons, self.last_nav, page);
                self.last_nav = buttons;
                events
            }
            InputReport::Unrecognized { .. } => Vec::new(),
        }
    }

    fn knob_feedback(
        &mut self,
        raw: &[u8],
        model: &ConfigurationModel,
        page: u8,
    ) -> Vec<DecodedEvent> {
        let mut events = Vec::new();
        let page_start = page as usize * SLOTS_PER_PAGE;

        for i in 0..SLOTS_PER_PAGE {
            let offset = report::knob_value_offset(i);
            let value = raw[offset];
            if value == self.snapshot[offset] {
                continue;
            }
            let slot = page_start + i;
            let active = model
                .knobs
                .get(slot)
                .is_some_and(|knob| knob.mode != KnobMode::Off);
            if active {
                events.push(DecodedEvent::ValueChanged { slot, value });
            } else {
                trace!("Ignoring movement of inactive knob {}", slot);
            }
        }

        // Replaced whether or not anything was emitted
        self.snapshot.copy_from_slice(raw);
        events
    }
}

fn navigation_events(buttons: NavButtons, last: NavButtons, page: u8) -> Vec<DecodedEvent> {
    let mut events = Vec::new();
    if buttons.play {
        events.push(DecodedEvent::Play);
    }
    if buttons.record {
        events.push(DecodedEvent::Record);
    }
    if buttons.stop {
        events.push(DecodedEvent::Stop);
    }
    if buttons.preset_up && !last.preset_up {
        events.push(DecodedEvent::PresetUp);
    }
    if buttons.preset_down && !last.preset_down {
        events.push(DecodedEvent::PresetDown);
    }
    if buttons.page_left && !last.page_left && page > 0 {
        events.push(DecodedEvent::PageLeft);
    }
    if buttons.page_right && !last.page_right && page < MAX_PAGE {
        events.push(DecodedEvent::PageRight);
    }
    events
}
