//! Navigation button backlights
//!
//! The page and preset arrows light up only when pressing them would do
//! something. The buffer is sent on its own, outside the apply cycle.

use crate::protocol::{len, lights, tag};
use crate::session::SessionState;

/// Which navigation arrows are lit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonLights {
    pub preset_up: bool,
    pub preset_down: bool,
    pub page_left: bool,
    pub page_right: bool,
}

impl ButtonLights {
    pub fn from_state(state: &SessionState) -> Self {
        Self {
            preset_up: state.preset.has_previous(),
            preset_down: state.preset.has_next(),
            page_left: state.page > 0,
            page_right: state.page < crate::model::MAX_PAGE,
        }
    }

    /// The 105-byte light buffer for the current session state
    pub fn for_session(state: &SessionState) -> [u8; len::BUTTON_LIGHTS] {
        Self::from_state(state).encode()
    }

    pub fn encode(&self) -> [u8; len::BUTTON_LIGHTS] {
        let mut buf = [0u8; len::BUTTON_LIGHTS];
        buf[0] = tag::BUTTON_LIGHTS;
        let lit = |on: bool| if on { lights::ON } else { 0x00 };
        buf[lights::PRESET_UP] = lit(self.preset_up);
        buf[lights::PRESET_DOWN] = lit(self.preset_down);
        buf[lights::PAGE_LEFT] = lit(self.page_left);
        buf[lights::PAGE_RIGHT] = lit(self.page_right);
        buf
    }
}
