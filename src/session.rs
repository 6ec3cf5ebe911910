//! Runtime session: one opened keyboard driven from one configuration
//!
//! The session owns everything that changes while the keyboard is in use
//! (the active page, the preset cursor, the decoder snapshot) and runs the
//! apply cycle and the input polling loop.

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use image::DynamicImage;
use kontrol_transport::protocol::{bulk, REPORT_READ_SIZE};
use kontrol_transport::Transport;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::bitmap::{encode_bitmap, ScreenId};
use crate::decoder::{DecodedEvent, ReportDecoder};
use crate::display::{knob_value_position, render_knob_value, render_screens};
use crate::error::{EncodingError, SessionError};
use crate::frames::encode_apply_frames;
use crate::lights::ButtonLights;
use crate::model::{ConfigurationModel, MAX_PAGE};
use crate::presets::{load_backgrounds, load_preset, Direction, PresetLibrary};

/// Cursor of the opened preset within its library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PresetPosition {
    pub index: usize,
    pub count: usize,
}

impl PresetPosition {
    /// A preset before this one exists
    pub fn has_previous(&self) -> bool {
        self.count >= 2 && self.index > 0
    }

    /// A preset after this one exists
    pub fn has_next(&self) -> bool {
        self.count >= 2 && self.index + 1 < self.count
    }
}

/// Navigation state shared by the encoders, lights and renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionState {
    /// Active knob/button page (0-3)
    pub page: u8,
    pub preset: PresetPosition,
}

/// Outcome of one apply cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// HID configuration frames written
    pub frames_sent: usize,
    /// Screens whose bitmap push failed
    pub failed_screens: Vec<ScreenId>,
}

impl ApplyReport {
    pub fn is_complete(&self) -> bool {
        self.failed_screens.is_empty()
    }
}

pub struct Session<T: Transport> {
    transport: T,
    model: ConfigurationModel,
    state: SessionState,
    decoder: ReportDecoder,
    library: Option<PresetLibrary>,
    backgrounds: [Option<DynamicImage>; 2],
    bulk_interface: u8,
}

impl<T: Transport> Session<T> {
    /// Session on page 0 without a preset library
    pub fn new(transport: T, model: ConfigurationModel) -> Self {
        Self {
            transport,
            model,
            state: SessionState::default(),
            decoder: ReportDecoder::new(),
            library: None,
            backgrounds: [None, None],
            bulk_interface: bulk::DISPLAY_INTERFACE,
        }
    }

    /// Load the preset at `path`, its backgrounds and its sibling presets
    pub fn open_preset(transport: T, path: &Path) -> Result<Self, SessionError> {
        let model = load_preset(path)?;
        let backgrounds = load_backgrounds(&model, path)?;
        let library = PresetLibrary::open(path)?;
        Ok(Self::new(transport, model)
            .with_backgrounds(backgrounds)
            .with_library(library))
    }

    pub fn with_backgrounds(mut self, backgrounds: [Option<DynamicImage>; 2]) -> Self {
        self.backgrounds = backgrounds;
        self
    }

    pub fn with_library(mut self, library: PresetLibrary) -> Self {
        self.state.preset = library.position();
        self.library = Some(library);
        self
    }

    pub fn with_bulk_interface(mut self, interface: u8) -> Self {
        self.bulk_interface = interface;
        self
    }

    pub fn model(&self) -> &ConfigurationModel {
        &self.model
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn library(&self) -> Option<&PresetLibrary> {
        self.library.as_ref()
    }

    /// Send the full configuration for the active page, then both screens
    ///
    /// Every frame is encoded before the first byte goes out, so an
    /// encoding error leaves the keyboard untouched.
    pub fn apply(&mut self) -> Result<ApplyReport, SessionError> {
        let frames = encode_apply_frames(&self.model, self.state.page)?;
        let backgrounds = [self.backgrounds[0].as_ref(), self.backgrounds[1].as_ref()];
        let screens = render_screens(&self.model, &self.state, backgrounds);
        let bitmaps = ScreenId::BOTH
            .iter()
            .map(|&screen| {
                encode_bitmap(screen, &screens[screen.index()], 0, 0).map(|data| (screen, data))
            })
            .collect::<Result<Vec<_>, EncodingError>>()?;

        let mut report = ApplyReport::default();
        for frame in &frames {
            self.transport.send_report(frame)?;
            report.frames_sent += 1;
        }

        for (screen, data) in bitmaps {
            if let Err(e) = self.transport.send_bulk(&data, self.bulk_interface) {
                warn!("Failed to push {:?} screen: {}", screen, e);
                report.failed_screens.push(screen);
            }
        }

        info!(
            "Applied page {} ({} frames, {} screens)",
            self.state.page,
            report.frames_sent,
            ScreenId::BOTH.len() - report.failed_screens.len()
        );
        Ok(report)
    }

    /// Send the navigation button lights for the current state
    pub fn send_lights(&self) -> Result<(), SessionError> {
        let lights = ButtonLights::for_session(&self.state);
        self.transport.send_report(&lights)?;
        Ok(())
    }

    /// Switch page, relight the navigation buttons and re-apply
    pub fn set_page(&mut self, page: u8) -> Result<ApplyReport, SessionError> {
        if page > MAX_PAGE {
            return Err(EncodingError::InvalidPage(page).into());
        }
        self.state.page = page;
        self.send_lights()?;
        self.apply()
    }

    /// One non-blocking poll: read at most one report and act on it
    pub fn tick(&mut self) -> Result<Vec<DecodedEvent>, SessionError> {
        let Some(data) = self.transport.poll_report(REPORT_READ_SIZE)? else {
            return Ok(Vec::new());
        };

        let events = self.decoder.decode(&data, &self.model, self.state.page);
        for &event in &events {
            self.handle_event(event)?;
        }
        Ok(events)
    }

    fn handle_event(&mut self, event: DecodedEvent) -> Result<(), SessionError> {
        match event {
            DecodedEvent::ValueChanged { slot, value } => self.show_knob_value(slot, value)?,
            DecodedEvent::PageLeft => {
                self.set_page(self.state.page.saturating_sub(1))?;
            }
            DecodedEvent::PageRight => {
                self.set_page((self.state.page + 1).min(MAX_PAGE))?;
            }
            DecodedEvent::PresetUp => self.step_preset(Direction::Up)?,
            DecodedEvent::PresetDown => self.step_preset(Direction::Down)?,
            DecodedEvent::Play | DecodedEvent::Record | DecodedEvent::Stop => {
                info!("Transport button: {:?}", event);
            }
        }
        Ok(())
    }

    fn show_knob_value(&mut self, slot: usize, value: u8) -> Result<(), SessionError> {
        let tile = render_knob_value(value, &self.model.colors);
        let (screen, x, y) = knob_value_position(slot);
        let data = encode_bitmap(screen, &tile, x, y)?;
        debug!("Knob {} -> {}", slot, value);
        if let Err(e) = self.transport.send_bulk(&data, self.bulk_interface) {
            warn!("Failed to draw value of knob {}: {}", slot, e);
        }
        Ok(())
    }

    fn step_preset(&mut self, direction: Direction) -> Result<(), SessionError> {
        let Some(library) = self.library.as_mut() else {
            debug!("No preset library, ignoring {:?}", direction);
            return Ok(());
        };
        let Some(path) = library.step(direction).map(Path::to_path_buf) else {
            debug!("Already at the {:?} end of the preset list", direction);
            return Ok(());
        };

        let loaded = load_preset(&path).and_then(|model| {
            let backgrounds = load_backgrounds(&model, &path)?;
            Ok((model, backgrounds))
        });
        match loaded {
            Ok((model, backgrounds)) => {
                info!("Switched to preset {}", path.display());
                self.model = model;
                self.backgrounds = backgrounds;
                self.state.preset = library.position();
            }
            Err(e) => {
                warn!("Keeping current preset: {}", e);
                let back = match direction {
                    Direction::Up => Direction::Down,
                    Direction::Down => Direction::Up,
                };
                library.step(back);
                return Ok(());
            }
        }

        self.send_lights()?;
        self.apply()?;
        Ok(())
    }

    /// Poll every `period` until `shutdown` resolves
    ///
    /// Every decoded event is handled first, then passed to `on_event`.
    /// Transport and encoding errors end the loop.
    pub async fn run<F, E>(
        &mut self,
        period: Duration,
        shutdown: F,
        mut on_event: E,
    ) -> Result<(), SessionError>
    where
        F: Future<Output = ()>,
        E: FnMut(DecodedEvent),
    {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        info!("Polling every {:?}", period);
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Stopping");
                    return Ok(());
                }
                _ = ticker.tick() => {
                    for event in self.tick()? {
                        on_event(event);
                    }
                }
            }
        }
    }
}
