// Komplete Kontrol MK2 configurator - Shared Library
// Frame encoders, display rendering, input decoding and the runtime session

pub mod bitmap;
pub mod decoder;
pub mod display;
pub mod error;
pub mod frames;
pub mod lights;
pub mod model;
pub mod presets;
pub mod protocol;
pub mod session;
pub mod settings;

pub use bitmap::{encode_bitmap, rgb565, ScreenId};
pub use decoder::{DecodedEvent, ReportDecoder};
pub use error::{DecodeError, EncodingError, PresetError, SessionError};
pub use frames::{
    decode_key_zones, encode_apply_frames, encode_key_zones, encode_knobs_and_buttons,
    encode_pedal_parameters, encode_pedal_port, encode_sliders,
};
pub use lights::ButtonLights;
pub use model::ConfigurationModel;
pub use presets::{load_preset, save_preset, Direction, PresetLibrary};
pub use session::{ApplyReport, PresetPosition, Session, SessionState};
pub use settings::Settings;
