//! Integration tests for the runtime session.
//!
//! A recording transport stands in for the keyboard, so these exercise the
//! full path from preset document through encoders, renderer and decoder
//! to the bytes that would go over HID and USB bulk.

mod common;

use common::{knob_report, nav_report, RecordingTransport};
use kontrol_driver::model::{KnobMode, SliderInfoScreen, ZoneColor};
use kontrol_driver::{save_preset, ConfigurationModel, DecodedEvent, PresetPosition, Session};

const SCREEN_FRAME_LEN: usize = 24 + 2 * 480 * 272 + 12;

fn tags(frames: &[Vec<u8>]) -> Vec<u8> {
    frames.iter().map(|f| f[0]).collect()
}

fn be16(frame: &[u8], offset: usize) -> u16 {
    u16::from_be_bytes([frame[offset], frame[offset + 1]])
}

// ── Apply cycle ──

#[test]
fn apply_sends_frames_in_order_then_both_screens() {
    let mut session = Session::new(RecordingTransport::new(), ConfigurationModel::default());
    let report = session.apply().unwrap();
    assert_eq!(report.frames_sent, 6);
    assert!(report.is_complete());

    let reports = session.transport().take_reports();
    assert_eq!(tags(&reports), vec![0xA4, 0xA1, 0xA2, 0xF4, 0xF4, 0xA3]);
    let lengths: Vec<usize> = reports.iter().map(Vec::len).collect();
    assert_eq!(lengths, vec![129, 204, 45, 33, 33, 73]);

    // Pedal port 1 first, then port 2
    assert_eq!(&reports[3][..4], &[0xF4, 0x22, 0x01, 0x03]);
    assert_eq!(&reports[4][..4], &[0xF4, 0x22, 0x00, 0x03]);

    let bulk = session.transport().take_bulk();
    assert_eq!(bulk.len(), 2);
    for (i, (interface, frame)) in bulk.iter().enumerate() {
        assert_eq!(*interface, 3);
        assert_eq!(frame.len(), SCREEN_FRAME_LEN);
        assert_eq!(frame[0], 0x84);
        assert_eq!(frame[2], i as u8);
        assert_eq!(be16(frame, 12), 480);
        assert_eq!(be16(frame, 14), 272);
    }
}

#[test]
fn apply_is_repeatable() {
    let mut model = ConfigurationModel::default();
    model.knobs[2].mode = KnobMode::ControlChange;
    model.knobs[2].label = "Drive".into();
    let mut session = Session::new(RecordingTransport::new(), model);

    session.apply().unwrap();
    let first = (session.transport().take_reports(), session.transport().take_bulk());
    session.apply().unwrap();
    let second = (session.transport().take_reports(), session.transport().take_bulk());
    assert_eq!(first, second);
}

#[test]
fn bulk_interface_is_configurable() {
    let mut session = Session::new(RecordingTransport::new(), ConfigurationModel::default())
        .with_bulk_interface(2);
    session.apply().unwrap();
    assert!(session
        .transport()
        .take_bulk()
        .iter()
        .all(|(interface, _)| *interface == 2));
}

// ── Knob feedback ──

#[test]
fn fifth_knob_end_to_end() {
    let mut model = ConfigurationModel::default();
    model.knobs[4].mode = KnobMode::ControlChange;
    model.knobs[4].channel = 1;
    model.knobs[4].cc = 20;
    let mut session = Session::new(RecordingTransport::new(), model);

    session.apply().unwrap();
    let reports = session.transport().take_reports();
    let knobs = &reports[1];
    assert_eq!(knobs[145], 0x03);
    assert_eq!(knobs[146], 0x14);
    assert_eq!(knobs[147], 0x00);
    session.transport().take_bulk();

    session.transport().push_input(knob_report(&[(4, 64)]));
    let events = session.tick().unwrap();
    assert_eq!(events, vec![DecodedEvent::ValueChanged { slot: 4, value: 64 }]);

    // Only the value tile is redrawn, on the right screen under the first column
    assert!(session.transport().take_reports().is_empty());
    let bulk = session.transport().take_bulk();
    assert_eq!(bulk.len(), 1);
    let tile = &bulk[0].1;
    assert_eq!(tile[2], 1);
    assert_eq!(be16(tile, 8), 84);
    assert_eq!(be16(tile, 10), 228);
    assert_eq!(be16(tile, 12), 32);
    assert_eq!(be16(tile, 14), 18);
    assert_eq!(tile.len(), 24 + 2 * 32 * 18 + 12);

    // Same report again: no movement
    session.transport().push_input(knob_report(&[(4, 64)]));
    assert!(session.tick().unwrap().is_empty());
    assert!(session.transport().take_bulk().is_empty());
}

#[test]
fn knob_on_later_page_maps_to_absolute_slot() {
    let mut model = ConfigurationModel::default();
    model.knobs[17].mode = KnobMode::ControlChange;
    let mut session = Session::new(RecordingTransport::new(), model);
    session.set_page(2).unwrap();
    session.transport().take_reports();
    session.transport().take_bulk();

    session.transport().push_input(knob_report(&[(1, 5), (3, 9)]));
    let events = session.tick().unwrap();
    assert_eq!(events, vec![DecodedEvent::ValueChanged { slot: 17, value: 5 }]);

    let bulk = session.transport().take_bulk();
    assert_eq!(bulk.len(), 1);
    assert_eq!(bulk[0].1[2], 0);
    assert_eq!(be16(&bulk[0].1, 8), 120 + 84);
}

// ── Page navigation ──

#[test]
fn page_right_relights_then_reapplies() {
    let mut model = ConfigurationModel::default();
    model.knobs[8].mode = KnobMode::ControlChange;
    model.knobs[8].cc = 42;
    let mut session = Session::new(RecordingTransport::new(), model);

    session.transport().push_input(nav_report(common::PAGE_RIGHT));
    assert_eq!(session.tick().unwrap(), vec![DecodedEvent::PageRight]);
    assert_eq!(session.state().page, 1);

    let reports = session.transport().take_reports();
    assert_eq!(tags(&reports), vec![0x80, 0xA4, 0xA1, 0xA2, 0xF4, 0xF4, 0xA3]);
    let lights = &reports[0];
    assert_eq!(lights.len(), 105);
    assert_eq!(lights[33], 0xFF, "page left lit on page 1");
    assert_eq!(lights[34], 0xFF, "page right lit on page 1");

    // Knob 0 of the frame is now slot 8
    assert_eq!(reports[2][97], 0x03);
    assert_eq!(reports[2][98], 42);
    assert_eq!(session.transport().take_bulk().len(), 2);
}

#[test]
fn held_page_button_moves_one_page() {
    let mut session = Session::new(RecordingTransport::new(), ConfigurationModel::default());
    session.transport().push_input(nav_report(common::PAGE_RIGHT));
    // Stop pressed while page-right is still down, then the same report repeated
    session.transport().push_input(nav_report(common::PAGE_RIGHT | 0x01));
    session.transport().push_input(nav_report(common::PAGE_RIGHT));

    assert_eq!(session.tick().unwrap(), vec![DecodedEvent::PageRight]);
    assert_eq!(session.tick().unwrap(), vec![DecodedEvent::Stop]);
    assert!(session.tick().unwrap().is_empty());
    assert_eq!(session.state().page, 1);

    // Release, then press again
    session.transport().take_reports();
    session.transport().push_input(nav_report(0));
    session.transport().push_input(nav_report(common::PAGE_RIGHT));
    assert!(session.tick().unwrap().is_empty());
    assert_eq!(session.tick().unwrap(), vec![DecodedEvent::PageRight]);
    assert_eq!(session.state().page, 2);
    assert_eq!(tags(&session.transport().take_reports())[0], 0x80);
}

#[test]
fn page_edges_send_nothing() {
    let mut session = Session::new(RecordingTransport::new(), ConfigurationModel::default());
    session.transport().push_input(nav_report(common::PAGE_LEFT));
    assert!(session.tick().unwrap().is_empty());

    session.set_page(3).unwrap();
    let lights = &session.transport().take_reports()[0];
    assert_eq!(lights[33], 0xFF);
    assert_eq!(lights[34], 0x00);
    session.transport().take_bulk();

    session.transport().push_input(nav_report(common::PAGE_RIGHT));
    assert!(session.tick().unwrap().is_empty());
    assert!(session.transport().take_reports().is_empty());
    assert!(session.transport().take_bulk().is_empty());
    assert_eq!(session.state().page, 3);
}

// ── Preset navigation ──

#[test]
fn preset_buttons_walk_the_directory() {
    let dir = tempfile::tempdir().unwrap();
    let mut first = ConfigurationModel::default();
    first.key_zones[0].color = ZoneColor::Red;
    let mut second = ConfigurationModel::default();
    second.key_zones[0].color = ZoneColor::Green;
    second.display.slider_info = SliderInfoScreen::Right;
    save_preset(&dir.path().join("01-piano.toml"), &first).unwrap();
    save_preset(&dir.path().join("02-synth.toml"), &second).unwrap();

    let mut session =
        Session::open_preset(RecordingTransport::new(), &dir.path().join("02-synth.toml")).unwrap();
    assert_eq!(session.state().preset, PresetPosition { index: 1, count: 2 });
    assert_eq!(session.model(), &second);

    // Already last: preset down does nothing
    session.transport().push_input(nav_report(common::PRESET_DOWN));
    assert_eq!(session.tick().unwrap(), vec![DecodedEvent::PresetDown]);
    assert!(session.transport().take_reports().is_empty());

    session.transport().push_input(nav_report(common::PRESET_UP));
    assert_eq!(session.tick().unwrap(), vec![DecodedEvent::PresetUp]);
    assert_eq!(session.model(), &first);
    assert_eq!(session.state().preset, PresetPosition { index: 0, count: 2 });

    let reports = session.transport().take_reports();
    assert_eq!(tags(&reports), vec![0x80, 0xA4, 0xA1, 0xA2, 0xF4, 0xF4, 0xA3]);
    assert_eq!(reports[0][23], 0x00, "no preset above the first");
    assert_eq!(reports[0][28], 0xFF, "a preset below the first");
    assert_eq!(session.transport().take_bulk().len(), 2);
}

#[test]
fn broken_preset_keeps_current_one() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.toml"), "key_zones = 1").unwrap();
    let good = ConfigurationModel::default();
    save_preset(&dir.path().join("b.toml"), &good).unwrap();

    let mut session =
        Session::open_preset(RecordingTransport::new(), &dir.path().join("b.toml")).unwrap();
    session.transport().push_input(nav_report(common::PRESET_UP));
    session.tick().unwrap();

    assert_eq!(session.model(), &good);
    assert_eq!(session.state().preset.index, 1);
    assert_eq!(session.library().unwrap().position().index, 1);
    assert!(session.transport().take_reports().is_empty());
}

// ── Transport buttons ──

#[test]
fn transport_buttons_are_reported_only() {
    let mut session = Session::new(RecordingTransport::new(), ConfigurationModel::default());
    let mut report = nav_report(0x03);
    report[2] = 0x10;
    session.transport().push_input(report);
    assert_eq!(
        session.tick().unwrap(),
        vec![DecodedEvent::Play, DecodedEvent::Record, DecodedEvent::Stop]
    );
    assert!(session.transport().take_reports().is_empty());
    assert!(session.transport().take_bulk().is_empty());
}

#[test]
fn unrecognized_reports_are_ignored() {
    let mut session = Session::new(RecordingTransport::new(), ConfigurationModel::default());
    session.transport().push_input(vec![0x02; 64]);
    session.transport().push_input(vec![0xAA; 10]);
    assert!(session.tick().unwrap().is_empty());
    assert!(session.tick().unwrap().is_empty());
}
