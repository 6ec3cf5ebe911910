//! Screen rendering
//!
//! Both displays show the assignments of the current page: button labels
//! across the top, knob labels along the bottom, and on one chosen screen
//! a summary of the sliders plus the page number. A background image can
//! fill the middle band. Text is drawn with `embedded-graphics` mono fonts
//! straight into an `image::RgbImage`.

use std::convert::Infallible;

use embedded_graphics::{
    mono_font::{
        ascii::{FONT_10X20, FONT_6X10, FONT_7X13, FONT_8X13_BOLD, FONT_9X15_BOLD},
        MonoFont, MonoTextStyle,
    },
    pixelcolor::Rgb888,
    prelude::*,
    primitives::{Line, PrimitiveStyle, Rectangle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage};

use crate::bitmap::ScreenId;
use crate::model::{
    ButtonMode, ButtonSlot, ColorSet, ConfigurationModel, KnobMode, KnobSlot, Rgb, SliderInfoScreen,
    SliderMode, SliderSlot, PAGE_COUNT, SLOTS_PER_PAGE,
};
use crate::protocol::bitmap::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::session::SessionState;

/// Background band
const BACKGROUND_Y: i64 = 65;
const BACKGROUND_HEIGHT: u32 = 140;

/// Left edge of each of the four columns on a screen
const COLUMN_X: [i32; 4] = [10, 130, 250, 370];
const COLUMN_WIDTH: u32 = 100;

const BUTTON_BOX_Y: i32 = 10;
const BUTTON_LABEL_HEIGHT: u32 = 27;
const BUTTON_DESCRIPTION_Y: i32 = 32;
const BUTTON_DESCRIPTION_HEIGHT: u32 = 13;
const DIVIDER_BOX_HEIGHT: u32 = 36;

const KNOB_LABEL_Y: i32 = 245;
const KNOB_DESCRIPTION_Y: i32 = 263;
const KNOB_AREA_TOP: i32 = 225;
const KNOB_DIVIDER_X: [i32; 3] = [120, 240, 360];

const SLIDER_TEXT_X: i32 = 30;
const SLIDER_TEXT_Y: [i32; 3] = [110, 140, 170];
const PAGE_TEXT_POS: (i32, i32) = (370, 140);

/// Knob value tile
pub const KNOB_VALUE_WIDTH: u32 = 32;
pub const KNOB_VALUE_HEIGHT: u32 = 18;
/// Tile offset inside a column: right-aligned against the next divider
const KNOB_VALUE_X_OFFSET: u16 = 84;
const KNOB_VALUE_Y: u16 = 228;

/// `DrawTarget` over an RGB image buffer; out-of-bounds pixels are clipped
struct Canvas<'a>(&'a mut RgbImage);

impl OriginDimensions for Canvas<'_> {
    fn size(&self) -> Size {
        Size::new(self.0.width(), self.0.height())
    }
}

impl DrawTarget for Canvas<'_> {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let (width, height) = self.0.dimensions();
        for Pixel(point, color) in pixels {
            if let (Ok(x), Ok(y)) = (u32::try_from(point.x), u32::try_from(point.y)) {
                if x < width && y < height {
                    self.0
                        .put_pixel(x, y, image::Rgb([color.r(), color.g(), color.b()]));
                }
            }
        }
        Ok(())
    }
}

/// Draw anything onto a canvas that cannot fail
fn draw<D>(canvas: &mut Canvas<'_>, item: &D)
where
    D: Drawable<Color = Rgb888>,
{
    if let Err(never) = item.draw(canvas) {
        match never {}
    }
}

fn rgb888(color: Rgb) -> Rgb888 {
    Rgb888::new(color.0, color.1, color.2)
}

fn text_at(
    canvas: &mut Canvas<'_>,
    text: &str,
    position: Point,
    font: &MonoFont<'_>,
    color: Rgb,
    alignment: Alignment,
    baseline: Baseline,
) {
    let style = MonoTextStyle::new(font, rgb888(color));
    let text_style = TextStyleBuilder::new()
        .alignment(alignment)
        .baseline(baseline)
        .build();
    draw(canvas, &Text::with_text_style(text, position, style, text_style));
}

/// Text centred inside a box
fn text_in_box(
    canvas: &mut Canvas<'_>,
    text: &str,
    top_left: Point,
    size: Size,
    font: &MonoFont<'_>,
    color: Rgb,
) {
    let center = top_left + Point::new(size.width as i32 / 2, size.height as i32 / 2);
    text_at(canvas, text, center, font, color, Alignment::Center, Baseline::Middle);
}

/// Text starting at a point on its baseline
fn text_left(canvas: &mut Canvas<'_>, text: &str, position: Point, font: &MonoFont<'_>, color: Rgb) {
    text_at(canvas, text, position, font, color, Alignment::Left, Baseline::Alphabetic);
}

/// Label shown in a button box
pub fn button_label(button: &ButtonSlot) -> String {
    match button.mode {
        ButtonMode::Off => "OFF".to_string(),
        ButtonMode::ProgramChange => format!("PRG {}", button.cc),
        _ => format!("CC {}", button.cc),
    }
}

/// Label shown above a knob
pub fn knob_label(knob: &KnobSlot) -> String {
    match knob.mode {
        KnobMode::Off => "OFF".to_string(),
        KnobMode::Preset => "PRESET".to_string(),
        KnobMode::ControlChange => format!("CC {}", knob.cc),
    }
}

/// One line of the slider summary, e.g. `mod wheel sends CC 1`
pub fn slider_summary(name: &str, slot: &SliderSlot) -> String {
    match slot.mode {
        SliderMode::Off => format!("{} is off", name),
        SliderMode::ControlChange => format!("{} sends CC {}", name, slot.cc),
        SliderMode::PitchBend => format!("{} sends pitch", name),
    }
}

fn draw_background(img: &mut RgbImage, background: &DynamicImage) {
    let scaled = background
        .resize_exact(SCREEN_WIDTH, BACKGROUND_HEIGHT, FilterType::Triangle)
        .to_rgb8();
    imageops::overlay(img, &scaled, 0, BACKGROUND_Y);
}

fn draw_slider_info(canvas: &mut Canvas<'_>, model: &ConfigurationModel, page: u8) {
    let color = model.colors.slider;
    for ((name, slot), y) in model.sliders.named().into_iter().zip(SLIDER_TEXT_Y) {
        text_left(
            canvas,
            &slider_summary(name, slot),
            Point::new(SLIDER_TEXT_X, y),
            &FONT_10X20,
            color,
        );
    }
    text_left(
        canvas,
        &format!("page {}/{}", page + 1, PAGE_COUNT),
        Point::new(PAGE_TEXT_POS.0, PAGE_TEXT_POS.1),
        &FONT_10X20,
        color,
    );
}

fn draw_column(
    canvas: &mut Canvas<'_>,
    column: usize,
    button: &ButtonSlot,
    knob: &KnobSlot,
    colors: &ColorSet,
) {
    let x = COLUMN_X[column];

    text_in_box(
        canvas,
        &button_label(button),
        Point::new(x, BUTTON_BOX_Y),
        Size::new(COLUMN_WIDTH, BUTTON_LABEL_HEIGHT),
        &FONT_8X13_BOLD,
        colors.cc,
    );
    text_left(
        canvas,
        &knob_label(knob),
        Point::new(x, KNOB_LABEL_Y),
        &FONT_7X13,
        colors.cc,
    );

    if knob.mode == KnobMode::ControlChange {
        text_left(
            canvas,
            &knob.label,
            Point::new(x, KNOB_DESCRIPTION_Y),
            &FONT_6X10,
            colors.parameter,
        );
    }
    if button.mode != ButtonMode::Off {
        text_in_box(
            canvas,
            &button.label,
            Point::new(x, BUTTON_DESCRIPTION_Y),
            Size::new(COLUMN_WIDTH, BUTTON_DESCRIPTION_HEIGHT),
            &FONT_6X10,
            colors.parameter,
        );
    }

    draw(
        canvas,
        &Rectangle::new(
            Point::new(x, BUTTON_BOX_Y),
            Size::new(COLUMN_WIDTH, DIVIDER_BOX_HEIGHT),
        )
        .into_styled(PrimitiveStyle::with_stroke(rgb888(colors.divider), 1)),
    );
}

fn draw_knob_dividers(canvas: &mut Canvas<'_>, color: Rgb) {
    let style = PrimitiveStyle::with_stroke(rgb888(color), 1);
    for x in KNOB_DIVIDER_X {
        draw(
            canvas,
            &Line::new(
                Point::new(x, KNOB_AREA_TOP),
                Point::new(x, SCREEN_HEIGHT as i32),
            )
            .into_styled(style),
        );
    }
}

/// Render both screens for the current page
///
/// `backgrounds` are the optional left/right background images.
pub fn render_screens(
    model: &ConfigurationModel,
    state: &SessionState,
    backgrounds: [Option<&DynamicImage>; 2],
) -> [RgbImage; 2] {
    let page_start = state.page as usize * SLOTS_PER_PAGE;
    let info_screen = match model.display.slider_info {
        SliderInfoScreen::None => None,
        SliderInfoScreen::Left => Some(ScreenId::Left),
        SliderInfoScreen::Right => Some(ScreenId::Right),
    };

    ScreenId::BOTH.map(|screen| {
        let mut img = RgbImage::new(SCREEN_WIDTH, SCREEN_HEIGHT);
        if let Some(background) = backgrounds[screen.index()] {
            draw_background(&mut img, background);
        }

        let mut canvas = Canvas(&mut img);
        if info_screen == Some(screen) {
            draw_slider_info(&mut canvas, model, state.page);
        }

        // Slots 0-3 of the page are on the left screen, 4-7 on the right
        for column in 0..COLUMN_X.len() {
            let slot = page_start + screen.index() * COLUMN_X.len() + column;
            if let (Some(button), Some(knob)) = (model.buttons.get(slot), model.knobs.get(slot)) {
                draw_column(&mut canvas, column, button, knob, &model.colors);
            }
        }
        draw_knob_dividers(&mut canvas, model.colors.divider);
        img
    })
}

/// Small black tile showing a knob's current value, right-aligned
pub fn render_knob_value(value: u8, colors: &ColorSet) -> RgbImage {
    let mut img = RgbImage::new(KNOB_VALUE_WIDTH, KNOB_VALUE_HEIGHT);
    let mut canvas = Canvas(&mut img);
    text_at(
        &mut canvas,
        &value.to_string(),
        Point::new(KNOB_VALUE_WIDTH as i32 - 2, KNOB_VALUE_HEIGHT as i32 / 2),
        &FONT_9X15_BOLD,
        colors.value,
        Alignment::Right,
        Baseline::Middle,
    );
    img
}

/// Screen and top-left corner of the value tile for knob position `slot` (0-7)
pub fn knob_value_position(slot: usize) -> (ScreenId, u16, u16) {
    let screen = if slot % SLOTS_PER_PAGE < 4 {
        ScreenId::Left
    } else {
        ScreenId::Right
    };
    let column = (slot % 4) as u16;
    (screen, column * 120 + KNOB_VALUE_X_OFFSET, KNOB_VALUE_Y)
}
