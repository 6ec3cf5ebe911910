//! Bitmap frames for the two 480x272 displays
//!
//! A frame places one rectangle of RGB565 pixels on one screen:
//!
//! ```text
//! 84 00 <screen> 60 00 00 00 00 <x> <y> <w> <h> 02 00 00 00 00 00 <len>
//! <w*h big-endian RGB565 pixels, row-major>
//! 02 00 00 00 03 00 00 00 40 00 00 00
//! ```
//!
//! All geometry fields and `len` are big-endian u16; `len` counts pixel pairs.

use image::RgbImage;
use zerocopy::byteorder::big_endian::U16;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::error::EncodingError;
use crate::protocol::{bitmap, tag};

/// Target display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenId {
    Left,
    Right,
}

impl ScreenId {
    pub const BOTH: [ScreenId; 2] = [ScreenId::Left, ScreenId::Right];

    pub const fn byte(self) -> u8 {
        match self {
            ScreenId::Left => 0,
            ScreenId::Right => 1,
        }
    }

    /// Array index of this screen (left 0, right 1)
    pub const fn index(self) -> usize {
        self.byte() as usize
    }
}

#[derive(Debug, Clone, Copy, IntoBytes, FromBytes, KnownLayout, Immutable)]
#[repr(C)]
struct BitmapHeader {
    tag: u8,
    _pad0: u8,
    screen: u8,
    marker: [u8; 5],
    x: U16,
    y: U16,
    width: U16,
    height: U16,
    geometry_suffix: [u8; 6],
    pixel_pairs: U16,
}

/// Pack 8-bit RGB into RGB565
pub fn rgb565(r: u8, g: u8, b: u8) -> u16 {
    ((r as u16 >> 3) << 11) | ((g as u16 >> 2) << 5) | (b as u16 >> 3)
}

/// Encode `image` as one bitmap frame placed at (`x`, `y`) on `screen`
pub fn encode_bitmap(
    screen: ScreenId,
    image: &RgbImage,
    x: u16,
    y: u16,
) -> Result<Vec<u8>, EncodingError> {
    let (width, height) = image.dimensions();
    let too_large = || EncodingError::ImageTooLarge { width, height };

    let w = u16::try_from(width).map_err(|_| too_large())?;
    let h = u16::try_from(height).map_err(|_| too_large())?;
    let pixel_pairs = u16::try_from(width as u64 * height as u64 / 2).map_err(|_| too_large())?;

    let header = BitmapHeader {
        tag: tag::BITMAP,
        _pad0: 0,
        screen: screen.byte(),
        marker: bitmap::HEADER_MARKER,
        x: U16::new(x),
        y: U16::new(y),
        width: U16::new(w),
        height: U16::new(h),
        geometry_suffix: bitmap::GEOMETRY_SUFFIX,
        pixel_pairs: U16::new(pixel_pairs),
    };

    let pixel_count = width as usize * height as usize;
    let mut frame =
        Vec::with_capacity(bitmap::HEADER_LEN + 2 * pixel_count + bitmap::TRAILER.len());
    frame.extend_from_slice(header.as_bytes());
    for pixel in image.pixels() {
        let [r, g, b] = pixel.0;
        frame.extend_from_slice(&rgb565(r, g, b).to_be_bytes());
    }
    frame.extend_from_slice(&bitmap::TRAILER);
    Ok(frame)
}
