//! APA102 wire format.
//!
//! Each pixel is four bytes: `0b111` followed by a 5-bit brightness, then
//! blue, green and red. A frame is the pixels in strip order, framed by raw
//! clock pulses instead of the usual zero start frame and `0xFF` end frame.

use crate::config::{BYTES_PER_PIXEL, LOCK_PULSES, PIXEL_COUNT, UNLOCK_PULSES};
use crate::pixel::Pixel;
use crate::strip::StripState;

/// Fixed top bits of the brightness header byte.
const HEADER_MARKER: u8 = 0b1110_0000;
/// Brightness field mask in the header byte.
const BRIGHTNESS_MASK: u8 = 0b0001_1111;
/// Largest brightness the 5-bit field can hold.
const BRIGHTNESS_STEPS: f32 = 31.0;
/// Size of the pixel payload of a frame.
pub const PAYLOAD_LEN: usize = PIXEL_COUNT * BYTES_PER_PIXEL;

/// Brightness quantized to the 5-bit field, rounding down.
#[inline(always)]
fn brightness_bits(brightness: f32) -> u8 {
    // float to int casts truncate, which is floor for the 0..=1 range
    (BRIGHTNESS_STEPS * brightness) as u8 & BRIGHTNESS_MASK
}

/// Encode a single pixel as header, blue, green, red.
pub fn encode_pixel(pixel: &Pixel) -> [u8; BYTES_PER_PIXEL] {
    [
        HEADER_MARKER | brightness_bits(pixel.brightness()),
        pixel.blue(),
        pixel.green(),
        pixel.red(),
    ]
}

/// Encode the whole strip into one transmission.
pub fn encode_frame(strip: &StripState) -> Frame {
    let mut payload = [0u8; PAYLOAD_LEN];
    for (pixel, bytes) in strip.iter().zip(payload.chunks_mut(BYTES_PER_PIXEL)) {
        bytes.copy_from_slice(&encode_pixel(pixel));
    }
    Frame { payload }
}

/// One full transmission: lock pulses, pixel payload, unlock pulses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    payload: [u8; PAYLOAD_LEN],
}

impl Frame {
    /// Clock pulses with data held low that open the frame.
    pub const LOCK_PULSES: usize = LOCK_PULSES;
    /// Clock pulses that close the frame and latch the colors.
    pub const UNLOCK_PULSES: usize = UNLOCK_PULSES;

    pub fn payload(&self) -> &[u8; PAYLOAD_LEN] {
        &self.payload
    }

    /// Total clock pulses the frame takes on the wire.
    pub const fn clock_pulses() -> usize {
        LOCK_PULSES + PAYLOAD_LEN * 8 + UNLOCK_PULSES
    }
}
