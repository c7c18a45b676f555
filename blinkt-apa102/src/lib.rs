//! Drive the 8 APA102 pixels of a Pimoroni Blinkt over two plain output pins.
//!
//! There is no SPI peripheral involved: the data and clock lines are any two
//! `embedded-hal` [`OutputPin`](embedded_hal::digital::OutputPin)s and every
//! bit is clocked out by hand. A frame is 36 clock pulses to lock the chain,
//! 4 bytes per pixel (brightness header, blue, green, red), then 32 clock
//! pulses to latch it.
//!
//! Edits only change the in-memory strip. Nothing reaches the LEDs until a
//! push: either an edit made with `push = true`, [`StripDriver::turn_on`] /
//! [`StripDriver::turn_off`], or [`StripDriver::update_all`].
//!
//! This crate also implements the `SmartLedsWrite` trait so it works with
//! the `smart-leds` helpers.

#![cfg_attr(not(test), no_std)]

mod config;
mod driver;
mod encoder;
mod error;
mod line;
mod pixel;
mod strip;

pub use config::{BYTES_PER_PIXEL, LOCK_PULSES, LineConfig, LineId, PIXEL_COUNT, UNLOCK_PULSES};
pub use driver::StripDriver;
pub use encoder::{Frame, PAYLOAD_LEN, encode_frame, encode_pixel};
pub use error::{Error, Field, Result};
pub use line::LineSource;
pub use pixel::Pixel;
pub use strip::{Action, PixelIndex, StripState, Target};

pub use rgb::RGB8;
