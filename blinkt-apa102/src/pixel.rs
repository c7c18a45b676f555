//! Color and brightness of a single APA102 pixel.

use rgb::RGB8;

use crate::error::{Error, Field, Result};

/// One LED: 8-bit red, green and blue plus a brightness in `0.0..=1.0`.
///
/// Fields are private so that every write goes through a validating setter.
/// A rejected write leaves the pixel exactly as it was.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pixel {
    brightness: f32,
    red: u8,
    green: u8,
    blue: u8,
}

impl Pixel {
    /// A pixel that is off.
    pub const OFF: Self = Self {
        brightness: 0.0,
        red: 0,
        green: 0,
        blue: 0,
    };

    /// Full white at full brightness.
    pub const WHITE: Self = Self {
        brightness: 1.0,
        red: u8::MAX,
        green: u8::MAX,
        blue: u8::MAX,
    };

    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    pub fn red(&self) -> u8 {
        self.red
    }

    pub fn green(&self) -> u8 {
        self.green
    }

    pub fn blue(&self) -> u8 {
        self.blue
    }

    /// Color without brightness.
    pub fn rgb(&self) -> RGB8 {
        RGB8::new(self.red, self.green, self.blue)
    }

    /// Brightness as a level in `0.0..=1.0`.
    pub fn set_brightness(&mut self, level: f32) -> Result<()> {
        self.brightness = brightness(level)?;
        Ok(())
    }

    pub fn set_red(&mut self, value: i32) -> Result<()> {
        self.red = channel(value, Field::Red)?;
        Ok(())
    }

    pub fn set_green(&mut self, value: i32) -> Result<()> {
        self.green = channel(value, Field::Green)?;
        Ok(())
    }

    pub fn set_blue(&mut self, value: i32) -> Result<()> {
        self.blue = channel(value, Field::Blue)?;
        Ok(())
    }

    /// Set all three channels and the brightness level (`0.0..=1.0`), or
    /// none of them.
    pub fn set_rgb(&mut self, red: i32, green: i32, blue: i32, level: f32) -> Result<()> {
        let updated = Self::new(red, green, blue, level)?;
        *self = updated;
        Ok(())
    }

    /// Set the color from `rrggbb`, `#rrggbb` or `0xrrggbb` (any case) and
    /// the brightness level (`0.0..=1.0`).
    pub fn set_from_hex(&mut self, hex: &str, level: f32) -> Result<()> {
        let color = parse_hex(hex)?;
        self.set_color(color, brightness(level)?);
        Ok(())
    }

    pub fn turn_on(&mut self) {
        *self = Self::WHITE;
    }

    pub fn turn_off(&mut self) {
        *self = Self::OFF;
    }

    /// Validated constructor, brightness as a level in `0.0..=1.0`.
    pub fn new(red: i32, green: i32, blue: i32, level: f32) -> Result<Self> {
        Ok(Self {
            brightness: brightness(level)?,
            red: channel(red, Field::Red)?,
            green: channel(green, Field::Green)?,
            blue: channel(blue, Field::Blue)?,
        })
    }

    /// Pixel from a hex color, see [`Pixel::set_from_hex`].
    pub fn from_hex(hex: &str, level: f32) -> Result<Self> {
        let mut pixel = Self::OFF;
        pixel.set_from_hex(hex, level)?;
        Ok(pixel)
    }

    // Inputs here are already validated.
    pub(crate) fn set_color(&mut self, color: RGB8, brightness: f32) {
        self.red = color.r;
        self.green = color.g;
        self.blue = color.b;
        self.brightness = brightness;
    }

    pub(crate) fn set_level(&mut self, brightness: f32) {
        self.brightness = brightness;
    }

    pub(crate) fn set_red_unchecked(&mut self, value: u8) {
        self.red = value;
    }

    pub(crate) fn set_green_unchecked(&mut self, value: u8) {
        self.green = value;
    }

    pub(crate) fn set_blue_unchecked(&mut self, value: u8) {
        self.blue = value;
    }
}

pub(crate) fn brightness(value: f32) -> Result<f32> {
    // NaN fails the range check too.
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(Error::OutOfRange(Field::Brightness))
    }
}

pub(crate) fn channel(value: i32, field: Field) -> Result<u8> {
    u8::try_from(value).map_err(|_| Error::OutOfRange(field))
}

pub(crate) fn parse_hex(hex: &str) -> Result<RGB8> {
    let digits = hex
        .strip_prefix('#')
        .or_else(|| hex.strip_prefix("0x"))
        .or_else(|| hex.strip_prefix("0X"))
        .unwrap_or(hex);

    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::InvalidHex);
    }

    let part = |at: usize| u8::from_str_radix(&digits[at..at + 2], 16).map_err(|_| Error::InvalidHex);
    Ok(RGB8::new(part(0)?, part(2)?, part(4)?))
}
