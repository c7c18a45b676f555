//! In-memory state of the whole strip and the edits that can be applied to it.

use core::ops::Deref;

use rgb::RGB8;

use crate::config::PIXEL_COUNT;
use crate::error::{Error, Field, Result};
use crate::pixel::{self, Pixel};

/// A pixel position known to be inside the strip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PixelIndex(usize);

impl PixelIndex {
    pub fn new(index: usize) -> Result<Self> {
        if index < PIXEL_COUNT {
            Ok(Self(index))
        } else {
            Err(Error::IndexOutOfBounds { index })
        }
    }

    pub fn get(self) -> usize {
        self.0
    }
}

/// Pixels an operation applies to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Target {
    #[default]
    All,
    At(PixelIndex),
}

impl Target {
    /// Target a single pixel, failing for positions outside the strip.
    pub fn pixel(index: usize) -> Result<Self> {
        PixelIndex::new(index).map(Target::At)
    }
}

impl From<PixelIndex> for Target {
    fn from(index: PixelIndex) -> Self {
        Target::At(index)
    }
}

/// A validated edit. Applying one can no longer fail.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    TurnOn,
    TurnOff,
    Brightness(f32),
    Red(u8),
    Green(u8),
    Blue(u8),
    Color {
        red: u8,
        green: u8,
        blue: u8,
        brightness: f32,
    },
}

impl Action {
    /// Brightness given in percent, `0..=100`.
    pub fn brightness_percent(percent: i32) -> Result<Self> {
        Ok(Action::Brightness(percent_to_level(percent)?))
    }

    pub fn red(value: i32) -> Result<Self> {
        Ok(Action::Red(pixel::channel(value, Field::Red)?))
    }

    pub fn green(value: i32) -> Result<Self> {
        Ok(Action::Green(pixel::channel(value, Field::Green)?))
    }

    pub fn blue(value: i32) -> Result<Self> {
        Ok(Action::Blue(pixel::channel(value, Field::Blue)?))
    }

    pub fn rgb(red: i32, green: i32, blue: i32, percent: i32) -> Result<Self> {
        Ok(Action::color_of(&Pixel::new(
            red,
            green,
            blue,
            percent_to_level(percent)?,
        )?))
    }

    pub fn hex(hex: &str, percent: i32) -> Result<Self> {
        Ok(Action::color_of(&Pixel::from_hex(
            hex,
            percent_to_level(percent)?,
        )?))
    }

    fn color_of(pixel: &Pixel) -> Self {
        Action::Color {
            red: pixel.red(),
            green: pixel.green(),
            blue: pixel.blue(),
            brightness: pixel.brightness(),
        }
    }

    fn apply(self, pixel: &mut Pixel) {
        match self {
            Action::TurnOn => pixel.turn_on(),
            Action::TurnOff => pixel.turn_off(),
            Action::Brightness(level) => pixel.set_level(level),
            Action::Red(value) => pixel.set_red_unchecked(value),
            Action::Green(value) => pixel.set_green_unchecked(value),
            Action::Blue(value) => pixel.set_blue_unchecked(value),
            Action::Color {
                red,
                green,
                blue,
                brightness,
            } => pixel.set_color(RGB8::new(red, green, blue), brightness),
        }
    }
}

fn percent_to_level(percent: i32) -> Result<f32> {
    if (0..=100).contains(&percent) {
        Ok(percent as f32 / 100.0)
    } else {
        Err(Error::OutOfRange(Field::Brightness))
    }
}

/// The eight pixels of the strip, in wire order.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StripState([Pixel; PIXEL_COUNT]);

impl StripState {
    /// Number of pixels in every strip.
    pub const LEN: usize = PIXEL_COUNT;

    /// All pixels off.
    pub const fn new() -> Self {
        Self([Pixel::OFF; PIXEL_COUNT])
    }

    pub fn apply(&mut self, action: Action, target: Target) {
        match target {
            Target::All => self.0.iter_mut().for_each(|pixel| action.apply(pixel)),
            Target::At(index) => action.apply(&mut self.0[index.get()]),
        }
    }

    pub fn pixel(&self, index: PixelIndex) -> &Pixel {
        &self.0[index.get()]
    }

    pub fn pixel_mut(&mut self, index: PixelIndex) -> &mut Pixel {
        &mut self.0[index.get()]
    }
}

impl Deref for StripState {
    type Target = [Pixel; PIXEL_COUNT];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
