use embedded_hal::digital::ErrorKind;

use crate::config::LineId;

/// Pixel field a value was rejected for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    Brightness,
    Red,
    Green,
    Blue,
}

impl Field {
    fn name(self) -> &'static str {
        match self {
            Field::Brightness => "brightness",
            Field::Red => "red",
            Field::Green => "green",
            Field::Blue => "blue",
        }
    }
}

/// Error during Blinkt driver operation.
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A channel or brightness value outside its domain. Nothing was changed.
    OutOfRange(Field),
    /// A hex color that is not six hex digits after its optional prefix.
    InvalidHex,
    /// A pixel index outside the strip.
    IndexOutOfBounds { index: usize },
    /// An output line could not be claimed at construction.
    LineUnavailable(LineId),
    /// Writing an output line failed mid-push.
    Line(ErrorKind),
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::OutOfRange(field) => write!(f, "{} out of range", field.name()),
            Error::InvalidHex => write!(f, "invalid hex color"),
            Error::IndexOutOfBounds { index } => write!(f, "pixel index {} out of bounds", index),
            Error::LineUnavailable(line) => write!(f, "line {} unavailable", line.0),
            Error::Line(kind) => write!(f, "line error: {:?}", kind),
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::OutOfRange(Field::Brightness) => {
                write!(f, "brightness must be between 0 and 1")
            }
            Error::OutOfRange(field) => {
                write!(f, "{} value must be between 0 and 255", field.name())
            }
            Error::InvalidHex => {
                write!(f, "hex color must have 6 digits like #rrggbb or 0xrrggbb")
            }
            Error::IndexOutOfBounds { index } => write!(
                f,
                "pixel index {} is outside 0..{}",
                index,
                crate::config::PIXEL_COUNT
            ),
            Error::LineUnavailable(line) => {
                write!(f, "output line {} could not be acquired", line.0)
            }
            Error::Line(kind) => write!(f, "output line write failed: {}", kind),
        }
    }
}

impl core::error::Error for Error {}

impl<E: embedded_hal::digital::Error> From<E> for Error {
    fn from(err: E) -> Self {
        Error::Line(err.kind())
    }
}
