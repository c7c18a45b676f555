//! The two output lines and the bit-banged serial link over them.
//!
//! Any [`OutputPin`] works as a line: a GPIO from a HAL, a pin expander
//! output, or a recording double in tests.

use embedded_hal::digital::OutputPin;

use crate::config::{LineConfig, LineId};
use crate::encoder::Frame;
use crate::error::{Error, Result};

/// Hands out output lines by their numeric ID.
///
/// Implemented by whatever owns the GPIOs of the board. Returning `None`
/// means the line does not exist or is already owned elsewhere.
pub trait LineSource {
    type Line: OutputPin;

    /// Claim `id` and configure it as an output.
    fn acquire_output(&mut self, id: LineId) -> Option<Self::Line>;
}

/// Claim both lines of `config`. The data line is released again if the
/// clock line cannot be claimed.
pub(crate) fn acquire<S: LineSource>(
    source: &mut S,
    config: LineConfig,
) -> Result<(S::Line, S::Line)> {
    let data = source
        .acquire_output(config.data)
        .ok_or(Error::LineUnavailable(config.data))?;
    let clock = source
        .acquire_output(config.clock)
        .ok_or(Error::LineUnavailable(config.clock))?;
    Ok((data, clock))
}

/// Data and clock line of the strip.
pub(crate) struct Lines<D, C> {
    data: D,
    clock: C,
}

impl<D, C> Lines<D, C>
where
    D: OutputPin,
    C: OutputPin,
{
    pub(crate) fn new(mut data: D, mut clock: C) -> Result<Self> {
        data.set_low()?;
        clock.set_low()?;
        Ok(Self { data, clock })
    }

    /// Send a frame: lock pulses, payload MSB first, unlock pulses.
    pub(crate) fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        self.clock_pulses(Frame::LOCK_PULSES)?;
        for byte in frame.payload() {
            self.write_byte(*byte)?;
        }
        self.clock_pulses(Frame::UNLOCK_PULSES)
    }

    /// Toggle the clock with data held low.
    fn clock_pulses(&mut self, count: usize) -> Result<()> {
        self.data.set_low()?;
        for _ in 0..count {
            self.clock.set_high()?;
            self.clock.set_low()?;
        }
        Ok(())
    }

    /// Shift out one byte, sampled by the chip on the rising clock edge.
    fn write_byte(&mut self, mut data: u8) -> Result<()> {
        for _ in 0..8 {
            if (data & 0x80) != 0 {
                self.data.set_high()?;
            } else {
                self.data.set_low()?;
            }
            self.clock.set_high()?;
            data <<= 1;
            self.clock.set_low()?;
        }
        Ok(())
    }
}

