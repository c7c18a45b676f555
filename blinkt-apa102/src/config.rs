//! Fixed hardware parameters of the Blinkt strip.

/// Number of APA102 pixels on the strip.
pub const PIXEL_COUNT: usize = 8;

/// Bytes sent per pixel: brightness header, blue, green, red.
pub const BYTES_PER_PIXEL: usize = 4;

/// Clock pulses sent before the pixel data to prime the chain.
pub const LOCK_PULSES: usize = 36;

/// Clock pulses sent after the pixel data to latch the chain.
pub const UNLOCK_PULSES: usize = 32;

/// Numeric identifier of a physical output line (BCM GPIO number on a Pi).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineId(pub u8);

/// Which lines carry data and clock.
///
/// Chosen once at construction, there is no way to rewire a running driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineConfig {
    pub data: LineId,
    pub clock: LineId,
}

impl LineConfig {
    /// Pimoroni Blinkt wiring: data on 23, clock on 24.
    pub const BLINKT: Self = Self {
        data: LineId(23),
        clock: LineId(24),
    };
}
