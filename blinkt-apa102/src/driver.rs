//! The strip driver: pixel state plus the two lines, behind one lock.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal::digital::OutputPin;
use rgb::RGB8;
use smart_leds_trait::{SmartLedsWrite, SmartLedsWriteAsync};

use crate::config::{LineConfig, PIXEL_COUNT};
use crate::encoder::encode_frame;
use crate::error::Result;
use crate::line::{self, LineSource, Lines};
use crate::pixel::Pixel;
use crate::strip::{Action, PixelIndex, StripState, Target};

struct Inner<D, C> {
    lines: Lines<D, C>,
    strip: StripState,
}

impl<D, C> Inner<D, C>
where
    D: OutputPin,
    C: OutputPin,
{
    fn push_frame(&mut self) -> Result<()> {
        let frame = encode_frame(&self.strip);
        #[cfg(feature = "defmt")]
        defmt::trace!("push {}", frame);
        self.lines.write_frame(&frame)
    }
}

/// Driver for an 8 pixel APA102 strip on a data and a clock line.
///
/// Every operation takes `&self`, so one driver can be shared by several
/// tasks or threads. Edits and pushes run under the raw mutex `M`: two
/// pushes never interleave on the wire, a caller waits for the other to
/// finish its frame first. Use `CriticalSectionRawMutex` when sharing across
/// interrupt priorities or threads, `NoopRawMutex` otherwise.
///
/// Dropping the driver blanks the strip and releases both lines.
pub struct StripDriver<M, D, C>
where
    M: RawMutex,
    D: OutputPin,
    C: OutputPin,
{
    inner: Mutex<M, RefCell<Inner<D, C>>>,
}

impl<M, L> StripDriver<M, L, L>
where
    M: RawMutex,
    L: OutputPin,
{
    /// Claim the lines named in `config` from `source` and blank the strip.
    ///
    /// Fails with [`Error::LineUnavailable`](crate::Error::LineUnavailable)
    /// if either line cannot be claimed; there is no fallback.
    pub fn new<S>(source: &mut S, config: LineConfig) -> Result<Self>
    where
        S: LineSource<Line = L>,
    {
        let (data, clock) = line::acquire(source, config)?;
        Self::from_lines(data, clock)
    }
}

impl<M, D, C> StripDriver<M, D, C>
where
    M: RawMutex,
    D: OutputPin,
    C: OutputPin,
{
    /// Take ownership of two output lines and blank the strip.
    pub fn from_lines(data: D, clock: C) -> Result<Self> {
        let driver = Self {
            inner: Mutex::new(RefCell::new(Inner {
                lines: Lines::new(data, clock)?,
                strip: StripState::new(),
            })),
        };
        driver.update_all()?;

        #[cfg(feature = "defmt")]
        defmt::info!("blinkt strip ready, {} pixels", StripState::LEN);

        Ok(driver)
    }

    /// Apply a validated edit, then push if asked to.
    ///
    /// Edit and push happen under one lock, so other callers see either
    /// none or all of it.
    pub fn apply(&self, action: Action, push: bool, target: Target) -> Result<()> {
        self.inner.lock(|inner| {
            let mut inner = inner.borrow_mut();
            inner.strip.apply(action, target);
            if push { inner.push_frame() } else { Ok(()) }
        })
    }

    /// Full white at full brightness, pushed immediately.
    pub fn turn_on(&self, target: Target) -> Result<()> {
        self.apply(Action::TurnOn, true, target)
    }

    /// All channels and brightness zero, pushed immediately.
    pub fn turn_off(&self, target: Target) -> Result<()> {
        self.apply(Action::TurnOff, true, target)
    }

    /// Brightness in percent, `0..=100`.
    pub fn set_brightness(&self, percent: i32, push: bool, target: Target) -> Result<()> {
        self.apply(Action::brightness_percent(percent)?, push, target)
    }

    pub fn set_red(&self, value: i32, push: bool, target: Target) -> Result<()> {
        self.apply(Action::red(value)?, push, target)
    }

    pub fn set_green(&self, value: i32, push: bool, target: Target) -> Result<()> {
        self.apply(Action::green(value)?, push, target)
    }

    pub fn set_blue(&self, value: i32, push: bool, target: Target) -> Result<()> {
        self.apply(Action::blue(value)?, push, target)
    }

    /// All channels and brightness in one edit. Brightness is in percent,
    /// `0..=100`, unlike [`Pixel::set_rgb`] which takes a `0.0..=1.0` level.
    pub fn set_rgb(
        &self,
        red: i32,
        green: i32,
        blue: i32,
        percent: i32,
        push: bool,
        target: Target,
    ) -> Result<()> {
        self.apply(Action::rgb(red, green, blue, percent)?, push, target)
    }

    /// Color from `#rrggbb` / `0xrrggbb` / `rrggbb` plus brightness in
    /// percent, `0..=100`.
    pub fn set_hex(&self, hex: &str, percent: i32, push: bool, target: Target) -> Result<()> {
        self.apply(Action::hex(hex, percent)?, push, target)
    }

    /// Push the current state, whatever was pushed before.
    pub fn update_all(&self) -> Result<()> {
        self.inner.lock(|inner| inner.borrow_mut().push_frame())
    }

    /// Copy of one pixel as currently held in memory.
    pub fn pixel(&self, index: PixelIndex) -> Pixel {
        self.inner.lock(|inner| *inner.borrow().strip.pixel(index))
    }

    /// Copy of the whole strip as currently held in memory.
    pub fn snapshot(&self) -> StripState {
        self.inner.lock(|inner| inner.borrow().strip)
    }

    /// Write colors in strip order at full brightness and push once.
    ///
    /// Pixels past the end of `colors` keep their state, colors past the
    /// end of the strip are ignored. The iterator is drained before the
    /// lock is taken, so it may read the driver.
    pub fn write_colors<T, I>(&self, colors: T) -> Result<()>
    where
        T: IntoIterator<Item = I>,
        I: Into<RGB8>,
    {
        let mut staged: [Option<RGB8>; PIXEL_COUNT] = [None; PIXEL_COUNT];
        for (slot, color) in staged.iter_mut().zip(colors) {
            *slot = Some(color.into());
        }

        self.inner.lock(|inner| {
            let mut inner = inner.borrow_mut();
            for (index, color) in staged.into_iter().enumerate() {
                if let Some(color) = color {
                    inner.strip.pixel_mut(PixelIndex::new(index)?).set_color(color, 1.0);
                }
            }
            inner.push_frame()
        })
    }
}

impl<M, D, C> Drop for StripDriver<M, D, C>
where
    M: RawMutex,
    D: OutputPin,
    C: OutputPin,
{
    fn drop(&mut self) {
        #[cfg(feature = "defmt")]
        defmt::debug!("blinkt strip shutting down");

        if let Err(_err) = self.turn_off(Target::All) {
            #[cfg(feature = "defmt")]
            defmt::warn!("could not blank strip: {}", _err);
        }
    }
}

impl<M, D, C> SmartLedsWrite for StripDriver<M, D, C>
where
    M: RawMutex,
    D: OutputPin,
    C: OutputPin,
{
    type Error = crate::Error;
    type Color = RGB8;

    /// Write all the items of an iterator to the strip
    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        self.write_colors(iterator)
    }
}

impl<M, D, C> SmartLedsWrite for &StripDriver<M, D, C>
where
    M: RawMutex,
    D: OutputPin,
    C: OutputPin,
{
    type Error = crate::Error;
    type Color = RGB8;

    /// Write all the items of an iterator to a shared strip
    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        self.write_colors(iterator)
    }
}

impl<M, D, C> SmartLedsWriteAsync for &StripDriver<M, D, C>
where
    M: RawMutex,
    D: OutputPin,
    C: OutputPin,
{
    type Error = crate::Error;
    type Color = RGB8;

    /// Write all the items of an iterator to a shared strip. Completes
    /// without yielding, the push itself is blocking.
    async fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        self.write_colors(iterator)
    }
}
