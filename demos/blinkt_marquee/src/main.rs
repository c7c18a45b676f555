#![no_std]
#![no_main]

//! A white dot walks along the strip while a second task commits a new
//! color to every pixel now and then. Both share one driver.

use blinkt_apa102::{
    LineConfig, LineId, LineSource, PIXEL_COUNT, Pixel, PixelIndex, Result, StripDriver, Target,
};
use defmt::unwrap;
use embassy_executor::Spawner;
use embassy_futures::join::join;
use embassy_nrf::Peri;
use embassy_nrf::gpio::{AnyPin, Level, Output, OutputDrive};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::{Duration, Ticker, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

type Blinkt = StripDriver<CriticalSectionRawMutex, Output<'static>, Output<'static>>;

static BLINKT: StaticCell<Blinkt> = StaticCell::new();

/// Time the dot stays on each pixel.
const MARQUEE_STEP: Duration = Duration::from_millis(500);
/// Pause between two marquee runs.
const MARQUEE_PAUSE: Duration = Duration::from_secs(2);
/// Time between color commits.
const COLOR_PERIOD: Duration = Duration::from_secs(7);
/// Brightness of committed colors, in percent.
const COLOR_BRIGHTNESS: i32 = 30;

const PALETTE: [&str; 4] = ["#ff0000", "#00ff00", "0x0000ff", "ff8000"];

/// GPIOs that can be claimed by their number.
struct Board {
    pins: [(LineId, Option<Peri<'static, AnyPin>>); 2],
}

impl LineSource for Board {
    type Line = Output<'static>;

    fn acquire_output(&mut self, id: LineId) -> Option<Output<'static>> {
        let (_, pin) = self.pins.iter_mut().find(|(line, _)| *line == id)?;
        let pin = pin.take()?;
        Some(Output::new(pin, Level::Low, OutputDrive::Standard))
    }
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());

    let mut board = Board {
        pins: [
            (LineConfig::BLINKT.data, Some(p.P0_23.into())),
            (LineConfig::BLINKT.clock, Some(p.P0_24.into())),
        ],
    };
    let blinkt: &'static Blinkt =
        BLINKT.init(unwrap!(StripDriver::new(&mut board, LineConfig::BLINKT)));

    defmt::info!("Running...");
    join(marquee(blinkt), colors(blinkt)).await;
}

/// Dot position `index` lit, the previous one cleared. `PIXEL_COUNT`
/// only clears the last pixel.
fn marquee_step(blinkt: &Blinkt, index: usize) -> Result<()> {
    if index < PIXEL_COUNT {
        blinkt.turn_on(Target::from(PixelIndex::new(index)?))?;
    }
    if index > 0 {
        blinkt.turn_off(Target::from(PixelIndex::new(index - 1)?))?;
    }
    Ok(())
}

async fn marquee(blinkt: &'static Blinkt) -> ! {
    let mut ticker = Ticker::every(MARQUEE_STEP);
    loop {
        for index in 0..=PIXEL_COUNT {
            unwrap!(marquee_step(blinkt, index));
            ticker.next().await;
        }
        Timer::after(MARQUEE_PAUSE).await;
        ticker.reset();
    }
}

/// Commit a color to the whole strip as one batch: channels are staged
/// without pushing and land on the wire with a single update.
fn commit_color(blinkt: &Blinkt, hex: &str) -> Result<()> {
    let color = Pixel::from_hex(hex, 1.0)?;
    blinkt.set_brightness(COLOR_BRIGHTNESS, false, Target::All)?;
    blinkt.set_red(color.red().into(), false, Target::All)?;
    blinkt.set_green(color.green().into(), false, Target::All)?;
    blinkt.set_blue(color.blue().into(), false, Target::All)?;
    blinkt.update_all()
}

async fn colors(blinkt: &'static Blinkt) -> ! {
    loop {
        for hex in PALETTE {
            Timer::after(COLOR_PERIOD).await;
            defmt::info!("color {}", hex);
            unwrap!(commit_color(blinkt, hex));
        }
    }
}
