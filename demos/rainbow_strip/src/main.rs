#![no_std]
#![no_main]

use blinkt_apa102::{PIXEL_COUNT, StripDriver};
use defmt::unwrap;
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Level, Output, OutputDrive};
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_time::{Duration, Timer};
use smart_leds::{
    RGB8, SmartLedsWriteAsync as _, brightness,
    hsv::{Hsv, hsv2rgb},
};
use {defmt_rtt as _, panic_probe as _};

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());

    // Blinkt wiring: data on 23, clock on 24
    let data = Output::new(p.P0_23, Level::Low, OutputDrive::Standard);
    let clock = Output::new(p.P0_24, Level::Low, OutputDrive::Standard);
    let blinkt = unwrap!(StripDriver::<NoopRawMutex, _, _>::from_lines(data, clock));
    let mut ws = &blinkt;

    let mut hue_offset = 0u8;
    loop {
        let mut colors = [RGB8::default(); PIXEL_COUNT];

        for (i, color) in colors.iter_mut().enumerate() {
            let hue = hue_offset.wrapping_add((i as u8) * 32);
            let hsv = Hsv {
                hue,
                sat: 255,
                val: 50, // Keep brightness reasonable
            };
            *color = hsv2rgb(hsv);
        }

        unwrap!(ws.write(brightness(colors.into_iter(), 64)).await);
        hue_offset = hue_offset.wrapping_add(4);
        Timer::after(Duration::from_millis(25)).await;
    }
}
