#![allow(dead_code)]
//! Instrumented output lines shared by the integration tests.

use std::convert::Infallible;
use std::sync::{Arc, Mutex};
use std::thread;

use blinkt_apa102::{LineConfig, LineId, LineSource, PAYLOAD_LEN};
use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wire {
    Data,
    Clock,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Level { wire: Wire, high: bool },
    Released(Wire),
}

/// Every level change of every line, in the order it happened.
#[derive(Clone, Default)]
pub struct Journal {
    events: Arc<Mutex<Vec<Event>>>,
}

impl Journal {
    pub fn line(&self, wire: Wire) -> RecordingLine {
        RecordingLine {
            wire,
            journal: self.clone(),
            yield_on_write: false,
        }
    }

    /// Line that gives other threads a chance to run on every write.
    pub fn yielding_line(&self, wire: Wire) -> RecordingLine {
        RecordingLine {
            wire,
            journal: self.clone(),
            yield_on_write: true,
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    fn record(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }

    /// Decode everything after the initial setup into frames.
    pub fn frames(&self) -> Vec<[u8; PAYLOAD_LEN]> {
        let events = self.levels();
        assert_eq!(
            &events[..2],
            &[
                Event::Level { wire: Wire::Data, high: false },
                Event::Level { wire: Wire::Clock, high: false },
            ],
            "lines are driven low before the first frame"
        );
        decode_frames(&events[2..]).unwrap()
    }

    /// Level changes only, without release markers.
    pub fn levels(&self) -> Vec<Event> {
        self.events()
            .into_iter()
            .filter(|event| matches!(event, Event::Level { .. }))
            .collect()
    }
}

pub struct RecordingLine {
    wire: Wire,
    journal: Journal,
    yield_on_write: bool,
}

impl RecordingLine {
    fn set(&mut self, high: bool) {
        self.journal.record(Event::Level {
            wire: self.wire,
            high,
        });
        if self.yield_on_write {
            thread::yield_now();
        }
    }
}

impl ErrorType for RecordingLine {
    type Error = Infallible;
}

impl OutputPin for RecordingLine {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set(true);
        Ok(())
    }
}

impl Drop for RecordingLine {
    fn drop(&mut self) {
        self.journal.record(Event::Released(self.wire));
    }
}

/// Line that starts failing after a number of writes.
pub struct FailingLine {
    pub writes_left: usize,
}

impl ErrorType for FailingLine {
    type Error = ErrorKind;
}

impl OutputPin for FailingLine {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write()
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write()
    }
}

impl FailingLine {
    fn write(&mut self) -> Result<(), ErrorKind> {
        match self.writes_left.checked_sub(1) {
            Some(left) => {
                self.writes_left = left;
                Ok(())
            }
            None => Err(ErrorKind::Other),
        }
    }
}

/// Board with the Blinkt data and clock lines, either of which can be taken.
pub struct TestBoard {
    journal: Journal,
    free: Vec<(LineId, Wire)>,
}

impl TestBoard {
    pub fn blinkt(journal: &Journal) -> Self {
        let config = LineConfig::BLINKT;
        Self {
            journal: journal.clone(),
            free: vec![(config.data, Wire::Data), (config.clock, Wire::Clock)],
        }
    }

    pub fn without(mut self, id: LineId) -> Self {
        self.free.retain(|(free, _)| *free != id);
        self
    }
}

impl LineSource for TestBoard {
    type Line = RecordingLine;

    fn acquire_output(&mut self, id: LineId) -> Option<RecordingLine> {
        let at = self.free.iter().position(|(free, _)| *free == id)?;
        let (_, wire) = self.free.remove(at);
        Some(self.journal.line(wire))
    }
}

/// Split a stream of level changes into frames, failing on anything that
/// is not exactly lock pulses, 256 clocked data bits and unlock pulses.
pub fn decode_frames(events: &[Event]) -> Result<Vec<[u8; PAYLOAD_LEN]>, String> {
    let mut cursor = Cursor { events, at: 0 };
    let mut frames = Vec::new();
    while cursor.at < events.len() {
        let index = frames.len();
        let frame = cursor
            .frame()
            .map_err(|err| format!("frame {}: {}", index, err))?;
        frames.push(frame);
    }
    Ok(frames)
}

struct Cursor<'a> {
    events: &'a [Event],
    at: usize,
}

impl Cursor<'_> {
    fn next(&mut self) -> Result<(Wire, bool), String> {
        let event = self
            .events
            .get(self.at)
            .ok_or_else(|| format!("stream ends at event {}", self.at))?;
        self.at += 1;
        match *event {
            Event::Level { wire, high } => Ok((wire, high)),
            Event::Released(wire) => Err(format!("{:?} released mid-frame", wire)),
        }
    }

    fn expect(&mut self, wire: Wire, high: bool) -> Result<(), String> {
        let at = self.at;
        let got = self.next()?;
        if got == (wire, high) {
            Ok(())
        } else {
            Err(format!("event {}: expected {:?}/{} got {:?}", at, wire, high, got))
        }
    }

    fn pulses(&mut self, count: usize) -> Result<(), String> {
        self.expect(Wire::Data, false)?;
        for _ in 0..count {
            self.expect(Wire::Clock, true)?;
            self.expect(Wire::Clock, false)?;
        }
        Ok(())
    }

    fn byte(&mut self) -> Result<u8, String> {
        let mut byte = 0u8;
        for _ in 0..8 {
            let at = self.at;
            let (wire, bit) = self.next()?;
            if wire != Wire::Data {
                return Err(format!("event {}: expected a data bit", at));
            }
            self.expect(Wire::Clock, true)?;
            self.expect(Wire::Clock, false)?;
            byte = (byte << 1) | bit as u8;
        }
        Ok(byte)
    }

    fn frame(&mut self) -> Result<[u8; PAYLOAD_LEN], String> {
        self.pulses(36)?;
        let mut payload = [0u8; PAYLOAD_LEN];
        for byte in payload.iter_mut() {
            *byte = self.byte()?;
        }
        self.pulses(32)?;
        Ok(payload)
    }
}

/// Payload of a strip with every pixel set to the same four bytes.
pub fn uniform(pixel: [u8; 4]) -> [u8; PAYLOAD_LEN] {
    let mut payload = [0u8; PAYLOAD_LEN];
    for chunk in payload.chunks_mut(4) {
        chunk.copy_from_slice(&pixel);
    }
    payload
}

pub const OFF: [u8; 4] = [0xE0, 0, 0, 0];
pub const WHITE: [u8; 4] = [0xFF, 0xFF, 0xFF, 0xFF];
