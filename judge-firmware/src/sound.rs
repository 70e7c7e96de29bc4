use arduino_hal::hal::port::Dynamic;
use arduino_hal::port::mode::Output;
use arduino_hal::port::Pin;
use judge_core::io::{SoundCue, Sounder};

// A few note frequencies in Hz.
const C4: u16 = 262;
const E4: u16 = 330;
const G4: u16 = 392;
const C5: u16 = 523;
const E5: u16 = 659;
const G5: u16 = 784;
const C6: u16 = 1047;
const BUZZ: u16 = 120;

/**
The piezo speaker, driven as a plain square wave.

Cue lengths are paired: a round's win cue on one board lasts as long as
the loss cue on the other, so the boards stay in step for the next
exchange.
*/
pub struct Piezo {
    pin: Pin<Output, Dynamic>,
}

impl Piezo {
    pub fn new(pin: Pin<Output, Dynamic>) -> Self {
        Self { pin }
    }

    fn tone(&mut self, freq: u16, dur_ms: u16) {
        let half_us = 500_000u32 / freq as u32;
        let mut cycles = freq as u32 * dur_ms as u32 / 1000;
        if cycles == 0 {
            cycles = 1;
        }
        for _ in 0..cycles {
            self.pin.set_high();
            arduino_hal::delay_us(half_us);
            self.pin.set_low();
            arduino_hal::delay_us(half_us);
        }
    }

    fn rest(&mut self, dur_ms: u16) {
        arduino_hal::delay_ms(dur_ms);
    }
}

impl Sounder for Piezo {
    fn play(&mut self, cue: SoundCue) {
        match cue {
            SoundCue::RoundWon => {
                self.tone(E5, 120);
                self.tone(C6, 180);
            }
            SoundCue::RoundLost => {
                self.tone(E4, 120);
                self.tone(C4, 180);
            }
            SoundCue::RoundTied => {
                self.tone(G4, 150);
                self.rest(150);
            }
            SoundCue::VictoryJingle => {
                self.tone(C5, 150);
                self.tone(E5, 150);
                self.tone(G5, 150);
                self.tone(C6, 400);
            }
            SoundCue::DefeatJingle => {
                self.tone(G4, 150);
                self.tone(E4, 150);
                self.tone(C4, 150);
                self.tone(C4, 400);
            }
            SoundCue::LinkTrouble => {
                self.tone(BUZZ, 200);
                self.rest(100);
                self.tone(BUZZ, 200);
            }
        }
    }
}
