use crate::clock;
use crate::rng::Lcg;
use arduino_hal::prelude::*;
use judge_core::io::{Handshake, LinkError, PeerLink};

/// The second hardware UART, wired RX1<->TX1 between the boards.
pub type PeerPort = arduino_hal::hal::usart::Usart1<arduino_hal::DefaultClock>;

const GREETING: u8 = 0xA5;

const GREET_TRIES: u8 = 30;
const GREET_WAIT_MS: u32 = 200;
const DRAW_TRIES: u8 = 8;
const DRAW_WAIT_MS: u32 = 1000;
/// A round byte may be answered late: the peer can still be inside its
/// own cues or victory ceremony.
const ROUND_WAIT_MS: u32 = 8000;
const QUIET_MS: u32 = 50;

/**
The peer board over USART1, plus the local dice.

The handshake is deliberately primitive: shout a greeting until one comes
back, then draw bytes until the draw splits. The draw decides the roles
and both bytes, ordered the same way on both boards, become the shared
seed for game picking.
*/
pub struct LinkPort {
    port: PeerPort,
    rng: Lcg,
}

impl LinkPort {
    pub fn new(port: PeerPort) -> Self {
        Self {
            port,
            rng: Lcg::new(0x7321),
        }
    }

    fn read_within(&mut self, wait_ms: u32) -> Result<u8, LinkError> {
        let start = clock::millis();
        loop {
            match self.port.read() {
                Ok(byte) => return Ok(byte),
                Err(nb::Error::WouldBlock) => {
                    if clock::millis().wrapping_sub(start) > wait_ms {
                        return Err(LinkError::Timeout);
                    }
                }
                Err(nb::Error::Other(_)) => return Err(LinkError::Desync),
            }
        }
    }

    /// Swallow leftovers from an aborted exchange until the line has been
    /// quiet for a moment.
    fn drain_quiet(&mut self) {
        while self.read_within(QUIET_MS).is_ok() {}
    }
}

impl PeerLink for LinkPort {
    fn handshake(&mut self) -> Result<Handshake, LinkError> {
        self.drain_quiet();

        let mut heard = false;
        for _ in 0..GREET_TRIES {
            self.port.write_byte(GREETING);
            if let Ok(GREETING) = self.read_within(GREET_WAIT_MS) {
                heard = true;
                break;
            }
        }
        if !heard {
            return Err(LinkError::Timeout);
        }

        // The greeting's arrival jitter differs between the boards; fold
        // it into the dice so the role draw below actually splits.
        self.rng = Lcg::new(clock::millis() as u16 ^ ((clock::jitter() as u16) << 8));
        self.drain_quiet();

        for _ in 0..DRAW_TRIES {
            let mine = self.rng.next() as u8;
            self.port.write_byte(mine);
            let theirs = self.read_within(DRAW_WAIT_MS)?;
            if mine == theirs {
                continue;
            }
            let (hi, lo) = if mine > theirs { (mine, theirs) } else { (theirs, mine) };
            return Ok(Handshake {
                first: mine > theirs,
                seed: (hi as u16) << 8 | lo as u16,
            });
        }
        Err(LinkError::Desync)
    }

    fn exchange_game(&mut self, code: u8) -> Result<u8, LinkError> {
        self.port.write_byte(code);
        self.read_within(ROUND_WAIT_MS)
    }

    fn exchange_numbers(&mut self, max: u8) -> Result<(u8, u8), LinkError> {
        let mine = self.rng.roll(max + 1);
        self.port.write_byte(mine);
        let theirs = self.read_within(ROUND_WAIT_MS)?;
        if theirs > max {
            return Err(LinkError::Desync);
        }
        Ok((mine, theirs))
    }
}
