//! Port traits between the game logic and the board hardware.
//!
//! The firmware implements these over real pins and the serial link; the
//! unit tests implement them over recording probes.

use crate::game::GameKind;
use ufmt::derive::uDebug;

/// A failure of the inter-board link, fatal to the current round. The
/// caller routes these to the link-recovery path; none of them may ever
/// reach the score machine.
#[derive(Clone, Copy, PartialEq, Eq, Debug, uDebug)]
pub enum LinkError {
    /// The peer named a game this board does not know.
    UnknownGame(u8),
    Timeout,
    /// The boards are talking past each other, e.g. they proposed
    /// different games or a number arrived out of range.
    Desync,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, uDebug)]
pub enum PlayerSide {
    Local,
    Peer,
}

/// Named sound cues. Playback content is board calibration; the core only
/// decides which cue fires when.
#[derive(Clone, Copy, PartialEq, Eq, Debug, uDebug)]
pub enum SoundCue {
    RoundWon,
    RoundLost,
    RoundTied,
    VictoryJingle,
    DefeatJingle,
    LinkTrouble,
}

/// Result of the startup synchronization with the peer board.
#[derive(Clone, Copy, PartialEq, Eq, Debug, uDebug)]
pub struct Handshake {
    /// Whether this board drew the higher role byte.
    pub first: bool,
    /// Seed shared by both boards, identical on both sides.
    pub seed: u16,
}

/// The servo score meter. Positions are degrees within the calibrated
/// arc, [`crate::score::METER_MIN`]..=[`crate::score::METER_MAX`].
pub trait ScoreMeter {
    fn set_position(&mut self, deg: u8);
}

/// The LED cluster: the 4-bit bank, the two round-end player indicators
/// and the analog glow LED.
pub trait IndicatorPanel {
    /// Low 4 bits drive the bank.
    fn set_bank(&mut self, bits: u8);
    fn set_player(&mut self, side: PlayerSide, on: bool);
    /// 0 = dark, 255 = full brightness.
    fn set_glow(&mut self, level: u8);
    /// Everything dark.
    fn clear(&mut self);
}

pub trait Sounder {
    /// Blocking playback of one cue.
    fn play(&mut self, cue: SoundCue);
}

pub trait Clock {
    fn now_ms(&self) -> u32;
    fn delay_ms(&mut self, ms: u16);
}

/// The peer board, reachable over the serial link.
pub trait PeerLink {
    /// Startup synchronization: find the peer, agree on roles and a
    /// shared seed. Run once before the first round and again after any
    /// link error.
    fn handshake(&mut self) -> Result<Handshake, LinkError>;

    /// Send this board's game proposal, return the peer's.
    fn exchange_game(&mut self, code: u8) -> Result<u8, LinkError>;

    /// Draw a local number in `0..=max`, swap it with the peer, return
    /// `(mine, theirs)`.
    fn exchange_numbers(&mut self, max: u8) -> Result<(u8, u8), LinkError>;
}

/// Round selection policy.
pub trait GamePicker {
    fn next_game(&mut self, prev: Option<GameKind>) -> GameKind;
}

/// The local actuators, bundled so the round loop and the microgames take
/// one argument instead of four.
pub struct BoardIo<M, P, S, C> {
    pub meter: M,
    pub panel: P,
    pub sounder: S,
    pub clock: C,
}
