//! The six microgames and the dispatch from a wire code to one of them.

use crate::io::{BoardIo, Clock, IndicatorPanel, LinkError, ScoreMeter, Sounder};
use crate::outcome::RoundOutcome;
use ufmt::derive::uDebug;

#[derive(Clone, Copy, PartialEq, Eq, Debug, uDebug)]
pub enum GameKind {
    PiezoPitch,
    PiezoRhythm,
    LedNumber,
    LedBrightest,
    LedFrequency,
    LightCover,
}

impl GameKind {
    pub const ALL: [GameKind; 6] = [
        GameKind::PiezoPitch,
        GameKind::PiezoRhythm,
        GameKind::LedNumber,
        GameKind::LedBrightest,
        GameKind::LedFrequency,
        GameKind::LightCover,
    ];

    /// Single-byte wire form of the game, exchanged when the boards agree
    /// on a round.
    pub fn code(self) -> u8 {
        match self {
            GameKind::PiezoPitch => 0,
            GameKind::PiezoRhythm => 1,
            GameKind::LedNumber => 2,
            GameKind::LedBrightest => 3,
            GameKind::LedFrequency => 4,
            GameKind::LightCover => 5,
        }
    }

    pub fn from_code(code: u8) -> Option<GameKind> {
        match code {
            0 => Some(GameKind::PiezoPitch),
            1 => Some(GameKind::PiezoRhythm),
            2 => Some(GameKind::LedNumber),
            3 => Some(GameKind::LedBrightest),
            4 => Some(GameKind::LedFrequency),
            5 => Some(GameKind::LightCover),
            _ => None,
        }
    }

    /// Upper bound for the round numbers this game plays with, needed
    /// before the numbers are exchanged.
    pub fn max_number(self) -> u8 {
        match self {
            GameKind::PiezoPitch => PitchContest.max_number(),
            GameKind::PiezoRhythm => RhythmContest.max_number(),
            GameKind::LedNumber => NumberContest.max_number(),
            GameKind::LedBrightest => BrightestContest.max_number(),
            GameKind::LedFrequency => FrequencyContest.max_number(),
            GameKind::LightCover => CoverContest.max_number(),
        }
    }
}

/// Decode a game code received from the peer. An unknown byte means the
/// boards have lost protocol sync; the caller hands the error to the
/// link-recovery path and the round never reaches the score machine.
pub fn decode(code: u8) -> Result<GameKind, LinkError> {
    GameKind::from_code(code).ok_or(LinkError::UnknownGame(code))
}

/// One playable microgame. `play` gets both boards' round numbers and
/// reports the result from the local board's perspective.
pub trait Microgame {
    fn max_number(&self) -> u8;

    fn play<M, P, S, C>(&mut self, io: &mut BoardIo<M, P, S, C>, mine: u8, theirs: u8) -> RoundOutcome
    where
        M: ScoreMeter,
        P: IndicatorPanel,
        S: Sounder,
        C: Clock;
}

/// Runs the selected microgame. Decoding happened at the wire boundary,
/// so every reachable kind has a routine; there is no fallthrough.
pub fn dispatch<M, P, S, C>(
    kind: GameKind,
    io: &mut BoardIo<M, P, S, C>,
    mine: u8,
    theirs: u8,
) -> RoundOutcome
where
    M: ScoreMeter,
    P: IndicatorPanel,
    S: Sounder,
    C: Clock,
{
    match kind {
        GameKind::PiezoPitch => PitchContest.play(io, mine, theirs),
        GameKind::PiezoRhythm => RhythmContest.play(io, mine, theirs),
        GameKind::LedNumber => NumberContest.play(io, mine, theirs),
        GameKind::LedBrightest => BrightestContest.play(io, mine, theirs),
        GameKind::LedFrequency => FrequencyContest.play(io, mine, theirs),
        GameKind::LightCover => CoverContest.play(io, mine, theirs),
    }
}

/// Which board sounded the higher note.
pub struct PitchContest;

impl Microgame for PitchContest {
    fn max_number(&self) -> u8 {
        7
    }

    fn play<M, P, S, C>(&mut self, _io: &mut BoardIo<M, P, S, C>, _mine: u8, _theirs: u8) -> RoundOutcome
    where
        M: ScoreMeter,
        P: IndicatorPanel,
        S: Sounder,
        C: Clock,
    {
        // TODO: sound both notes and judge the higher-pitch button call.
        RoundOutcome::GameTied
    }
}

/// Which board beeped more times in its burst.
pub struct RhythmContest;

impl Microgame for RhythmContest {
    fn max_number(&self) -> u8 {
        3
    }

    fn play<M, P, S, C>(&mut self, _io: &mut BoardIo<M, P, S, C>, _mine: u8, _theirs: u8) -> RoundOutcome
    where
        M: ScoreMeter,
        P: IndicatorPanel,
        S: Sounder,
        C: Clock,
    {
        // TODO: beep the burst and count the presses against it.
        RoundOutcome::GameTied
    }
}

/// Which board shows the bigger number on its bank.
pub struct NumberContest;

impl Microgame for NumberContest {
    fn max_number(&self) -> u8 {
        15
    }

    fn play<M, P, S, C>(&mut self, _io: &mut BoardIo<M, P, S, C>, _mine: u8, _theirs: u8) -> RoundOutcome
    where
        M: ScoreMeter,
        P: IndicatorPanel,
        S: Sounder,
        C: Clock,
    {
        // TODO: show both bank patterns and judge the bigger-number call.
        RoundOutcome::GameTied
    }
}

/// Which board's glow LED burns brighter.
pub struct BrightestContest;

impl Microgame for BrightestContest {
    fn max_number(&self) -> u8 {
        3
    }

    fn play<M, P, S, C>(&mut self, _io: &mut BoardIo<M, P, S, C>, _mine: u8, _theirs: u8) -> RoundOutcome
    where
        M: ScoreMeter,
        P: IndicatorPanel,
        S: Sounder,
        C: Clock,
    {
        // TODO: drive both glow levels and judge the brighter call.
        RoundOutcome::GameTied
    }
}

/// Which board's LED blinks faster.
pub struct FrequencyContest;

impl Microgame for FrequencyContest {
    fn max_number(&self) -> u8 {
        3
    }

    fn play<M, P, S, C>(&mut self, _io: &mut BoardIo<M, P, S, C>, _mine: u8, _theirs: u8) -> RoundOutcome
    where
        M: ScoreMeter,
        P: IndicatorPanel,
        S: Sounder,
        C: Clock,
    {
        // TODO: blink at the drawn rates and judge the faster call.
        RoundOutcome::GameTied
    }
}

/// Who covers their light sensor first.
pub struct CoverContest;

impl Microgame for CoverContest {
    fn max_number(&self) -> u8 {
        1
    }

    fn play<M, P, S, C>(&mut self, _io: &mut BoardIo<M, P, S, C>, _mine: u8, _theirs: u8) -> RoundOutcome
    where
        M: ScoreMeter,
        P: IndicatorPanel,
        S: Sounder,
        C: Clock,
    {
        // TODO: watch the light sensor for the cover race.
        RoundOutcome::GameTied
    }
}
