//! Session context: the score, where the session is in its round cycle,
//! and the victory ceremony that ends it.

use crate::game::GameKind;
use crate::io::{BoardIo, Clock, IndicatorPanel, ScoreMeter, SoundCue, Sounder};
use crate::outcome::RoundOutcome;
use crate::score::{ScoreRules, Scoreboard, Verdict, METER_MAX, METER_MIN};
use ufmt::derive::uDebug;

#[derive(Clone, Copy, PartialEq, Eq, Debug, uDebug)]
pub enum SessionPhase {
    AwaitingRound,
    RoundInProgress,
    ScoreSettled,
    VictoryCeremony,
}

/// All mutable session state, with one writer per field: the round loop
/// drives the phase, `settle` is the only score write, the firmware owns
/// nothing in here.
pub struct Session {
    scoreboard: Scoreboard,
    phase: SessionPhase,
    last_game: Option<GameKind>,
    rounds_played: u16,
    round_started_at: u32,
}

impl Session {
    pub fn new(rules: ScoreRules) -> Self {
        Self {
            scoreboard: Scoreboard::new(rules),
            phase: SessionPhase::AwaitingRound,
            last_game: None,
            rounds_played: 0,
            round_started_at: 0,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn score(&self) -> i16 {
        self.scoreboard.score()
    }

    pub fn last_game(&self) -> Option<GameKind> {
        self.last_game
    }

    pub fn rounds_played(&self) -> u16 {
        self.rounds_played
    }

    /// Timestamp taken as the round's game started, for UI timing.
    pub fn round_started_at(&self) -> u32 {
        self.round_started_at
    }

    /// Enters the round: records which game runs and when it started.
    pub fn begin_round(&mut self, game: GameKind, now_ms: u32) {
        self.phase = SessionPhase::RoundInProgress;
        self.last_game = Some(game);
        self.round_started_at = now_ms;
    }

    /// The single score write of the round. Returns the applied delta.
    pub fn settle(&mut self, outcome: RoundOutcome) -> i16 {
        let delta = self.scoreboard.apply_outcome(outcome);
        self.phase = SessionPhase::ScoreSettled;
        delta
    }

    pub fn update_display<M: ScoreMeter>(&self, meter: &mut M) {
        self.scoreboard.update_display(meter);
    }

    pub fn check_victory(&self) -> Option<Verdict> {
        self.scoreboard.check_victory()
    }

    /// Drops back to waiting without a score write, for rounds the link
    /// killed before they settled.
    pub fn abort_round(&mut self) {
        self.phase = SessionPhase::AwaitingRound;
    }

    pub fn finish_round(&mut self) {
        self.rounds_played = self.rounds_played.wrapping_add(1);
        self.phase = SessionPhase::AwaitingRound;
    }

    /// Fresh session after a (re)handshake.
    pub fn reset(&mut self) {
        self.scoreboard.reset();
        self.phase = SessionPhase::AwaitingRound;
        self.last_game = None;
        self.rounds_played = 0;
        self.round_started_at = 0;
    }

    /// The fixed, uninterruptible end-of-session ceremony: slam the meter
    /// to the deciding end, flash the bank under full glow, play the
    /// jingle, count the bank down, then zero the score and hand the
    /// meter back to it.
    pub fn run_victory_sequence<M, P, S, C>(&mut self, verdict: Verdict, io: &mut BoardIo<M, P, S, C>)
    where
        M: ScoreMeter,
        P: IndicatorPanel,
        S: Sounder,
        C: Clock,
    {
        self.phase = SessionPhase::VictoryCeremony;

        io.meter.set_position(match verdict {
            Verdict::Won => METER_MAX,
            Verdict::Lost => METER_MIN,
        });

        io.panel.set_glow(255);
        for _ in 0..3 {
            io.panel.set_bank(0b1111);
            io.clock.delay_ms(120);
            io.panel.set_bank(0);
            io.clock.delay_ms(120);
        }

        io.sounder.play(match verdict {
            Verdict::Won => SoundCue::VictoryJingle,
            Verdict::Lost => SoundCue::DefeatJingle,
        });

        let mut bits = 0b1111u8;
        while bits != 0 {
            io.panel.set_bank(bits);
            io.clock.delay_ms(200);
            bits >>= 1;
        }

        self.scoreboard.reset();
        self.scoreboard.update_display(&mut io.meter);
        io.panel.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::probe::{probe_io, Effect};
    use crate::outcome::RoundOutcome::*;

    fn session() -> Session {
        Session::new(ScoreRules::default())
    }

    #[test]
    fn phases_walk_the_round_cycle() {
        let mut s = session();
        assert_eq!(s.phase(), SessionPhase::AwaitingRound);

        s.begin_round(GameKind::PiezoPitch, 42);
        assert_eq!(s.phase(), SessionPhase::RoundInProgress);
        assert_eq!(s.last_game(), Some(GameKind::PiezoPitch));
        assert_eq!(s.round_started_at(), 42);

        s.settle(GameTied);
        assert_eq!(s.phase(), SessionPhase::ScoreSettled);

        s.finish_round();
        assert_eq!(s.phase(), SessionPhase::AwaitingRound);
        assert_eq!(s.rounds_played(), 1);
    }

    #[test]
    fn abort_leaves_no_trace_on_the_score() {
        let mut s = session();
        s.begin_round(GameKind::LightCover, 0);
        s.abort_round();
        assert_eq!(s.phase(), SessionPhase::AwaitingRound);
        assert_eq!(s.score(), 0);
        assert_eq!(s.rounds_played(), 0);
    }

    #[test]
    fn crossing_the_win_threshold_fires_exactly_once() {
        let (mut io, _log) = probe_io();
        let mut s = session();
        let mut wins = 0;
        for _ in 0..5 {
            s.settle(CorrectAttack);
            if let Some(v) = s.check_victory() {
                assert_eq!(v, Verdict::Won);
                wins += 1;
                s.run_victory_sequence(v, &mut io);
            }
        }
        // 4 * 20 points reach the threshold; the fifth round starts a new
        // session at 20.
        assert_eq!(wins, 1);
        assert_eq!(s.score(), 20);
    }

    #[test]
    fn crossing_the_loss_threshold_fires_exactly_once() {
        let (mut io, _log) = probe_io();
        let mut s = session();
        let mut losses = 0;
        for _ in 0..5 {
            s.settle(WasCorrectlyAttacked);
            if let Some(v) = s.check_victory() {
                assert_eq!(v, Verdict::Lost);
                losses += 1;
                s.run_victory_sequence(v, &mut io);
            }
        }
        assert_eq!(losses, 1);
        assert_eq!(s.score(), -20);
    }

    #[test]
    fn victory_sequence_order_and_reset() {
        let (mut io, log) = probe_io();
        let mut s = session();
        for _ in 0..4 {
            s.settle(CorrectAttack);
        }
        assert_eq!(s.check_victory(), Some(Verdict::Won));

        s.run_victory_sequence(Verdict::Won, &mut io);
        assert_eq!(s.score(), 0);

        let fx = log.take();
        // Slam first, centered meter and dark panel last.
        assert_eq!(fx.first(), Some(&Effect::Meter(METER_MAX)));
        assert_eq!(&fx[fx.len() - 2..], &[Effect::Meter(90), Effect::ClearPanel][..]);
        // The jingle comes after the glow flourish and before the bank
        // countdown reaches dark.
        let jingle = fx.iter().position(|e| *e == Effect::Sound(SoundCue::VictoryJingle)).unwrap();
        let glow = fx.iter().position(|e| *e == Effect::Glow(255)).unwrap();
        assert!(glow < jingle);
        let countdown: Vec<u8> = fx[jingle + 1..fx.len() - 2]
            .iter()
            .filter_map(|e| match e {
                Effect::Bank(b) => Some(*b),
                _ => None,
            })
            .collect();
        assert_eq!(countdown, [0b1111, 0b0111, 0b0011, 0b0001]);
    }

    #[test]
    fn defeat_plays_the_dirge_and_slams_low() {
        let (mut io, log) = probe_io();
        let mut s = session();
        for _ in 0..4 {
            s.settle(WasCorrectlyAttacked);
        }
        s.run_victory_sequence(Verdict::Lost, &mut io);
        let fx = log.take();
        assert_eq!(fx.first(), Some(&Effect::Meter(METER_MIN)));
        assert!(fx.contains(&Effect::Sound(SoundCue::DefeatJingle)));
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn seventy_plus_a_clean_hit_wins_and_resets() {
        let (mut io, log) = probe_io();
        let mut s = session();
        // 3 * 20 + 10 = 70.
        for _ in 0..3 {
            s.settle(CorrectAttack);
        }
        s.settle(WasIncorrectlyAttacked);
        assert_eq!(s.score(), 70);

        s.settle(CorrectAttack);
        assert_eq!(s.score(), 90);
        s.update_display(&mut io.meter);
        assert_eq!(log.meters(), [170]);

        let verdict = s.check_victory().expect("90 is past the threshold");
        assert_eq!(verdict, Verdict::Won);
        s.run_victory_sequence(verdict, &mut io);
        assert_eq!(s.score(), 0);
        assert_eq!(*log.meters().last().unwrap(), 90);
    }
}
