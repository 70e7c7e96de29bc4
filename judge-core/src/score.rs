use crate::io::ScoreMeter;
use crate::outcome::RoundOutcome;
use ufmt::derive::uDebug;

/// Score at which one side has won (and the other lost) the session.
pub const SCORE_LIMIT: i16 = 80;

/// Servo calibration for the physical score meter.
pub const METER_MIN: u8 = 10;
pub const METER_MAX: u8 = 170;

/// Point magnitudes for the four outcome pairs.
///
/// Each pair shares one magnitude: `CorrectAttack` gains what
/// `WasCorrectlyAttacked` loses, and so on. Whatever these are tuned to,
/// the largest of them must stay below `2 * SCORE_LIMIT` so a single round
/// can never cross both victory thresholds at once.
#[derive(Clone, Copy, PartialEq, Eq, Debug, uDebug)]
pub struct ScoreRules {
    pub correct_attack: i16,
    pub incorrect_attack: i16,
    pub correct_dodge: i16,
    pub incorrect_dodge: i16,
}

impl Default for ScoreRules {
    fn default() -> Self {
        Self {
            correct_attack: 20,
            incorrect_attack: 10,
            correct_dodge: 10,
            incorrect_dodge: 5,
        }
    }
}

impl ScoreRules {
    /// Signed score change for one outcome, seen from the local board.
    pub fn delta(&self, outcome: RoundOutcome) -> i16 {
        use RoundOutcome::*;
        match outcome {
            CorrectAttack => self.correct_attack,
            WasCorrectlyAttacked => -self.correct_attack,
            IncorrectAttack => -self.incorrect_attack,
            WasIncorrectlyAttacked => self.incorrect_attack,
            CorrectDodge => self.correct_dodge,
            WasCorrectlyDodged => -self.correct_dodge,
            IncorrectDodge => -self.incorrect_dodge,
            WasIncorrectlyDodged => self.incorrect_dodge,
            GameTied | NoContest => 0,
        }
    }

    /// Largest single-round move under these rules.
    pub fn max_step(&self) -> i16 {
        self.correct_attack
            .max(self.incorrect_attack)
            .max(self.correct_dodge)
            .max(self.incorrect_dodge)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, uDebug)]
pub enum Verdict {
    Won,
    Lost,
}

/// Running score of the local board against its peer.
///
/// The score accumulates unclamped; clamping happens only when the value
/// is turned into a meter position.
pub struct Scoreboard {
    score: i16,
    rules: ScoreRules,
}

impl Scoreboard {
    pub fn new(rules: ScoreRules) -> Self {
        debug_assert!(rules.max_step() < 2 * SCORE_LIMIT);
        Self { score: 0, rules }
    }

    pub fn score(&self) -> i16 {
        self.score
    }

    pub fn rules(&self) -> &ScoreRules {
        &self.rules
    }

    /// Adds the outcome's delta to the score and returns it. The single
    /// score write of a round.
    pub fn apply_outcome(&mut self, outcome: RoundOutcome) -> i16 {
        let delta = self.rules.delta(outcome);
        self.score += delta;
        delta
    }

    /// Meter position for the current score: clamp to the scoring range,
    /// then remap linearly onto the servo's calibrated arc.
    pub fn meter_position(&self) -> u8 {
        let clamped = self.score.clamp(-SCORE_LIMIT, SCORE_LIMIT) as i32;
        let span = (METER_MAX - METER_MIN) as i32;
        let pos = (clamped + SCORE_LIMIT as i32) * span / (2 * SCORE_LIMIT as i32) + METER_MIN as i32;
        pos as u8
    }

    /// Commits the current score to the meter. The only place the score is
    /// read for display.
    pub fn update_display<M: ScoreMeter>(&self, meter: &mut M) {
        meter.set_position(self.meter_position());
    }

    pub fn check_victory(&self) -> Option<Verdict> {
        if self.score >= SCORE_LIMIT {
            Some(Verdict::Won)
        } else if self.score <= -SCORE_LIMIT {
            Some(Verdict::Lost)
        } else {
            None
        }
    }

    pub fn reset(&mut self) {
        self.score = 0;
    }

    #[cfg(test)]
    pub(crate) fn set_score(&mut self, score: i16) {
        self.score = score;
    }
}
