use ufmt::derive::uDebug;

/// What one microgame round meant for the local board.
///
/// The eight attack/dodge outcomes come in mirrored pairs: every "I did X"
/// has a "X was done to me" twin on the peer board with the opposite score
/// effect. `GameTied` and `NoContest` sit outside the pairing and never
/// move the score.
#[derive(Clone, Copy, PartialEq, Eq, Debug, uDebug)]
pub enum RoundOutcome {
    CorrectAttack,
    WasCorrectlyAttacked,
    IncorrectAttack,
    WasIncorrectlyAttacked,
    CorrectDodge,
    WasCorrectlyDodged,
    IncorrectDodge,
    WasIncorrectlyDodged,
    GameTied,
    /// The round produced no scorable result, e.g. the link dropped while
    /// a game was running.
    NoContest,
}

impl RoundOutcome {
    pub const ALL: [RoundOutcome; 10] = [
        RoundOutcome::CorrectAttack,
        RoundOutcome::WasCorrectlyAttacked,
        RoundOutcome::IncorrectAttack,
        RoundOutcome::WasIncorrectlyAttacked,
        RoundOutcome::CorrectDodge,
        RoundOutcome::WasCorrectlyDodged,
        RoundOutcome::IncorrectDodge,
        RoundOutcome::WasIncorrectlyDodged,
        RoundOutcome::GameTied,
        RoundOutcome::NoContest,
    ];

    /// The same event as the peer board reports it.
    pub fn mirror(self) -> Self {
        match self {
            RoundOutcome::CorrectAttack => RoundOutcome::WasCorrectlyAttacked,
            RoundOutcome::WasCorrectlyAttacked => RoundOutcome::CorrectAttack,
            RoundOutcome::IncorrectAttack => RoundOutcome::WasIncorrectlyAttacked,
            RoundOutcome::WasIncorrectlyAttacked => RoundOutcome::IncorrectAttack,
            RoundOutcome::CorrectDodge => RoundOutcome::WasCorrectlyDodged,
            RoundOutcome::WasCorrectlyDodged => RoundOutcome::CorrectDodge,
            RoundOutcome::IncorrectDodge => RoundOutcome::WasIncorrectlyDodged,
            RoundOutcome::WasIncorrectlyDodged => RoundOutcome::IncorrectDodge,
            RoundOutcome::GameTied => RoundOutcome::GameTied,
            RoundOutcome::NoContest => RoundOutcome::NoContest,
        }
    }

    /// Whether this outcome moves the score at all.
    pub fn is_scored(self) -> bool {
        !matches!(self, RoundOutcome::GameTied | RoundOutcome::NoContest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirroring_is_an_involution() {
        for outcome in RoundOutcome::ALL {
            assert_eq!(outcome.mirror().mirror(), outcome);
        }
    }

    #[test]
    fn neutral_outcomes_mirror_to_themselves() {
        assert_eq!(RoundOutcome::GameTied.mirror(), RoundOutcome::GameTied);
        assert_eq!(RoundOutcome::NoContest.mirror(), RoundOutcome::NoContest);
        assert!(!RoundOutcome::GameTied.is_scored());
        assert!(!RoundOutcome::NoContest.is_scored());
    }
}
