//! One full round: agree on a game with the peer, play it, score it,
//! show the result.

use crate::game;
use crate::io::{
    BoardIo, Clock, GamePicker, IndicatorPanel, LinkError, PeerLink, PlayerSide, ScoreMeter,
    SoundCue, Sounder,
};
use crate::session::Session;

/// Total time the round-end indicator is lit (or held dark).
const ROUND_END_FLASH_MS: u16 = 1200;
const FLASH_HALF_MS: u16 = 150;

/// Runs one round start to finish. Any link failure aborts before the
/// score is touched and bubbles up for the caller's recovery path.
pub fn play_round<M, P, S, C, L, G>(
    session: &mut Session,
    io: &mut BoardIo<M, P, S, C>,
    link: &mut L,
    picker: &mut G,
) -> Result<(), LinkError>
where
    M: ScoreMeter,
    P: IndicatorPanel,
    S: Sounder,
    C: Clock,
    L: PeerLink,
    G: GamePicker,
{
    let proposal = picker.next_game(session.last_game());
    let agreed = link.exchange_game(proposal.code())?;
    let kind = game::decode(agreed)?;
    if kind != proposal {
        // Both bytes decode but the boards want different rounds; their
        // pickers have drifted apart.
        return Err(LinkError::Desync);
    }

    let (mine, theirs) = link.exchange_numbers(kind.max_number())?;

    session.begin_round(kind, io.clock.now_ms());
    let outcome = game::dispatch(kind, io, mine, theirs);

    // Round is over: take the transient game outputs down before scoring.
    io.panel.clear();

    let delta = session.settle(outcome);
    session.update_display(&mut io.meter);
    io.sounder.play(if delta > 0 {
        SoundCue::RoundWon
    } else if delta < 0 {
        SoundCue::RoundLost
    } else {
        SoundCue::RoundTied
    });

    match session.check_victory() {
        Some(verdict) => session.run_victory_sequence(verdict, io),
        None => end_of_round_flash(io, mine, theirs),
    }

    session.finish_round();
    Ok(())
}

/// Flash the side that drew the higher number; on a draw just hold dark
/// for the same span so both boards come back in step.
fn end_of_round_flash<M, P, S, C>(io: &mut BoardIo<M, P, S, C>, mine: u8, theirs: u8)
where
    M: ScoreMeter,
    P: IndicatorPanel,
    S: Sounder,
    C: Clock,
{
    let side = if mine > theirs {
        Some(PlayerSide::Local)
    } else if theirs > mine {
        Some(PlayerSide::Peer)
    } else {
        None
    };

    match side {
        Some(side) => {
            for _ in 0..ROUND_END_FLASH_MS / (2 * FLASH_HALF_MS) {
                io.panel.set_player(side, true);
                io.clock.delay_ms(FLASH_HALF_MS);
                io.panel.set_player(side, false);
                io.clock.delay_ms(FLASH_HALF_MS);
            }
        }
        None => io.clock.delay_ms(ROUND_END_FLASH_MS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameKind;
    use crate::io::probe::{probe_io, Effect};
    use crate::io::Handshake;
    use crate::score::ScoreRules;
    use crate::session::SessionPhase;

    struct ScriptedLink {
        /// Byte the peer answers the game proposal with; `None` echoes.
        game_reply: Option<u8>,
        numbers: Result<(u8, u8), LinkError>,
    }

    impl ScriptedLink {
        fn echoing(numbers: (u8, u8)) -> Self {
            Self { game_reply: None, numbers: Ok(numbers) }
        }
    }

    impl PeerLink for ScriptedLink {
        fn handshake(&mut self) -> Result<Handshake, LinkError> {
            Ok(Handshake { first: true, seed: 7 })
        }

        fn exchange_game(&mut self, code: u8) -> Result<u8, LinkError> {
            Ok(self.game_reply.unwrap_or(code))
        }

        fn exchange_numbers(&mut self, _max: u8) -> Result<(u8, u8), LinkError> {
            self.numbers
        }
    }

    struct FixedPicker(GameKind);

    impl GamePicker for FixedPicker {
        fn next_game(&mut self, _prev: Option<GameKind>) -> GameKind {
            self.0
        }
    }

    #[test]
    fn a_completed_round_updates_the_display_once() {
        let (mut io, log) = probe_io();
        io.clock.set_now(5_000);
        let mut session = Session::new(ScoreRules::default());
        let mut link = ScriptedLink::echoing((3, 1));
        let mut picker = FixedPicker(GameKind::PiezoPitch);

        play_round(&mut session, &mut io, &mut link, &mut picker).unwrap();

        assert_eq!(session.phase(), SessionPhase::AwaitingRound);
        assert_eq!(session.rounds_played(), 1);
        assert_eq!(session.round_started_at(), 5_000);
        assert_eq!(session.last_game(), Some(GameKind::PiezoPitch));
        // Stub games tie, so the meter was committed once, centered.
        assert_eq!(log.meters(), [90]);
        assert_eq!(log.sounds(), [SoundCue::RoundTied]);
        // Local side drew higher, its indicator flashed.
        let fx = log.take();
        assert!(fx.contains(&Effect::Player(PlayerSide::Local, true)));
        assert!(!fx.iter().any(|e| matches!(e, Effect::Player(PlayerSide::Peer, true))));
    }

    #[test]
    fn the_peer_indicator_flashes_when_they_draw_higher() {
        let (mut io, log) = probe_io();
        let mut session = Session::new(ScoreRules::default());
        let mut link = ScriptedLink::echoing((0, 2));
        let mut picker = FixedPicker(GameKind::LedBrightest);

        play_round(&mut session, &mut io, &mut link, &mut picker).unwrap();
        let fx = log.take();
        assert!(fx.contains(&Effect::Player(PlayerSide::Peer, true)));
    }

    #[test]
    fn a_number_draw_holds_dark_instead_of_flashing() {
        let (mut io, log) = probe_io();
        let mut session = Session::new(ScoreRules::default());
        let mut link = ScriptedLink::echoing((2, 2));
        let mut picker = FixedPicker(GameKind::LedFrequency);

        play_round(&mut session, &mut io, &mut link, &mut picker).unwrap();
        let fx = log.take();
        assert!(!fx.iter().any(|e| matches!(e, Effect::Player(_, true))));
        assert!(fx.contains(&Effect::Sleep(ROUND_END_FLASH_MS)));
    }

    #[test]
    fn a_dead_link_never_touches_the_score() {
        let (mut io, log) = probe_io();
        let mut session = Session::new(ScoreRules::default());
        let mut link = ScriptedLink {
            game_reply: None,
            numbers: Err(LinkError::Timeout),
        };
        let mut picker = FixedPicker(GameKind::PiezoRhythm);

        let err = play_round(&mut session, &mut io, &mut link, &mut picker).unwrap_err();
        assert_eq!(err, LinkError::Timeout);
        assert_eq!(session.score(), 0);
        assert_eq!(session.rounds_played(), 0);
        assert_eq!(session.phase(), SessionPhase::AwaitingRound);
        assert!(log.take().is_empty());
    }

    #[test]
    fn an_unknown_game_byte_aborts_before_the_score() {
        let (mut io, log) = probe_io();
        let mut session = Session::new(ScoreRules::default());
        let mut link = ScriptedLink {
            game_reply: Some(0xEE),
            numbers: Ok((1, 0)),
        };
        let mut picker = FixedPicker(GameKind::PiezoPitch);

        let err = play_round(&mut session, &mut io, &mut link, &mut picker).unwrap_err();
        assert_eq!(err, LinkError::UnknownGame(0xEE));
        assert_eq!(session.score(), 0);
        assert!(log.take().is_empty());
    }

    #[test]
    fn disagreeing_pickers_are_a_desync() {
        let (mut io, _log) = probe_io();
        let mut session = Session::new(ScoreRules::default());
        let mut link = ScriptedLink {
            game_reply: Some(GameKind::LightCover.code()),
            numbers: Ok((1, 0)),
        };
        let mut picker = FixedPicker(GameKind::PiezoPitch);

        let err = play_round(&mut session, &mut io, &mut link, &mut picker).unwrap_err();
        assert_eq!(err, LinkError::Desync);
        assert_eq!(session.score(), 0);
    }
}
