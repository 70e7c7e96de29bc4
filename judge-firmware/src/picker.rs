use crate::rng::Lcg;
use judge_core::game::GameKind;
use judge_core::io::GamePicker;

/**
Picks each round's game from the handshake seed.

Both boards construct this from the same seed and feed it the same
previous game, so the sequence is identical on both sides without any
extra traffic. Never repeats the game just played.
*/
pub struct SeededPicker {
    rng: Lcg,
}

impl SeededPicker {
    pub fn new(seed: u16) -> Self {
        Self { rng: Lcg::new(seed) }
    }
}

impl GamePicker for SeededPicker {
    fn next_game(&mut self, prev: Option<GameKind>) -> GameKind {
        loop {
            let kind = GameKind::ALL[self.rng.roll(GameKind::ALL.len() as u8) as usize];
            if prev != Some(kind) {
                return kind;
            }
        }
    }
}
