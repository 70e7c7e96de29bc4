/**
Tiny 16-bit linear congruential generator.

Good enough for drawing game numbers; the important property is that two
copies seeded identically step identically, which is what keeps the two
boards picking the same game each round.
*/
#[derive(Clone)]
pub struct Lcg {
    state: u16,
}

impl Lcg {
    pub fn new(seed: u16) -> Self {
        // a zero state would stay zero forever
        Self { state: seed | 1 }
    }

    pub fn next(&mut self) -> u16 {
        self.state = self.state.wrapping_mul(25173).wrapping_add(13849);
        self.state
    }

    /// Uniform-ish draw in `0..bound`. `bound` must be non-zero.
    pub fn roll(&mut self, bound: u8) -> u8 {
        (self.next() >> 8) as u8 % bound
    }
}
