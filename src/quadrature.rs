//! Table-driven quadrature decoding.
//!
//! The decoder keeps the previous and current 2-bit phase samples as a 4-bit
//! code `prev << 2 | current`. Four codes move the count, and each one's
//! reverse moves it by the opposite amount, so a line that flips and flips
//! back nets zero. No change and the illegal both-bits-flipped codes map to
//! zero.

/// Step per history code.
///
/// Forward runs `00 -> 01 -> 11 -> 10 -> 00` and counts on `01 -> 11`
/// (0b0111) and `10 -> 00` (0b1000). Backward counts on the reverses of
/// those, `11 -> 01` (0b1101) and `00 -> 10` (0b0010).
const DIRECTION: [i8; 16] = [0, 0, -1, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, -1, 0, 0];

/// Rolling history for one encoder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QuadratureDecoder {
    history: u8,
}

impl QuadratureDecoder {
    #[must_use]
    pub const fn new() -> Self {
        Self { history: 0 }
    }

    /// Feeds the current A/B sample (low two bits of `raw`) and returns the
    /// step it completes: -1, 0 or +1.
    pub fn step(&mut self, raw: u8) -> i8 {
        self.history = ((self.history << 2) | (raw & 0b11)) & 0b1111;
        DIRECTION[usize::from(self.history)]
    }
}
