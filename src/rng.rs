//! Deterministic 32-bit xorshift stream.
//!
//! The whole pipeline is reproducible from an integer seed, so every stage
//! owns a local `Xorshift32` built from a derived sub-seed instead of
//! sharing a global generator. Identical seed means an identical output
//! sequence on every platform.

/// A 32-bit xorshift generator with a single word of state.
#[derive(Clone, Debug)]
pub struct Xorshift32 {
    state: u32,
}

impl Xorshift32 {
    /// Create a generator from a seed. Only the low 32 bits are used; a
    /// zero word is remapped to 1 because zero is a fixed point of the
    /// xorshift recurrence.
    pub fn new(seed: u64) -> Self {
        let word = seed as u32;
        Self {
            state: if word == 0 { 1 } else { word },
        }
    }

    fn step(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Next uniform float in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.step() as f64 / 4_294_967_296.0
    }

    /// Next raw 32-bit word from the stream.
    pub fn next_u32(&mut self) -> u32 {
        self.step()
    }

    /// Uniform index in `[0, max_exclusive)`.
    ///
    /// `max_exclusive` must be positive; callers guard empty candidate
    /// lists before drawing.
    pub fn next_index(&mut self, max_exclusive: usize) -> usize {
        assert!(max_exclusive > 0, "next_index requires a positive bound");
        (self.next_f64() * max_exclusive as f64) as usize
    }
}
