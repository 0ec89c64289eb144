//! Sources of session tokens.

use rand::{distributions::Alphanumeric, rngs::SmallRng, Rng, SeedableRng};

/// Produces the token the session layer tags each run with.
pub trait TokenSource {
    fn next_token(&mut self) -> String;
}

/// Any closure returning a `String` is a token source, which lets tests pin
/// the token.
impl<F> TokenSource for F
where
    F: FnMut() -> String,
{
    fn next_token(&mut self) -> String {
        self()
    }
}

/// Random alphanumeric tokens of a fixed length.
#[derive(Debug, Clone)]
pub struct RandomTokens {
    rng: SmallRng,
    length: usize,
}

impl RandomTokens {
    /// Creates a source seeded from the operating system.
    pub fn new(length: usize) -> Self {
        Self {
            rng: SmallRng::from_entropy(),
            length,
        }
    }

    /// Creates a source that yields the same tokens for the same seed.
    pub fn seeded(seed: u64, length: usize) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            length,
        }
    }
}

impl TokenSource for RandomTokens {
    fn next_token(&mut self) -> String {
        (&mut self.rng)
            .sample_iter(&Alphanumeric)
            .take(self.length)
            .map(char::from)
            .collect()
    }
}
