//! Injected randomness.
//!
//! Anything that picks at random (fallback replies, reply latency) takes a
//! `RandomSource` instead of reaching for a global generator.

/// A source of uniformly distributed choices.
pub trait RandomSource: Send {
    /// An index in `0..len`. `len` is never zero.
    fn index(&mut self, len: usize) -> usize;

    /// A value in `min..max`, or `min` when the range is empty.
    fn between(&mut self, min: u64, max: u64) -> u64;
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn index(&mut self, len: usize) -> usize {
        (**self).index(len)
    }

    fn between(&mut self, min: u64, max: u64) -> u64 {
        (**self).between(min, max)
    }
}
