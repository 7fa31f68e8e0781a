//! Assertion helpers for tests.

use accumimage::{AccumImage, Accumulate, Nrgba};
use pretty_assertions::assert_eq;

/// Assert every pixel in the image averages to `expected`.
pub fn assert_uniform<A, C>(img: &AccumImage<A, C>, expected: Nrgba)
where
    A: Accumulate,
    C: std::ops::Deref<Target = [A]>,
{
    for p in img.bounds().points() {
        assert_eq!(img.nrgba_at(p.x, p.y), expected, "color at {p:?}");
    }
}

/// Assert every pixel in the image holds exactly `expected` samples.
pub fn assert_tally<A, C>(img: &AccumImage<A, C>, expected: u64)
where
    A: Accumulate,
    C: std::ops::Deref<Target = [A]>,
{
    for p in img.bounds().points() {
        assert_eq!(img.at(p.x, p.y).tally(), expected, "tally at {p:?}");
    }
}

/// Assert two channel values differ by at most `tolerance`.
pub fn assert_near(actual: u8, expected: u8, tolerance: u8, what: &str) {
    assert!(
        actual.abs_diff(expected) <= tolerance,
        "Expected {what} = {expected} +/- {tolerance}, got {actual}"
    );
}
