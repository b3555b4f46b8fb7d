//! Random key generation for the `rand` command.

use rand::Rng;

/// Characters random keys are drawn from.
pub const KEY_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Length of keys produced by the `rand` command.
pub const RANDOM_KEY_LEN: usize = 10;

/// Generate a key of `len` characters from [`KEY_ALPHABET`].
pub fn random_key<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(KEY_ALPHABET[rng.gen_range(0..KEY_ALPHABET.len())]))
        .collect()
}
