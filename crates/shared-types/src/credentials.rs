//! Random consumer key and secret generation.

use rand::distributions::{Alphanumeric, Uniform};
use rand::Rng;

const PUNCTUATION: &[u8] = b"!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Generate a key of `length` ASCII letters and digits.
pub fn generate_key(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Generate a secret of `length` ASCII letters, digits and punctuation.
pub fn generate_secret(length: usize) -> String {
    let charset: Vec<u8> = (b'a'..=b'z')
        .chain(b'A'..=b'Z')
        .chain(b'0'..=b'9')
        .chain(PUNCTUATION.iter().copied())
        .collect();
    let pick = Uniform::from(0..charset.len());
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| charset[rng.sample(pick)] as char)
        .collect()
}
