//! Random code and token generation.

use rand::Rng;

const ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                              abcdefghijklmnopqrstuvwxyz\
                              0123456789";
const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Generates a random string of `length` characters drawn from `charset`.
fn random_string(charset: &[u8], length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..charset.len());
            charset[idx] as char
        })
        .collect()
}

/// Six-digit email verification code in `100000..=999999`.
pub fn verification_code() -> String {
    rand::rng().random_range(100_000..=999_999).to_string()
}

/// 64-character alphanumeric token for password resets and refresh tokens.
pub fn secure_token() -> String {
    random_string(ALPHANUMERIC, 64)
}

/// Lower-case letters only, used for meeting link segments.
pub fn lowercase_letters(length: usize) -> String {
    random_string(LOWERCASE, length)
}
