//! Shifted-digit ciphertext streams.
//!
//! Every char of the plaintext is encrypted on its own. The decimal digits of
//! the resulting number are written as chars `100..=109` and the number is
//! closed by [`SEPARATOR`].

use crate::math::reduce;
use crate::rsa::{to_char, Key};
use log::{debug, trace};
use num::BigInt;

pub const DIGIT_OFFSET: u8 = 100;
pub const SEPARATOR: char = '\u{C8}';

pub(crate) fn shift_digit(digit: u8) -> char {
    debug_assert!(digit < 10, "{} is not a decimal digit", digit);
    char::from(DIGIT_OFFSET + digit)
}

/// Inverse of [`shift_digit`]. Chars outside the shifted range give values
/// outside `0..=9`.
pub fn unshift_digit(symbol: char) -> i64 {
    symbol as i64 - DIGIT_OFFSET as i64
}

pub fn encode(message: &str, public_key: &Key) -> String {
    let mut stream = String::new();
    for symbol in message.chars() {
        let encrypted = public_key.encrypt(symbol as u32);
        trace!("Encrypted {:?} to {}", symbol, encrypted);
        for digit in encrypted.to_str_radix(10).bytes() {
            stream.push(shift_digit(digit - b'0'));
        }
        stream.push(SEPARATOR);
    }
    stream
}

/// Digits after the last separator are discarded.
pub fn decode(stream: &str, private_key: &Key) -> String {
    let mut message = String::new();
    let mut accumulator = BigInt::ZERO;
    let mut pending = false;
    for symbol in stream.chars() {
        if symbol == SEPARATOR {
            let encrypted = reduce(&accumulator, private_key.modulus());
            let decrypted = private_key.decrypt(&encrypted);
            trace!("Decrypted {} to {}", encrypted, decrypted);
            message.push(to_char(&decrypted));
            accumulator = BigInt::ZERO;
            pending = false;
        }
        else {
            accumulator = accumulator * 10u8 + unshift_digit(symbol);
            pending = true;
        }
    }
    if pending {
        debug!("Dropping unterminated trailing number {}", accumulator);
    }
    message
}
