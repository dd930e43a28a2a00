//! Crockford-style base32 ("c32") used for address rendering.
//!
//! The encoding is big-endian over the whole input: the string is the
//! base-32 representation of the input read as one big number, and each
//! leading zero byte is kept as a leading `'0'` character.

use super::CryptoError;

pub const C32_ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Map a c32 character to its digit value
///
/// Lowercase input is accepted, and the usual ambiguous characters are
/// normalized (`O` reads as `0`, `I` and `L` read as `1`).
pub fn c32_digit(c: char) -> Result<u8, CryptoError> {
    let normalized = match c.to_ascii_uppercase() {
        'O' => '0',
        'I' | 'L' => '1',
        other => other,
    };

    C32_ALPHABET
        .iter()
        .position(|&a| a as char == normalized)
        .map(|p| p as u8)
        .ok_or(CryptoError::InvalidC32Character(c))
}

pub fn c32_encode(data: &[u8]) -> String {
    let mut out: Vec<u8> = Vec::with_capacity(data.len() * 8 / 5 + 1);
    let mut carry: u16 = 0;
    let mut carry_bits: u32 = 0;

    for &byte in data.iter().rev() {
        carry |= (byte as u16) << carry_bits;
        carry_bits += 8;
        while carry_bits >= 5 {
            out.push(C32_ALPHABET[(carry & 0x1f) as usize]);
            carry >>= 5;
            carry_bits -= 5;
        }
    }
    if carry_bits > 0 {
        out.push(C32_ALPHABET[(carry & 0x1f) as usize]);
    }

    // Drop the zero digits produced by the bit padding
    while out.last() == Some(&b'0') {
        out.pop();
    }
    for _ in data.iter().take_while(|b| **b == 0) {
        out.push(b'0');
    }

    out.iter().rev().map(|&b| b as char).collect()
}

pub fn c32_decode(input: &str) -> Result<Vec<u8>, CryptoError> {
    let mut out: Vec<u8> = Vec::with_capacity(input.len() * 5 / 8 + 1);
    let mut carry: u16 = 0;
    let mut carry_bits: u32 = 0;

    for c in input.chars().rev() {
        let digit = c32_digit(c)?;
        carry |= (digit as u16) << carry_bits;
        carry_bits += 5;
        if carry_bits >= 8 {
            out.push((carry & 0xff) as u8);
            carry >>= 8;
            carry_bits -= 8;
        }
    }
    if carry_bits > 0 && carry != 0 {
        out.push(carry as u8);
    }

    while out.last() == Some(&0) {
        out.pop();
    }
    for _ in input.chars().take_while(|c| c32_digit(*c) == Ok(0)) {
        out.push(0);
    }

    out.reverse();
    Ok(out)
}
