//! JVM "modified UTF-8" as used for tag names and string payloads.
//!
//! Differs from UTF-8 in two ways: NUL is written as `C0 80`, and characters
//! outside the BMP are written as two 3-byte surrogate halves.

use crate::engine::nbt::errors::NbtError;

pub fn encode(s: &str) -> Vec<u8> {
    if !s.bytes().any(|b| b == 0) && s.len() == s.chars().count() {
        return s.as_bytes().to_vec();
    }

    let mut out = Vec::with_capacity(s.len() + 8);
    for unit in s.encode_utf16() {
        match unit {
            0x0001..=0x007F => out.push(unit as u8),
            0x0000 | 0x0080..=0x07FF => {
                out.push(0xC0 | ((unit >> 6) & 0x1F) as u8);
                out.push(0x80 | (unit & 0x3F) as u8);
            }
            _ => {
                out.push(0xE0 | ((unit >> 12) & 0x0F) as u8);
                out.push(0x80 | ((unit >> 6) & 0x3F) as u8);
                out.push(0x80 | (unit & 0x3F) as u8);
            }
        }
    }
    out
}

pub fn decode(bytes: &[u8]) -> Result<String, NbtError> {
    // Plain UTF-8 never contains `C0 80` or encoded surrogates, so anything
    // std accepts decodes identically.
    if let Ok(s) = std::str::from_utf8(bytes) {
        return Ok(s.to_string());
    }

    let mut units: Vec<u16> = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b & 0x80 == 0 {
            units.push(b as u16);
            i += 1;
        } else if b & 0xE0 == 0xC0 {
            let b2 = continuation(bytes, i + 1)?;
            units.push((((b & 0x1F) as u16) << 6) | b2);
            i += 2;
        } else if b & 0xF0 == 0xE0 {
            let b2 = continuation(bytes, i + 1)?;
            let b3 = continuation(bytes, i + 2)?;
            units.push((((b & 0x0F) as u16) << 12) | (b2 << 6) | b3);
            i += 3;
        } else {
            return Err(NbtError::InvalidString(format!(
                "unexpected byte 0x{:02X} at offset {}",
                b, i
            )));
        }
    }

    String::from_utf16(&units).map_err(|e| NbtError::InvalidString(e.to_string()))
}

fn continuation(bytes: &[u8], at: usize) -> Result<u16, NbtError> {
    match bytes.get(at) {
        Some(b) if b & 0xC0 == 0x80 => Ok((b & 0x3F) as u16),
        Some(b) => Err(NbtError::InvalidString(format!(
            "bad continuation byte 0x{:02X} at offset {}",
            b, at
        ))),
        None => Err(NbtError::InvalidString(
            "truncated multi-byte sequence".to_string(),
        )),
    }
}
