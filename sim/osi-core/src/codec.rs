//! The reversible text transformations applied by the layers.
//!
//! Text is treated as a sequence of 8-bit character codes (Latin-1), which is
//! what lets every character become exactly one 8-bit group on the wire.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::num::NonZeroUsize;
use thiserror::Error as ThisError;

/// Number of bits each character occupies in a bit-string.
pub const BITS_PER_CHAR: usize = 8;

/// Inserted between transport segments.
pub const SEGMENT_DELIMITER: char = '|';

#[derive(Debug, ThisError, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("Character {character:?} at position {position} has no 8-bit code")]
    UnsupportedCharacter { character: char, position: usize },
    #[error("Session token {0:?} must be non-empty and free of '|' and ','")]
    InvalidSessionToken(String),
}

/// A value on the receive path is not in the shape its encoder produces.
#[derive(Debug, ThisError, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Bit-string of length {length} does not divide into 8-bit groups")]
    RaggedBitString { length: usize },
    #[error("Expected a bit at position {position}, found {found:?}")]
    InvalidBit { position: usize, found: char },
    #[error("The {header} header is not terminated by '|'")]
    MissingHeaderDelimiter { header: &'static str },
    #[error("Expected {expected} header fields, found {actual}")]
    HeaderFieldCount { expected: usize, actual: usize },
    #[error("Expected header field {expected}, found {found:?}")]
    UnexpectedField { expected: &'static str, found: String },
    #[error("Expected a segment delimiter at position {position}")]
    MissingSegmentDelimiter { position: usize },
    #[error("Segment delimiter at position {position} is not followed by a segment")]
    TrailingSegmentDelimiter { position: usize },
    #[error("Invalid presentation encoding: {0}")]
    InvalidEncoding(String),
    #[error("The captured presentation encoding does not match the received bits")]
    PresentationMismatch,
    #[error("No presentation encoding was captured while encoding")]
    NothingCaptured,
}

/// Translates each character to its 8-bit binary code, most significant bit
/// first, with no separators.
pub fn text_to_bits(text: &str) -> Result<String, EncodeError> {
    let mut bits = String::with_capacity(text.len() * BITS_PER_CHAR);
    for (position, character) in text.chars().enumerate() {
        let code = u8::try_from(character)
            .map_err(|_| EncodeError::UnsupportedCharacter { character, position })?;
        bits.push_str(&format!("{code:08b}"));
    }
    Ok(bits)
}

/// Inverse of [`text_to_bits`].
pub fn bits_to_text(bits: &str) -> Result<String, DecodeError> {
    let mut text = String::with_capacity(bits.len() / BITS_PER_CHAR);
    let mut code = 0u8;
    let mut filled = 0;
    let mut length = 0;
    for (position, bit) in bits.chars().enumerate() {
        let value = match bit {
            '0' => 0,
            '1' => 1,
            found => Err(DecodeError::InvalidBit { position, found })?,
        };
        code = (code << 1) | value;
        filled += 1;
        length += 1;
        if filled == BITS_PER_CHAR {
            text.push(char::from(code));
            code = 0;
            filled = 0;
        }
    }
    if filled != 0 {
        Err(DecodeError::RaggedBitString { length })?
    }
    Ok(text)
}

/// The first character of `text` without an 8-bit code, if any.
pub fn find_unsupported(text: &str) -> Option<EncodeError> {
    text.chars()
        .enumerate()
        .find(|(_, character)| u8::try_from(*character).is_err())
        .map(|(position, character)| EncodeError::UnsupportedCharacter { character, position })
}

/// Base64 of the text's 8-bit codes.
pub fn encode_presentation(text: &str) -> Result<String, EncodeError> {
    let bytes = text
        .chars()
        .enumerate()
        .map(|(position, character)| {
            u8::try_from(character)
                .map_err(|_| EncodeError::UnsupportedCharacter { character, position })
        })
        .collect::<Result<Vec<u8>, _>>()?;
    Ok(STANDARD.encode(bytes))
}

/// Inverse of [`encode_presentation`].
pub fn decode_presentation(encoded: &str) -> Result<String, DecodeError> {
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| DecodeError::InvalidEncoding(e.to_string()))?;
    Ok(bytes.into_iter().map(char::from).collect())
}

/// Splits `value` into segments of `length` characters. Only the last
/// segment may be shorter. An empty value has no segments.
pub fn segment(value: &str, length: NonZeroUsize) -> Vec<&str> {
    let mut segments = Vec::with_capacity(value.len() / length.get() + 1);
    let mut rest = value;
    while !rest.is_empty() {
        let end = rest
            .char_indices()
            .nth(length.get())
            .map_or(rest.len(), |(i, _)| i);
        let (head, tail) = rest.split_at(end);
        segments.push(head);
        rest = tail;
    }
    segments
}

/// Segments `value` and joins the segments with [`SEGMENT_DELIMITER`].
pub fn segment_and_join(value: &str, length: NonZeroUsize) -> String {
    segment(value, length).join(&SEGMENT_DELIMITER.to_string())
}

/// Inverse of [`segment_and_join`].
///
/// Delimiters are only recognized where segmentation put them, right after
/// every full segment, so a payload that itself contains `|` survives.
pub fn desegment(value: &str, length: NonZeroUsize) -> Result<String, DecodeError> {
    let mut joined = String::with_capacity(value.len());
    let mut run = 0;
    let mut delimiter_at = None;
    for (position, c) in value.chars().enumerate() {
        if run == length.get() {
            if c != SEGMENT_DELIMITER {
                Err(DecodeError::MissingSegmentDelimiter { position })?
            }
            run = 0;
            delimiter_at = Some(position);
            continue;
        }
        joined.push(c);
        run += 1;
        delimiter_at = None;
    }
    if let Some(position) = delimiter_at {
        Err(DecodeError::TrailingSegmentDelimiter { position })?
    }
    Ok(joined)
}
