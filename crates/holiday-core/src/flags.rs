//! Flag glyphs from ISO 3166 alpha-2 codes.

use crate::models::FALLBACK_EMOJI;

const REGIONAL_INDICATOR_A: u32 = 0x1F1E6;

/// Build the flag glyph for a two-letter country code.
///
/// Each letter maps to its regional indicator symbol (U+1F1E6 for `A`).
/// Returns `None` unless the input is exactly two ASCII letters.
pub fn flag_emoji(code: &str) -> Option<String> {
    let mut chars = code.chars();
    let first = chars.next()?;
    let second = chars.next()?;
    if chars.next().is_some() {
        return None;
    }

    [first, second].into_iter().map(regional_indicator).collect()
}

/// Flag glyph for `code`, or the party popper when none can be built.
pub fn flag_or_fallback(code: &str) -> String {
    flag_emoji(code).unwrap_or_else(|| FALLBACK_EMOJI.to_string())
}

fn regional_indicator(letter: char) -> Option<char> {
    if !letter.is_ascii_alphabetic() {
        return None;
    }
    let offset = letter.to_ascii_uppercase() as u32 - 'A' as u32;
    char::from_u32(REGIONAL_INDICATOR_A + offset)
}
