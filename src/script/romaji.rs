//! Romaji transliteration of single kana characters

use super::{is_hiragana, is_katakana};
use wana_kana::ConvertJapanese;

/// Transliterates one kana character to romaji
///
/// Returns `None` for characters that are not kana or have no standalone
/// reading.
pub fn romanize(c: char) -> Option<String> {
    if !is_hiragana(c) && !is_katakana(c) {
        return None;
    }

    let mut buffer = [0u8; 4];
    let kana: &str = c.encode_utf8(&mut buffer);
    let romaji = kana.to_romaji();

    if romaji.is_empty() || romaji == kana {
        None
    } else {
        Some(romaji)
    }
}
