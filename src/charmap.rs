//! # Character maps
//!
//! Map titles are shown in game with the console font, which carries decorative glyphs
//! (colored letters, brackets, numbers, bars) outside of ascii. A [`CharMap`] decides how each raw
//! byte of a title is displayed, with `None` dropping the byte from the title.

/// Translates a raw title byte into a display character
pub type CharMap = fn(u8) -> Option<char>;

/// Console font translation. The upper half of the font repeats the lower half in another color,
/// so the high bit is ignored.
pub fn quake(b: u8) -> Option<char> {
    match b & 0x7f {
        0x00 | 0x0a | 0x0d => None,
        0x10 => Some('['),
        0x11 => Some(']'),
        c @ 0x12..=0x1b => Some(char::from(b'0' + (c - 0x12))),
        0x05 | 0x0e | 0x0f | 0x1c => Some('.'),
        c @ 0x20..=0x7e => Some(char::from(c)),
        _ => Some('_'),
    }
}

/// Every byte is displayed as the latin-1 character of the same value
pub fn latin1(b: u8) -> Option<char> {
    Some(char::from(b))
}
