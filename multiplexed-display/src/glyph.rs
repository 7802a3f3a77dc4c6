//! Segment bit patterns for seven-segment digits.
//!
//! Each digit is one byte, with bit 0 as segment a:
//! ```text
//!   —0—
//!  |   |
//!  5   1
//!  |   |
//!   —6—
//!  |   |
//!  4   2
//!  |   |
//!   —3—  7.
//! ```

pub const SEGMENT_A: u8 = 0b0000_0001;
pub const SEGMENT_B: u8 = 0b0000_0010;
pub const SEGMENT_C: u8 = 0b0000_0100;
pub const SEGMENT_D: u8 = 0b0000_1000;
pub const SEGMENT_E: u8 = 0b0001_0000;
pub const SEGMENT_F: u8 = 0b0010_0000;
pub const SEGMENT_G: u8 = 0b0100_0000;
/// Only shown on displays configured with a decimal point segment.
pub const DECIMAL_POINT: u8 = 0b1000_0000;

pub const BLANK: u8 = 0;
pub const MINUS: u8 = SEGMENT_G;

/// Hexadecimal font, indexed by the value of the digit.
pub const HEX_GLYPHS: [u8; 16] = [
    0b0011_1111, // 0
    0b0000_0110,
    0b0101_1011,
    0b0100_1111,
    0b0110_0110,
    0b0110_1101,
    0b0111_1101,
    0b0000_0111,
    0b0111_1111,
    0b0110_1111,
    0b0111_0111, // A
    0b0111_1100,
    0b0011_1001,
    0b0101_1110,
    0b0111_1001,
    0b0111_0001,
];

/// Returns the glyph for `value` (0-15), or `None` if there is no glyph for it.
pub fn hex_glyph(value: u8) -> Option<u8> {
    HEX_GLYPHS.get(value as usize).copied()
}

/// Converts `char` to its segments. Only digits, dash, space, and ASCII
/// letters are supported. Letters K, M, Q, V, W, X, and Z can't be drawn on
/// seven segments and return `None`, as does anything else unsupported.
/// Case of letters is ignored.
pub fn char_glyph(char: char) -> Option<u8> {
    let data = match char.to_ascii_uppercase() {
        '0'..='9' => return char.to_digit(10).and_then(|d| hex_glyph(d as u8)),
        'A' => 0b0111_0111,
        'B' => 0b0111_1100,
        'C' => 0b0011_1001,
        'D' => 0b0101_1110,
        'E' => 0b0111_1001,
        'F' => 0b0111_0001,
        'G' => 0b0011_1101,
        'H' => 0b0111_0110,
        'I' => 0b0011_0000,
        'J' => 0b0001_1110,
        'L' => 0b0011_1000,
        'N' => 0b0101_0100,
        'O' => 0b0011_1111,
        'P' => 0b0111_0011,
        'R' => 0b0101_0000,
        'S' => 0b0110_1101,
        'T' => 0b0111_1000,
        'U' => 0b0011_1110,
        'Y' => 0b0110_1110,
        '-' => MINUS,
        ' ' => BLANK,
        _ => return None,
    };

    Some(data)
}
