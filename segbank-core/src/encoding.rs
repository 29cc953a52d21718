//! Character to segment encoding
//!
//! Segment bytes are active-low: a 0 bit lights the segment, a 1 bit keeps
//! it dark. The common-anode modules on these boards sink current through
//! the register outputs, so this is fixed by the hardware.
//!
//! Bit layout (bit 7 first on the wire):
//!
//! ```text
//!  bit:  7   6   5   4   3   2   1   0
//!  seg:  DP  G   F   E   D   C   B   A
//!
//!    AAAAA
//!   F     B
//!   F     B
//!    GGGGG
//!   E     C
//!   E     C
//!    DDDDD  DP
//! ```

/// One digit's segment pattern (active-low)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Segments(u8);

impl Segments {
    /// Decimal point mask (bit 7)
    pub const DECIMAL_POINT: u8 = 0b1000_0000;

    /// All segments dark
    pub const BLANK: Segments = Segments(0xFF);

    /// All segments and the decimal point lit
    pub const ALL_LIT: Segments = Segments(0x00);

    /// Wrap a raw active-low byte
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Raw byte as shifted onto the bus
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Look up the pattern for a character
    ///
    /// Returns `None` for characters the table does not cover. `'.'` is not
    /// in the table; it is folded into the previous digit by the buffer.
    pub const fn from_char(c: char) -> Option<Self> {
        match encode(c) {
            Some(bits) => Some(Self(bits)),
            None => None,
        }
    }

    /// Same pattern with the decimal point lit
    pub const fn with_decimal_point(self) -> Self {
        Self(self.0 & !Self::DECIMAL_POINT)
    }

    /// Check if the decimal point is lit
    pub const fn has_decimal_point(self) -> bool {
        self.0 & Self::DECIMAL_POINT == 0
    }
}

impl Default for Segments {
    fn default() -> Self {
        Self::BLANK
    }
}

impl From<Segments> for u8 {
    fn from(s: Segments) -> u8 {
        s.0
    }
}

/// Every supported character and its segment byte
///
/// Case matters. Several characters share a pattern because seven segments
/// cannot tell them apart ('O'/'0'/'D', 'B'/'8', 'S'/'5', 'u'/'v', ...).
pub const CHARSET: [(char, u8); 44] = [
    ('0', 0xC0),
    ('1', 0xF9),
    ('2', 0xA4),
    ('3', 0xB0),
    ('4', 0x99),
    ('5', 0x92),
    ('6', 0x82),
    ('7', 0xF8),
    ('8', 0x80),
    ('9', 0x90),
    ('A', 0x88),
    ('B', 0x80),
    ('b', 0x83),
    ('c', 0xA7),
    ('C', 0xC6),
    ('d', 0xA1),
    ('D', 0xC0),
    ('E', 0x86),
    ('F', 0x8E),
    ('G', 0xC2),
    ('H', 0x89),
    ('i', 0xFB),
    ('I', 0xF9),
    ('j', 0xF3),
    ('J', 0xF1),
    ('L', 0xC3),
    ('n', 0xAB),
    ('o', 0xA3),
    ('O', 0xC0),
    ('P', 0x8C),
    ('q', 0x98),
    ('r', 0xCE),
    ('R', 0x88),
    ('S', 0x92),
    ('t', 0x87),
    ('u', 0xE3),
    ('U', 0xC1),
    ('v', 0xE3),
    ('V', 0xC1),
    ('Y', 0x91),
    ('‾', 0xFE),
    ('-', 0xBF),
    ('_', 0xF7),
    (' ', 0xFF),
];

/// Look up the raw segment byte for a character
pub const fn encode(c: char) -> Option<u8> {
    let mut i = 0;
    while i < CHARSET.len() {
        if CHARSET[i].0 == c {
            return Some(CHARSET[i].1);
        }
        i += 1;
    }
    None
}

/// Check if a character can be shown
pub const fn is_supported(c: char) -> bool {
    encode(c).is_some()
}
