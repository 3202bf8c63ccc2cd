//! The Helvetica family from the PDF standard 14 fonts.
//!
//! Every PDF viewer ships these, so they are written as bare Type1 references
//! without embedding any font data. Text is encoded as WinAnsi bytes; characters
//! outside that encoding print as `?`.

/// Advance widths in thousandths of an em for `' '..='~'`
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

const HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // '0'..'?'
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 'P'..'_'
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // '`'..'o'
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 'p'..'~'
];

/// `'\u{A0}'..='ÿ'`, which WinAnsi shares with Latin-1
const HELVETICA_LATIN1: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333, //
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611, //
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, //
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, //
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278, //
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500, //
];

const HELVETICA_BOLD_LATIN1: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333, //
    400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611, //
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, //
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, //
    556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278, //
    611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556, //
];

/// WinAnsi's additions in `0x80..=0x9F`: character, code, regular and bold width
const WIN_ANSI_EXTRAS: [(char, u8, u16, u16); 27] = [
    ('€', 0x80, 556, 556),
    ('‚', 0x82, 222, 278),
    ('ƒ', 0x83, 556, 556),
    ('„', 0x84, 333, 500),
    ('…', 0x85, 1000, 1000),
    ('†', 0x86, 556, 556),
    ('‡', 0x87, 556, 556),
    ('ˆ', 0x88, 333, 333),
    ('‰', 0x89, 1000, 1000),
    ('Š', 0x8A, 667, 667),
    ('‹', 0x8B, 333, 333),
    ('Œ', 0x8C, 1000, 1000),
    ('Ž', 0x8E, 611, 611),
    ('‘', 0x91, 222, 278),
    ('’', 0x92, 222, 278),
    ('“', 0x93, 333, 500),
    ('”', 0x94, 333, 500),
    ('•', 0x95, 350, 350),
    ('–', 0x96, 556, 556),
    ('—', 0x97, 1000, 1000),
    ('˜', 0x98, 333, 333),
    ('™', 0x99, 1000, 1000),
    ('š', 0x9A, 500, 556),
    ('›', 0x9B, 333, 333),
    ('œ', 0x9C, 944, 944),
    ('ž', 0x9E, 500, 500),
    ('Ÿ', 0x9F, 667, 667),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
}

impl StandardFont {
    /// Units per em of the width tables
    pub const UNITS_PER_EM: u16 = 1000;
    pub const ASCENT: i16 = 718;
    pub const DESCENT: i16 = -207;
    pub const LINE_GAP: i16 = 33;

    /// The PostScript name viewers know the font by
    pub fn base_font(self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::HelveticaOblique => "Helvetica-Oblique",
        }
    }

    /// The WinAnsi byte for `ch`, if it has one
    pub fn encode(ch: char) -> Option<u8> {
        match ch {
            ' '..='~' | '\u{A0}'..='ÿ' => Some(ch as u8),
            _ => WIN_ANSI_EXTRAS
                .iter()
                .find(|&&(extra, ..)| extra == ch)
                .map(|&(_, code, ..)| code),
        }
    }

    /// Advance of `ch` in thousandths of an em, as printed (unencodable
    /// characters take the width of `?`)
    pub fn advance(self, ch: char) -> u16 {
        let bold = self == StandardFont::HelveticaBold;
        let (ascii, latin1) = if bold {
            (&HELVETICA_BOLD_ASCII, &HELVETICA_BOLD_LATIN1)
        } else {
            (&HELVETICA_ASCII, &HELVETICA_LATIN1)
        };
        match ch {
            ' '..='~' => ascii[ch as usize - 0x20],
            '\u{A0}'..='ÿ' => latin1[ch as usize - 0xA0],
            _ => WIN_ANSI_EXTRAS
                .iter()
                .find(|&&(extra, ..)| extra == ch)
                .map(|&(_, _, regular, bold_width)| if bold { bold_width } else { regular })
                .unwrap_or(ascii['?' as usize - 0x20]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_come_from_the_right_table() {
        assert_eq!(StandardFont::Helvetica.advance('i'), 222);
        assert_eq!(StandardFont::HelveticaOblique.advance('i'), 222);
        assert_eq!(StandardFont::HelveticaBold.advance('i'), 278);
        assert_eq!(StandardFont::Helvetica.advance('W'), 944);
        assert_eq!(StandardFont::HelveticaBold.advance('é'), 556);
        assert_eq!(StandardFont::Helvetica.advance('—'), 1000);
        // not in WinAnsi: printed and measured as '?'
        assert_eq!(StandardFont::Helvetica.advance('漢'), 556);
    }

    #[test]
    fn encodes_win_ansi() {
        assert_eq!(StandardFont::encode('A'), Some(b'A'));
        assert_eq!(StandardFont::encode('é'), Some(0xE9));
        assert_eq!(StandardFont::encode('€'), Some(0x80));
        assert_eq!(StandardFont::encode('\u{81}'), None);
        assert_eq!(StandardFont::encode('漢'), None);
    }
}
