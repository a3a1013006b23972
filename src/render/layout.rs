//! Helvetica metrics, WinAnsi encoding and greedy word-wrap.

/// Glyph widths of Helvetica for ASCII 32..=126, in 1/1000 em.
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0..9
    278, 278, 584, 584, 584, 556, 1015, // :..@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A..M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N..Z
    278, 278, 278, 469, 556, 333, // [..`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a..m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n..z
    334, 260, 334, 584, // {..~
];

/// Width used for glyphs without a metrics entry.
const DEFAULT_WIDTH: u16 = 556;

/// Helvetica width of a character in 1/1000 em.
pub fn char_width(c: char) -> u16 {
    let code = c as u32;
    if (32..=126).contains(&code) {
        return HELVETICA_ASCII[(code - 32) as usize];
    }
    match c {
        '\u{00C6}' | '\u{0152}' => 1000, // Æ Œ
        '\u{00D0}' => 722,               // Ð
        '\u{00D8}' => 778,               // Ø
        '\u{00DE}' => 667,               // Þ
        '\u{00DF}' | '\u{00F8}' => 611,  // ß ø
        '\u{00E6}' => 889,               // æ
        '\u{0153}' => 944,               // œ
        '\u{00F0}' | '\u{00FE}' | '\u{0192}' => 556,
        c if c.is_whitespace() => 278,
        _ => DEFAULT_WIDTH,
    }
}

/// Rendered width of a string in points.
pub fn string_width(text: &str, font_size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(char_width(c))).sum();
    units as f32 * font_size / 1000.0
}

/// Encode a string for a WinAnsiEncoding simple font.
///
/// Returns `None` if any character has no WinAnsi code.
pub fn encode_win_ansi(text: &str) -> Option<Vec<u8>> {
    text.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(c: char) -> Option<u8> {
    let code = c as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as u8),
        _ => match c {
            '\u{20AC}' => Some(0x80),
            '\u{201A}' => Some(0x82),
            '\u{0192}' => Some(0x83),
            '\u{201E}' => Some(0x84),
            '\u{2026}' => Some(0x85),
            '\u{2020}' => Some(0x86),
            '\u{2021}' => Some(0x87),
            '\u{02C6}' => Some(0x88),
            '\u{2030}' => Some(0x89),
            '\u{0160}' => Some(0x8A),
            '\u{2039}' => Some(0x8B),
            '\u{0152}' => Some(0x8C),
            '\u{017D}' => Some(0x8E),
            '\u{2018}' => Some(0x91),
            '\u{2019}' => Some(0x92),
            '\u{201C}' => Some(0x93),
            '\u{201D}' => Some(0x94),
            '\u{2022}' => Some(0x95),
            '\u{2013}' => Some(0x96),
            '\u{2014}' => Some(0x97),
            '\u{02DC}' => Some(0x98),
            '\u{2122}' => Some(0x99),
            '\u{0161}' => Some(0x9A),
            '\u{203A}' => Some(0x9B),
            '\u{0153}' => Some(0x9C),
            '\u{017E}' => Some(0x9E),
            '\u{0178}' => Some(0x9F),
            _ => None,
        },
    }
}

/// Greedy word-wrap to a maximum rendered width.
///
/// Explicit newlines start new lines. Words are separated by runs of
/// whitespace and re-joined with single spaces. A word wider than the
/// limit is placed alone on its own line, uncut.
pub fn wrap_text(text: &str, font_size: f32, max_width: f32) -> Vec<String> {
    let space = string_width(" ", font_size);
    let mut lines = Vec::new();

    for source_line in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in source_line.split_whitespace() {
            let word_width = string_width(word, font_size);
            if current.is_empty() {
                current.push_str(word);
                current_width = word_width;
            } else if current_width + space + word_width <= max_width {
                current.push(' ');
                current.push_str(word);
                current_width += space + word_width;
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_width;
            }
        }

        lines.push(current);
    }

    lines
}

/// Cut a line to at most `max_chars` characters.
pub fn truncate_chars(line: &str, max_chars: usize) -> &str {
    match line.char_indices().nth(max_chars) {
        Some((idx, _)) => &line[..idx],
        None => line,
    }
}
