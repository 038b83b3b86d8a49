//! Phonetic encoding
//!
//! Double Metaphone produces a primary code for the most likely
//! pronunciation and an optional alternate for variants common in
//! European names. Marks that sound alike despite different spelling
//! ("Stephen" / "Steven") share a primary code.
//!
//! Input is prepared before encoding: accented Latin letters are reduced
//! to their base letter, dotless `ı` becomes `I`, runs of whitespace
//! collapse to a single separator and every other non-alphabetic
//! character is dropped.

use super::PhoneticEncoder;
use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Default maximum code length
pub const DEFAULT_MAX_CODE_LENGTH: usize = 4;

/// Pair of phonetic codes for one input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhoneticCode {
    /// Never empty.
    pub primary: String,
    /// Present only when it differs from `primary`.
    pub alternate: Option<String>,
}

impl PhoneticCode {
    /// True when both primary codes are equal.
    #[must_use]
    pub fn primary_matches(&self, other: &PhoneticCode) -> bool {
        self.primary == other.primary
    }
}

/// Double Metaphone phonetic encoder
///
/// # Parameters
/// - `max_length`: Maximum code length for both codes (default: 4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoubleMetaphone {
    pub max_length: usize,
}

impl Default for DoubleMetaphone {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_CODE_LENGTH,
        }
    }
}

impl DoubleMetaphone {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_length(max_length: usize) -> Self {
        Self { max_length }
    }
}

impl PhoneticEncoder for DoubleMetaphone {
    fn encode(&self, text: &str) -> Option<PhoneticCode> {
        double_metaphone(text, self.max_length)
    }

    fn name(&self) -> &'static str {
        "double_metaphone"
    }
}

/// Encode a string using the Double Metaphone algorithm.
///
/// Returns `None` when the input has nothing to encode (empty, digits or
/// punctuation only, letters that are all silent) or when `max_length` is 0.
///
/// # Examples
/// ```
/// use markwatch::algorithms::phonetic::double_metaphone;
///
/// let code = double_metaphone("Smith", 4).unwrap();
/// assert_eq!(code.primary, "SM0");
/// assert_eq!(code.alternate.as_deref(), Some("XMT"));
///
/// assert!(double_metaphone("1984", 4).is_none());
/// ```
#[must_use]
pub fn double_metaphone(s: &str, max_length: usize) -> Option<PhoneticCode> {
    if max_length == 0 {
        return None;
    }
    let chars = prepare(s);
    if !chars.iter().any(char::is_ascii_alphabetic) {
        return None;
    }

    let (primary, alternate) = Encoder::new(chars, max_length).run();
    if primary.is_empty() {
        return None;
    }
    let alternate = (!alternate.is_empty() && alternate != primary).then_some(alternate);
    Some(PhoneticCode { primary, alternate })
}

/// Reduce input to uppercase ASCII letters separated by single spaces.
fn prepare(s: &str) -> Vec<char> {
    let mut out: Vec<char> = Vec::with_capacity(s.len());
    for c in s.nfkd().filter(|c| !is_combining_mark(*c)) {
        let c = match c {
            'ı' => 'I',
            c if c.is_whitespace() => ' ',
            c => c.to_ascii_uppercase(),
        };
        if c == ' ' {
            if out.last().is_some_and(|last| *last != ' ') {
                out.push(' ');
            }
        } else if c.is_ascii_alphabetic() {
            out.push(c);
        }
    }
    if out.last() == Some(&' ') {
        out.pop();
    }
    out
}

#[inline]
fn is_vowel(c: Option<char>) -> bool {
    matches!(c, Some('A' | 'E' | 'I' | 'O' | 'U'))
}

/// Cursor over prepared input, accumulating both codes.
///
/// Each letter handler returns how many input characters it consumed.
struct Encoder {
    chars: Vec<char>,
    pos: usize,
    primary: String,
    alternate: String,
    max_length: usize,
    slavo_germanic: bool,
}

impl Encoder {
    fn new(chars: Vec<char>, max_length: usize) -> Self {
        let slavo_germanic = chars.iter().any(|&c| c == 'W' || c == 'K')
            || chars.windows(2).any(|w| w == ['C', 'Z'] || w == ['W', 'I']);
        Self {
            chars,
            pos: 0,
            primary: String::with_capacity(max_length),
            alternate: String::with_capacity(max_length),
            max_length,
            slavo_germanic,
        }
    }

    fn run(mut self) -> (String, String) {
        if self.starts_with(&["GN", "KN", "PN", "WR", "PS"]) {
            self.pos = 1;
        }
        if self.char_at(0) == Some('X') {
            self.add("S", "S");
            self.pos = 1;
        }

        while self.pos < self.chars.len() && !self.is_full() {
            let c = self.chars[self.pos];
            let step = match c {
                'A' | 'E' | 'I' | 'O' | 'U' => self.vowel(),
                'B' => self.doubled("P", 'B'),
                'C' => self.c(),
                'D' => self.d(),
                'F' => self.doubled("F", 'F'),
                'G' => self.g(),
                'H' => self.h(),
                'J' => self.j(),
                'K' => self.doubled("K", 'K'),
                'L' => self.l(),
                'M' => self.m(),
                'N' => self.doubled("N", 'N'),
                'P' => self.p(),
                'Q' => self.doubled("K", 'Q'),
                'R' => self.r(),
                'S' => self.s(),
                'T' => self.t(),
                'V' => self.doubled("F", 'V'),
                'W' => self.w(),
                'X' => self.x(),
                'Z' => self.z(),
                _ => 1,
            };
            self.pos += step;
        }

        (self.primary, self.alternate)
    }

    // --- lookups -----------------------------------------------------------

    fn char_at(&self, index: isize) -> Option<char> {
        usize::try_from(index).ok().and_then(|i| self.chars.get(i).copied())
    }

    /// Character at `offset` from the cursor.
    fn at(&self, offset: isize) -> Option<char> {
        self.char_at(self.pos as isize + offset)
    }

    fn matches_at_index(&self, index: isize, patterns: &[&str]) -> bool {
        patterns.iter().any(|p| {
            p.chars()
                .enumerate()
                .all(|(k, pc)| self.char_at(index + k as isize) == Some(pc))
        })
    }

    /// Any pattern starts at `offset` from the cursor.
    fn matches(&self, offset: isize, patterns: &[&str]) -> bool {
        self.matches_at_index(self.pos as isize + offset, patterns)
    }

    fn starts_with(&self, patterns: &[&str]) -> bool {
        self.matches_at_index(0, patterns)
    }

    fn ends_with(&self, patterns: &[&str]) -> bool {
        let len = self.chars.len() as isize;
        patterns
            .iter()
            .any(|p| self.matches_at_index(len - p.len() as isize, &[*p]))
    }

    fn is_last(&self) -> bool {
        self.pos + 1 == self.chars.len()
    }

    fn germanic_prefix(&self) -> bool {
        self.starts_with(&["VAN ", "VON ", "SCH"])
    }

    // --- output ------------------------------------------------------------

    fn add(&mut self, primary: &str, alternate: &str) {
        for c in primary.chars() {
            if self.primary.len() < self.max_length {
                self.primary.push(c);
            }
        }
        for c in alternate.chars() {
            if self.alternate.len() < self.max_length {
                self.alternate.push(c);
            }
        }
    }

    fn is_full(&self) -> bool {
        self.primary.len() >= self.max_length && self.alternate.len() >= self.max_length
    }

    // --- letter handlers ---------------------------------------------------

    /// Emit `code` and swallow an immediate repeat of `twin`.
    fn doubled(&mut self, code: &str, twin: char) -> usize {
        self.add(code, code);
        if self.at(1) == Some(twin) {
            2
        } else {
            1
        }
    }

    fn vowel(&mut self) -> usize {
        if self.pos == 0 {
            self.add("A", "A");
        }
        1
    }

    fn c(&mut self) -> usize {
        if self.matches(0, &["CIA"]) {
            self.add("X", "X");
            return 3;
        }
        if self.pos == 0 && self.matches(0, &["CAESAR"]) {
            self.add("S", "S");
            return 2;
        }
        if self.matches(0, &["CH"]) {
            if self.pos > 0 && self.matches(0, &["CHAE"]) {
                self.add("K", "X");
            } else if self.pos == 0
                && self.matches(1, &["HARAC", "HARIS", "HOR", "HYM", "HIA", "HEM"])
            {
                self.add("K", "K");
            } else if self.germanic_prefix()
                || self.matches(-2, &["ORCHES", "ARCHIT", "ORCHID"])
                || self.matches(2, &["T", "S"])
            {
                self.add("K", "K");
            } else if self.pos == 0 {
                self.add("X", "X");
            } else if self.starts_with(&["MC"]) {
                self.add("K", "K");
            } else {
                self.add("X", "K");
            }
            return 2;
        }
        if self.matches(0, &["CZ"]) && !self.matches(-2, &["WI"]) {
            self.add("S", "X");
            return 2;
        }
        if self.matches(1, &["CIA"]) {
            self.add("X", "X");
            return 3;
        }
        if self.matches(0, &["CC"]) && !(self.pos == 1 && self.char_at(0) == Some('M')) {
            if self.matches(2, &["I", "E", "H"]) && !self.matches(2, &["HU"]) {
                if (self.pos == 1 && self.char_at(0) == Some('A'))
                    || self.matches(-1, &["UCCEE", "UCCES"])
                {
                    self.add("KS", "KS");
                } else {
                    self.add("X", "X");
                }
                return 3;
            }
            self.add("K", "K");
            return 2;
        }
        if self.matches(0, &["CK", "CG", "CQ"]) {
            self.add("K", "K");
            return 2;
        }
        if self.matches(0, &["CI", "CE", "CY"]) {
            if self.matches(0, &["CIO", "CIE", "CIA"]) {
                self.add("S", "X");
            } else {
                self.add("S", "S");
            }
            return 2;
        }
        self.add("K", "K");
        if self.matches(1, &["C", "K", "G", "Q"]) {
            2
        } else {
            1
        }
    }

    fn d(&mut self) -> usize {
        if self.matches(0, &["DG"]) {
            if self.matches(2, &["I", "E", "Y"]) {
                self.add("J", "J");
                return 3;
            }
            self.add("TK", "TK");
            return 2;
        }
        self.add("T", "T");
        if self.matches(0, &["DT", "DD"]) {
            2
        } else {
            1
        }
    }

    fn g(&mut self) -> usize {
        let next = self.at(1);
        if next == Some('H') {
            return self.gh();
        }
        if next == Some('N') {
            if self.pos == 1 && is_vowel(self.char_at(0)) && !self.slavo_germanic {
                self.add("KN", "N");
            } else if !self.matches(2, &["EY"]) && !self.slavo_germanic {
                self.add("N", "KN");
            } else {
                self.add("KN", "KN");
            }
            return 2;
        }
        if self.matches(1, &["LI"]) && !self.slavo_germanic {
            self.add("KL", "L");
            return 2;
        }
        if self.pos == 0
            && (next == Some('Y')
                || self.matches(
                    1,
                    &["ES", "EP", "EB", "EL", "EY", "IB", "IL", "IN", "IE", "EI", "ER"],
                ))
        {
            self.add("K", "J");
            return 1;
        }
        if (self.matches(1, &["ER"]) || next == Some('Y'))
            && !self.starts_with(&["DANGER", "RANGER", "MANGER"])
            && !self.matches(-1, &["E", "I", "RGY", "OGY"])
        {
            self.add("K", "J");
            return 1;
        }
        if self.matches(1, &["E", "I", "Y"]) || self.matches(-1, &["AGGI", "OGGI"]) {
            if self.germanic_prefix() || self.matches(1, &["ET"]) {
                self.add("K", "K");
            } else if self.matches(1, &["IER"]) {
                self.add("J", "J");
            } else {
                self.add("J", "K");
            }
            return 1;
        }
        self.add("K", "K");
        if next == Some('G') {
            2
        } else {
            1
        }
    }

    fn gh(&mut self) -> usize {
        let prev = self.at(-1);
        if self.pos > 0 && !is_vowel(prev) {
            self.add("K", "K");
        } else if self.pos == 0 {
            if self.at(2) == Some('I') {
                self.add("J", "J");
            } else {
                self.add("K", "K");
            }
        } else if self.matches(-2, &["B", "H", "D"])
            || self.matches(-3, &["B", "H", "D"])
            || self.matches(-4, &["B", "H"])
        {
            // silent, as in "bought" or "hugh"
        } else if prev == Some('U') && self.matches(-3, &["C", "G", "L", "R", "T"]) {
            self.add("F", "F");
        } else if prev != Some('I') {
            self.add("K", "K");
        }
        2
    }

    fn h(&mut self) -> usize {
        if (self.pos == 0 || !is_vowel(self.at(-1))) && is_vowel(self.at(1)) {
            self.add("H", "H");
        }
        1
    }

    fn j(&mut self) -> usize {
        let prev = self.at(-1);
        let next = self.at(1);
        if self.matches(0, &["JOSE"]) || self.starts_with(&["SAN "]) {
            if (self.pos == 0 && self.at(4) == Some(' ')) || self.starts_with(&["SAN "]) {
                self.add("H", "H");
            } else {
                self.add("J", "H");
            }
        } else if self.pos == 0 {
            self.add("J", "A");
        } else if is_vowel(prev)
            && !self.slavo_germanic
            && matches!(next, Some('A' | 'O'))
        {
            self.add("J", "H");
        } else if self.is_last() {
            self.add("J", "");
        } else if !self.matches(1, &["L", "T", "K", "S", "N", "M", "B", "Z"])
            && !self.matches(-1, &["S", "K", "L"])
        {
            self.add("J", "J");
        }
        if next == Some('J') {
            2
        } else {
            1
        }
    }

    fn l(&mut self) -> usize {
        if self.at(1) != Some('L') {
            self.add("L", "L");
            return 1;
        }
        let spanish = (self.pos + 3 == self.chars.len()
            && self.matches(-1, &["ILLO", "ILLA", "ALLE"]))
            || ((self.ends_with(&["AS", "OS", "A", "O"])) && self.matches(-1, &["ALLE"]));
        if spanish {
            self.add("L", "");
        } else {
            self.add("L", "L");
        }
        2
    }

    fn m(&mut self) -> usize {
        self.add("M", "M");
        let silent_b = self.matches(-1, &["UMB"])
            && (self.pos + 2 == self.chars.len() || self.matches(2, &["ER"]));
        if silent_b || self.at(1) == Some('M') {
            2
        } else {
            1
        }
    }

    fn p(&mut self) -> usize {
        if self.at(1) == Some('H') {
            self.add("F", "F");
            return 2;
        }
        self.add("P", "P");
        if self.matches(1, &["P", "B"]) {
            2
        } else {
            1
        }
    }

    fn r(&mut self) -> usize {
        // French final R, as in "Rogier"
        if self.is_last()
            && !self.slavo_germanic
            && self.matches(-2, &["IE"])
            && !self.matches(-4, &["ME", "MA"])
        {
            self.add("", "R");
        } else {
            self.add("R", "R");
        }
        if self.at(1) == Some('R') {
            2
        } else {
            1
        }
    }

    fn s(&mut self) -> usize {
        if self.matches(-1, &["ISL", "YSL"]) {
            return 1;
        }
        if self.pos == 0 && self.matches(0, &["SUGAR"]) {
            self.add("X", "S");
            return 1;
        }
        if self.matches(0, &["SH"]) {
            if self.matches(1, &["HEIM", "HOEK", "HOLM", "HOLZ"]) {
                self.add("S", "S");
            } else {
                self.add("X", "X");
            }
            return 2;
        }
        if self.matches(0, &["SIO", "SIA"]) {
            if self.slavo_germanic {
                self.add("S", "S");
            } else {
                self.add("S", "X");
            }
            return 3;
        }
        if (self.pos == 0 && self.matches(1, &["M", "N", "L", "W"])) || self.matches(1, &["Z"]) {
            self.add("S", "X");
            return if self.matches(1, &["Z"]) { 2 } else { 1 };
        }
        if self.matches(0, &["SC"]) {
            return self.sc();
        }
        // French final S, as in "Artois"
        if self.is_last() && self.matches(-2, &["AI", "OI"]) {
            self.add("", "S");
        } else {
            self.add("S", "S");
        }
        if self.matches(1, &["S", "Z"]) {
            2
        } else {
            1
        }
    }

    fn sc(&mut self) -> usize {
        if self.at(2) == Some('H') {
            if self.matches(3, &["OO", "ER", "EN", "UY", "ED", "EM"]) {
                if self.matches(3, &["ER", "EN"]) {
                    self.add("X", "SK");
                } else {
                    self.add("SK", "SK");
                }
            } else if self.pos == 0 && !is_vowel(self.char_at(3)) && self.char_at(3) != Some('W') {
                self.add("X", "S");
            } else {
                self.add("X", "X");
            }
        } else if self.matches(2, &["I", "E", "Y"]) {
            self.add("S", "S");
        } else {
            self.add("SK", "SK");
        }
        3
    }

    fn t(&mut self) -> usize {
        if self.matches(0, &["TION", "TIA", "TCH"]) {
            self.add("X", "X");
            return 3;
        }
        if self.matches(0, &["TH", "TTH"]) {
            if self.matches(2, &["OM", "AM"]) || self.germanic_prefix() {
                self.add("T", "T");
            } else {
                // 0 stands for the theta sound
                self.add("0", "T");
            }
            return 2;
        }
        self.add("T", "T");
        if self.matches(1, &["T", "D"]) {
            2
        } else {
            1
        }
    }

    fn w(&mut self) -> usize {
        if self.matches(0, &["WR"]) {
            self.add("R", "R");
            return 2;
        }
        let next_vowel = is_vowel(self.at(1));
        if self.pos == 0 && (next_vowel || self.matches(0, &["WH"])) {
            if next_vowel {
                self.add("A", "F");
            } else {
                self.add("A", "A");
            }
            return 1;
        }
        if (self.is_last() && is_vowel(self.at(-1)))
            || self.matches(-1, &["EWSKI", "EWSKY", "OWSKI", "OWSKY"])
            || self.starts_with(&["SCH"])
        {
            self.add("", "F");
            return 1;
        }
        if self.matches(0, &["WICZ", "WITZ"]) {
            self.add("TS", "FX");
            return 4;
        }
        1
    }

    fn x(&mut self) -> usize {
        let french_silent =
            self.is_last() && (self.matches(-3, &["IAU", "EAU"]) || self.matches(-2, &["AU", "OU"]));
        if !french_silent {
            self.add("KS", "KS");
        }
        if self.matches(1, &["C", "X"]) {
            2
        } else {
            1
        }
    }

    fn z(&mut self) -> usize {
        if self.at(1) == Some('H') {
            self.add("J", "J");
            return 2;
        }
        if self.matches(1, &["ZO", "ZI", "ZA"])
            || (self.slavo_germanic && self.pos > 0 && self.at(-1) != Some('T'))
        {
            self.add("S", "TS");
        } else {
            self.add("S", "S");
        }
        if self.at(1) == Some('Z') {
            2
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn primary(s: &str) -> String {
        double_metaphone(s, DEFAULT_MAX_CODE_LENGTH)
            .map(|c| c.primary)
            .unwrap_or_default()
    }

    #[test]
    fn test_smith() {
        let code = double_metaphone("Smith", 4).unwrap();
        assert_eq!(code.primary, "SM0");
        assert_eq!(code.alternate.as_deref(), Some("XMT"));
    }

    #[test]
    fn test_sound_alikes_share_primary() {
        assert_eq!(primary("Stephen"), primary("Steven"));
        assert_eq!(primary("Katherine"), primary("Catherine"));
        assert_eq!(primary("phone"), primary("fone"));
        assert_ne!(primary("John"), primary("Mary"));
    }

    #[test]
    fn test_nothing_to_encode() {
        assert!(double_metaphone("", 4).is_none());
        assert!(double_metaphone("   ", 4).is_none());
        assert!(double_metaphone("2024 - 42", 4).is_none());
        assert!(double_metaphone("東京", 4).is_none());
        assert!(double_metaphone("abc", 0).is_none());
    }

    #[test]
    fn test_single_vowel() {
        assert_eq!(primary("A"), "A");
    }

    #[test]
    fn test_diacritics_fold_to_base_letter() {
        assert_eq!(primary("Çiçek"), primary("Cicek"));
        assert_eq!(primary("Kartalı"), primary("Kartali"));
        assert_eq!(primary("Müller"), primary("Muller"));
    }

    #[test]
    fn test_max_length_respected() {
        let code = double_metaphone("Anadolu Kartalı Sanayi", 4).unwrap();
        assert!(code.primary.len() <= 4);
        let long = double_metaphone("Anadolu Kartalı Sanayi", 12).unwrap();
        assert!(long.primary.len() > 4);
        assert!(long.primary.starts_with(&code.primary));
    }

    #[test]
    fn test_short_inputs_do_not_underflow() {
        for s in ["CH", "CHR", "LL", "GH", "W", "X", "SCH", "J", "R", "CZ", "UMB"] {
            let _ = double_metaphone(s, 4);
        }
    }

    #[test]
    fn test_alternate_absent_when_equal() {
        let code = double_metaphone("Anadolu", 4).unwrap();
        assert_eq!(code.alternate, None);
    }

    #[test]
    fn test_primary_matches_ignores_alternate() {
        let a = PhoneticCode {
            primary: "SM0".into(),
            alternate: Some("XMT".into()),
        };
        let b = PhoneticCode {
            primary: "XMT".into(),
            alternate: None,
        };
        assert!(!a.primary_matches(&b));
        assert!(a.primary_matches(&a.clone()));
    }

    #[test]
    fn test_encoder_trait() {
        let encoder = DoubleMetaphone::new();
        assert_eq!(encoder.name(), "double_metaphone");
        assert_eq!(encoder.encode("Smith").map(|c| c.primary).as_deref(), Some("SM0"));
        assert!(encoder.encode("!!!").is_none());
    }
}
