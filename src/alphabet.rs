//! Character vocabulary for RUNT captchas.
//!
//! The portal renders fixed-length 5-character codes from a reduced set of
//! digits and lowercase letters. Visually confusable glyphs (i, j, l, o, q,
//! s, t, u, v, z and digits 0, 1, 9) are excluded by the portal itself, so
//! the model only ever has to tell apart these 23 symbols.

/// Symbols the captcha model can emit, in class-id order.
const CHARSET: [char; 23] = [
    '2', '3', '4', '5', '6', '7', '8', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'k', 'm', 'n',
    'p', 'r', 'w', 'x', 'y',
];

/// Every captcha on the portal is exactly this many characters.
pub const CAPTCHA_LENGTH: usize = 5;

/// Ordered captcha vocabulary. Index position is the symbol's class id; the
/// CTC blank class sits one past the end ([`Alphabet::blank_id`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alphabet;

impl Alphabet {
    /// Number of real (non-blank) symbols.
    pub fn len(&self) -> usize {
        CHARSET.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Class id reserved for the CTC blank symbol.
    pub fn blank_id(&self) -> usize {
        CHARSET.len()
    }

    /// Total number of model output classes (symbols + blank).
    pub fn class_count(&self) -> usize {
        CHARSET.len() + 1
    }

    /// Map a class id to its character. Returns `None` for the blank id and
    /// anything out of range.
    pub fn char_for(&self, class_id: usize) -> Option<char> {
        CHARSET.get(class_id).copied()
    }

    /// True if every character of `text` is drawn from the vocabulary.
    pub fn contains_all(&self, text: &str) -> bool {
        text.chars().all(|c| CHARSET.contains(&c))
    }

    /// The vocabulary as a string, in class-id order.
    pub fn symbols(&self) -> String {
        CHARSET.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_has_23_symbols() {
        assert_eq!(Alphabet.len(), 23);
        assert_eq!(Alphabet.class_count(), 24);
        assert_eq!(Alphabet.blank_id(), 23);
    }

    #[test]
    fn test_char_for_maps_in_order() {
        assert_eq!(Alphabet.char_for(0), Some('2'));
        assert_eq!(Alphabet.char_for(7), Some('a'));
        assert_eq!(Alphabet.char_for(22), Some('y'));
    }

    #[test]
    fn test_blank_id_has_no_char() {
        assert_eq!(Alphabet.char_for(Alphabet.blank_id()), None);
        assert_eq!(Alphabet.char_for(100), None);
    }

    #[test]
    fn test_confusable_glyphs_excluded() {
        for c in ['i', 'j', 'l', 'o', 'q', 's', 't', 'u', 'v', 'z', '0', '1', '9'] {
            assert!(!Alphabet.contains_all(&c.to_string()), "{c} should be excluded");
        }
    }

    #[test]
    fn test_contains_all() {
        assert!(Alphabet.contains_all("7wxy2"));
        assert!(!Alphabet.contains_all("7wxyz"));
        assert!(Alphabet.contains_all(""));
    }
}
