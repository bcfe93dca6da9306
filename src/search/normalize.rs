//! Arabic text normalization for matching.
//!
//! Normalization only ever feeds comparisons; displayed text is never
//! rewritten.

/// Letter every hamza-bearing form collapses to
pub const CANONICAL_HAMZA_LETTER: char = 'ا';

const ALEF_WASLA: char = '\u{0671}';
const TATWEEL: char = '\u{0640}';
const HAMZA_ABOVE: char = '\u{0654}';
const HAMZA_BELOW: char = '\u{0655}';

/// Vowel marks, tanween, shadda, sukun and the other combining marks
/// written on Quranic text
pub fn is_diacritic(c: char) -> bool {
    matches!(c,
        '\u{0610}'..='\u{061A}'
        | '\u{064B}'..='\u{065F}'
        | '\u{0670}'
        | '\u{06D6}'..='\u{06DC}'
        | '\u{06DF}'..='\u{06E4}'
        | '\u{06E7}'..='\u{06E8}'
        | '\u{06EA}'..='\u{06ED}'
        | TATWEEL)
}

pub fn is_hamza_variant(c: char) -> bool {
    matches!(c, 'أ' | 'إ' | 'آ' | ALEF_WASLA | 'ء' | 'ؤ' | 'ئ')
}

/// Part of a word for whole-word matching. Combining marks count, so a
/// match that stops before a word's trailing vowel is not a whole word.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || is_diacritic(c)
}

/// Letters a combining hamza (U+0654/U+0655) can be written on
fn is_hamza_seat(c: char) -> bool {
    matches!(c, 'ا' | 'و' | 'ي' | 'ى')
}

/// Canonical form of `text` for comparison.
///
/// Diacritics are stripped before hamza forms are unified, so a mark left
/// on a hamza seat cannot stop it from being unified. A hamza written as a
/// combining mark is folded together with its seat letter, so it unifies
/// the same way as the precomposed letter. With neither flag set the text
/// comes back unchanged.
pub fn normalize(text: &str, ignore_diacritics: bool, ignore_hamza_variants: bool) -> String {
    if !ignore_diacritics && !ignore_hamza_variants {
        return text.to_string();
    }

    let mut out: Vec<char> = Vec::with_capacity(text.len());
    for c in text.chars() {
        if ignore_hamza_variants && matches!(c, HAMZA_ABOVE | HAMZA_BELOW) {
            let seat = out.iter().rposition(|prev| !is_diacritic(*prev));
            if let Some(idx) = seat.filter(|idx| is_hamza_seat(out[*idx])) {
                out[idx] = CANONICAL_HAMZA_LETTER;
                continue;
            }
        }
        if ignore_diacritics && is_diacritic(c) {
            continue;
        }

        let c = if ignore_diacritics && c == ALEF_WASLA { 'ا' } else { c };
        if ignore_hamza_variants && is_hamza_variant(c) {
            out.push(CANONICAL_HAMZA_LETTER);
        } else {
            out.push(c);
        }
    }
    out.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [&str; 6] = [
        "بِسْمِ ٱللَّهِ ٱلرَّحْمَٰنِ ٱلرَّحِيمِ",
        "يَٰٓأَيُّهَا ٱلنَّاسُ ٱعْبُدُوا۟ رَبَّكُمُ",
        "فَبِأَىِّ ءَالَآءِ رَبِّكُمَا تُكَذِّبَانِ",
        "إِيَّاكَ نَعْبُدُ وَإِيَّاكَ نَسْتَعِينُ",
        "\u{0627}\u{064E}\u{0654}\u{0628}\u{0654} \u{0648}\u{0654}\u{0654}",
        "",
    ];

    #[test]
    fn test_strips_diacritics() {
        assert_eq!(normalize(SAMPLES[0], true, false), "بسم الله الرحمن الرحيم");
        assert_eq!(normalize("ٱعْبُدُوا۟", true, false), "اعبدوا");
    }

    #[test]
    fn test_unifies_hamza() {
        assert_eq!(normalize("أإآءؤئ", false, true), "اااااا");
        assert_eq!(normalize(SAMPLES[3], true, true), "اياك نعبد واياك نستعين");
        // Diacritics alone leave the seated hamza in place.
        assert_eq!(normalize(SAMPLES[3], true, false), "إياك نعبد وإياك نستعين");
    }

    #[test]
    fn test_hamza_with_marks_kept() {
        // Marks survive, the seat letters are still unified.
        let normalized = normalize("أَ", false, true);
        assert_eq!(normalized, "اَ");
    }

    #[test]
    fn test_combining_hamza_unifies_with_precomposed() {
        // Alef, waw and yeh followed by U+0654/U+0655
        let decomposed = "\u{0627}\u{0654} \u{0627}\u{0655} \u{0648}\u{0654} \u{064A}\u{0654}";
        let precomposed = "أ إ ؤ ئ";
        assert_eq!(normalize(decomposed, false, true), "ا ا ا ا");
        assert_eq!(normalize(decomposed, false, true), normalize(precomposed, false, true));
        assert_eq!(normalize(decomposed, true, true), normalize(precomposed, true, true));
        // A vowel between seat and hamza does not hide the seat.
        assert_eq!(normalize("\u{0627}\u{064E}\u{0654}", false, true), "\u{0627}\u{064E}");
        // Without a seat the mark is kept unless diacritics are ignored.
        assert_eq!(normalize("\u{0628}\u{0654}", false, true), "\u{0628}\u{0654}");
        assert_eq!(normalize("\u{0628}\u{0654}", true, true), "\u{0628}");
    }

    #[test]
    fn test_no_flags_is_identity() {
        for sample in SAMPLES {
            assert_eq!(normalize(sample, false, false), sample);
        }
    }

    #[test]
    fn test_idempotent_for_all_flags() {
        for sample in SAMPLES {
            for (a, b) in [(false, false), (true, false), (false, true), (true, true)] {
                let once = normalize(sample, a, b);
                assert_eq!(normalize(&once, a, b), once, "flags ({}, {})", a, b);
            }
        }
    }

    #[test]
    fn test_word_chars() {
        assert!(is_word_char('ب'));
        assert!(is_word_char('\u{064E}'));
        assert!(!is_word_char(' '));
        assert!(!is_word_char('('));
    }
}
