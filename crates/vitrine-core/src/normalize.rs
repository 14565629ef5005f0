//! Word normalization for catalog search.
//!
//! The storefront matches Portuguese product names, so normalization folds
//! diacritics to their ASCII base, lowercases, and strips a single trailing
//! plural suffix so singular queries match plural names and vice versa.
//!
//! Folding uses a fixed character map rather than full Unicode
//! decomposition: catalog text is storefront copy, and the Latin-1 accent
//! set covers every character observed in the data.

/// Trailing plural suffixes stripped by [`normalize_word`], checked in
/// order. The multi-letter suffixes come before the bare `s` so a word like
/// `"cordões"` loses the whole `oes` ending, not just the final letter.
const PLURAL_SUFFIXES: [&str; 6] = ["oes", "aes", "aos", "is", "ns", "s"];

/// Replaces accented Latin characters with their unaccented base.
#[must_use]
pub fn fold_diacritics(text: &str) -> String {
    text.chars().map(fold_char).collect()
}

fn fold_char(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'A',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'ç' => 'c',
        'Ç' => 'C',
        'ñ' => 'n',
        'Ñ' => 'N',
        _ => c,
    }
}

/// Folds diacritics and lowercases without touching plural endings.
///
/// This is the normalization applied to product names before substring
/// matching; only the query side gets plural stripping.
#[must_use]
pub fn normalize_text(text: &str) -> String {
    fold_diacritics(text).to_lowercase()
}

/// Fully normalizes one query word: trim, fold diacritics, lowercase, and
/// strip a single trailing plural suffix. Empty input yields an empty
/// string.
#[must_use]
pub fn normalize_word(word: &str) -> String {
    let folded = normalize_text(word.trim());
    strip_plural_suffix(&folded).to_owned()
}

fn strip_plural_suffix(word: &str) -> &str {
    for suffix in PLURAL_SUFFIXES {
        if let Some(stem) = word.strip_suffix(suffix) {
            return stem;
        }
    }
    word
}

/// The lighter stemmer used by suggestion ranking: words longer than three
/// characters lose a trailing `es`, otherwise a trailing `s`. Short words
/// pass through so `"mes"` does not collapse to `"me"`.
#[must_use]
pub fn singularize(word: &str) -> &str {
    if word.chars().count() > 3 {
        if let Some(stem) = word.strip_suffix("es") {
            return stem;
        }
        if let Some(stem) = word.strip_suffix('s') {
            return stem;
        }
    }
    word
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_diacritics_strips_accents() {
        assert_eq!(fold_diacritics("coleção"), "colecao");
        assert_eq!(fold_diacritics("Vestido Água"), "Vestido Agua");
    }

    #[test]
    fn fold_diacritics_leaves_ascii_untouched() {
        assert_eq!(fold_diacritics("plain text 123"), "plain text 123");
    }

    #[test]
    fn normalize_text_folds_and_lowercases() {
        assert_eq!(normalize_text("Vestido Azul É"), "vestido azul e");
    }

    #[test]
    fn normalize_word_strips_simple_plural() {
        assert_eq!(normalize_word("vestidos"), "vestido");
        assert_eq!(normalize_word("Saias"), "saia");
    }

    #[test]
    fn normalize_word_strips_compound_suffix_before_bare_s() {
        // "oes" must win over "s", otherwise only the final letter is lost.
        assert_eq!(normalize_word("cordões"), "cord");
        assert_eq!(normalize_word("pães"), "p");
    }

    #[test]
    fn normalize_word_empty_input_yields_empty() {
        assert_eq!(normalize_word(""), "");
        assert_eq!(normalize_word("   "), "");
    }

    #[test]
    fn singularize_strips_es_then_s() {
        assert_eq!(singularize("flores"), "flor");
        assert_eq!(singularize("casas"), "casa");
    }

    #[test]
    fn singularize_leaves_short_words_alone() {
        assert_eq!(singularize("mes"), "mes");
        assert_eq!(singularize("os"), "os");
    }
}
