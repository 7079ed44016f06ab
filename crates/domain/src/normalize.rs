// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Text normalization shared by every lookup and matching boundary.
//!
//! Department names, person names, and route destinations arrive as
//! free text with inconsistent casing and accents. All comparisons in
//! this system go through a single fold so that "Cuina", "cuina" and
//! "CUÏNA" select the same records. This is deliberately one shared
//! utility rather than per-call-site normalization.

/// Folds a single character to its unaccented lowercase form.
///
/// Covers the Latin-1 accented letters that occur in the business data
/// (Catalan and Spanish names). Characters outside the table pass
/// through `to_lowercase` unchanged.
const fn fold_char(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ä' | 'À' | 'Á' | 'Â' | 'Ä' => 'a',
        'è' | 'é' | 'ê' | 'ë' | 'È' | 'É' | 'Ê' | 'Ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' | 'Ì' | 'Í' | 'Î' | 'Ï' => 'i',
        'ò' | 'ó' | 'ô' | 'ö' | 'Ò' | 'Ó' | 'Ô' | 'Ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' | 'Ù' | 'Ú' | 'Û' | 'Ü' => 'u',
        'ç' | 'Ç' => 'c',
        'ñ' | 'Ñ' => 'n',
        _ => c,
    }
}

/// Normalizes free text into a canonical comparison key.
///
/// Trims surrounding whitespace, strips diacritics, and lowercases.
/// The result is what gets persisted as a department key and what both
/// sides of every name/destination comparison are reduced to.
///
/// # Arguments
///
/// * `input` - The raw text to normalize
#[must_use]
pub fn fold_key(input: &str) -> String {
    input
        .trim()
        .chars()
        .map(fold_char)
        .flat_map(char::to_lowercase)
        .collect()
}

/// Compares two pieces of free text for folded equality.
///
/// Used for person-name matching during roster close-out, where legacy
/// records lack stable ids. Duplicate names fold to the same key; that
/// collision is an accepted limitation of the legacy data.
#[must_use]
pub fn folded_eq(a: &str, b: &str) -> bool {
    fold_key(a) == fold_key(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_key_strips_accents_and_case() {
        assert_eq!(fold_key("Cuïna"), "cuina");
        assert_eq!(fold_key("  Logística "), "logistica");
        assert_eq!(fold_key("PRODUCCIÓ"), "produccio");
        assert_eq!(fold_key("Muñoz"), "munoz");
    }

    #[test]
    fn test_fold_key_passes_plain_text_through() {
        assert_eq!(fold_key("kitchen"), "kitchen");
        assert_eq!(fold_key("E1"), "e1");
    }

    #[test]
    fn test_folded_eq_matches_accented_variants() {
        assert!(folded_eq("Núria Vilà", "nuria vila"));
        assert!(folded_eq("JOSEP", "josep"));
        assert!(!folded_eq("Josep", "Jordi"));
    }

    #[test]
    fn test_fold_key_empty_and_whitespace() {
        assert_eq!(fold_key(""), "");
        assert_eq!(fold_key("   "), "");
    }
}
