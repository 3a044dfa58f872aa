//! Locale-aware string comparison for report columns.
//!
//! Approximates the root collation browsers use for `localeCompare`:
//! strings are compared letter-by-letter ignoring case and accents first,
//! then by accents, then by case (lowercase before uppercase). Punctuation
//! and spaces sort before digits, digits before letters.

use std::cmp::Ordering;

pub fn locale_compare(a: &str, b: &str) -> Ordering {
    primary_cmp(a, b)
        .then_with(|| secondary_cmp(a, b))
        .then_with(|| tertiary_cmp(a, b))
        .then_with(|| a.cmp(b))
}

fn primary_cmp(a: &str, b: &str) -> Ordering {
    a.chars().map(primary_weight).cmp(b.chars().map(primary_weight))
}

fn secondary_cmp(a: &str, b: &str) -> Ordering {
    a.chars().map(lower).cmp(b.chars().map(lower))
}

fn tertiary_cmp(a: &str, b: &str) -> Ordering {
    a.chars().map(case_weight).cmp(b.chars().map(case_weight))
}

fn primary_weight(c: char) -> (u8, char) {
    let base = strip_accent(lower(c));
    let class = if base.is_alphabetic() {
        2
    } else if base.is_numeric() {
        1
    } else {
        0
    };
    (class, base)
}

fn case_weight(c: char) -> u8 {
    u8::from(c.is_uppercase())
}

fn lower(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn strip_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' => 'a',
        'ç' | 'ć' | 'č' => 'c',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ę' => 'e',
        'ì' | 'í' | 'î' | 'ï' | 'ī' => 'i',
        'ñ' | 'ń' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' => 'o',
        'ù' | 'ú' | 'û' | 'ü' | 'ū' => 'u',
        'ý' | 'ÿ' => 'y',
        'š' | 'ś' => 's',
        'ž' | 'ź' | 'ż' => 'z',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_does_not_dominate_letter_order() {
        // Plain byte order would put "Zeta" before "acme".
        assert_eq!(locale_compare("acme", "Zeta"), Ordering::Less);
        assert_eq!(locale_compare("Zeta", "acme"), Ordering::Greater);
    }

    #[test]
    fn test_lowercase_sorts_before_uppercase_on_tie() {
        assert_eq!(locale_compare("acme", "Acme"), Ordering::Less);
        assert_eq!(locale_compare("Acme", "Acme"), Ordering::Equal);
    }

    #[test]
    fn test_accents_are_secondary() {
        assert_eq!(locale_compare("resume", "résumé"), Ordering::Less);
        assert_eq!(locale_compare("résumé", "resumes"), Ordering::Less);
    }

    #[test]
    fn test_punctuation_then_digits_then_letters() {
        assert_eq!(locale_compare("-A", "1A"), Ordering::Less);
        assert_eq!(locale_compare("1A", "AA"), Ordering::Less);
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(locale_compare("Brake", "Brake Pad"), Ordering::Less);
    }
}
