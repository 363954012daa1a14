use std::collections::BTreeSet;

const VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

/// Alternate inflections of `word` from simple english suffix rules.
///
/// Always contains `word` itself.
pub fn plural_variants(word: &str) -> BTreeSet<String> {
    let mut variants = BTreeSet::new();
    variants.insert(word.to_owned());

    if let Some(stem) = word.strip_suffix("ies") {
        variants.insert(format!("{stem}y"));
    } else if let Some(stem) = word.strip_suffix("es") {
        variants.insert(stem.to_owned());
        variants.insert(format!("{stem}e"));
    } else if let Some(stem) = word.strip_suffix('s') {
        if !stem.ends_with('s') {
            variants.insert(stem.to_owned());
        }
    } else {
        variants.insert(format!("{word}s"));

        if let Some(stem) = word.strip_suffix('y') {
            if stem.chars().last().is_some_and(is_consonant) {
                variants.insert(format!("{stem}ies"));
            }
        }

        if ["ch", "sh", "x", "o"]
            .iter()
            .any(|suffix| word.ends_with(suffix))
        {
            variants.insert(format!("{word}es"));
        }
    }

    variants
}

/// Whether any inflection of `a` equals any inflection of `b`.
pub fn plural_equivalent(a: &str, b: &str) -> bool {
    let b_variants = plural_variants(b);

    plural_variants(a)
        .iter()
        .any(|variant| b_variants.contains(variant))
}

fn is_consonant(ch: char) -> bool {
    ch.is_alphabetic() && !VOWELS.contains(&ch)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use pretty_assertions::assert_eq;

    use super::{plural_equivalent, plural_variants};

    fn set(words: &[&str]) -> BTreeSet<String> {
        words.iter().map(|w| (*w).to_owned()).collect()
    }

    #[test]
    fn ies_to_y() {
        assert_eq!(plural_variants("berries"), set(&["berries", "berry"]));
    }

    #[test]
    fn es_strips_both_ways() {
        assert_eq!(plural_variants("boxes"), set(&["boxes", "box", "boxe"]));
    }

    #[test]
    fn plain_s_stripped() {
        assert_eq!(plural_variants("cats"), set(&["cats", "cat"]));
    }

    #[test]
    fn double_s_left_alone() {
        assert_eq!(plural_variants("glass"), set(&["glass"]));
    }

    #[test]
    fn consonant_y_gets_ies() {
        assert_eq!(
            plural_variants("butterfly"),
            set(&["butterfly", "butterflys", "butterflies"])
        );
    }

    #[test]
    fn vowel_y_only_gets_s() {
        assert_eq!(plural_variants("key"), set(&["key", "keys"]));
    }

    #[test]
    fn sibilant_and_o_get_es() {
        assert!(plural_variants("church").contains("churches"));
        assert!(plural_variants("dish").contains("dishes"));
        assert!(plural_variants("fox").contains("foxes"));
        assert!(plural_variants("potato").contains("potatoes"));
    }

    #[test]
    fn always_contains_input() {
        for word in ["", "s", "ies", "glass", "berries", "octopus", "tomato"] {
            assert!(plural_variants(word).contains(word), "{word}");
        }
    }

    #[test]
    fn equivalence_is_symmetric() {
        assert!(plural_equivalent("butterfly", "butterflies"));
        assert!(plural_equivalent("butterflies", "butterfly"));
        assert!(plural_equivalent("glass", "glasses"));
        assert!(!plural_equivalent("cat", "dog"));
    }
}
