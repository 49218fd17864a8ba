//! Merchant description normalization and string similarity
//!
//! Bank statements render the same merchant inconsistently
//! ("NETFLIX.COM LOS GATOS CA" vs "NETFLIX.COM NETFLIX.COM CA"), so
//! clustering compares normalized descriptions with Jaro-Winkler
//! similarity rather than requiring exact matches.

/// Canonicalize a raw transaction description into a comparable key.
///
/// Uppercases and collapses runs of whitespace. Pure; no failure modes.
pub fn normalize_description(description: &str) -> String {
    description
        .to_uppercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// First whitespace-delimited token of a string, or "" when empty.
///
/// Used by the reconciler's fallback fingerprint.
pub fn first_token(s: &str) -> &str {
    s.split_whitespace().next().unwrap_or("")
}

/// Jaro similarity in [0, 1] over unicode scalar values.
fn jaro(s1: &str, s2: &str) -> f64 {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();

    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    // Characters match if equal and within half the longer length of each other
    let window = (a.len().max(b.len()) / 2).saturating_sub(1);

    let mut a_matched = vec![false; a.len()];
    let mut b_matched = vec![false; b.len()];
    let mut matches = 0usize;

    for (i, ca) in a.iter().enumerate() {
        let lo = i.saturating_sub(window);
        let hi = (i + window + 1).min(b.len());
        for j in lo..hi {
            if !b_matched[j] && *ca == b[j] {
                a_matched[i] = true;
                b_matched[j] = true;
                matches += 1;
                break;
            }
        }
    }

    if matches == 0 {
        return 0.0;
    }

    // Transpositions: matched characters appearing in a different order
    let mut transpositions = 0usize;
    let mut j = 0usize;
    for (i, matched) in a_matched.iter().enumerate() {
        if !matched {
            continue;
        }
        while !b_matched[j] {
            j += 1;
        }
        if a[i] != b[j] {
            transpositions += 1;
        }
        j += 1;
    }
    let t = transpositions as f64 / 2.0;

    let m = matches as f64;
    (m / a.len() as f64 + m / b.len() as f64 + (m - t) / m) / 3.0
}

/// Jaro-Winkler similarity in [0, 1].
///
/// Boosts the Jaro score for strings sharing a common prefix (capped at
/// 4 characters, scale 0.1) — merchant descriptions usually differ in
/// their location/ID suffix, not their leading merchant name.
pub fn jaro_winkler(s1: &str, s2: &str) -> f64 {
    let base = jaro(s1, s2);

    let prefix = s1
        .chars()
        .zip(s2.chars())
        .take(4)
        .take_while(|(c1, c2)| c1 == c2)
        .count();

    base + prefix as f64 * 0.1 * (1.0 - base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_uppercases_and_collapses_whitespace() {
        assert_eq!(
            normalize_description("  Netflix.com \t Los  Gatos CA "),
            "NETFLIX.COM LOS GATOS CA"
        );
        assert_eq!(normalize_description(""), "");
    }

    #[test]
    fn first_token_splits_on_whitespace() {
        assert_eq!(first_token("ACME CORP 123"), "ACME");
        assert_eq!(first_token("   "), "");
    }

    #[test]
    fn identical_strings_score_one() {
        assert!((jaro_winkler("NETFLIX", "NETFLIX") - 1.0).abs() < 1e-9);
    }

    #[test]
    fn disjoint_strings_score_zero() {
        assert_eq!(jaro_winkler("ABC", "XYZ"), 0.0);
    }

    #[test]
    fn empty_versus_nonempty_scores_zero() {
        assert_eq!(jaro_winkler("", "ABC"), 0.0);
    }

    #[test]
    fn commutative() {
        let a = "NETFLIX.COM LOS GATOS CA";
        let b = "NETFLIX.COM NETFLIX.COM CA";
        assert!((jaro_winkler(a, b) - jaro_winkler(b, a)).abs() < 1e-12);
    }

    #[test]
    fn merchant_variants_clear_the_clustering_threshold() {
        let score = jaro_winkler("NETFLIX.COM LOS GATOS CA", "NETFLIX.COM NETFLIX.COM CA");
        assert!(score > 0.7, "expected > 0.7, got {}", score);
    }

    #[test]
    fn unrelated_merchants_stay_below_threshold() {
        let score = jaro_winkler("NETFLIX.COM LOS GATOS CA", "SPOTIFY USA");
        assert!(score <= 0.7, "expected <= 0.7, got {}", score);
    }

    #[test]
    fn known_reference_value() {
        // Classic Winkler example: MARTHA vs MARHTA = 0.9611
        let score = jaro_winkler("MARTHA", "MARHTA");
        assert!((score - 0.9611).abs() < 0.001, "got {}", score);
    }
}
