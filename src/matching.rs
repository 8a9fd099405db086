//! Decides whether one recipe ingredient is satisfied by the pantry.
//!
//! Matching is intentionally forgiving: after normalization and a crude
//! plural reduction, a pantry item satisfies an ingredient when either term
//! contains the other ("shredded cabbage" covers "cabbage"). Two curated
//! tables keep that generalization honest: an exception list of known bad
//! containment pairs, and a substitution map consulted only when no direct
//! match exists.

use serde::Serialize;

use crate::normalize::singularize;

/// Term pairs that must never match via containment, even though one string
/// includes the other. Checked as unordered pairs.
const FALSE_POSITIVES: &[(&str, &str)] = &[
    ("pepper", "bell pepper"),
    ("pepper", "jalapeno pepper"),
    ("pepper", "chili pepper"),
    ("tomato", "tomato sauce"),
    ("tomato", "tomato paste"),
    ("corn", "popcorn"),
    ("milk", "coconut milk"),
    ("milk", "almond milk"),
    ("oil", "boil"),
];

/// Acceptable stand-ins, keyed by the singularized recipe-side term. The
/// mapping is one-directional: a recipe declares the need, a pantry item
/// fills it. Order matters; earlier substitutes are preferred.
const COMMON_SUBSTITUTIONS: &[(&str, &[&str])] = &[
    (
        "coleslaw mix",
        &["cabbage", "shredded cabbage", "red cabbage", "green cabbage"],
    ),
    ("sour cream", &["greek yogurt", "plain yogurt", "yogurt"]),
    ("butter", &["margarine", "oil", "coconut oil", "ghee"]),
    (
        "milk",
        &[
            "almond milk",
            "soy milk",
            "oat milk",
            "coconut milk",
            "heavy cream",
            "half and half",
            "water",
        ],
    ),
    (
        "ground beef",
        &["ground turkey", "ground chicken", "lentils", "tofu"],
    ),
    ("ground turkey", &["ground beef", "ground chicken", "lentils"]),
    ("bread crumbs", &["oats", "crushed crackers", "croutons"]),
    ("egg", &["flax egg", "chia egg", "banana", "applesauce"]),
    ("sugar", &["honey", "maple syrup", "stevia"]),
    ("soy sauce", &["tamari", "coconut aminos"]),
    ("heavy cream", &["milk", "half and half"]),
];

/// How a pantry item satisfied a recipe ingredient.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Direct,
    Substitution,
}

/// A satisfied ingredient: which stored pantry item covers it, and how.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PantryMatch {
    /// The pantry item as stored (original casing/spacing).
    pub name: String,
    pub kind: MatchKind,
}

/// True when `{a, b}` equals a curated `{short, long}` exception pair.
#[must_use]
pub fn is_excluded_pair(a: &str, b: &str) -> bool {
    FALSE_POSITIVES
        .iter()
        .any(|&(short, long)| (a == short && b == long) || (b == short && a == long))
}

/// Substitutes listed for a singularized recipe-side term, in table order.
#[must_use]
pub fn substitutes_for(target: &str) -> Option<&'static [&'static str]> {
    COMMON_SUBSTITUTIONS
        .iter()
        .find(|&&(key, _)| key == target)
        .map(|&(_, subs)| subs)
}

/// Resolve one recipe ingredient against the pantry.
///
/// Pantry items are scanned in stored order, first hit wins. For each item:
/// exact equality of singularized terms matches immediately (exceptions do
/// not apply to equality), an excepted pair is skipped, otherwise mutual
/// containment matches. Only if the whole pass fails is the substitution
/// table consulted, again in pantry order with each listed substitute tried
/// in table order.
#[must_use]
pub fn find_pantry_match(recipe_ingredient: &str, pantry: &[String]) -> Option<PantryMatch> {
    let target = singularize(recipe_ingredient);

    for item in pantry {
        let source = singularize(item);
        if source == target {
            return Some(PantryMatch {
                name: item.clone(),
                kind: MatchKind::Direct,
            });
        }
        if is_excluded_pair(&source, &target) {
            continue;
        }
        if source.contains(&target) || target.contains(&source) {
            return Some(PantryMatch {
                name: item.clone(),
                kind: MatchKind::Direct,
            });
        }
    }

    if let Some(subs) = substitutes_for(&target) {
        for item in pantry {
            let source = singularize(item);
            let fits = subs.iter().any(|opt| {
                let opt = singularize(opt);
                source == opt || source.contains(&opt) || opt.contains(&source)
            });
            if fits {
                return Some(PantryMatch {
                    name: item.clone(),
                    kind: MatchKind::Substitution,
                });
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pantry(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn exact_match_wins() {
        let m = find_pantry_match("garlic", &pantry(&["garlic"])).unwrap();
        assert_eq!(m.name, "garlic");
        assert_eq!(m.kind, MatchKind::Direct);
    }

    #[test]
    fn containment_matches_descriptive_phrasing() {
        let m = find_pantry_match("cabbage", &pantry(&["shredded cabbage"])).unwrap();
        assert_eq!(m.name, "shredded cabbage");
        assert_eq!(m.kind, MatchKind::Direct);
    }

    #[test]
    fn plural_ingredient_matches_singular_item() {
        let m = find_pantry_match("eggs", &pantry(&["egg"])).unwrap();
        assert_eq!(m.kind, MatchKind::Direct);
    }

    #[test]
    fn excluded_pair_escapes_to_substitution() {
        // "coconut milk" must not directly satisfy "milk", but it is listed
        // as an acceptable milk substitute.
        let m = find_pantry_match("milk", &pantry(&["coconut milk"])).unwrap();
        assert_eq!(m.name, "coconut milk");
        assert_eq!(m.kind, MatchKind::Substitution);
    }

    #[test]
    fn excluded_pair_without_substitution_never_matches() {
        assert_eq!(find_pantry_match("pepper", &pantry(&["bell pepper"])), None);
    }

    #[test]
    fn exact_equality_beats_exclusion() {
        // Exclusion suppresses containment only, never equality.
        let m = find_pantry_match("bell pepper", &pantry(&["bell pepper"])).unwrap();
        assert_eq!(m.kind, MatchKind::Direct);
    }

    #[test]
    fn substitution_used_only_after_direct_pass_fails() {
        let m = find_pantry_match("coleslaw mix", &pantry(&["cabbage"])).unwrap();
        assert_eq!(m.name, "cabbage");
        assert_eq!(m.kind, MatchKind::Substitution);
    }

    #[test]
    fn first_pantry_item_wins_in_stored_order() {
        let m = find_pantry_match("cabbage", &pantry(&["red cabbage", "cabbage"])).unwrap();
        assert_eq!(m.name, "red cabbage");
    }

    #[test]
    fn duplicate_pantry_entries_are_tolerated() {
        let m = find_pantry_match("garlic", &pantry(&["garlic", "garlic"])).unwrap();
        assert_eq!(m.name, "garlic");
    }

    #[test]
    fn empty_pantry_matches_nothing() {
        assert_eq!(find_pantry_match("salt", &[]), None);
    }

    #[test]
    fn unknown_substitution_lookup_falls_through() {
        assert_eq!(substitutes_for("saffron"), None);
        assert_eq!(find_pantry_match("saffron", &pantry(&["rice"])), None);
    }

    #[test]
    fn excluded_pairs_are_unordered() {
        assert!(is_excluded_pair("oil", "boil"));
        assert!(is_excluded_pair("boil", "oil"));
        assert!(!is_excluded_pair("oil", "olive oil"));
    }
}
