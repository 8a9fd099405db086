//! Aggregate views built on the match resolver: per-recipe scoring and
//! ranking, and the cross-recipe shopping list.
//!
//! Everything here is a pure function of (recipes, pantry); callers recompute
//! on every mutation instead of caching.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::matching::{MatchKind, find_pantry_match};
use crate::models::Recipe;

/// One recipe ingredient with its resolution against the pantry.
#[derive(Serialize, Clone, Debug)]
pub struct IngredientMatch {
    /// The ingredient as authored on the recipe.
    pub original_name: String,
    /// The stored pantry item that covers it, when satisfied.
    pub matched_with: Option<String>,
    pub kind: Option<MatchKind>,
    pub have: bool,
}

#[derive(Serialize, Clone, Debug)]
pub struct ScoredRecipe {
    #[serde(flatten)]
    pub recipe: Recipe,
    /// One entry per recipe ingredient, in recipe order.
    pub ingredient_matches: Vec<IngredientMatch>,
    /// Share of satisfied ingredients in [0, 100], rounded half-up.
    pub match_percentage: u8,
    /// Unsatisfied ingredient names (original spelling), in recipe order.
    pub missing_ingredients: Vec<String>,
    pub cookable: bool,
}

/// Score one recipe against the pantry.
///
/// A recipe with no ingredients counts as 100% and cookable; the zero case
/// cannot come from the CRUD surface (it rejects empty ingredient lists) but
/// the engine tolerates it rather than dividing by zero.
#[must_use]
pub fn score_recipe(recipe: &Recipe, pantry: &[String]) -> ScoredRecipe {
    let ingredient_matches: Vec<IngredientMatch> = recipe
        .ingredients
        .iter()
        .map(|ing| {
            let found = find_pantry_match(ing, pantry);
            IngredientMatch {
                original_name: ing.clone(),
                have: found.is_some(),
                matched_with: found.as_ref().map(|m| m.name.clone()),
                kind: found.map(|m| m.kind),
            }
        })
        .collect();

    let total = ingredient_matches.len();
    let missing_ingredients: Vec<String> = ingredient_matches
        .iter()
        .filter(|m| !m.have)
        .map(|m| m.original_name.clone())
        .collect();
    let missing = missing_ingredients.len();

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let match_percentage = if total == 0 {
        100
    } else {
        (((total - missing) as f64 / total as f64) * 100.0).round() as u8
    };

    ScoredRecipe {
        recipe: recipe.clone(),
        ingredient_matches,
        match_percentage,
        cookable: missing == 0,
        missing_ingredients,
    }
}

/// Score every recipe and rank for display: cookable recipes first, then by
/// match percentage. The sort is stable, so equal entries keep their prior
/// relative order.
#[must_use]
pub fn rank_recipes(recipes: &[Recipe], pantry: &[String]) -> Vec<ScoredRecipe> {
    let mut scored: Vec<ScoredRecipe> = recipes.iter().map(|r| score_recipe(r, pantry)).collect();
    scored.sort_by(|a, b| {
        b.cookable
            .cmp(&a.cookable)
            .then(b.match_percentage.cmp(&a.match_percentage))
    });
    scored
}

/// Distinct ingredients the planned recipes need that the pantry cannot
/// satisfy, sorted ascending.
///
/// Deduplication is by exact original string: two spellings of the same
/// normalized ingredient stay two list entries.
#[must_use]
pub fn shopping_list<'a, I>(planned: I, pantry: &[String]) -> Vec<String>
where
    I: IntoIterator<Item = &'a Recipe>,
{
    let mut needed = BTreeSet::new();
    for recipe in planned {
        for ing in &recipe.ingredients {
            if find_pantry_match(ing, pantry).is_none() {
                needed.insert(ing.clone());
            }
        }
    }
    needed.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::INITIAL_PANTRY;

    fn recipe(id: i64, name: &str, ingredients: &[&str]) -> Recipe {
        Recipe {
            id,
            name: name.to_string(),
            ingredients: ingredients.iter().map(|s| (*s).to_string()).collect(),
            instructions: String::new(),
            r#type: "Dinner".to_string(),
            notes: String::new(),
        }
    }

    fn pantry(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn fully_stocked_recipe_scores_100() {
        let pantry: Vec<String> = INITIAL_PANTRY.iter().map(|s| (*s).to_string()).collect();
        let r = recipe(1, "Scrambled Eggs", &["eggs", "milk", "butter", "salt", "pepper"]);
        let scored = score_recipe(&r, &pantry);
        assert_eq!(scored.match_percentage, 100);
        assert!(scored.cookable);
        assert!(scored.missing_ingredients.is_empty());
    }

    #[test]
    fn missing_ingredients_keep_recipe_order_and_spelling() {
        let r = recipe(1, "Burgers", &["ground beef", "Buns", "cheese"]);
        let scored = score_recipe(&r, &pantry(&["beef"]));
        // "ground beef" contains "beef" -> direct; the rest are missing.
        assert_eq!(scored.missing_ingredients, vec!["Buns", "cheese"]);
        assert!(!scored.cookable);
    }

    #[test]
    fn percentage_rounds_half_up() {
        // 1 of 8 satisfied = 12.5% -> 13.
        let r = recipe(
            1,
            "r",
            &["salt", "kale", "bread", "honey", "tofu", "rice", "corn", "beans"],
        );
        let scored = score_recipe(&r, &pantry(&["salt"]));
        assert_eq!(scored.match_percentage, 13);
    }

    #[test]
    fn empty_pantry_scores_zero() {
        let r = recipe(1, "r", &["salt", "pepper"]);
        let scored = score_recipe(&r, &[]);
        assert_eq!(scored.match_percentage, 0);
        assert_eq!(scored.missing_ingredients.len(), 2);
    }

    #[test]
    fn zero_ingredient_recipe_counts_as_fully_cookable() {
        let r = recipe(1, "r", &[]);
        let scored = score_recipe(&r, &pantry(&["salt"]));
        assert_eq!(scored.match_percentage, 100);
        assert!(scored.cookable);
    }

    #[test]
    fn cookable_recipes_rank_first_regardless_of_percentage() {
        // One ingredient fully stocked beats nine-of-ten stocked.
        let small = recipe(1, "small", &["salt"]);
        let big = recipe(
            2,
            "big",
            &["salt", "pepper", "eggs", "milk", "butter", "flour", "sugar", "garlic", "onion", "kale"],
        );
        let pantry = pantry(&[
            "salt", "pepper", "eggs", "milk", "butter", "flour", "sugar", "garlic", "onion",
        ]);
        let ranked = rank_recipes(&[big, small], &pantry);
        assert_eq!(ranked[0].recipe.name, "small");
        assert_eq!(ranked[1].match_percentage, 90);
    }

    #[test]
    fn ranking_ties_preserve_original_order() {
        let a = recipe(1, "a", &["salt"]);
        let b = recipe(2, "b", &["pepper"]);
        let ranked = rank_recipes(&[a, b], &pantry(&["salt", "pepper"]));
        assert_eq!(ranked[0].recipe.name, "a");
        assert_eq!(ranked[1].recipe.name, "b");
    }

    #[test]
    fn scoring_is_idempotent() {
        let r = recipe(1, "r", &["eggs", "buns"]);
        let p = pantry(&["eggs"]);
        let first = score_recipe(&r, &p);
        let second = score_recipe(&r, &p);
        assert_eq!(first.match_percentage, second.match_percentage);
        assert_eq!(first.missing_ingredients, second.missing_ingredients);
        assert_eq!(first.cookable, second.cookable);
    }

    #[test]
    fn shopping_list_dedupes_and_sorts() {
        let burgers = recipe(1, "Burgers", &["ground beef", "buns"]);
        let sliders = recipe(2, "Sliders", &["ground beef", "buns", "cheese"]);
        let p = pantry(&["ground beef"]);
        let list = shopping_list([&burgers, &sliders, &burgers], &p);
        assert_eq!(list, vec!["buns", "cheese"]);
    }

    #[test]
    fn shopping_list_dedupes_by_exact_original_string() {
        let a = recipe(1, "a", &["Buns"]);
        let b = recipe(2, "b", &["buns"]);
        let list = shopping_list([&a, &b], &[]);
        assert_eq!(list, vec!["Buns", "buns"]);
    }

    #[test]
    fn substitution_satisfied_ingredient_stays_off_the_list() {
        let bowl = recipe(1, "Egg Roll Bowl", &["coleslaw mix", "ginger"]);
        let list = shopping_list([&bowl], &pantry(&["cabbage"]));
        assert_eq!(list, vec!["ginger"]);
    }
}
