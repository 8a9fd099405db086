//! In-process session state: pantry, recipe book and weekly meal plan.
//!
//! Nothing here is durable; the store lives for the lifetime of the server
//! and all derived views (scores, shopping list) are recomputed from it on
//! demand.

use crate::models::Recipe;
use crate::normalize::normalize;

pub const DAYS_OF_WEEK: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

pub const INITIAL_PANTRY: [&str; 14] = [
    "eggs",
    "milk",
    "butter",
    "flour",
    "sugar",
    "salt",
    "pepper",
    "garlic",
    "onion",
    "pasta",
    "tomato sauce",
    "beef",
    "cabbage",
    "soy sauce",
];

pub struct Store {
    /// Stored in insertion order, original spelling preserved.
    pantry: Vec<String>,
    recipes: Vec<Recipe>,
    /// Recipe ids per day, parallel to `DAYS_OF_WEEK`. A recipe may appear
    /// several times across days or within one day.
    meal_plan: Vec<Vec<i64>>,
    next_id: i64,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    #[must_use]
    pub fn new() -> Self {
        Self {
            pantry: Vec::new(),
            recipes: Vec::new(),
            meal_plan: vec![Vec::new(); DAYS_OF_WEEK.len()],
            next_id: 1,
        }
    }

    /// Session defaults: the starter pantry and the four sample recipes.
    #[must_use]
    pub fn seeded() -> Self {
        let mut store = Self::new();
        store.pantry = INITIAL_PANTRY.iter().map(|s| (*s).to_string()).collect();
        for (name, ingredients, instructions, kind, notes) in [
            (
                "Turkey Egg Roll Bowl",
                vec!["ground beef", "coleslaw mix", "soy sauce", "ginger", "garlic", "onion"],
                "1. Brown the meat with onion and garlic.\n2. Add coleslaw mix and cook until wilted.\n3. Stir in soy sauce and ginger.\n4. Serve over rice or on its own.",
                "Dinner",
                "Great for meal prep!",
            ),
            (
                "Classic Burgers",
                vec!["ground beef", "buns", "cheese", "lettuce", "tomato", "onion"],
                "1. Form ground beef into patties.\n2. Season with salt and pepper.\n3. Grill or pan fry for 4-5 mins per side.\n4. Toast buns and assemble with toppings.",
                "Dinner",
                "",
            ),
            (
                "Scrambled Eggs",
                vec!["eggs", "milk", "butter", "salt", "pepper"],
                "1. Crack eggs into a bowl.\n2. Add a splash of milk and whisk.\n3. Melt butter in a non-stick pan.\n4. Pour in eggs and cook gently, stirring constantly.",
                "Breakfast",
                "Add cheese at the end.",
            ),
            (
                "Simple Pasta",
                vec!["pasta", "tomato sauce", "garlic", "onion", "salt"],
                "1. Boil salted water and cook pasta.\n2. Meanwhile, sauté chopped garlic and onion.\n3. Add tomato sauce and simmer.\n4. Drain pasta and toss with sauce.",
                "Dinner",
                "",
            ),
        ] {
            let id = store.alloc_id();
            store.recipes.push(Recipe {
                id,
                name: name.to_string(),
                ingredients: ingredients.into_iter().map(str::to_string).collect(),
                instructions: instructions.to_string(),
                r#type: kind.to_string(),
                notes: notes.to_string(),
            });
        }
        store
    }

    fn alloc_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /* ---- Pantry ---- */

    #[must_use]
    pub fn pantry(&self) -> &[String] {
        &self.pantry
    }

    /// Add an item, deduplicating case/whitespace-insensitively while keeping
    /// the caller's spelling. Returns false on a duplicate.
    pub fn add_pantry_item(&mut self, raw: &str) -> bool {
        let key = normalize(raw);
        if self.pantry.iter().any(|item| normalize(item) == key) {
            return false;
        }
        self.pantry.push(raw.trim().to_string());
        true
    }

    /// Remove by exact stored spelling. Returns how many entries went away.
    pub fn remove_pantry_item(&mut self, name: &str) -> usize {
        let before = self.pantry.len();
        self.pantry.retain(|item| item != name);
        before - self.pantry.len()
    }

    pub fn clear_pantry(&mut self) -> usize {
        let n = self.pantry.len();
        self.pantry.clear();
        n
    }

    /* ---- Recipes ---- */

    #[must_use]
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    #[must_use]
    pub fn recipe(&self, id: i64) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    pub fn recipe_mut(&mut self, id: i64) -> Option<&mut Recipe> {
        self.recipes.iter_mut().find(|r| r.id == id)
    }

    pub fn insert_recipe(&mut self, recipe: Recipe) {
        self.recipes.push(recipe);
    }

    /// Generated recipes go to the front of the book, like the original app.
    pub fn insert_recipe_front(&mut self, recipe: Recipe) {
        self.recipes.insert(0, recipe);
    }

    pub fn next_recipe_id(&mut self) -> i64 {
        self.alloc_id()
    }

    /// Delete a recipe and drop every meal-plan slot that referenced it.
    pub fn remove_recipe(&mut self, id: i64) -> bool {
        let before = self.recipes.len();
        self.recipes.retain(|r| r.id != id);
        if self.recipes.len() == before {
            return false;
        }
        for day in &mut self.meal_plan {
            day.retain(|&rid| rid != id);
        }
        true
    }

    /* ---- Meal plan ---- */

    #[must_use]
    pub fn day_index(day: &str) -> Option<usize> {
        DAYS_OF_WEEK.iter().position(|d| *d == day)
    }

    /// Recipe ids planned for one day, in assignment order.
    #[must_use]
    pub fn planned_for_day(&self, day_idx: usize) -> &[i64] {
        &self.meal_plan[day_idx]
    }

    pub fn assign(&mut self, day_idx: usize, recipe_id: i64) {
        self.meal_plan[day_idx].push(recipe_id);
    }

    /// Remove every occurrence of the recipe on that day.
    pub fn unassign(&mut self, day_idx: usize, recipe_id: i64) -> usize {
        let day = &mut self.meal_plan[day_idx];
        let before = day.len();
        day.retain(|&rid| rid != recipe_id);
        before - day.len()
    }

    /// All planned recipes across the week, flattened in day order. Slots
    /// whose recipe has since been deleted are skipped (deletion cascades, so
    /// this only covers torn states mid-mutation).
    #[must_use]
    pub fn planned_recipes(&self) -> Vec<&Recipe> {
        self.meal_plan
            .iter()
            .flatten()
            .filter_map(|&id| self.recipe(id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pantry_dedupes_case_insensitively_but_keeps_spelling() {
        let mut store = Store::new();
        assert!(store.add_pantry_item(" Soy Sauce "));
        assert!(!store.add_pantry_item("soy sauce"));
        assert_eq!(store.pantry(), ["Soy Sauce"]);
    }

    #[test]
    fn removing_a_recipe_clears_its_plan_slots() {
        let mut store = Store::seeded();
        let id = store.recipes()[0].id;
        let monday = Store::day_index("Monday").unwrap();
        let friday = Store::day_index("Friday").unwrap();
        store.assign(monday, id);
        store.assign(friday, id);
        assert!(store.remove_recipe(id));
        assert!(store.planned_for_day(monday).is_empty());
        assert!(store.planned_for_day(friday).is_empty());
    }

    #[test]
    fn unassign_removes_every_occurrence_that_day() {
        let mut store = Store::seeded();
        let id = store.recipes()[0].id;
        let monday = Store::day_index("Monday").unwrap();
        store.assign(monday, id);
        store.assign(monday, id);
        assert_eq!(store.unassign(monday, id), 2);
    }

    #[test]
    fn day_index_rejects_unknown_labels() {
        assert!(Store::day_index("Funday").is_none());
        assert_eq!(Store::day_index("Sunday"), Some(6));
    }
}
