use log::debug;

use crate::error::BrowserError;
use crate::ingredients::{self, ParsedIngredient};
use crate::model::{Like, RawRecipe};

/// Serving count assumed for catalog recipes, which carry none of their own.
pub const DEFAULT_SERVINGS: u32 = 4;

const INGREDIENTS_PER_PERIOD: usize = 3;
const MINUTES_PER_PERIOD: u32 = 15;

/// The recipe currently being viewed, with its ingredients parsed.
///
/// Parsed ingredients are computed once, when the recipe is built from the
/// catalog response, and kept as the base for every later rescale.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub publisher: String,
    pub image_url: String,
    pub source_url: String,
    pub publisher_url: Option<String>,
    raw_ingredients: Vec<String>,
    base_ingredients: Vec<ParsedIngredient>,
    ingredients: Vec<ParsedIngredient>,
    base_servings: u32,
    servings: u32,
    prep_time_minutes: u32,
}

impl Recipe {
    /// Build a recipe from a catalog response, parsing every non-blank
    /// ingredient line.
    pub fn from_raw(raw: RawRecipe, base_servings: u32) -> Result<Self, BrowserError> {
        if base_servings == 0 {
            return Err(BrowserError::InvalidArgument(
                "base servings must be at least 1".to_string(),
            ));
        }

        let base_ingredients: Vec<ParsedIngredient> = raw
            .ingredients
            .iter()
            .filter(|line| !line.trim().is_empty())
            .map(|line| ingredients::parse(line))
            .collect();
        debug!(
            "Parsed {} ingredients for recipe {}",
            base_ingredients.len(),
            raw.id
        );

        let mut recipe = Recipe {
            id: raw.id,
            title: raw.title,
            publisher: raw.publisher,
            image_url: raw.image_url,
            source_url: raw.source_url,
            publisher_url: raw.publisher_url,
            raw_ingredients: raw.ingredients,
            ingredients: base_ingredients.clone(),
            base_ingredients,
            base_servings,
            servings: base_servings,
            prep_time_minutes: 0,
        };
        recipe.calculate_time();
        Ok(recipe)
    }

    pub fn raw_ingredients(&self) -> &[String] {
        &self.raw_ingredients
    }

    /// Ingredients at the current serving count.
    pub fn ingredients(&self) -> &[ParsedIngredient] {
        &self.ingredients
    }

    pub fn servings(&self) -> u32 {
        self.servings
    }

    /// Estimated preparation time in minutes.
    pub fn prep_time_minutes(&self) -> u32 {
        self.prep_time_minutes
    }

    /// Estimate preparation time: 15 minutes for every started group of
    /// three ingredients. This is a heuristic, not a measured value.
    pub fn calculate_time(&mut self) -> u32 {
        let periods = self.base_ingredients.len().div_ceil(INGREDIENTS_PER_PERIOD);
        self.prep_time_minutes = periods as u32 * MINUTES_PER_PERIOD;
        self.prep_time_minutes
    }

    /// Rescale every quantity to `new_servings`.
    ///
    /// Quantities are always derived from the base quantities, so scaling
    /// 4 → 8 → 4 lands exactly where it started.
    pub fn scale_servings(&mut self, new_servings: u32) -> Result<(), BrowserError> {
        if new_servings == 0 {
            return Err(BrowserError::InvalidArgument(
                "servings must be at least 1".to_string(),
            ));
        }

        let factor = new_servings as f64 / self.base_servings as f64;
        for (scaled, base) in self.ingredients.iter_mut().zip(&self.base_ingredients) {
            scaled.count = base.count.map(|count| count * factor);
        }
        debug!(
            "Scaled recipe {} from {} to {} servings",
            self.id, self.servings, new_servings
        );
        self.servings = new_servings;
        Ok(())
    }

    pub fn increase_servings(&mut self) -> Result<u32, BrowserError> {
        let next = self
            .servings
            .checked_add(1)
            .ok_or_else(|| BrowserError::InvalidArgument("servings overflow".to_string()))?;
        self.scale_servings(next)?;
        Ok(self.servings)
    }

    /// Step servings down by one. Going below one serving is rejected.
    pub fn decrease_servings(&mut self) -> Result<u32, BrowserError> {
        if self.servings <= 1 {
            return Err(BrowserError::InvalidArgument(
                "cannot decrease servings below 1".to_string(),
            ));
        }
        self.scale_servings(self.servings - 1)?;
        Ok(self.servings)
    }

    /// Snapshot of this recipe for the likes collection.
    pub fn to_like(&self) -> Like {
        Like::new(
            self.id.clone(),
            self.title.clone(),
            self.publisher.clone(),
            self.image_url.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_recipe(ingredients: &[&str]) -> RawRecipe {
        RawRecipe {
            id: "abc123".to_string(),
            title: "Pancakes".to_string(),
            publisher: "Test Kitchen".to_string(),
            image_url: "http://example.com/pancakes.jpg".to_string(),
            source_url: "http://example.com/pancakes".to_string(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            publisher_url: None,
            social_rank: None,
        }
    }

    fn counts(recipe: &Recipe) -> Vec<Option<f64>> {
        recipe.ingredients().iter().map(|i| i.count).collect()
    }

    fn assert_close(actual: &[Option<f64>], expected: &[Option<f64>]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            match (a, e) {
                (Some(a), Some(e)) => assert!((a - e).abs() < 1e-9, "{} != {}", a, e),
                (None, None) => {}
                _ => panic!("{:?} != {:?}", a, e),
            }
        }
    }

    #[test]
    fn test_from_raw_parses_and_skips_blank_lines() {
        let recipe =
            Recipe::from_raw(raw_recipe(&["2 cups flour", "  ", "salt"]), DEFAULT_SERVINGS)
                .unwrap();

        assert_eq!(recipe.raw_ingredients().len(), 3);
        assert_eq!(recipe.ingredients().len(), 2);
        assert_eq!(recipe.ingredients()[0].unit, "cup");
        assert_eq!(recipe.servings(), 4);
    }

    #[test]
    fn test_zero_base_servings_rejected() {
        let result = Recipe::from_raw(raw_recipe(&["1 egg"]), 0);
        assert!(matches!(result, Err(BrowserError::InvalidArgument(_))));
    }

    #[test]
    fn test_scale_servings_proportional() {
        let mut recipe =
            Recipe::from_raw(raw_recipe(&["2 cups flour", "1/2 tsp salt", "pepper"]), 4).unwrap();

        recipe.scale_servings(6).unwrap();

        assert_eq!(recipe.servings(), 6);
        assert_close(&counts(&recipe), &[Some(3.0), Some(0.75), None]);
    }

    #[test]
    fn test_scaling_does_not_compound() {
        let mut direct =
            Recipe::from_raw(raw_recipe(&["1/3 cup sugar", "3 eggs"]), 4).unwrap();
        let mut repeated = direct.clone();

        direct.scale_servings(4).unwrap();
        repeated.scale_servings(8).unwrap();
        repeated.scale_servings(3).unwrap();
        repeated.scale_servings(7).unwrap();
        repeated.scale_servings(4).unwrap();

        assert_close(&counts(&repeated), &counts(&direct));
        assert_close(&counts(&repeated), &[Some(1.0 / 3.0), Some(3.0)]);
    }

    #[test]
    fn test_scale_to_zero_fails() {
        let mut recipe = Recipe::from_raw(raw_recipe(&["1 egg"]), 4).unwrap();

        let result = recipe.scale_servings(0);

        assert!(matches!(result, Err(BrowserError::InvalidArgument(_))));
        assert_eq!(recipe.servings(), 4);
    }

    #[test]
    fn test_increase_and_decrease() {
        let mut recipe = Recipe::from_raw(raw_recipe(&["2 eggs"]), 2).unwrap();

        assert_eq!(recipe.increase_servings().unwrap(), 3);
        assert_close(&counts(&recipe), &[Some(3.0)]);
        assert_eq!(recipe.decrease_servings().unwrap(), 2);
        assert_eq!(recipe.decrease_servings().unwrap(), 1);
        assert!(matches!(
            recipe.decrease_servings(),
            Err(BrowserError::InvalidArgument(_))
        ));
        assert_eq!(recipe.servings(), 1);
    }

    #[test]
    fn test_calculate_time() {
        let cases: [(&[&str], u32); 4] = [
            (&[], 0),
            (&["a"], 15),
            (&["a", "b", "c"], 15),
            (&["a", "b", "c", "d", "e", "f", "g"], 45),
        ];
        for (lines, minutes) in cases {
            let recipe = Recipe::from_raw(raw_recipe(lines), 4).unwrap();
            assert_eq!(recipe.prep_time_minutes(), minutes);
        }
    }

    #[test]
    fn test_like_snapshot_is_independent() {
        let mut recipe = Recipe::from_raw(raw_recipe(&["1 egg"]), 4).unwrap();
        let like = recipe.to_like();

        recipe.title = "Renamed".to_string();

        assert_eq!(like.title, "Pancakes");
        assert_eq!(like.id, "abc123");
    }
}
