use std::path::Path;
use tracing::{debug, info};

use crate::error::Result;
use crate::recipe::{RecipeRecord, Recommendation, RecommendationQuery};
use crate::search::{load_recipe_dataset, FeatureEncoder, KnnIndex};

/// Rows retrieved from the index per query, before allergen filtering.
pub const NEIGHBOR_COUNT: usize = 3;
/// Upper bound on the recommendations handed back.
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Dataset, fitted encoders and index, built once and shared read-only.
#[derive(Debug)]
pub struct RecipeRecommender {
    recipes: Vec<RecipeRecord>,
    encoder: FeatureEncoder,
    index: KnnIndex,
}

impl RecipeRecommender {
    pub fn from_csv(dataset_path: &Path) -> Result<Self> {
        info!(path = ?dataset_path, "loading recipe dataset");
        let recipes = load_recipe_dataset(dataset_path)?;
        info!(count = recipes.len(), "recipe dataset loaded");
        Self::from_records(recipes)
    }

    pub fn from_records(recipes: Vec<RecipeRecord>) -> Result<Self> {
        let encoder = FeatureEncoder::fit(&recipes);
        info!(
            vocabulary = encoder.text_dimension(),
            dimension = encoder.dimension(),
            "feature encoders fitted"
        );

        let features = recipes.iter().map(|r| encoder.encode_record(r)).collect();
        let index = KnnIndex::build(features)?;
        info!(rows = index.len(), "similarity index built");

        Ok(Self {
            recipes,
            encoder,
            index,
        })
    }

    pub fn recommend(&self, query: &RecommendationQuery) -> Vec<Recommendation> {
        let encoded = self.encoder.encode(&query.nutrition, &query.ingredients);
        let neighbors = self.index.nearest(&encoded, NEIGHBOR_COUNT);
        debug!(?neighbors, "nearest recipes");

        let allergens: Vec<String> = query.allergens.iter().map(|a| a.to_lowercase()).collect();

        neighbors
            .into_iter()
            .filter_map(|n| self.recipes.get(n.index).map(|r| (r, n.distance)))
            .filter(|(recipe, _)| !contains_allergen(&recipe.ingredients, &allergens))
            .take(MAX_RECOMMENDATIONS)
            .map(|(recipe, distance)| Recommendation::from_record(recipe, distance))
            .collect()
    }

    pub fn recipes(&self) -> &[RecipeRecord] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

/// `allergens` must already be lowercased.
fn contains_allergen(ingredients: &str, allergens: &[String]) -> bool {
    if allergens.is_empty() {
        return false;
    }
    let ingredients = ingredients.to_lowercase();
    allergens.iter().any(|a| ingredients.contains(a.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::NutritionFacts;

    fn recipe(name: &str, ingredients: &str, values: [f64; 7]) -> RecipeRecord {
        RecipeRecord {
            name: name.to_string(),
            ingredients: ingredients.to_string(),
            image_url: format!("http://img/{}.jpg", name.to_lowercase().replace(' ', "_")),
            nutrition: NutritionFacts::from_array(values),
        }
    }

    fn sample_recipes() -> Vec<RecipeRecord> {
        vec![
            recipe("Garlic Chicken", "chicken, garlic, salt, pepper", [250.0, 10.0, 30.0, 5.0, 20.0, 400.0, 3.0]),
            recipe("Satay Chicken", "chicken, Peanut sauce, salt", [260.0, 12.0, 28.0, 6.0, 22.0, 420.0, 3.0]),
            recipe("Peanut Noodles", "noodles, peanut butter, soy sauce", [480.0, 22.0, 55.0, 14.0, 0.0, 610.0, 4.0]),
            recipe("Green Salad", "lettuce, cucumber, olive oil", [90.0, 7.0, 5.0, 1.0, 0.0, 50.0, 2.0]),
            recipe("Beef Stew", "beef, carrot, potato, salt", [520.0, 25.0, 35.0, 40.0, 95.0, 800.0, 5.0]),
            recipe("Fruit Bowl", "apple, banana, grapes", [150.0, 0.5, 38.0, 1.5, 0.0, 3.0, 6.0]),
        ]
    }

    fn query(values: [f64; 7], ingredients: &str, allergens: &[&str]) -> RecommendationQuery {
        RecommendationQuery {
            nutrition: NutritionFacts::from_array(values),
            ingredients: ingredients.to_string(),
            allergens: allergens.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_returns_at_most_neighbor_count() -> Result<()> {
        let recommender = RecipeRecommender::from_records(sample_recipes())?;
        let results = recommender.recommend(&query([300.0, 12.0, 30.0, 8.0, 10.0, 400.0, 3.0], "salt", &[]));
        assert_eq!(results.len(), NEIGHBOR_COUNT);
        for r in &results {
            assert!(recommender.recipes().iter().any(|rec| rec.name == r.name));
        }
        Ok(())
    }

    #[test]
    fn test_exact_row_is_first_at_zero_distance() -> Result<()> {
        let recipes = sample_recipes();
        let recommender = RecipeRecommender::from_records(recipes.clone())?;
        for target in &recipes {
            let results = recommender.recommend(&query(target.nutrition.to_array(), &target.ingredients, &[]));
            assert_eq!(results[0].name, target.name);
            assert_eq!(results[0].distance, 0.0);
        }
        Ok(())
    }

    #[test]
    fn test_allergen_filter_is_case_insensitive() -> Result<()> {
        let recommender = RecipeRecommender::from_records(sample_recipes())?;
        let q = query([250.0, 10.0, 30.0, 5.0, 20.0, 400.0, 3.0], "chicken, salt, pepper", &["PEANUT"]);
        let results = recommender.recommend(&q);
        assert!(results.len() <= NEIGHBOR_COUNT);
        assert!(!results.is_empty());
        for r in &results {
            assert!(!r.ingredients.to_lowercase().contains("peanut"), "{}", r.name);
        }
        assert_eq!(results[0].name, "Garlic Chicken");
        Ok(())
    }

    #[test]
    fn test_filter_never_refills_from_beyond_k() -> Result<()> {
        let recommender = RecipeRecommender::from_records(sample_recipes())?;
        // Filtering only drops retrieved rows; nothing farther away is promoted.
        let q = query([255.0, 11.0, 29.0, 5.5, 21.0, 410.0, 3.0], "chicken, salt", &["salt"]);
        let unfiltered = recommender.recommend(&query([255.0, 11.0, 29.0, 5.5, 21.0, 410.0, 3.0], "chicken, salt", &[]));
        let filtered = recommender.recommend(&q);
        let expected: Vec<&Recommendation> = unfiltered.iter().filter(|r| !r.ingredients.contains("salt")).collect();
        assert_eq!(filtered.iter().collect::<Vec<_>>(), expected);
        Ok(())
    }

    #[test]
    fn test_empty_ingredients_still_recommend() -> Result<()> {
        let recommender = RecipeRecommender::from_records(sample_recipes())?;
        let results = recommender.recommend(&query([150.0, 0.5, 38.0, 1.5, 0.0, 3.0, 6.0], "", &[]));
        assert_eq!(results[0].name, "Fruit Bowl");
        Ok(())
    }

    #[test]
    fn test_small_dataset_returns_every_row() -> Result<()> {
        let recommender = RecipeRecommender::from_records(sample_recipes().into_iter().take(2).collect())?;
        let results = recommender.recommend(&query([0.0; 7], "chicken", &[]));
        assert_eq!(results.len(), 2);
        Ok(())
    }

    #[test]
    fn test_contains_allergen() {
        let allergens = vec!["peanut".to_string(), "milk".to_string()];
        assert!(contains_allergen("Flour, PEANUTS, sugar", &allergens));
        assert!(contains_allergen("buttermilk", &allergens));
        assert!(!contains_allergen("flour, sugar", &allergens));
        assert!(!contains_allergen("peanut", &[]));
    }
}
