use serde::{Deserialize, Serialize};

/// Nutrition columns in feature order.
pub const NUTRITION_COLUMNS: [&str; 7] = [
    "calories",
    "fat",
    "carbohydrates",
    "protein",
    "cholesterol",
    "sodium",
    "fiber",
];

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq)]
pub struct NutritionFacts {
    pub calories: f64,
    pub fat: f64,
    pub carbohydrates: f64,
    pub protein: f64,
    pub cholesterol: f64,
    pub sodium: f64,
    pub fiber: f64,
}

impl NutritionFacts {
    /// Values in `NUTRITION_COLUMNS` order.
    pub fn to_array(&self) -> [f64; 7] {
        [
            self.calories,
            self.fat,
            self.carbohydrates,
            self.protein,
            self.cholesterol,
            self.sodium,
            self.fiber,
        ]
    }

    pub fn from_array(values: [f64; 7]) -> Self {
        let [calories, fat, carbohydrates, protein, cholesterol, sodium, fiber] = values;
        Self {
            calories,
            fat,
            carbohydrates,
            protein,
            cholesterol,
            sodium,
            fiber,
        }
    }
}

/// One row of the recipe dataset.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RecipeRecord {
    pub name: String,
    pub ingredients: String,
    pub image_url: String,
    pub nutrition: NutritionFacts,
}

#[derive(Debug, Serialize, Clone, Default, PartialEq)]
pub struct RecommendationQuery {
    pub nutrition: NutritionFacts,
    pub ingredients: String,
    /// Matched case-insensitively as substrings of a recipe's ingredient text.
    pub allergens: Vec<String>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Recommendation {
    pub name: String,
    pub ingredients: String,
    pub image_url: String,
    pub distance: f64,
}

impl Recommendation {
    pub fn from_record(record: &RecipeRecord, distance: f64) -> Self {
        Self {
            name: record.name.clone(),
            ingredients: record.ingredients.clone(),
            image_url: record.image_url.clone(),
            distance,
        }
    }
}
