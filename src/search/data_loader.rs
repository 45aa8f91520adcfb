use csv::ReaderBuilder;
use std::path::Path;
use tracing::debug;

use crate::error::{RecommenderError, Result};
use crate::recipe::{NutritionFacts, RecipeRecord, NUTRITION_COLUMNS};

// Expected column headers
const NAME_COL: &str = "recipe_name";
const INGREDIENTS_COL: &str = "ingredients_list";
const IMAGE_COL: &str = "image_url";

fn column_index(headers: &csv::StringRecord, column: &'static str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == column)
        .ok_or(RecommenderError::MissingColumn(column))
}

fn parse_nutrient(value: &str, column: &'static str, row: usize) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| RecommenderError::InvalidNumber {
            column,
            row,
            value: value.to_string(),
        })
}

/// Loads every row of the recipe CSV, in file order.
pub fn load_recipe_dataset(csv_path: &Path) -> Result<Vec<RecipeRecord>> {
    if !csv_path.exists() {
        return Err(RecommenderError::DatasetNotFound(csv_path.to_path_buf()));
    }

    let file = std::fs::File::open(csv_path)?;
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(file);

    let headers = rdr.headers()?.clone();

    let name_idx = column_index(&headers, NAME_COL)?;
    let ingredients_idx = column_index(&headers, INGREDIENTS_COL)?;
    let image_idx = column_index(&headers, IMAGE_COL)?;
    let mut nutrient_idx = [0usize; 7];
    for (slot, column) in nutrient_idx.iter_mut().zip(NUTRITION_COLUMNS) {
        *slot = column_index(&headers, column)?;
    }

    let mut recipes = Vec::new();
    for (row_index, result) in rdr.records().enumerate() {
        let record = result?;
        let cell = |idx: usize| record.get(idx).unwrap_or("").trim();

        let mut values = [0.0f64; 7];
        for ((value, &idx), column) in values.iter_mut().zip(&nutrient_idx).zip(NUTRITION_COLUMNS) {
            *value = parse_nutrient(cell(idx), column, row_index)?;
        }

        recipes.push(RecipeRecord {
            name: cell(name_idx).to_string(),
            ingredients: cell(ingredients_idx).to_string(),
            image_url: cell(image_idx).to_string(),
            nutrition: NutritionFacts::from_array(values),
        });
    }

    if recipes.is_empty() {
        return Err(RecommenderError::EmptyDataset(csv_path.to_path_buf()));
    }

    debug!(count = recipes.len(), path = ?csv_path, "recipe dataset parsed");
    Ok(recipes)
}
