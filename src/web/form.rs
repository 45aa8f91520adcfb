use std::collections::HashMap;

use crate::error::FormError;
use crate::recipe::{NutritionFacts, RecommendationQuery, NUTRITION_COLUMNS};

pub const INGREDIENTS_FIELD: &str = "ingredients";
pub const ALLERGIES_FIELD: &str = "allergies[]";

/// Parses an `application/x-www-form-urlencoded` submission.
///
/// Every nutrition field and `ingredients` must be present; `allergies[]` may
/// repeat any number of times. For single-valued fields the first occurrence
/// wins. Blank allergy values are dropped.
pub fn parse_recommendation_form(body: &[u8]) -> Result<RecommendationQuery, FormError> {
    let mut fields: HashMap<String, String> = HashMap::new();
    let mut allergens = Vec::new();

    for (key, value) in url::form_urlencoded::parse(body) {
        if key == ALLERGIES_FIELD {
            let value = value.trim();
            if !value.is_empty() {
                allergens.push(value.to_string());
            }
        } else {
            fields.entry(key.into_owned()).or_insert_with(|| value.into_owned());
        }
    }

    let mut values = [0.0f64; 7];
    for (slot, field) in values.iter_mut().zip(NUTRITION_COLUMNS) {
        let raw = fields.get(field).ok_or(FormError::MissingField(field))?;
        *slot = parse_number(field, raw)?;
    }

    let ingredients = fields
        .remove(INGREDIENTS_FIELD)
        .ok_or(FormError::MissingField(INGREDIENTS_FIELD))?;

    Ok(RecommendationQuery {
        nutrition: NutritionFacts::from_array(values),
        ingredients,
        allergens,
    })
}

fn parse_number(field: &'static str, raw: &str) -> Result<f64, FormError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| FormError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}
