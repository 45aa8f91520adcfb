use minijinja::{context, Environment};

use crate::recipe::{Recommendation, RecommendationQuery, NUTRITION_COLUMNS};

pub const INDEX_TEMPLATE: &str = "index.html";
pub const ELLIPSIS: &str = "...";

/// Checkbox choices offered on the form. Free text is accepted as well.
pub const ALLERGY_OPTIONS: &[&str] = &[
    "Peanut", "Tree nut", "Milk", "Egg", "Wheat", "Soy", "Fish", "Shellfish", "Sesame",
];

/// Cuts `text` to `length` characters and appends `...` when it is longer.
pub fn truncate(text: &str, length: usize) -> String {
    match text.char_indices().nth(length) {
        Some((byte_idx, _)) => format!("{}{}", &text[..byte_idx], ELLIPSIS),
        None => text.to_string(),
    }
}

fn truncate_filter(text: String, length: usize) -> String {
    truncate(&text, length)
}

pub fn build_environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.add_filter("truncate", truncate_filter);
    env.add_template(INDEX_TEMPLATE, include_str!("../../templates/index.html"))?;
    Ok(env)
}

/// Renders the page. `query` is `None` for a plain GET.
pub fn render_index(
    env: &Environment<'_>,
    recommendations: &[Recommendation],
    query: Option<&RecommendationQuery>,
    truncate_length: usize,
) -> Result<String, minijinja::Error> {
    env.get_template(INDEX_TEMPLATE)?.render(context! {
        recommendations => recommendations,
        query => query,
        truncate_length => truncate_length,
        nutrition_fields => NUTRITION_COLUMNS,
        allergy_options => ALLERGY_OPTIONS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::NutritionFacts;

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate("chicken", 10), "chicken");
        assert_eq!(truncate("chicken", 7), "chicken");
        assert_eq!(truncate("", 0), "");
    }

    #[test]
    fn test_truncate_long_text() {
        assert_eq!(truncate("chicken, salt", 7), "chicken...");
        assert_eq!(truncate("abc", 0), "...");
    }

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate("crème brûlée", 4), "crèm...");
        assert_eq!(truncate("crème", 5), "crème");
    }

    #[test]
    fn test_retruncate_at_same_length() {
        let once = truncate("chicken, salt, pepper", 10);
        assert_eq!(once, "chicken, s...");
        assert_eq!(truncate(&once, 10), once);
        assert_eq!(truncate(&once, 13), once);
    }

    #[test]
    fn test_render_idle_page() {
        let env = build_environment().unwrap();
        let html = render_index(&env, &[], None, 100).unwrap();
        assert!(html.contains("name=\"calories\""));
        assert!(html.contains("name=\"allergies[]\""));
        assert!(!html.contains("Recommended Recipes"));
    }

    #[test]
    fn test_render_results_truncated_and_escaped() {
        let env = build_environment().unwrap();
        let query = RecommendationQuery {
            nutrition: NutritionFacts::from_array([250.0, 10.0, 30.0, 5.0, 20.0, 400.0, 3.0]),
            ingredients: "chicken".to_string(),
            allergens: vec!["Peanut".to_string()],
        };
        let recs = vec![Recommendation {
            name: "Mac & Cheese".to_string(),
            ingredients: "macaroni, cheddar, milk, butter".to_string(),
            image_url: "http://img/mac.jpg".to_string(),
            distance: 0.5,
        }];
        let html = render_index(&env, &recs, Some(&query), 10).unwrap();
        assert!(html.contains("Recommended Recipes"));
        assert!(html.contains("Mac &amp; Cheese"));
        assert!(html.contains("macaroni, ..."));
        assert!(!html.contains("cheddar"));
        assert!(html.contains("mac.jpg"));
        assert!(html.contains("checked"));
    }

    #[test]
    fn test_render_empty_results_after_submit() {
        let env = build_environment().unwrap();
        let html = render_index(&env, &[], Some(&RecommendationQuery::default()), 100).unwrap();
        assert!(html.contains("No recipes matched"));
    }
}
