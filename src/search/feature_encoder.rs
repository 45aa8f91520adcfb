use crate::recipe::{NutritionFacts, RecipeRecord};
use crate::search::scaler::StandardScaler;
use crate::search::tfidf::{SparseVector, TfidfVectorizer};

pub const NUMERIC_DIMENSION: usize = 7;

/// Standardized nutrition values followed by the ingredient TF-IDF vector.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    pub numeric: [f64; NUMERIC_DIMENSION],
    pub text: SparseVector,
}

impl FeatureVector {
    pub fn squared_distance(&self, other: &FeatureVector) -> f64 {
        let numeric: f64 = self
            .numeric
            .iter()
            .zip(&other.numeric)
            .map(|(a, b)| (a - b) * (a - b))
            .sum();
        numeric + self.text.squared_distance(&other.text)
    }

    /// Concatenated dense form for a text vocabulary of `text_dimension` terms.
    pub fn to_dense(&self, text_dimension: usize) -> Vec<f64> {
        let mut dense = self.numeric.to_vec();
        dense.extend(self.text.to_dense(text_dimension));
        dense
    }
}

/// Both transforms, fitted once against the full dataset.
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    scaler: StandardScaler<NUMERIC_DIMENSION>,
    vectorizer: TfidfVectorizer,
}

impl FeatureEncoder {
    pub fn fit(recipes: &[RecipeRecord]) -> Self {
        let corpus: Vec<&str> = recipes.iter().map(|r| r.ingredients.as_str()).collect();
        let vectorizer = TfidfVectorizer::fit(&corpus);

        let rows: Vec<[f64; NUMERIC_DIMENSION]> =
            recipes.iter().map(|r| r.nutrition.to_array()).collect();
        let scaler = StandardScaler::<NUMERIC_DIMENSION>::fit(&rows);

        Self { scaler, vectorizer }
    }

    pub fn encode(&self, nutrition: &NutritionFacts, ingredients: &str) -> FeatureVector {
        FeatureVector {
            numeric: self.scaler.transform(&nutrition.to_array()),
            text: self.vectorizer.transform(ingredients),
        }
    }

    pub fn encode_record(&self, record: &RecipeRecord) -> FeatureVector {
        self.encode(&record.nutrition, &record.ingredients)
    }

    pub fn text_dimension(&self) -> usize {
        self.vectorizer.vocabulary_size()
    }

    pub fn dimension(&self) -> usize {
        NUMERIC_DIMENSION + self.text_dimension()
    }
}
