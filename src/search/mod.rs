pub mod data_loader;
pub mod feature_encoder;
pub mod knn_index;
pub mod scaler;
pub mod tfidf;

pub use data_loader::load_recipe_dataset;
pub use feature_encoder::{FeatureEncoder, FeatureVector, NUMERIC_DIMENSION};
pub use knn_index::{KnnIndex, Neighbor};
pub use scaler::StandardScaler;
pub use tfidf::{SparseVector, TfidfVectorizer};
