pub mod cli;
pub mod error;
pub mod recipe;
pub mod recommender;
pub mod search;
pub mod web;

pub use error::{FormError, RecommenderError, Result};
pub use recommender::RecipeRecommender;
