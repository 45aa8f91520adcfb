pub mod form;
pub mod templates;

use std::fmt::Display;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use minijinja::Environment;
use tracing::{error, info, warn};

use crate::recipe::{Recommendation, RecommendationQuery};
use crate::recommender::RecipeRecommender;

pub use form::parse_recommendation_form;
pub use templates::truncate;

pub const DEFAULT_TRUNCATE_LENGTH: usize = 100;

/// Read-only context shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<RecipeRecommender>,
    pub templates: Arc<Environment<'static>>,
    pub truncate_length: usize,
    /// Include error detail in failure responses.
    pub debug: bool,
}

impl AppState {
    pub fn new(
        recommender: RecipeRecommender,
        truncate_length: usize,
        debug: bool,
    ) -> Result<Self, minijinja::Error> {
        Ok(Self {
            recommender: Arc::new(recommender),
            templates: Arc::new(templates::build_environment()?),
            truncate_length,
            debug,
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index).post(submit))
        .with_state(state)
}

async fn index(State(state): State<AppState>) -> Response {
    render(&state, &[], None)
}

async fn submit(State(state): State<AppState>, body: Bytes) -> Response {
    let query = match parse_recommendation_form(&body) {
        Ok(query) => query,
        Err(err) => {
            warn!(error = %err, "rejected recommendation form");
            return failure(&state, StatusCode::BAD_REQUEST, err);
        }
    };

    let recommender = state.recommender.clone();
    let task_query = query.clone();
    let recommendations =
        match tokio::task::spawn_blocking(move || recommender.recommend(&task_query)).await {
            Ok(recommendations) => recommendations,
            Err(err) => {
                error!(error = %err, "recommendation task failed");
                return failure(&state, StatusCode::INTERNAL_SERVER_ERROR, err);
            }
        };

    info!(
        count = recommendations.len(),
        allergens = query.allergens.len(),
        "recommendations served"
    );
    render(&state, &recommendations, Some(&query))
}

fn render(
    state: &AppState,
    recommendations: &[Recommendation],
    query: Option<&RecommendationQuery>,
) -> Response {
    match templates::render_index(&state.templates, recommendations, query, state.truncate_length) {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            error!(error = %err, "failed to render page");
            failure(state, StatusCode::INTERNAL_SERVER_ERROR, err)
        }
    }
}

fn failure(state: &AppState, status: StatusCode, err: impl Display) -> Response {
    let message = if state.debug {
        format!("{}: {}", status, err)
    } else {
        status.to_string()
    };
    (status, message).into_response()
}
