use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};
use catalog::ResultPage;
use serde::Deserialize;
use serde_json::Value;
use tracing::error;

use crate::{
    error::AppError,
    recipes::{RecipeQuery, Sort, get_recipes},
    state::AppState,
};

#[derive(Deserialize, Default)]
pub struct RecipesParams {
    q: Option<String>,
    category: Option<String>,
    sort: Option<String>,
    page: Option<String>,
    limit: Option<String>,
}

impl TryFrom<RecipesParams> for RecipeQuery {
    type Error = AppError;

    fn try_from(params: RecipesParams) -> Result<Self, Self::Error> {
        let defaults = RecipeQuery::default();

        Ok(Self {
            search: params.q.unwrap_or_default(),
            category: params.category.unwrap_or_default(),
            sort: params.sort.as_deref().map(Sort::parse).unwrap_or_default(),
            page: positive("page", params.page, defaults.page)?,
            limit: positive("limit", params.limit, defaults.limit)?,
        })
    }
}

/// Empty counts as unset.
fn positive(key: &str, value: Option<String>, default: usize) -> Result<usize, AppError> {
    let Some(value) = value.filter(|v| !v.trim().is_empty()) else {
        return Ok(default);
    };

    match value.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(AppError::MalformedQuery(format!(
            "{key} must be a positive integer, got {value:?}"
        ))),
    }
}

#[derive(Deserialize)]
pub struct DetailParams {
    id: Option<String>,
}

pub async fn recipes_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RecipesParams>,
) -> Result<Json<ResultPage>, AppError> {
    let query = RecipeQuery::try_from(params)?;

    let page = get_recipes(&state.meal_db, &query).await.map_err(|e| {
        error!("TheMealDB API error: {e}");
        AppError::Recipes(e)
    })?;

    Ok(Json(page))
}

pub async fn detail_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DetailParams>,
) -> Result<Json<Value>, AppError> {
    let id = params
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::MalformedQuery("id is required".to_string()))?;

    let spoonacular = state
        .spoonacular
        .as_ref()
        .ok_or(AppError::MissingCredential)?;

    let detail = spoonacular.information(&id).await.map_err(|e| {
        error!("Spoonacular API error for {id}: {e}");
        AppError::Detail(e)
    })?;

    Ok(Json(detail))
}
