//! # Catalog
//!
//! Recipe records shared by the server and the client, plus the HTTP clients
//! for the two upstream providers.
//!
//! ## Providers
//! - TheMealDB: listing records. `search.php?s=` searches by name, `filter.php?c=`
//!   lists a category. Both answer `{ "meals": [...] }` or `{ "meals": null }` when
//!   nothing matches.
//! - Spoonacular: full recipe information by id, behind an api key.
//!
//! ## Notes
//! - Records keep the upstream field names on the wire so the frontend and the
//!   favorites snapshot can read them without a translation layer.
//! - `filter.php` records carry no category, only `search.php` ones do.
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod remote;

pub use remote::{MealDb, Spoonacular};

/// Listing record for a single recipe. Identity is `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(rename = "idMeal")]
    pub id: String,

    #[serde(rename = "strMeal", default)]
    pub name: String,

    #[serde(rename = "strMealThumb", default)]
    pub thumbnail_url: String,

    #[serde(
        rename = "strCategory",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,
}

/// One page of listing records as served by `/api/recipes`.
///
/// `total` counts the whole filtered collection before slicing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultPage {
    pub results: Vec<Recipe>,
    pub page: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl ResultPage {
    pub fn empty(page: usize) -> Self {
        Self {
            results: Vec::new(),
            page,
            total: 0,
            total_pages: 0,
        }
    }
}

#[derive(Deserialize)]
pub struct Meals {
    pub meals: Option<Vec<Recipe>>,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    #[error("upstream responded with {status}: {message}")]
    Status { status: u16, message: String },

    #[error("invalid upstream url: {0}")]
    Url(String),
}

impl Error {
    /// Status code reported by the upstream, if it answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } => Some(*status),
            Error::Request(e) => e.status().map(|s| s.as_u16()),
            Error::Url(_) => None,
        }
    }
}
