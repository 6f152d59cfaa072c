//! # Recipe Aggregation
//!
//! Builds one page of listing records out of TheMealDB.
//!
//!
//!
//! ## Search
//! - A non-blank `q` is a single name search.
//! - `null` meals from upstream is an empty page, not an error.
//! - A category narrows the search results, matched case-insensitively against `strCategory`.
//!
//!
//!
//! ## Browse
//! - No `q`: every category in [`CATEGORIES`] is listed concurrently.
//! - A category that fails is logged and skipped so the default view stays usable.
//! - A selected category replaces the whole browse set with a single listing of that category.
//!   Unlike search, this is an override and not a narrowing filter.
//! - The "ice cream" search is always appended, category or not.
//!
//!
//!
//! ## Failures
//! The search call, the single category listing and the bonus search are strict.
//! Any of them failing fails the whole request with the upstream message.
use catalog::{Error, MealDb, Recipe, ResultPage};
use futures::{future::join_all, try_join};
use tracing::{info, warn};

use crate::utils::{paginate, sort_by_name, total_pages};

pub const CATEGORIES: [&str; 9] = [
    "Chicken",
    "Seafood",
    "Dessert",
    "Pasta",
    "Vegetarian",
    "Breakfast",
    "Lamb",
    "Miscellaneous",
    "Side",
];

pub const BONUS_SEARCH: &str = "ice cream";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sort {
    #[default]
    Asc,
    Desc,
}

impl Sort {
    /// Anything but `desc` sorts ascending.
    pub fn parse(value: &str) -> Self {
        match value {
            "desc" => Sort::Desc,
            _ => Sort::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sort::Asc => "asc",
            Sort::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecipeQuery {
    pub search: String,
    pub category: String,
    pub sort: Sort,
    pub page: usize,
    pub limit: usize,
}

impl Default for RecipeQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: String::new(),
            sort: Sort::Asc,
            page: 1,
            limit: 20,
        }
    }
}

pub async fn get_recipes(meal_db: &MealDb, query: &RecipeQuery) -> Result<ResultPage, Error> {
    if !query.search.trim().is_empty() {
        return search_recipes(meal_db, query).await;
    }

    let (mut merged, bonus) = try_join!(
        browse_recipes(meal_db, &query.category),
        bonus_recipes(meal_db)
    )?;
    merged.extend(bonus);

    let page = into_page(merged, query);

    info!(
        "Page {}/{} | Total: {} | Sort: {} | Category: {}",
        page.page,
        page.total_pages,
        page.total,
        query.sort.as_str(),
        if query.category.is_empty() {
            "All"
        } else {
            query.category.as_str()
        }
    );

    Ok(page)
}

async fn search_recipes(meal_db: &MealDb, query: &RecipeQuery) -> Result<ResultPage, Error> {
    let Some(mut meals) = meal_db.search(&query.search).await? else {
        return Ok(ResultPage::empty(query.page));
    };

    if !query.category.is_empty() {
        let category = query.category.to_lowercase();
        meals.retain(|m| {
            m.category
                .as_ref()
                .is_some_and(|c| c.to_lowercase() == category)
        });
    }

    Ok(into_page(meals, query))
}

async fn browse_recipes(meal_db: &MealDb, category: &str) -> Result<Vec<Recipe>, Error> {
    if !category.is_empty() {
        return Ok(meal_db
            .filter_by_category(category)
            .await?
            .unwrap_or_default());
    }

    let listings = join_all(CATEGORIES.map(|c| meal_db.filter_by_category(c))).await;

    Ok(CATEGORIES
        .iter()
        .zip(listings)
        .flat_map(|(category, listing)| match listing {
            Ok(meals) => meals.unwrap_or_default(),
            Err(e) => {
                warn!("Skipping category {category}: {e}");
                Vec::new()
            }
        })
        .collect())
}

async fn bonus_recipes(meal_db: &MealDb) -> Result<Vec<Recipe>, Error> {
    Ok(meal_db.search(BONUS_SEARCH).await?.unwrap_or_default())
}

fn into_page(mut recipes: Vec<Recipe>, query: &RecipeQuery) -> ResultPage {
    sort_by_name(&mut recipes, query.sort);

    let total = recipes.len();

    ResultPage {
        results: paginate(recipes, query.page, query.limit),
        page: query.page,
        total,
        total_pages: total_pages(total, query.limit),
    }
}
