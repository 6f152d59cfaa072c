//! Fake upstream providers for tests, served over real HTTP on a loopback port.
use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

#[derive(Default)]
pub struct Upstream {
    searches: HashMap<String, Vec<Value>>,
    categories: HashMap<String, Vec<Value>>,
    failing: HashSet<String>,
    details: HashMap<String, Value>,
}

impl Upstream {
    pub fn search(mut self, term: &str, meals: Vec<Value>) -> Self {
        self.searches.insert(term.to_string(), meals);
        self
    }

    pub fn category(mut self, category: &str, meals: Vec<Value>) -> Self {
        self.categories.insert(category.to_string(), meals);
        self
    }

    /// The search term or category `key` answers 500.
    pub fn failing(mut self, key: &str) -> Self {
        self.failing.insert(key.to_string());
        self
    }

    pub fn detail(mut self, id: &str, detail: Value) -> Self {
        self.details.insert(id.to_string(), detail);
        self
    }

    /// Serves the fixture and returns its base url.
    pub async fn spawn(self) -> String {
        let app = Router::new()
            .route("/search.php", get(search))
            .route("/filter.php", get(filter))
            .route("/recipes/{id}/information", get(information))
            .with_state(Arc::new(self));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        format!("http://{address}")
    }

    fn meals(&self, key: Option<&String>, table: &HashMap<String, Vec<Value>>) -> Response {
        let key = key.cloned().unwrap_or_default();

        if self.failing.contains(&key) {
            return (StatusCode::INTERNAL_SERVER_ERROR, format!("{key} is down")).into_response();
        }

        match table.get(&key) {
            Some(meals) => Json(json!({ "meals": meals })).into_response(),
            None => Json(json!({ "meals": null })).into_response(),
        }
    }
}

pub fn meal(id: &str, name: &str, category: Option<&str>) -> Value {
    let mut meal = json!({
        "idMeal": id,
        "strMeal": name,
        "strMealThumb": format!("https://img.test/{id}.jpg"),
    });
    if let Some(category) = category {
        meal["strCategory"] = json!(category);
    }
    meal
}

async fn search(
    State(upstream): State<Arc<Upstream>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    upstream.meals(params.get("s"), &upstream.searches)
}

async fn filter(
    State(upstream): State<Arc<Upstream>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    upstream.meals(params.get("c"), &upstream.categories)
}

async fn information(
    State(upstream): State<Arc<Upstream>>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if params.get("apiKey").map(String::as_str) != Some("test-key") {
        return (StatusCode::UNAUTHORIZED, "invalid api key").into_response();
    }

    match upstream.details.get(&id) {
        Some(detail) => Json(detail.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, "recipe not found").into_response(),
    }
}
