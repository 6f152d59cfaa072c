use reqwest::{Client, Response, Url};
use serde_json::Value;
use tracing::debug;

use crate::{Error, Meals, Recipe};

pub const MEALDB_URL: &str = "https://www.themealdb.com/api/json/v1/1";
pub const SPOONACULAR_URL: &str = "https://api.spoonacular.com";

#[derive(Clone)]
pub struct MealDb {
    client: Client,
    base_url: String,
}

impl MealDb {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn search(&self, name: &str) -> Result<Option<Vec<Recipe>>, Error> {
        self.meals("search.php", "s", name).await
    }

    pub async fn filter_by_category(&self, category: &str) -> Result<Option<Vec<Recipe>>, Error> {
        self.meals("filter.php", "c", category).await
    }

    async fn meals(
        &self,
        endpoint: &str,
        key: &str,
        value: &str,
    ) -> Result<Option<Vec<Recipe>>, Error> {
        let url = format!("{}/{endpoint}", self.base_url);
        debug!("GET {url}?{key}={value}");

        let response = self.client.get(&url).query(&[(key, value)]).send().await?;
        let meals: Meals = check(response).await?.json().await?;

        Ok(meals.meals)
    }
}

#[derive(Clone)]
pub struct Spoonacular {
    client: Client,
    base_url: String,
    api_key: String,
}

impl Spoonacular {
    pub fn new(client: Client, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub async fn information(&self, id: &str) -> Result<Value, Error> {
        let mut url = Url::parse(&self.base_url).map_err(|e| Error::Url(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| Error::Url(self.base_url.clone()))?
            .pop_if_empty()
            .extend(["recipes", id, "information"]);
        debug!("GET {url}");

        url.query_pairs_mut().append_pair("apiKey", &self.api_key);

        // reqwest errors print the url, which carries the key
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Request(e.without_url()))?;

        check(response)
            .await?
            .json()
            .await
            .map_err(|e| Error::Request(e.without_url()))
    }
}

async fn check(response: Response) -> Result<Response, Error> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = match body.trim() {
        "" => status
            .canonical_reason()
            .unwrap_or("unknown status")
            .to_string(),
        trimmed => trimmed.to_string(),
    };

    Err(Error::Status {
        status: status.as_u16(),
        message,
    })
}
