use std::sync::Arc;

use catalog::{MealDb, Spoonacular};
use reqwest::Client;
use tracing::warn;

use super::config::Config;

pub struct AppState {
    pub config: Config,
    pub meal_db: MealDb,
    pub spoonacular: Option<Spoonacular>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Arc<Self>, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.upstream_timeout)
            .build()?;

        let meal_db = MealDb::new(client.clone(), &config.meal_db_url);

        let spoonacular = match &config.spoonacular_key {
            Some(key) => Some(Spoonacular::new(client, &config.spoonacular_url, key)),
            None => {
                warn!("No Spoonacular key configured, recipe detail lookups will fail");
                None
            }
        };

        Ok(Arc::new(Self {
            config,
            meal_db,
            spoonacular,
        }))
    }
}
