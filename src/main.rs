use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, value_parser};
use recipes::{
    Recipe, ResultPage,
    favorites::Favorites,
    storage::{FileStorage, Storage},
};
use reqwest::{Client, Response};
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Backend base url
    #[arg(
        long,
        global = true,
        env = "RECIPES_SERVER",
        default_value = "http://localhost:3000"
    )]
    server: String,

    /// Where favorites are kept, defaults to the platform data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List one page of recipes, favorites marked with `*`
    Browse {
        #[arg(long)]
        q: Option<String>,

        #[arg(long)]
        category: Option<String>,

        /// `asc` or `desc`
        #[arg(long, default_value = "asc")]
        sort: String,

        #[arg(long, default_value_t = 1, value_parser = value_parser!(u64).range(1..))]
        page: u64,

        #[arg(long, default_value_t = 20, value_parser = value_parser!(u64).range(1..))]
        limit: u64,
    },

    /// Print the full recipe information
    Detail { id: String },

    #[command(subcommand)]
    Favorites(FavoritesCommand),
}

#[derive(Subcommand, Debug)]
enum FavoritesCommand {
    List,

    Add(RecipeArgs),

    Remove { id: String },

    Toggle(RecipeArgs),
}

#[derive(clap::Args, Debug)]
struct RecipeArgs {
    #[arg(long)]
    id: String,

    #[arg(long)]
    name: String,

    #[arg(long, default_value = "")]
    thumbnail: String,

    #[arg(long)]
    category: Option<String>,
}

impl From<RecipeArgs> for Recipe {
    fn from(args: RecipeArgs) -> Self {
        Recipe {
            id: args.id,
            name: args.name,
            thumbnail_url: args.thumbnail,
            category: args.category,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args = Args::parse();

    let storage = FileStorage::new(args.data_dir.unwrap_or_else(FileStorage::default_dir));
    debug!("Favorites directory: {}", storage.dir().display());

    let mut favorites = Favorites::init(storage);
    let server = args.server.trim_end_matches('/');
    let client = Client::new();

    match args.command {
        Command::Browse {
            q,
            category,
            sort,
            page,
            limit,
        } => {
            let mut query = vec![
                ("sort", sort),
                ("page", page.to_string()),
                ("limit", limit.to_string()),
            ];
            query.extend(q.map(|q| ("q", q)));
            query.extend(category.map(|c| ("category", c)));

            let response = client
                .get(format!("{server}/api/recipes"))
                .query(&query)
                .send()
                .await
                .context("Backend unreachable")?;

            let page: ResultPage = check(response).await?.json().await?;
            print_page(&page, &favorites);
        }
        Command::Detail { id } => {
            let response = client
                .get(format!("{server}/api/recipeById"))
                .query(&[("id", &id)])
                .send()
                .await
                .context("Backend unreachable")?;

            let detail: Value = check(response).await?.json().await?;
            println!("{}", serde_json::to_string_pretty(&detail)?);
        }
        Command::Favorites(command) => println!("{}", run_favorites(command, &mut favorites)),
    }

    Ok(())
}

/// Returns what to print.
fn run_favorites<S: Storage>(command: FavoritesCommand, favorites: &mut Favorites<S>) -> String {
    match command {
        FavoritesCommand::List => {
            if favorites.recipes().is_empty() {
                return "No favorites yet".to_string();
            }
            favorites
                .recipes()
                .iter()
                .map(|recipe| line(recipe, true))
                .collect::<Vec<_>>()
                .join("\n")
        }
        FavoritesCommand::Add(recipe) => {
            let recipe = Recipe::from(recipe);
            if favorites.contains(&recipe.id) {
                return format!("{} is already a favorite", recipe.id);
            }
            let message = format!("Added {}", recipe.name);
            favorites.add(recipe);
            message
        }
        FavoritesCommand::Remove { id } => {
            if favorites.contains(&id) {
                favorites.remove(&id);
                format!("Removed {id}")
            } else {
                format!("{id} is not a favorite")
            }
        }
        FavoritesCommand::Toggle(recipe) => {
            let recipe = Recipe::from(recipe);
            let name = recipe.name.clone();
            if favorites.toggle(recipe) {
                format!("Added {name}")
            } else {
                format!("Removed {name}")
            }
        }
    }
}

fn print_page<S: Storage>(page: &ResultPage, favorites: &Favorites<S>) {
    for recipe in &page.results {
        println!("{}", line(recipe, favorites.contains(&recipe.id)));
    }

    println!(
        "\nPage {}/{} | Total: {}",
        page.page, page.total_pages, page.total
    );
}

fn line(recipe: &Recipe, favorite: bool) -> String {
    let mark = if favorite { '*' } else { ' ' };

    match &recipe.category {
        Some(category) => format!("{mark} {:>6}  {} ({category})", recipe.id, recipe.name),
        None => format!("{mark} {:>6}  {}", recipe.id, recipe.name),
    }
}

async fn check(response: Response) -> anyhow::Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    bail!("Backend answered {status}: {body}")
}
