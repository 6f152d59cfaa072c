//! # Recipes
//!
//! Client side of the recipe browsing platform.
//!
//! ## Overview
//! - Listings and detail come from the backend (`backend/server`), never straight from the providers
//! - Favorites live only on the client, see [`favorites`]
//! - The `recipes` binary is a terminal client over both
//!
//! ## Notes
//! - The favorites store is an explicit value owned by whoever drives the UI. Create it once
//!   with [`favorites::Favorites::init`] and pass it around, there is no global store.

pub mod favorites;
pub mod storage;

pub use catalog::{Recipe, ResultPage};
