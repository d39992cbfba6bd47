//! Core library for the `skycast` CLI.
//!
//! This crate defines:
//! - Domain models for resolved places and daily forecasts
//! - Clients for the geocoding and forecast endpoints
//! - The persisted last-location store
//! - The resolution controller that sequences lookups into view state
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod controller;
pub mod error;
pub mod forecast;
pub mod geocode;
pub mod model;
pub mod store;

pub use controller::{Controller, LoadState, ViewState};
pub use error::LookupError;
pub use forecast::ForecastClient;
pub use geocode::GeocodeClient;
pub use model::{ForecastDay, Place, country_flag};
pub use store::LocationStore;
