//! Disaster Mitigation Expert System API Library
//!
//! Evaluates flood and earthquake risk with the propositional formula
//! `P ∧ (Q ∨ R)`, attaches static mitigation advice, and proxies an
//! OpenWeatherMap-compatible provider for weather and city search.
//!
//! # Modules
//!
//! - `api`: HTTP-layer namespace.
//! - `core`: Risk engine and advice tables.
//! - `integrations`: Weather provider client and payload models.
//! - `articles`: Static mitigation articles.
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers and router.
//! - `models`: Request coercion and response models.
//! - `recommendations`: Advice tables keyed by factor combination.
//! - `risk`: Logic gates, evaluator, truth tables, combined classifier.
//! - `services`: Weather gateway and city search ranking.
//! - `weather_models`: Provider payloads and weather snapshot projection.

pub mod api;
pub mod core;
pub mod integrations;

pub mod articles;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod recommendations;
pub mod risk;
pub mod services;
pub mod weather_models;
