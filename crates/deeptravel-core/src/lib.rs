//! Domain layer of DeepTravel.
//!
//! Holds the models (journeys, chat messages, settings, navigation records,
//! attachments) and the traits through which the application reaches storage
//! and device collaborators. Nothing in this crate performs I/O.

pub mod assistant;
pub mod attachment;
pub mod chat;
pub mod config;
pub mod error;
pub mod journey;
pub mod navigation;
pub mod settings;
pub mod storage;

pub use error::{DeepTravelError, Result};
