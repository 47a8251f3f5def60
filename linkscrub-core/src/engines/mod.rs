//! Concrete implementations of the `CleaningEngine` trait.

pub mod provider_engine;
