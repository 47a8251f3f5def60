// linkscrub/src/lib.rs
//! Application layer for the `linkscrub` binary: CLI definitions, command
//! runners, rule-set acquisition, logging, and the reporting policy.
//!
//! All cleaning semantics live in `linkscrub-core`; this crate only decides
//! where rules come from and which results are worth showing.
//!
//! License: MIT OR Apache-2.0

pub mod cli;
pub mod commands;
pub mod logger;
pub mod report;
pub mod rules_loader;
