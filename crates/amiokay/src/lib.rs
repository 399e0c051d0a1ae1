//! Result engine for an anonymous symptom quiz.
//!
//! Quiz answers are compared against precomputed population tables: how common
//! each selected symptom is, which symptoms tend to co-occur, which specialists
//! cover the selection, and how severe respondents rate each symptom.

pub mod config;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod report;
pub mod telemetry;
