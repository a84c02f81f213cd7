//! FMEA/CP association server library.
//!
//! Stores FMEA and Control Plan documents with their parsed rows, records
//! confirmed links between FMEA and CP rows, and asks an AI provider for
//! link suggestions.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod services;
