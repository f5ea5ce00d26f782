//! Back-office service for a care-services provider.
//!
//! This crate provides client, attendance, goal-tracking, and time-clock
//! record keeping over an embedded SQLite store, exposed through a JSON
//! HTTP API.

#![warn(missing_docs)]

pub mod api;
pub mod clock;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
