//! # Shiftdesk Rust Backend
//!
//! Monthly shift selection and capacity allocation engine.
//!
//! This crate provides a Rust-based backend for the Shiftdesk system, letting
//! employees claim work shifts for an upcoming month against a finite daily
//! capacity pool and letting administrators configure that pool. The backend
//! exposes a REST API via Axum for the React frontend.
//!
//! ## Features
//!
//! - **Capacity Ledger**: per (day, shift-type) counters of total and available
//!   slots, mutated atomically during interactive selection
//! - **Allocation Rules**: pure validation of candidate selection sets against
//!   a versioned quota policy
//! - **Selection Sessions**: per-employee month state machine that reserves and
//!   releases capacity as shifts are toggled, then commits the final schedule
//! - **Vacation Overlay**: alternate allocation mode that pre-commits vacation
//!   days and suppresses shift selection
//! - **HTTP API**: RESTful endpoints for frontend integration
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Shared domain types and ID newtypes
//! - [`models`]: Month arithmetic and allocation policy configuration
//! - [`rules`]: Pure allocation rule engine
//! - [`db`]: Repository pattern and storage backends
//! - [`services`]: Selection session, capacity administration, vacation, export
//!

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;

pub mod db;
pub mod models;

pub mod rules;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;

#[cfg(test)]
#[path = "api_tests.rs"]
mod api_tests;
