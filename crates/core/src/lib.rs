//! Brewery Core - Shared types library.
//!
//! This crate provides the types used across all brewery components:
//! - `web` - HTML and REST front end over the beer inventory
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP. This keeps it lightweight and easy to test.
//!
//! # Modules
//!
//! - [`types`] - The `Beer` record, its identifier and style, and edit payloads
//! - [`validation`] - Field-level validation errors
//! - [`pagination`] - Page requests, page results and the page-link window

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod pagination;
pub mod types;
pub mod validation;

pub use pagination::{Page, PageRequest, PageRequestError, PageWindow, Pageable};
pub use types::*;
pub use validation::{FieldError, ValidationErrors};
