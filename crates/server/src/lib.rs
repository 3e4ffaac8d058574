//! Webtoon reader web application.
//!
//! The server is split into a library and a thin binary so the router can be
//! driven directly from tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
