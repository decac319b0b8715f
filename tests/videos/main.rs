//! Integration tests for the videos resource router.
//!
//! Starts an axum server and exercises it with reqwest.

#![cfg(feature = "server")]

mod support;
mod resource;
