//! # chatgpt-core
//!
//! Core types for the chatgpt client.
//!
//! This crate provides:
//! - The client-wide [`Error`] type and [`Result`] alias
//! - The shared JSON [`codec`] used on both the request and the error path
//! - Wire records for every API family in [`models`]
//! - Default constants in [`defaults`]

pub mod codec;
pub mod defaults;
pub mod error;
pub mod models;

pub use error::{Error, RemoteErrorKind, Result};
pub use models::*;
