//! Wire records for the OpenAI API.
//!
//! These are flat data carriers. Response records keep every field except the
//! identifier optional so that sparse or evolving payloads still decode.

mod chat;
mod common;
mod completion;
mod edit;
mod embedding;
mod engine;
mod file;
mod fine_tune;
mod image;
mod model;
mod moderation;

pub use chat::*;
pub use common::*;
pub use completion::*;
pub use edit::*;
pub use embedding::*;
pub use engine::*;
pub use file::*;
pub use fine_tune::*;
pub use image::*;
pub use model::*;
pub use moderation::*;
