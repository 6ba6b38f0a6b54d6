//! # chatgpt-client
//!
//! Blocking client for the OpenAI HTTP API.
//!
//! This crate provides:
//! - [`OpenAiService`], one method per remote operation
//! - A transport with bearer authentication, optional authenticated proxy and
//!   an explicit TLS policy ([`transport`], [`config`])
//! - The endpoint table ([`endpoint`]) and the dispatcher that turns error
//!   responses into structured errors ([`dispatch`])
//! - Multipart bodies for file upload and image edit/variation ([`multipart`])
//! - The `chatgpt-core` records and error type, re-exported at the root
//!
//! # Example
//!
//! ```rust,no_run
//! use chatgpt_client::OpenAiService;
//! use chatgpt_client::{ChatCompletionRequest, ChatMessage};
//! use std::time::Duration;
//!
//! let service = OpenAiService::new("sk-...", Duration::from_secs(30)).unwrap();
//!
//! for model in service.list_models().unwrap() {
//!     println!("{}", model.id);
//! }
//!
//! let request = ChatCompletionRequest::new("gpt-3.5-turbo", vec![ChatMessage::user("Hello!")]);
//! let result = service.create_chat_completion(&request).unwrap();
//! println!("{}", result.choices[0].message.content);
//! ```

pub mod config;
pub mod dispatch;
pub mod endpoint;
pub mod multipart;
pub mod service;
pub mod transport;

pub use chatgpt_core::*;
pub use config::{ClientConfig, ProxyConfig, TlsPolicy};
pub use dispatch::{Call, Dispatcher};
pub use endpoint::{BodyKind, Endpoint};
pub use multipart::MultipartBody;
pub use service::OpenAiService;
pub use transport::Transport;
