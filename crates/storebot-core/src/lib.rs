//! 🛍️ storebot-core: Core library for the storebot shopping assistant.
//!
//! This crate contains the building blocks of a rule-based storefront chat
//! responder:
//!
//! - [`config`] — Typed configuration loading from JSON
//! - [`intent`] — Keyword rule table, category extractor and response templates
//! - [`session`] — Per-session conversation logs behind the `SessionStore` trait
//! - [`recommend`] — Pluggable product recommendation capability
//! - [`gateway`] — Boundary layer that wires the responder to sessions and recommendations
//! - [`error`] — Error types for the responder and the gateway
//!
//! # Quick Start
//!
//! ```no_run
//! use storebot_core::config::Config;
//! use storebot_core::gateway::{ChatGateway, ChatRequest};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::load()?;
//! let gateway = ChatGateway::in_memory(&config);
//!
//! let reply = gateway
//!     .handle_chat(ChatRequest::new("hello").with_session("web:42"))
//!     .await?;
//! println!("{}", reply.response);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod gateway;
pub mod intent;
pub mod recommend;
pub mod session;
