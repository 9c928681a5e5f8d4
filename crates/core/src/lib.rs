//! # OpenSentinel Core
//!
//! Domain types and error definitions for the OpenSentinel platform client.
//! This crate has **no HTTP dependencies**. It defines the vocabulary that
//! the config, client and CLI crates share.
//!
//! - [`Error`]: the failure taxonomy every operation reports through
//! - [`NotifyChannel`], [`Priority`], [`MemoryType`], [`AgentType`]: the
//!   closed sets of values the platform accepts
//! - [`ChatResult`]: the typed result of a chat round-trip

pub mod chat;
pub mod error;
pub mod kinds;

// Re-export key types at crate root for ergonomics
pub use chat::ChatResult;
pub use error::{Error, Result};
pub use kinds::{AgentType, MemoryType, NotifyChannel, ParseKindError, Priority};
