//! Core types and business rules for the todo service.
//!
//! No HTTP or database code lives here. The store and the remote sources are
//! reached only through the [`TodoStore`] and [`RemoteSource`] traits.
//!
//! [`TodoStore`]: store::TodoStore
//! [`RemoteSource`]: remote::RemoteSource

#![allow(async_fn_in_trait)]

pub mod config;
pub mod error;
pub mod filter;
pub mod import;
pub mod item;
pub mod merge;
pub mod remote;
pub mod service;
pub mod store;
pub mod weather;

pub use config::ServiceConfig;
pub use error::{Error, Result};
pub use service::TodoService;
