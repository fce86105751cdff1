//! Async Rust client for the Investec Programmable Banking Open API—client-credentials token
//! lifecycle, typed account operations, and transport-aware observability in one crate.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod auth;
pub mod error;
pub mod http;
pub mod oauth;
pub mod obs;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::api::{Client, ClientBuilder};

	/// Client ID used by every mock-backed test fixture.
	pub const TEST_CLIENT_ID: &str = "client-id";
	/// Client secret used by every mock-backed test fixture.
	pub const TEST_SECRET: &str = "client-secret";

	/// Returns a [`ClientBuilder`] pointed at a mock server, with the shared test credentials
	/// applied. Tests tweak margins or timeouts before calling `build`.
	pub fn test_client_builder(host: Url) -> ClientBuilder {
		Client::builder().client_id(TEST_CLIENT_ID).secret(TEST_SECRET).host(host)
	}

	/// Builds a [`Client`] against a mock server with default margin and timeout.
	pub fn build_test_client(host: Url) -> Client {
		test_client_builder(host).build().expect("Test client should build successfully.")
	}
}

mod _prelude {
	pub use std::{
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		str::FromStr,
		sync::Arc,
		time::Duration as StdDuration,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::RwLock;
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value as Json;
	pub use thiserror::Error as ThisError;
	pub use time::{Date, Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use url;
#[cfg(test)] use {httpmock as _, tokio as _};
