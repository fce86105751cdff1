//! Request dispatch: one API call with authentication, timeout, and envelope handling.

// crates.io
use reqwest::{
	Method,
	header::{ACCEPT, AUTHORIZATION},
};
// self
use crate::{
	_prelude::*,
	error::{ApiError, ConfigError, DecodeError, TransportError},
	oauth::TokenManager,
	obs::{self, CallKind, CallOutcome, CallSpan},
};

const ACCEPT_JSON: &str = "application/json";

/// One outbound API call: method, path, query pairs, and an optional JSON body.
///
/// Ephemeral; the facade constructs a fresh value per call and hands it to the dispatcher.
#[derive(Clone, Debug)]
pub struct ApiRequest {
	/// HTTP method.
	pub method: Method,
	/// Path relative to the configured host, including the resource base.
	pub path: String,
	/// Query pairs appended to the URL in insertion order.
	pub query: Vec<(&'static str, String)>,
	/// JSON body attached to mutating calls.
	pub body: Option<Json>,
}
impl ApiRequest {
	/// Creates a GET request for the provided path.
	pub fn get(path: impl Into<String>) -> Self {
		Self { method: Method::GET, path: path.into(), query: Vec::new(), body: None }
	}

	/// Creates a POST request carrying a JSON body.
	pub fn post(path: impl Into<String>, body: Json) -> Self {
		Self { method: Method::POST, path: path.into(), query: Vec::new(), body: Some(body) }
	}

	/// Appends a query pair.
	pub fn with_query(mut self, key: &'static str, value: impl Into<String>) -> Self {
		self.query.push((key, value.into()));

		self
	}
}

/// Executes API calls against the configured host, transparently providing authentication and
/// uniform envelope handling.
#[derive(Debug)]
pub struct Dispatcher {
	http: ReqwestClient,
	host: Url,
	tokens: TokenManager,
}
impl Dispatcher {
	/// Creates a dispatcher over a shared transport and token manager.
	pub fn new(http: ReqwestClient, host: Url, tokens: TokenManager) -> Self {
		Self { http, host, tokens }
	}

	/// Returns the configured host.
	pub fn host(&self) -> &Url {
		&self.host
	}

	/// Returns the token manager owned by this dispatcher.
	pub fn tokens(&self) -> &TokenManager {
		&self.tokens
	}

	/// Executes one call and returns the envelope-unwrapped JSON payload.
	pub async fn dispatch(&self, kind: CallKind, request: ApiRequest) -> Result<Json> {
		let span = CallSpan::new(kind, "dispatch");

		obs::record_call_outcome(kind, CallOutcome::Attempt);

		let result = span.instrument(self.execute(request)).await;

		match &result {
			Ok(_) => obs::record_call_outcome(kind, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(kind, CallOutcome::Failure),
		}

		result
	}

	async fn execute(&self, request: ApiRequest) -> Result<Json> {
		let ApiRequest { method, path, query, body } = request;
		let bearer = self.tokens.ensure_valid_token(&self.http).await?;
		let mut url =
			self.host.join(&path).map_err(|source| ConfigError::InvalidEndpoint { source })?;

		if !query.is_empty() {
			let mut pairs = url.query_pairs_mut();

			for (key, value) in &query {
				pairs.append_pair(key, value);
			}
		}

		let mut builder = self
			.http
			.request(method, url)
			.header(ACCEPT, ACCEPT_JSON)
			.header(AUTHORIZATION, bearer.header_value());

		if let Some(body) = &body {
			builder = builder.json(body);
		}

		let response = builder.send().await.map_err(TransportError::from)?;
		let status = response.status();
		let body = response.bytes().await.map_err(TransportError::from)?;

		if !status.is_success() {
			return Err(ApiError {
				status: status.as_u16(),
				body: String::from_utf8_lossy(&body).into_owned(),
			}
			.into());
		}

		let mut deserializer = serde_json::Deserializer::from_slice(&body);
		let parsed = serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| DecodeError { status: status.as_u16(), source })?;

		Ok(unwrap_envelope(parsed))
	}
}

/// Unwraps the uniform `data` envelope: an object containing a `data` field yields that field's
/// value; anything else passes through unchanged.
pub fn unwrap_envelope(value: Json) -> Json {
	match value {
		Json::Object(mut map) => match map.remove("data") {
			Some(data) => data,
			None => Json::Object(map),
		},
		other => other,
	}
}
