//! Client-credentials exchange and token lifecycle management.
//!
//! [`TokenManager`] guarantees that every outbound call carries a non-expired bearer token,
//! contacting the identity endpoint only when the cached record is missing or stale. Concurrent
//! callers discovering an expired token piggy-back on one in-flight exchange instead of
//! stampeding the token endpoint.

// crates.io
use reqwest::header::{ACCEPT, AUTHORIZATION};
// self
use crate::{
	_prelude::*,
	auth::{BasicCredential, BearerCredential, TokenRecord},
	error::{AuthError, TransportError},
	obs::{self, CallKind, CallOutcome, CallSpan},
};

/// Path of the OAuth2 token endpoint, relative to the configured host.
pub const TOKEN_ENDPOINT_PATH: &str = "/identity/v2/oauth2/token";
/// Safety margin subtracted from server-reported token lifetimes (the bank reports 1800 s).
pub const DEFAULT_EXPIRY_MARGIN: Duration = Duration::seconds(60);

const ACCEPT_JSON: &str = "application/json";
const TOKEN_FORM: &[(&str, &str)] = &[("grant_type", "client_credentials"), ("scope", "accounts")];

/// Successful token endpoint payload. Extra fields (`token_type`, `scope`) are ignored.
#[derive(Debug, Deserialize)]
struct TokenEndpointResponse {
	access_token: String,
	/// Lifetime in seconds, relative to the response instant.
	expires_in: i64,
}

/// Owns the client credential, the current token record, and the refresh decision.
///
/// State moves `Unauthenticated -> Valid` on the first successful exchange, `Valid -> Expired`
/// once the margin-adjusted expiry passes, and `Expired -> Valid` on re-exchange. There is no
/// invalidation path; a failed exchange leaves the previous record untouched so the next call
/// retries instead of being locked out.
pub struct TokenManager {
	credential: BasicCredential,
	token_url: Url,
	margin: Duration,
	state: RwLock<Option<TokenRecord>>,
	exchange_guard: AsyncMutex<()>,
}
impl TokenManager {
	/// Creates a manager in the unauthenticated state.
	pub fn new(credential: BasicCredential, token_url: Url, margin: Duration) -> Self {
		Self {
			credential,
			token_url,
			margin,
			state: RwLock::new(None),
			exchange_guard: AsyncMutex::new(()),
		}
	}

	/// Returns a clone of the current record, if any exchange has succeeded yet.
	pub fn current(&self) -> Option<TokenRecord> {
		self.state.read().clone()
	}

	/// Returns a bearer credential backed by a token that is valid at the time of the check.
	///
	/// The fast path reads the cached record without locking out other callers. When the record
	/// is missing or stale, the exchange mutex serializes the refresh and the state is
	/// re-checked after acquisition, so waiters reuse the token minted by the first caller.
	pub async fn ensure_valid_token(&self, http: &ReqwestClient) -> Result<BearerCredential> {
		if let Some(bearer) = self.active_bearer(OffsetDateTime::now_utc()) {
			return Ok(bearer);
		}

		let _guard = self.exchange_guard.lock().await;

		if let Some(bearer) = self.active_bearer(OffsetDateTime::now_utc()) {
			return Ok(bearer);
		}

		let record = self.exchange(http).await?;
		let bearer = record.bearer();

		*self.state.write() = Some(record);

		Ok(bearer)
	}

	fn active_bearer(&self, now: OffsetDateTime) -> Option<BearerCredential> {
		self.state
			.read()
			.as_ref()
			.filter(|record| !record.is_expired_at(now))
			.map(TokenRecord::bearer)
	}

	/// Performs one client-credentials exchange against the identity endpoint.
	///
	/// Successful responses produce a fresh [`TokenRecord`]; every failure path returns before
	/// the stored state is touched.
	async fn exchange(&self, http: &ReqwestClient) -> Result<TokenRecord> {
		const KIND: CallKind = CallKind::TokenExchange;

		let span = CallSpan::new(KIND, "exchange");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let issued_at = OffsetDateTime::now_utc();
				let response = http
					.post(self.token_url.clone())
					.header(ACCEPT, ACCEPT_JSON)
					.header(AUTHORIZATION, self.credential.header_value())
					.form(TOKEN_FORM)
					.send()
					.await
					.map_err(TransportError::from)?;
				let status = response.status();
				let body = response.bytes().await.map_err(TransportError::from)?;

				if !status.is_success() {
					return Err(AuthError::TokenEndpoint {
						status: status.as_u16(),
						body: String::from_utf8_lossy(&body).into_owned(),
					}
					.into());
				}

				let mut deserializer = serde_json::Deserializer::from_slice(&body);
				let payload: TokenEndpointResponse =
					serde_path_to_error::deserialize(&mut deserializer)
						.map_err(|source| AuthError::TokenResponseParse { source })?;

				Ok(TokenRecord::from_exchange(
					payload.access_token,
					payload.expires_in,
					self.margin,
					issued_at,
				))
			})
			.await;

		match &result {
			Ok(_) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(KIND, CallOutcome::Failure),
		}

		result
	}
}
impl Debug for TokenManager {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenManager")
			.field("credential", &self.credential)
			.field("token_url", &self.token_url.as_str())
			.field("margin", &self.margin)
			.field("authenticated", &self.state.read().is_some())
			.finish()
	}
}
