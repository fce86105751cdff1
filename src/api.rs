//! Client construction and the typed endpoint facade.

pub mod id;
pub mod types;

pub use id::*;
pub use types::*;

// self
use crate::{
	_prelude::*,
	auth::BasicCredential,
	error::{ConfigError, ValidationError},
	http::{ApiRequest, Dispatcher},
	oauth::{DEFAULT_EXPIRY_MARGIN, TOKEN_ENDPOINT_PATH, TokenManager},
	obs::CallKind,
};

/// Default API host for production access.
pub const DEFAULT_HOST: &str = "https://openapi.investec.com";
/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: StdDuration = StdDuration::from_secs(30);

const RESOURCE_BASE: &str = "/za/pb/v1";

/// Client for the Investec Programmable Banking Open API.
///
/// Each instance owns its credential, transport, and token state; callers construct and hold
/// one and share it by reference (or behind an `Arc`). There is no process-wide registry.
#[derive(Debug)]
pub struct Client {
	dispatcher: Dispatcher,
}
impl Client {
	/// Returns a builder with production defaults.
	pub fn builder() -> ClientBuilder {
		ClientBuilder::new()
	}

	/// Returns the configured host.
	pub fn host(&self) -> &Url {
		self.dispatcher.host()
	}

	/// Returns the token manager backing this client.
	pub fn tokens(&self) -> &TokenManager {
		self.dispatcher.tokens()
	}

	/// Lists the accounts available to the authenticated client.
	pub async fn get_accounts(&self) -> Result<Json> {
		self.dispatcher
			.dispatch(CallKind::Accounts, ApiRequest::get(format!("{RESOURCE_BASE}/accounts")))
			.await
	}

	/// Fetches the balance of one account.
	pub async fn get_account_balance(&self, account_id: &AccountId) -> Result<Json> {
		self.dispatcher
			.dispatch(
				CallKind::Balance,
				ApiRequest::get(format!("{RESOURCE_BASE}/accounts/{account_id}/balance")),
			)
			.await
	}

	/// Lists transactions on one account, optionally filtered by window and type.
	///
	/// An inverted date window fails with [`ValidationError::DateRange`] before any network
	/// traffic, including the token exchange.
	pub async fn get_account_transactions(
		&self,
		account_id: &AccountId,
		filter: TransactionFilter,
	) -> Result<Json> {
		filter.validate()?;

		let mut request =
			ApiRequest::get(format!("{RESOURCE_BASE}/accounts/{account_id}/transactions"));

		for (key, value) in filter.query_pairs() {
			request = request.with_query(key, value);
		}

		self.dispatcher.dispatch(CallKind::Transactions, request).await
	}

	/// Lists the saved beneficiaries.
	pub async fn get_beneficiaries(&self) -> Result<Json> {
		self.dispatcher
			.dispatch(
				CallKind::Beneficiaries,
				ApiRequest::get(format!("{RESOURCE_BASE}/accounts/beneficiaries")),
			)
			.await
	}

	/// Lists the bank-defined beneficiary categories.
	pub async fn get_beneficiary_categories(&self) -> Result<Json> {
		self.dispatcher
			.dispatch(
				CallKind::BeneficiaryCategories,
				ApiRequest::get(format!("{RESOURCE_BASE}/accounts/beneficiarycategories")),
			)
			.await
	}

	/// Executes a batch of transfers out of one account.
	pub async fn transfer_multiple(
		&self,
		account_id: &AccountId,
		transfers: &[TransferInstruction],
	) -> Result<Json> {
		let body = encode_body(&TransferBatch { transfer_list: transfers })?;

		self.dispatcher
			.dispatch(
				CallKind::TransferMultiple,
				ApiRequest::post(
					format!("{RESOURCE_BASE}/accounts/{account_id}/transfermultiple"),
					body,
				),
			)
			.await
	}

	/// Executes a batch of payments to saved beneficiaries out of one account.
	pub async fn pay_multiple(
		&self,
		account_id: &AccountId,
		payments: &[PaymentInstruction],
	) -> Result<Json> {
		let body = encode_body(&PaymentBatch { payment_list: payments })?;

		self.dispatcher
			.dispatch(
				CallKind::PayMultiple,
				ApiRequest::post(format!("{RESOURCE_BASE}/accounts/{account_id}/paymultiple"), body),
			)
			.await
	}
}

/// Builder for [`Client`].
///
/// `client_id` and `secret` are mandatory; everything else defaults to production values.
#[derive(Clone, Debug, Default)]
pub struct ClientBuilder {
	client_id: Option<String>,
	secret: Option<String>,
	host: Option<Url>,
	timeout: Option<StdDuration>,
	expiry_margin: Option<Duration>,
	http_client: Option<ReqwestClient>,
}
impl ClientBuilder {
	/// Creates a builder with every field unset.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the OAuth2 client identifier.
	pub fn client_id(mut self, value: impl Into<String>) -> Self {
		self.client_id = Some(value.into());

		self
	}

	/// Sets the OAuth2 client secret.
	pub fn secret(mut self, value: impl Into<String>) -> Self {
		self.secret = Some(value.into());

		self
	}

	/// Overrides the API host (defaults to [`DEFAULT_HOST`]); sandbox and mock servers go here.
	pub fn host(mut self, host: Url) -> Self {
		self.host = Some(host);

		self
	}

	/// Overrides the per-request timeout (defaults to [`DEFAULT_TIMEOUT`]).
	pub fn timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = Some(timeout);

		self
	}

	/// Overrides the expiry safety margin subtracted from server-reported token lifetimes.
	pub fn expiry_margin(mut self, margin: Duration) -> Self {
		self.expiry_margin = Some(margin);

		self
	}

	/// Supplies a pre-built transport. The `timeout` setting is ignored for supplied clients;
	/// configure it on the client itself.
	pub fn with_http_client(mut self, http: ReqwestClient) -> Self {
		self.http_client = Some(http);

		self
	}

	/// Consumes the builder and produces a [`Client`].
	pub fn build(self) -> Result<Client> {
		let client_id = self.client_id.filter(|value| !value.is_empty());
		let secret = self.secret.filter(|value| !value.is_empty());
		let (client_id, secret) = match (client_id, secret) {
			(Some(client_id), Some(secret)) => (client_id, secret),
			_ => return Err(ConfigError::MissingCredentials.into()),
		};
		let host = match self.host {
			Some(host) => host,
			None => Url::parse(DEFAULT_HOST)
				.map_err(|source| ConfigError::InvalidEndpoint { source })?,
		};
		let token_url = host
			.join(TOKEN_ENDPOINT_PATH)
			.map_err(|source| ConfigError::InvalidEndpoint { source })?;
		let http = match self.http_client {
			Some(http) => http,
			None => ReqwestClient::builder()
				.timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
				.build()
				.map_err(ConfigError::http_client_build)?,
		};
		let credential = BasicCredential::new(client_id, secret);
		let margin = self.expiry_margin.unwrap_or(DEFAULT_EXPIRY_MARGIN);
		let tokens = TokenManager::new(credential, token_url, margin);

		Ok(Client { dispatcher: Dispatcher::new(http, host, tokens) })
	}
}

fn encode_body(body: &impl Serialize) -> Result<Json> {
	serde_json::to_value(body).map_err(|source| ValidationError::Payload { source }.into())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::error::Error;

	#[test]
	fn builder_requires_both_credentials() {
		assert!(matches!(
			Client::builder().build(),
			Err(Error::Config(ConfigError::MissingCredentials)),
		));
		assert!(matches!(
			Client::builder().client_id("id").build(),
			Err(Error::Config(ConfigError::MissingCredentials)),
		));
		assert!(matches!(
			Client::builder().client_id("id").secret("").build(),
			Err(Error::Config(ConfigError::MissingCredentials)),
		));
	}

	#[test]
	fn builder_defaults_to_production_host() {
		let client = Client::builder()
			.client_id("id")
			.secret("secret")
			.build()
			.expect("Client should build with credentials alone.");

		assert_eq!(client.host().as_str(), "https://openapi.investec.com/");
	}

	#[test]
	fn builder_accepts_custom_host() {
		let host = Url::parse("http://127.0.0.1:18080")
			.expect("Custom host fixture should parse successfully.");
		let client = Client::builder()
			.client_id("id")
			.secret("secret")
			.host(host)
			.build()
			.expect("Client should build against a custom host.");

		assert_eq!(client.host().as_str(), "http://127.0.0.1:18080/");
	}
}
