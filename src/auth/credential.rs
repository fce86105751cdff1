//! Secret wrappers and the header values derived from them.
//!
//! Header values are derived fresh for every outbound request and never stored; the only
//! long-lived secret material is the [`BasicCredential`] owned by the client and the access
//! token inside the current token record.

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
// self
use crate::_prelude::*;

/// Redacted secret wrapper keeping sensitive material out of logs.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for TokenSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TokenSecret").field(&"<redacted>").finish()
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Client ID + secret pair used for HTTP Basic authentication against the token endpoint.
///
/// Immutable for the lifetime of a client instance.
#[derive(Clone)]
pub struct BasicCredential {
	client_id: String,
	secret: TokenSecret,
}
impl BasicCredential {
	/// Creates a credential pair. Emptiness checks belong to the client builder.
	pub fn new(client_id: impl Into<String>, secret: impl Into<String>) -> Self {
		Self { client_id: client_id.into(), secret: TokenSecret::new(secret) }
	}

	/// Returns the client identifier.
	pub fn client_id(&self) -> &str {
		&self.client_id
	}

	/// Produces the `Authorization` header value, `Basic <base64(client_id:secret)>`.
	pub fn header_value(&self) -> String {
		let encoded = BASE64.encode(format!("{}:{}", self.client_id, self.secret.expose()));

		format!("Basic {encoded}")
	}
}
impl Debug for BasicCredential {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("BasicCredential")
			.field("client_id", &self.client_id)
			.field("secret", &self.secret)
			.finish()
	}
}

/// Single access token wrapped as an `Authorization` header source.
#[derive(Clone, Debug)]
pub struct BearerCredential(TokenSecret);
impl BearerCredential {
	/// Wraps an access token value.
	pub fn new(access_token: impl Into<String>) -> Self {
		Self(TokenSecret::new(access_token))
	}

	/// Returns the wrapped token.
	pub fn token(&self) -> &TokenSecret {
		&self.0
	}

	/// Produces the `Authorization` header value, `Bearer <token>`.
	pub fn header_value(&self) -> String {
		format!("Bearer {}", self.0.expose())
	}
}
impl From<TokenSecret> for BearerCredential {
	fn from(token: TokenSecret) -> Self {
		Self(token)
	}
}
