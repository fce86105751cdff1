//! Immutable token records and lifecycle helpers.

// self
use crate::{
	_prelude::*,
	auth::{BearerCredential, TokenSecret},
};

/// Current lifecycle status for a token record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenStatus {
	/// Token is currently valid.
	Active,
	/// Token reached its margin-adjusted expiry instant.
	Expired,
}

/// Immutable record of one successful token exchange.
///
/// The record is replaced as a whole by the next successful exchange; individual fields are
/// never mutated in place, so readers always observe a consistent token/expiry pair.
#[derive(Clone)]
pub struct TokenRecord {
	/// Access token secret; callers must avoid logging it.
	pub access_token: TokenSecret,
	/// Instant the exchange request was issued.
	pub issued_at: OffsetDateTime,
	/// Margin-adjusted expiry instant, `issued_at + expires_in - margin`.
	pub expires_at: OffsetDateTime,
}
impl TokenRecord {
	/// Builds a record from a token endpoint response.
	///
	/// The safety margin is subtracted from the server-reported lifetime so refresh happens
	/// before the server-side expiry. A lifetime at or below the margin yields an already
	/// expired record; the next call re-exchanges instead of failing.
	pub fn from_exchange(
		access_token: impl Into<String>,
		expires_in: i64,
		margin: Duration,
		issued_at: OffsetDateTime,
	) -> Self {
		let expires_at = issued_at + Duration::seconds(expires_in) - margin;

		Self { access_token: TokenSecret::new(access_token), issued_at, expires_at }
	}

	/// Computes the lifecycle status at a given instant.
	pub fn status_at(&self, instant: OffsetDateTime) -> TokenStatus {
		if instant >= self.expires_at { TokenStatus::Expired } else { TokenStatus::Active }
	}

	/// Returns `true` if the record has expired at the provided instant.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		matches!(self.status_at(instant), TokenStatus::Expired)
	}

	/// Derives the `Bearer` header source for this record.
	pub fn bearer(&self) -> BearerCredential {
		BearerCredential::from(self.access_token.clone())
	}
}
impl Debug for TokenRecord {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenRecord")
			.field("access_token", &"<redacted>")
			.field("issued_at", &self.issued_at)
			.field("expires_at", &self.expires_at)
			.finish()
	}
}
