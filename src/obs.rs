//! Optional observability helpers for API calls and token exchanges.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `investec_openapi.call` with the `call`
//!   (endpoint) and `stage` (call site) fields.
//! - Enable `metrics` to increment the `investec_openapi_call_total` counter for every
//!   attempt/success/failure, labeled by `call` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// API call kinds observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
	/// Client-credentials exchange against the identity endpoint.
	TokenExchange,
	/// Account listing.
	Accounts,
	/// Account balance lookup.
	Balance,
	/// Account transaction listing.
	Transactions,
	/// Beneficiary listing.
	Beneficiaries,
	/// Beneficiary category listing.
	BeneficiaryCategories,
	/// Batched inter-account transfer.
	TransferMultiple,
	/// Batched beneficiary payment.
	PayMultiple,
}
impl CallKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallKind::TokenExchange => "token_exchange",
			CallKind::Accounts => "accounts",
			CallKind::Balance => "balance",
			CallKind::Transactions => "transactions",
			CallKind::Beneficiaries => "beneficiaries",
			CallKind::BeneficiaryCategories => "beneficiary_categories",
			CallKind::TransferMultiple => "transfer_multiple",
			CallKind::PayMultiple => "pay_multiple",
		}
	}
}
impl Display for CallKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to a client helper.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
