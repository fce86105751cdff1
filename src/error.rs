//! Client-level error types shared across authentication, dispatch, and the endpoint facade.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem at construction time.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Token exchange against the identity endpoint failed.
	#[error(transparent)]
	Auth(#[from] AuthError),
	/// Caller-supplied parameters violated a precondition.
	#[error(transparent)]
	Validation(#[from] ValidationError),
	/// Network-level failure (timeout, connection refused, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Resource endpoint answered outside the 2xx range.
	#[error(transparent)]
	Api(#[from] ApiError),
	/// Response body could not be decoded as JSON.
	#[error(transparent)]
	Decode(#[from] DecodeError),
}

/// Configuration and validation failures raised during client construction.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Neither direct arguments nor a credentials collaborator supplied both values.
	#[error("Client ID and secret must both be supplied.")]
	MissingCredentials,
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Host and path fragments did not combine into a valid URL.
	#[error("Endpoint URL is invalid.")]
	InvalidEndpoint {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}

/// Token exchange failures raised by the identity endpoint.
#[derive(Debug, ThisError)]
pub enum AuthError {
	/// Token endpoint rejected the exchange (bad credentials, disabled client).
	#[error("Token endpoint returned HTTP {status}.")]
	TokenEndpoint {
		/// HTTP status code reported by the identity endpoint.
		status: u16,
		/// Raw response body kept for diagnostics.
		body: String,
	},
	/// Token endpoint responded 2xx with a body that is not a valid token payload.
	#[error("Token endpoint returned a malformed token payload.")]
	TokenResponseParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}

/// Caller-side precondition failures detected before any network traffic.
#[derive(Debug, ThisError)]
pub enum ValidationError {
	/// Transaction window ends before it starts.
	#[error("Transaction window ends ({to}) before it starts ({from}).")]
	DateRange {
		/// Inclusive start of the requested window.
		from: Date,
		/// Inclusive end of the requested window.
		to: Date,
	},
	/// Caller-supplied payload could not be encoded as JSON.
	#[error("Request payload could not be encoded as JSON.")]
	Payload {
		/// Underlying serialization failure.
		#[source]
		source: serde_json::Error,
	},
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Request exceeded the configured timeout.
	#[error("Request timed out before the API responded.")]
	Timeout,
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		if e.is_timeout() { Self::Timeout } else { Self::network(e) }
	}
}

/// Non-2xx answer from a resource endpoint, kept verbatim for diagnostics.
#[derive(Debug, ThisError)]
#[error("API returned HTTP {status}.")]
pub struct ApiError {
	/// HTTP status code of the response.
	pub status: u16,
	/// Raw response body.
	pub body: String,
}

/// 2xx response whose body could not be parsed as JSON.
#[derive(Debug, ThisError)]
#[error("Response body is not valid JSON (HTTP {status}).")]
pub struct DecodeError {
	/// HTTP status code of the response that failed to decode.
	pub status: u16,
	/// Structured parsing failure.
	#[source]
	pub source: serde_path_to_error::Error<serde_json::Error>,
}
