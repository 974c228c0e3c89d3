//! Error types shared by the sync client and the editors.

use thiserror::Error;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// How a failure is surfaced to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
	/// Empty required input. Never reaches the network.
	Validation,
	/// Connectivity, timeout or malformed response. Logged only.
	Transport,
	/// Rejection reported by the planning service. Shown in an alert.
	Domain,
}

/// Errors that can occur while talking to the planning service or editing state.
#[derive(Debug, Error)]
pub enum Error {
	/// A required input field was empty.
	#[error("{0} is required")]
	MissingField(&'static str),

	/// The request could not be sent or the response could not be read.
	#[error("request to {endpoint} failed: {source}")]
	Transport {
		/// Path that was requested.
		endpoint: String,
		/// Underlying client error.
		#[source]
		source: reqwest::Error,
	},

	/// The request exceeded the configured timeout.
	#[error("request to {endpoint} timed out")]
	Timeout {
		/// Path that was requested.
		endpoint: String,
	},

	/// Non-success status with a body that could not be decoded.
	#[error("{endpoint} returned status {status}")]
	Status {
		/// Path that was requested.
		endpoint: String,
		/// HTTP status code.
		status: u16,
	},

	/// The response body did not match the expected shape.
	#[error("invalid response from {endpoint}: {source}")]
	Decode {
		/// Path that was requested.
		endpoint: String,
		/// Why the body did not parse.
		#[source]
		source: serde_json::Error,
	},

	/// The service answered with an error payload.
	#[error("{0}")]
	Service(String),

	/// No persisted syllabus tree exists for the subject.
	#[error("syllabus not found: {0}")]
	SyllabusNotFound(String),

	/// The configured base address cannot carry a path.
	#[error("invalid api url: {0}")]
	InvalidUrl(String),

	/// Client configuration could not be parsed.
	#[error("config error: {0}")]
	Config(#[from] serde_json::Error),
}

impl Error {
	/// Classify the error for notification routing.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Error::MissingField(_) => ErrorKind::Validation,
			Error::Service(_) | Error::SyllabusNotFound(_) => ErrorKind::Domain,
			Error::Transport { .. }
			| Error::Timeout { .. }
			| Error::Status { .. }
			| Error::Decode { .. }
			| Error::InvalidUrl(_)
			| Error::Config(_) => ErrorKind::Transport,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn error_display_formats_correctly() {
		let err = Error::MissingField("subject");
		assert_eq!(err.to_string(), "subject is required");

		let err = Error::Timeout {
			endpoint: "/get-graph".into(),
		};
		assert_eq!(err.to_string(), "request to /get-graph timed out");
	}

	#[test]
	fn kinds_follow_notification_routing() {
		assert_eq!(Error::MissingField("x").kind(), ErrorKind::Validation);
		assert_eq!(Error::Service("Cycle detected!".into()).kind(), ErrorKind::Domain);
		assert_eq!(Error::SyllabusNotFound("Maths".into()).kind(), ErrorKind::Domain);
		assert_eq!(
			Error::Status {
				endpoint: "/get-graph".into(),
				status: 500
			}
			.kind(),
			ErrorKind::Transport
		);
	}

	#[test]
	fn error_from_serde_json() {
		let json_err = serde_json::from_str::<String>("invalid").unwrap_err();
		let err: Error = json_err.into();
		assert!(matches!(err, Error::Config(_)));
		assert_eq!(err.kind(), ErrorKind::Transport);
	}
}
