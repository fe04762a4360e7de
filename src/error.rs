//! Error types for page bootstrap and progress polling.
//!
//! Nothing here is surfaced to the user: callers log these and carry on with a
//! sensible fallback (empty graph, next poll tick).

use thiserror::Error;

/// Failure to read the JSON document the server embeds in the page.
#[derive(Debug, Error)]
pub enum PageError {
	/// Not running in a browser page.
	#[error("no window or document available")]
	NoDocument,
	/// The page has no element with this id.
	#[error("element #{0} not found")]
	MissingElement(&'static str),
	/// The element exists but its text cannot be read as a script.
	#[error("element #{0} is not a readable script element")]
	NotAScript(&'static str),
	/// The script text is not valid page data JSON.
	#[error("invalid page data: {0}")]
	Parse(#[from] serde_json::Error),
}

/// Failure of a single progress poll. Polling continues after any of these.
#[derive(Debug, Error)]
pub enum PollError {
	/// Network-level failure; no response was received.
	#[error("progress request failed: {0}")]
	Request(#[source] gloo_net::Error),
	/// The endpoint answered with a non-2xx status.
	#[error("progress endpoint returned {status} {status_text}")]
	Status {
		/// HTTP status code.
		status: u16,
		/// HTTP reason phrase.
		status_text: String,
	},
	/// The body is not a progress report.
	#[error("progress response could not be decoded: {0}")]
	Decode(#[source] gloo_net::Error),
}
