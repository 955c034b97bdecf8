//! Error types for the animation engine.
//!
//! Parsing of AIR action text is tolerant by design: malformed frame lines
//! and directives are skipped or defaulted, never reported as errors. The
//! variants here cover the boundaries where failure is real, such as reading
//! an action file from disk.

use thiserror::Error;

/// Errors that can occur when loading or querying animation data.
#[derive(Debug, Error)]
pub enum AnimError {
	/// Action number not present in the table
	#[error("Action {0} not found in the action table")]
	ActionNotFound(i32),

	/// IO error
	#[error(transparent)]
	IOError(#[from] std::io::Error),
}
