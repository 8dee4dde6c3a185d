//! Error type shared by the shaping components.

use thiserror::Error;

/// Errors raised while shaping flat records into chart-ready structures.
///
/// Every variant is raised synchronously at the call that detects it, and
/// none are worth retrying: the inputs are plain in-memory collections, so a
/// failed call fails identically until the data is fixed. Callers should
/// treat a failure as fatal for the current render attempt and skip drawing
/// rather than draw from a partial structure.
#[derive(Debug, Error)]
pub enum ShapeError {
	/// Two records mapped to the same id while duplicates were rejected.
	#[error("duplicate id {id:?} in record set")]
	DuplicateId {
		/// The id both records produced.
		id: String,
	},

	/// The record set does not stratify into a single rooted tree: a parent
	/// reference does not resolve, the parent links contain a cycle, or root
	/// uniqueness is violated.
	#[error("cannot stratify {id:?}: {reason}")]
	CycleOrOrphan {
		/// Id of the offending record (empty when no record qualifies,
		/// e.g. an empty input).
		id: String,
		/// What went wrong, for the render-skipping caller's report.
		reason: String,
	},

	/// An ancestor walk hit a parent id with no matching node after the tree
	/// was already built. This is an internal-consistency failure, not bad
	/// caller input.
	#[error("node {id:?} references missing parent {parent:?}")]
	DisconnectedNode {
		/// Id of the node whose parent link dangles.
		id: String,
		/// The unresolved parent id.
		parent: String,
	},

	/// A weight field held a non-numeric, non-empty value.
	#[error("invalid weight {value:?} in field {field:?}")]
	InvalidWeight {
		/// Name of the weight field.
		field: String,
		/// The offending value, verbatim.
		value: String,
	},

	/// A color lookup named a category outside the frozen domain while the
	/// assigner was configured to reject unknown names.
	#[error("category {name:?} is outside the frozen color domain")]
	UnknownCategory {
		/// The unseen category name.
		name: String,
	},

	/// Record decoding from JSON text failed.
	#[error("failed to decode JSON records")]
	Json(#[from] serde_json::Error),

	/// Record decoding from CSV text failed.
	#[error("failed to decode CSV records")]
	Csv(#[from] csv::Error),
}
