//! Connection matrices from weighted edge records.
//!
//! Converts a flat list of directed edges (source, target, weight) into the
//! dense square matrix that chord and adjacency layouts consume, indexed by
//! a stable name→index mapping. Also carries the edge-list pre-filters the
//! original charts apply before building: minimum-weight cuts, reciprocal
//! pruning, and out-degree totals.

use indexmap::{IndexMap, IndexSet};
use log::{debug, warn};

use crate::error::ShapeError;
use crate::record::Record;

/// Unique names drawn from one or more record fields.
///
/// De-duplication is stable and key-major: every distinct value of the first
/// key in first-occurrence order, then values of the next key not already
/// seen, and so on. Blank fields are skipped.
pub fn unique_ordered_names(records: &[Record], keys: &[&str]) -> Vec<String> {
	let mut seen = IndexSet::new();
	for &key in keys {
		for record in records {
			if record.is_blank(key) {
				continue;
			}
			seen.insert(record.text(key));
		}
	}
	seen.into_iter().collect()
}

/// Deterministic name→row/column mapping in first-seen order.
#[derive(Clone, Debug, Default)]
pub struct NameIndex {
	positions: IndexMap<String, usize>,
}

impl NameIndex {
	/// Build from an ordered name sequence, de-duplicating while preserving
	/// first-occurrence order.
	pub fn from_names(names: impl IntoIterator<Item = String>) -> Self {
		let mut positions = IndexMap::new();
		for name in names {
			let next = positions.len();
			positions.entry(name).or_insert(next);
		}
		Self { positions }
	}

	/// Build directly from record fields via [`unique_ordered_names`].
	pub fn from_records(records: &[Record], keys: &[&str]) -> Self {
		Self::from_names(unique_ordered_names(records, keys))
	}

	/// The row/column index of a name.
	pub fn get(&self, name: &str) -> Option<usize> {
		self.positions.get(name).copied()
	}

	/// Number of names indexed.
	pub fn len(&self) -> usize {
		self.positions.len()
	}

	/// Whether no names are indexed.
	pub fn is_empty(&self) -> bool {
		self.positions.is_empty()
	}

	/// All names in index order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.positions.keys().map(String::as_str)
	}
}

/// Cell seeding for [`build_connection_matrix_with`].
#[derive(Clone, Copy, Debug)]
pub struct MatrixOptions {
	/// Value every cell starts from before weights accumulate.
	pub baseline: f64,
}

impl Default for MatrixOptions {
	fn default() -> Self {
		Self { baseline: 0.0 }
	}
}

impl MatrixOptions {
	/// Seed every cell with 1, matching the output of the legacy renderer,
	/// which inflated all pairwise values — unconnected pairs included.
	/// Only worth using when bit-compatibility with that output matters.
	pub fn legacy_baseline() -> Self {
		Self { baseline: 1.0 }
	}
}

/// A dense square matrix of accumulated directed edge weights.
#[derive(Clone, Debug)]
pub struct ConnectionMatrix {
	index: NameIndex,
	cells: Vec<f64>,
}

impl ConnectionMatrix {
	/// The name→row/column mapping.
	pub fn index(&self) -> &NameIndex {
		&self.index
	}

	/// Matrix dimension: the count of unique names across source and target
	/// fields.
	pub fn len(&self) -> usize {
		self.index.len()
	}

	/// Whether the matrix has no rows.
	pub fn is_empty(&self) -> bool {
		self.index.is_empty()
	}

	/// The accumulated weight at a row/column position.
	///
	/// # Panics
	///
	/// Panics when `row` or `col` is out of bounds, like slice indexing.
	pub fn get(&self, row: usize, col: usize) -> f64 {
		assert!(row < self.len() && col < self.len());
		self.cells[row * self.len() + col]
	}

	/// The accumulated weight between two names, if both are indexed.
	pub fn cell(&self, source: &str, target: &str) -> Option<f64> {
		let row = self.index.get(source)?;
		let col = self.index.get(target)?;
		Some(self.cells[row * self.len() + col])
	}

	/// Rows in index order; each row is one source's outgoing weights.
	pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
		self.cells.chunks(self.index.len().max(1))
	}
}

/// Build a connection matrix with a zero baseline.
pub fn build_connection_matrix(
	records: &[Record],
	source_key: &str,
	target_key: &str,
	weight_key: &str,
) -> Result<ConnectionMatrix, ShapeError> {
	build_connection_matrix_with(
		records,
		source_key,
		target_key,
		weight_key,
		MatrixOptions::default(),
	)
}

/// Build a connection matrix from weighted directed edges.
///
/// Every record adds its parsed weight to the cell at (source row, target
/// column); blank weights add nothing, and non-numeric weights fail with
/// [`ShapeError::InvalidWeight`]. Accumulation is directed only — consumers
/// that treat the matrix as undirected symmetrize it themselves. The result
/// is deterministic for a given record order.
pub fn build_connection_matrix_with(
	records: &[Record],
	source_key: &str,
	target_key: &str,
	weight_key: &str,
	options: MatrixOptions,
) -> Result<ConnectionMatrix, ShapeError> {
	let index = NameIndex::from_records(records, &[source_key, target_key]);
	let size = index.len();
	let mut cells = vec![options.baseline; size * size];

	for record in records {
		let (Some(row), Some(col)) = (
			index.get(&record.text(source_key)),
			index.get(&record.text(target_key)),
		) else {
			// Only blank endpoints miss the index; their records cannot be
			// attributed to a cell.
			warn!(
				"saga-shape: skipping edge record with blank {source_key:?} or {target_key:?}"
			);
			continue;
		};
		if let Some(weight) = record.weight(weight_key)? {
			cells[row * size + col] += weight;
		}
	}

	debug!(
		"saga-shape: built {size}x{size} connection matrix from {} edges",
		records.len()
	);
	Ok(ConnectionMatrix { index, cells })
}

/// Records whose weight field exceeds `minimum`.
///
/// The charts use this to cut minor relationships before chord and pie
/// rendering. Blank weights count as 0.
pub fn major_records(
	records: &[Record],
	weight_key: &str,
	minimum: f64,
) -> Result<Vec<Record>, ShapeError> {
	let mut major = Vec::new();
	for record in records {
		if record.weight(weight_key)?.unwrap_or(0.0) > minimum {
			major.push(record.clone());
		}
	}
	Ok(major)
}

/// Records whose target also appears somewhere as a source.
///
/// Chord layouts read the matrix as mutual flow, so edges into pure sinks
/// are pruned first.
pub fn reciprocal_records(
	records: &[Record],
	source_key: &str,
	target_key: &str,
) -> Vec<Record> {
	let sources: IndexSet<String> = records
		.iter()
		.filter(|record| !record.is_blank(source_key))
		.map(|record| record.text(source_key))
		.collect();
	records
		.iter()
		.filter(|record| sources.contains(&record.text(target_key)))
		.cloned()
		.collect()
}

/// Per-name count of records naming it as source, over every name appearing
/// in the given fields, in key-major first-seen order.
///
/// Adjacency layouts drop the zero-total names (pure sinks) before placing
/// rows.
pub fn out_degrees(
	records: &[Record],
	source_key: &str,
	target_key: &str,
) -> IndexMap<String, usize> {
	let mut totals: IndexMap<String, usize> =
		unique_ordered_names(records, &[source_key, target_key])
			.into_iter()
			.map(|name| (name, 0))
			.collect();
	for record in records {
		if let Some(total) = totals.get_mut(&record.text(source_key)) {
			*total += 1;
		}
	}
	totals
}

/// Partition records by a field's distinct values, first-seen order.
/// Records with a blank field fall into no bin.
pub fn bin_per_name<'a>(records: &'a [Record], key: &str) -> Vec<(String, Vec<&'a Record>)> {
	let mut bins: IndexMap<String, Vec<&Record>> = IndexMap::new();
	for record in records {
		if record.is_blank(key) {
			continue;
		}
		bins.entry(record.text(key)).or_default().push(record);
	}
	bins.into_iter().collect()
}
