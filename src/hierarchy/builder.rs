//! Building a [`Hierarchy`] from flat records.
//!
//! The usual pipeline for a relationship dataset:
//!
//! 1. [`add_synthetic_root`] — adopt records with no parent under a single
//!    artificial root, so otherwise-disconnected top-level items form one
//!    tree.
//! 2. [`stratify`] — resolve parent links into a validated [`Hierarchy`].
//! 3. [`filter_by_minimum_branching`] — optionally drop minor top-level
//!    subtrees, then stratify the reduced record set again.

use std::collections::HashSet;

use indexmap::IndexMap;
use log::debug;

use super::tree::{Hierarchy, TreeNode};
use crate::error::ShapeError;
use crate::record::Record;

/// How [`stratify_with`] treats two records that map to the same id.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
	/// Keep the last occurrence in input order. The node stays at the first
	/// occurrence's position; its payload and parent come from the last.
	#[default]
	LastWins,
	/// Fail with [`ShapeError::DuplicateId`].
	Reject,
}

/// Adopt orphaned records under a synthetic root.
///
/// Returns a fresh sequence in which every record with a blank `parent_key`
/// field now names `root_label` as its parent, with one appended record for
/// the root itself (blank parent, `item_key` = `root_label`). The result is
/// guaranteed to stratify into exactly one tree rooted at `root_label`,
/// provided the remaining parent references resolve.
pub fn add_synthetic_root(
	records: &[Record],
	item_key: &str,
	parent_key: &str,
	root_label: &str,
) -> Vec<Record> {
	let mut rooted = Vec::with_capacity(records.len() + 1);
	let mut adopted = 0;
	for record in records {
		let mut record = record.clone();
		if record.is_blank(parent_key) {
			record.set(parent_key, root_label);
			adopted += 1;
		}
		rooted.push(record);
	}
	rooted.push(Record::new().with(item_key, root_label).with(parent_key, ""));

	debug!("saga-shape: adopted {adopted} orphan records under {root_label:?}");
	rooted
}

/// Stratify flat records into a rooted [`Hierarchy`], keeping the last of
/// any records that share an id.
pub fn stratify(
	records: &[Record],
	item_key: &str,
	parent_key: &str,
) -> Result<Hierarchy, ShapeError> {
	stratify_with(records, item_key, parent_key, DuplicatePolicy::default())
}

/// [`stratify`] with an explicit duplicate-id policy.
///
/// Fails with [`ShapeError::CycleOrOrphan`] when a record has a blank item
/// field, a parent reference does not resolve to any record's id, the parent
/// links contain a cycle, or root uniqueness is violated (no record with a
/// blank parent field, or more than one).
pub fn stratify_with(
	records: &[Record],
	item_key: &str,
	parent_key: &str,
	duplicates: DuplicatePolicy,
) -> Result<Hierarchy, ShapeError> {
	let mut resolved: IndexMap<String, TreeNode> = IndexMap::with_capacity(records.len());
	for record in records {
		if record.is_blank(item_key) {
			return Err(ShapeError::CycleOrOrphan {
				id: String::new(),
				reason: format!("record has a blank {item_key:?} field"),
			});
		}
		let id = record.text(item_key);
		let parent_id = if record.is_blank(parent_key) {
			String::new()
		} else {
			record.text(parent_key)
		};
		let node = TreeNode {
			id: id.clone(),
			parent_id,
			payload: record.clone(),
		};
		if resolved.insert(id, node).is_some() {
			match duplicates {
				DuplicatePolicy::Reject => {
					let id = record.text(item_key);
					return Err(ShapeError::DuplicateId { id });
				}
				DuplicatePolicy::LastWins => {
					debug!(
						"saga-shape: duplicate id {:?}, keeping the last occurrence",
						record.text(item_key)
					);
				}
			}
		}
	}

	Hierarchy::link(resolved.into_values().collect())
}

/// Drop minor top-level subtrees from a hierarchy.
///
/// Keeps only the depth-1 subtrees whose top node has at least
/// `min_children` direct children; a dropped subtree goes in full, so the
/// survivors always re-stratify cleanly. The root is always retained as the
/// attachment point. Returns the reduced record set, in the hierarchy's
/// node order, for subsequent stratification.
pub fn filter_by_minimum_branching(hierarchy: &Hierarchy, min_children: usize) -> Vec<Record> {
	let root = hierarchy.root();
	let mut keep: HashSet<&str> = HashSet::with_capacity(hierarchy.len());
	keep.insert(root.id.as_str());
	for top in hierarchy.children(&root.id) {
		if hierarchy.children(&top.id).len() >= min_children {
			for node in hierarchy.descendants(&top.id) {
				keep.insert(node.id.as_str());
			}
		}
	}

	let dropped = hierarchy.len() - keep.len();
	if dropped > 0 {
		debug!(
			"saga-shape: branching filter dropped {dropped} of {} nodes",
			hierarchy.len()
		);
	}

	hierarchy
		.nodes()
		.filter(|node| keep.contains(node.id.as_str()))
		.map(|node| node.payload.clone())
		.collect()
}
