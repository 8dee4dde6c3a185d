//! Hierarchy construction from flat parent-linked records.
//!
//! Converts a flat list of records (each carrying an item id and a parent
//! id) into a rooted, validated tree for tree, cluster, treemap, partition,
//! pack, and radial layouts:
//!
//! - [`add_synthetic_root`] unifies disconnected top-level items under one
//!   artificial root,
//! - [`stratify`] resolves parent links, rejecting orphans, cycles, and
//!   ambiguous roots,
//! - [`filter_by_minimum_branching`] suppresses minor top-level subtrees,
//! - [`Hierarchy`] answers the structural queries layouts need: children,
//!   depth, ancestor chains, group classification, and subtree value
//!   aggregation.

mod builder;
mod tree;

pub use builder::{
	DuplicatePolicy, add_synthetic_root, filter_by_minimum_branching, stratify, stratify_with,
};
pub use tree::{AggregateMode, ChildOrder, Hierarchy, TreeNode, short_label};
