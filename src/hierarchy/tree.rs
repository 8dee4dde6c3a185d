//! The linked tree produced by stratification, and queries over it.
//!
//! A [`Hierarchy`] is immutable after construction: it is built once per
//! render from a fresh record snapshot, handed to a layout, and discarded on
//! redraw. Children, depths, and ancestor chains are derived from the parent
//! links at build time rather than stored on the records.

use std::cmp::Reverse;

use indexmap::IndexMap;
use log::debug;

use crate::error::ShapeError;
use crate::record::Record;

/// One entity in a hierarchy.
#[derive(Clone, Debug)]
pub struct TreeNode {
	/// Unique id within the tree.
	pub id: String,
	/// Parent id; empty marks the root.
	pub parent_id: String,
	/// The original record this node was built from.
	pub payload: Record,
}

impl TreeNode {
	/// Whether this node is the tree's root.
	pub fn is_root(&self) -> bool {
		self.parent_id.is_empty()
	}
}

/// Sibling orderings applied before space-dividing layouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChildOrder {
	/// Tallest subtree first, ties broken by descending value.
	HeightThenValue,
	/// Descending value only.
	Value,
}

/// Which nodes contribute their own value during aggregation.
///
/// Space-dividing layouts sum a numeric payload field over each subtree.
/// Radial layouts instead want internal nodes weightless, so that an arc's
/// extent comes entirely from its leaves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AggregateMode {
	/// Every node contributes its own value.
	AllNodes,
	/// Only leaves contribute; internal nodes total their descendants.
	LeavesOnly,
}

/// A rooted tree over [`TreeNode`]s with derived structure.
#[derive(Clone, Debug)]
pub struct Hierarchy {
	nodes: Vec<TreeNode>,
	index: IndexMap<String, usize>,
	parents: Vec<Option<usize>>,
	children: Vec<Vec<usize>>,
	depths: Vec<usize>,
	root: usize,
}

impl Hierarchy {
	/// Link a resolved node set into a tree, validating root uniqueness,
	/// parent resolution, and acyclicity.
	pub(crate) fn link(nodes: Vec<TreeNode>) -> Result<Self, ShapeError> {
		let mut index = IndexMap::with_capacity(nodes.len());
		for (position, node) in nodes.iter().enumerate() {
			if index.insert(node.id.clone(), position).is_some() {
				return Err(ShapeError::DuplicateId {
					id: node.id.clone(),
				});
			}
		}

		let mut root = None;
		let mut parents = vec![None; nodes.len()];
		let mut children = vec![Vec::new(); nodes.len()];
		for (position, node) in nodes.iter().enumerate() {
			if node.is_root() {
				if let Some(first) = root {
					let first: &TreeNode = &nodes[first];
					return Err(ShapeError::CycleOrOrphan {
						id: node.id.clone(),
						reason: format!("second root beside {:?}", first.id),
					});
				}
				root = Some(position);
				continue;
			}
			let Some(&parent) = index.get(&node.parent_id) else {
				return Err(ShapeError::CycleOrOrphan {
					id: node.id.clone(),
					reason: format!("parent {:?} does not resolve", node.parent_id),
				});
			};
			parents[position] = Some(parent);
			children[parent].push(position);
		}
		let Some(root) = root else {
			return Err(ShapeError::CycleOrOrphan {
				id: String::new(),
				reason: "no root record with an empty parent field".to_string(),
			});
		};

		// Breadth-first from the root; anything left unvisited sits on a
		// parent cycle unreachable from the root.
		let mut depths = vec![usize::MAX; nodes.len()];
		let mut queue = std::collections::VecDeque::from([root]);
		depths[root] = 0;
		let mut visited = 0;
		while let Some(position) = queue.pop_front() {
			visited += 1;
			for &child in &children[position] {
				depths[child] = depths[position] + 1;
				queue.push_back(child);
			}
		}
		if visited < nodes.len() {
			let stranded = depths
				.iter()
				.position(|&depth| depth == usize::MAX)
				.map(|position| nodes[position].id.clone())
				.unwrap_or_default();
			return Err(ShapeError::CycleOrOrphan {
				id: stranded,
				reason: "parent links form a cycle".to_string(),
			});
		}

		debug!(
			"saga-shape: stratified {} nodes, max depth {}",
			nodes.len(),
			depths.iter().copied().max().unwrap_or(0)
		);

		Ok(Self {
			nodes,
			index,
			parents,
			children,
			depths,
			root,
		})
	}

	/// The unique node with an empty parent id.
	pub fn root(&self) -> &TreeNode {
		&self.nodes[self.root]
	}

	/// Number of nodes, root included.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Always false: a linked hierarchy has at least its root.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Look up a node by id.
	pub fn node(&self, id: &str) -> Option<&TreeNode> {
		self.index.get(id).map(|&position| &self.nodes[position])
	}

	/// All nodes in first-seen record order.
	pub fn nodes(&self) -> impl Iterator<Item = &TreeNode> {
		self.nodes.iter()
	}

	/// A node's position in [`Hierarchy::nodes`] order, as used by
	/// [`Hierarchy::aggregate`].
	pub fn position(&self, id: &str) -> Option<usize> {
		self.index.get(id).copied()
	}

	/// Direct children of a node, in first-seen record order. Unknown ids
	/// have no children.
	pub fn children(&self, id: &str) -> Vec<&TreeNode> {
		match self.index.get(id) {
			Some(&position) => self.children[position]
				.iter()
				.map(|&child| &self.nodes[child])
				.collect(),
			None => Vec::new(),
		}
	}

	/// Distance from the root; the root itself is at depth 0.
	pub fn depth(&self, id: &str) -> Option<usize> {
		self.index.get(id).map(|&position| self.depths[position])
	}

	/// Longest downward path from a node to a leaf below it.
	pub fn height(&self, id: &str) -> Option<usize> {
		let &position = self.index.get(id)?;
		let base = self.depths[position];
		let mut deepest = base;
		let mut stack = vec![position];
		while let Some(current) = stack.pop() {
			deepest = deepest.max(self.depths[current]);
			stack.extend(self.children[current].iter().copied());
		}
		Some(deepest - base)
	}

	/// A node's subtree in pre-order, the node itself first. Unknown ids
	/// yield an empty subtree.
	pub fn descendants(&self, id: &str) -> Vec<&TreeNode> {
		let Some(&position) = self.index.get(id) else {
			return Vec::new();
		};
		let mut subtree = Vec::new();
		let mut stack = vec![position];
		while let Some(current) = stack.pop() {
			subtree.push(&self.nodes[current]);
			// Reversed so pre-order visits children in record order.
			stack.extend(self.children[current].iter().rev().copied());
		}
		subtree
	}

	/// Walk parent links from a node to the root, returned root-first with
	/// the node itself last. The chain's length is always depth + 1.
	///
	/// Fails with [`ShapeError::DisconnectedNode`] if a parent id does not
	/// resolve — an internal-consistency failure that cannot occur on a
	/// hierarchy produced by `stratify`.
	pub fn ancestor_chain(&self, node: &TreeNode) -> Result<Vec<&TreeNode>, ShapeError> {
		let mut chain = Vec::new();
		let mut current = self.node(&node.id).ok_or_else(|| ShapeError::DisconnectedNode {
			id: node.id.clone(),
			parent: node.parent_id.clone(),
		})?;
		for _ in 0..=self.nodes.len() {
			chain.push(current);
			if current.is_root() {
				chain.reverse();
				return Ok(chain);
			}
			current = self.node(&current.parent_id).ok_or_else(|| {
				ShapeError::DisconnectedNode {
					id: current.id.clone(),
					parent: current.parent_id.clone(),
				}
			})?;
		}
		// Unreachable after link-time validation; bounded to be safe.
		Err(ShapeError::CycleOrOrphan {
			id: node.id.clone(),
			reason: "parent links form a cycle".to_string(),
		})
	}

	/// The node's group: its ancestor at depth 1. Direct children of the
	/// root are their own group, and the root falls back to itself.
	///
	/// Used to classify a node by the major branch it belongs to, e.g. for
	/// branch-consistent coloring.
	pub fn group_of(&self, node: &TreeNode) -> Result<&TreeNode, ShapeError> {
		let chain = self.ancestor_chain(node)?;
		Ok(chain.get(1).copied().unwrap_or(chain[0]))
	}

	/// Short group labels of the root's direct children, in record order.
	/// These are the names a legend for branch-consistent coloring shows.
	pub fn top_level_groups(&self) -> Vec<&str> {
		self.children[self.root]
			.iter()
			.map(|&child| short_label(&self.nodes[child].id))
			.collect()
	}

	/// Sum a numeric payload field over every subtree.
	///
	/// Returns one total per node, indexed like [`Hierarchy::nodes`].
	/// Blank fields contribute 0; non-numeric text fails with
	/// [`ShapeError::InvalidWeight`].
	pub fn aggregate(&self, value_key: &str, mode: AggregateMode) -> Result<Vec<f64>, ShapeError> {
		let mut totals = Vec::with_capacity(self.nodes.len());
		for (position, node) in self.nodes.iter().enumerate() {
			let own = match mode {
				AggregateMode::LeavesOnly if !self.children[position].is_empty() => 0.0,
				_ => node.payload.weight(value_key)?.unwrap_or(0.0),
			};
			totals.push(own);
		}

		// Deepest first, so every node's total is final before it is folded
		// into its parent.
		let mut order: Vec<usize> = (0..self.nodes.len()).collect();
		order.sort_by_key(|&position| Reverse(self.depths[position]));
		for position in order {
			if let Some(parent) = self.parents[position] {
				totals[parent] += totals[position];
			}
		}
		Ok(totals)
	}

	/// Direct children of a node, ordered for layout. `values` are subtree
	/// totals from [`Hierarchy::aggregate`]; nodes past the end of `values`
	/// count as 0.
	pub fn sorted_children(&self, id: &str, values: &[f64], order: ChildOrder) -> Vec<&TreeNode> {
		let mut ranked: Vec<(usize, f64, &TreeNode)> = self
			.children(id)
			.into_iter()
			.map(|node| {
				let value = self
					.position(&node.id)
					.and_then(|position| values.get(position))
					.copied()
					.unwrap_or(0.0);
				let height = self.height(&node.id).unwrap_or(0);
				(height, value, node)
			})
			.collect();
		ranked.sort_by(|a, b| match order {
			ChildOrder::HeightThenValue => b.0.cmp(&a.0).then(b.1.total_cmp(&a.1)),
			ChildOrder::Value => b.1.total_cmp(&a.1),
		});
		ranked.into_iter().map(|(_, _, node)| node).collect()
	}
}

/// The last whitespace-separated token of an id, used as a display label
/// for group names ("House Corvel" shortens to "Corvel").
pub fn short_label(id: &str) -> &str {
	id.split_whitespace().last().unwrap_or(id)
}
