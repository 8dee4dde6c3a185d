//! Stable category→color assignment across chart renders.
//!
//! An ordinal palette only colors consistently if its domain is pinned
//! before lookups begin. [`ColorAssigner`] makes that discipline explicit:
//! [`ColorAssigner::freeze`] binds the domain for a render, and
//! [`ColorAssigner::color_of`] resolves names against that binding, so
//! rendering a new subset elsewhere does not shuffle colors already shown.
//! Each assigner is an owned instance — whichever orchestration needs
//! consistent coloring holds one, rather than sharing module-wide state.

use indexmap::IndexSet;
use log::debug;

use super::palette::{Color, Palette};
use crate::error::ShapeError;
use crate::hierarchy::{Hierarchy, TreeNode, short_label};
use crate::record::Record;

/// Policy for names looked up outside the frozen domain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnknownCategory {
	/// Deterministically append the name to the domain and assign the next
	/// unused palette color.
	#[default]
	Extend,
	/// Fail with [`ShapeError::UnknownCategory`].
	Reject,
}

/// Maps category names to palette colors against a frozen domain.
#[derive(Clone, Debug)]
pub struct ColorAssigner {
	palette: Palette,
	domain: IndexSet<String>,
	policy: UnknownCategory,
}

impl ColorAssigner {
	/// An assigner over the given palette, extending its domain on unseen
	/// names.
	pub fn new(palette: Palette) -> Self {
		Self::with_policy(palette, UnknownCategory::default())
	}

	/// An assigner with an explicit unknown-name policy.
	pub fn with_policy(palette: Palette, policy: UnknownCategory) -> Self {
		Self {
			palette,
			domain: IndexSet::new(),
			policy,
		}
	}

	/// Bind the domain to exactly this name sequence, de-duplicated in
	/// first-occurrence order. Replaces any prior binding, so call this
	/// immediately before each dependent render.
	pub fn freeze<I, S>(&mut self, names: I)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.domain = names.into_iter().map(Into::into).collect();
		debug!("saga-shape: froze color domain over {} names", self.domain.len());
	}

	/// Freeze over a record field's distinct values, first-seen order.
	pub fn freeze_from_records(&mut self, records: &[Record], key: &str) {
		self.freeze(
			records
				.iter()
				.filter(|record| !record.is_blank(key))
				.map(|record| record.text(key)),
		);
	}

	/// The color bound to a name.
	///
	/// Within one domain binding, repeated lookups of the same name always
	/// return the same color. Names outside the domain follow the assigner's
	/// [`UnknownCategory`] policy.
	pub fn color_of(&mut self, name: &str) -> Result<Color, ShapeError> {
		if let Some(slot) = self.domain.get_index_of(name) {
			return Ok(self.palette.get(slot));
		}
		match self.policy {
			UnknownCategory::Extend => {
				let (slot, _) = self.domain.insert_full(name.to_string());
				Ok(self.palette.get(slot))
			}
			UnknownCategory::Reject => Err(ShapeError::UnknownCategory {
				name: name.to_string(),
			}),
		}
	}

	/// The currently bound domain, in assignment order.
	pub fn domain(&self) -> impl Iterator<Item = &str> {
		self.domain.iter().map(String::as_str)
	}
}

/// A node's group color, shaded by depth.
///
/// The node takes its group's color (via [`Hierarchy::group_of`] and
/// [`short_label`]) darkened by `depth / divisor` — or lightened, when
/// `invert` is set — so deeper members of a branch read as shades of the
/// branch color in treemap, partition, and pack fills.
pub fn descendants_darker(
	assigner: &mut ColorAssigner,
	hierarchy: &Hierarchy,
	node: &TreeNode,
	invert: bool,
	divisor: f64,
) -> Result<Color, ShapeError> {
	let group = hierarchy.group_of(node)?;
	let base = assigner.color_of(short_label(&group.id))?;
	let depth = hierarchy.depth(&node.id).unwrap_or(0) as f64;
	let amount = depth / divisor;
	Ok(if invert {
		base.lighten(amount)
	} else {
		base.darken(amount)
	})
}
