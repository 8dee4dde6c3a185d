//! saga-shape: data shaping for narrative relationship charts.
//!
//! Turns flat tabular records describing characters, their lineage, and
//! their weighted relationships into structures ready for layout: a
//! validated [`Hierarchy`] for tree-shaped layouts, a [`ConnectionMatrix`]
//! for chord and adjacency layouts, and a frozen [`ColorAssigner`] domain
//! for category colors that stay stable across renders. Drawing, layout
//! geometry, and interaction stay with the rendering layer; everything here
//! is a pure, synchronous transformation of in-memory records.
//!
//! # Example
//!
//! ```
//! use saga_shape::{Record, add_synthetic_root, stratify};
//!
//! let records = vec![
//! 	Record::new().with("itemLabel", "Mara").with("fatherLabel", "Doran"),
//! 	Record::new().with("itemLabel", "Doran"),
//! ];
//! let rooted = add_synthetic_root(&records, "itemLabel", "fatherLabel", "Realm");
//! let tree = stratify(&rooted, "itemLabel", "fatherLabel")?;
//! assert_eq!(tree.root().id, "Realm");
//! assert_eq!(tree.depth("Mara"), Some(2));
//! # Ok::<(), saga_shape::ShapeError>(())
//! ```

pub mod color;
pub mod hierarchy;
pub mod matrix;

mod error;
mod record;

pub use color::{Color, ColorAssigner, Palette, UnknownCategory, descendants_darker};
pub use error::ShapeError;
pub use hierarchy::{
	AggregateMode, ChildOrder, DuplicatePolicy, Hierarchy, TreeNode, add_synthetic_root,
	filter_by_minimum_branching, short_label, stratify, stratify_with,
};
pub use matrix::{
	ConnectionMatrix, MatrixOptions, NameIndex, bin_per_name, build_connection_matrix,
	build_connection_matrix_with, major_records, out_degrees, reciprocal_records,
	unique_ordered_names,
};
pub use record::{FieldValue, Record, records_from_csv, records_from_json};
