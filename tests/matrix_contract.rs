use saga_shape::{
	MatrixOptions, NameIndex, Record, ShapeError, build_connection_matrix,
	build_connection_matrix_with, major_records, reciprocal_records, unique_ordered_names,
};

fn link(source: &str, target: &str, weight: impl Into<saga_shape::FieldValue>) -> Record {
	Record::new()
		.with("Source", source)
		.with("Target", target)
		.with("Weight", weight)
}

fn relationships() -> Vec<Record> {
	vec![
		link("Mara", "Doran", 5.0),
		link("Mara", "Doran", 3.0),
		link("Doran", "Essa", 11.0),
		link("Essa", "Mara", 2.0),
		link("Bren", "Mara", 40.0),
	]
}

#[test]
fn matrix_is_square_over_all_unique_names() {
	let matrix = build_connection_matrix(&relationships(), "Source", "Target", "Weight")
		.expect("matrix");

	let names = unique_ordered_names(&relationships(), &["Source", "Target"]);
	assert_eq!(names, vec!["Mara", "Doran", "Essa", "Bren"]);
	assert_eq!(matrix.len(), names.len());
	assert_eq!(matrix.rows().count(), names.len());
	for row in matrix.rows() {
		assert_eq!(row.len(), names.len());
	}
}

#[test]
fn weights_accumulate_per_directed_pair() {
	let matrix = build_connection_matrix(&relationships(), "Source", "Target", "Weight")
		.expect("matrix");

	assert_eq!(matrix.cell("Mara", "Doran"), Some(8.0));
	assert_eq!(matrix.cell("Doran", "Essa"), Some(11.0));
	// Directed only: the reverse cell stays at the baseline.
	assert_eq!(matrix.cell("Doran", "Mara"), Some(0.0));
}

#[test]
fn legacy_baseline_seeds_every_cell_with_one() {
	let matrix = build_connection_matrix_with(
		&relationships(),
		"Source",
		"Target",
		"Weight",
		MatrixOptions::legacy_baseline(),
	)
	.expect("matrix");

	// 1 (baseline) + 5 + 3.
	assert_eq!(matrix.cell("Mara", "Doran"), Some(9.0));
	// Unconnected pairs inflate too; that is the legacy bias.
	assert_eq!(matrix.cell("Mara", "Bren"), Some(1.0));
}

#[test]
fn blank_weights_contribute_nothing() {
	let records = vec![link("Mara", "Doran", 5.0), link("Mara", "Doran", "")];
	let matrix = build_connection_matrix(&records, "Source", "Target", "Weight")
		.expect("matrix");
	assert_eq!(matrix.cell("Mara", "Doran"), Some(5.0));
}

#[test]
fn non_numeric_weights_fail() {
	let records = vec![link("Mara", "Doran", "constant")];
	match build_connection_matrix(&records, "Source", "Target", "Weight") {
		Err(ShapeError::InvalidWeight { field, value }) => {
			assert_eq!(field, "Weight");
			assert_eq!(value, "constant");
		}
		other => panic!("expected InvalidWeight, got {other:?}"),
	}
}

#[test]
fn numeric_text_weights_parse() {
	let records = vec![link("Mara", "Doran", "12"), link("Mara", "Doran", "2.5")];
	let matrix = build_connection_matrix(&records, "Source", "Target", "Weight")
		.expect("matrix");
	assert_eq!(matrix.cell("Mara", "Doran"), Some(14.5));
}

#[test]
fn name_index_is_stable_and_first_seen() {
	let index = NameIndex::from_records(&relationships(), &["Source", "Target"]);
	assert_eq!(index.get("Mara"), Some(0));
	assert_eq!(index.get("Doran"), Some(1));
	assert_eq!(index.get("Essa"), Some(2));
	assert_eq!(index.get("Bren"), Some(3));
	assert_eq!(index.get("Wick"), None);
	assert_eq!(index.names().collect::<Vec<_>>(), vec!["Mara", "Doran", "Essa", "Bren"]);
}

#[test]
fn major_records_cut_strictly_below_threshold() {
	let major = major_records(&relationships(), "Weight", 5.0).expect("filter");
	let weights: Vec<_> = major
		.iter()
		.map(|record| record.weight("Weight").expect("weight"))
		.collect();
	assert_eq!(weights, vec![Some(11.0), Some(40.0)]);
}

#[test]
fn reciprocal_records_drop_edges_into_pure_sinks() {
	let records = vec![
		link("Mara", "Doran", 5.0),
		link("Doran", "Mara", 3.0),
		// Tamsin never appears as a source.
		link("Mara", "Tamsin", 9.0),
	];
	let mutual = reciprocal_records(&records, "Source", "Target");
	assert_eq!(mutual.len(), 2);
	assert!(mutual.iter().all(|record| record.text("Target") != "Tamsin"));
}
