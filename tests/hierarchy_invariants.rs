use saga_shape::{
	AggregateMode, ChildOrder, Record, ShapeError, add_synthetic_root,
	filter_by_minimum_branching, short_label, stratify,
};

fn character(item: &str, father: &str, screentime: f64) -> Record {
	Record::new()
		.with("itemLabel", item)
		.with("fatherLabel", father)
		.with("screentime", screentime)
}

/// Three top-level branches under an adopted root: a large house, a small
/// house, and a lone character with no children.
fn lineage() -> Vec<Record> {
	vec![
		character("House Corvel", "", 0.0),
		character("Mara", "House Corvel", 211.0),
		character("Doran", "House Corvel", 188.0),
		character("Essa", "House Corvel", 97.0),
		character("Tamsin", "Mara", 45.0),
		character("House Aldern", "", 0.0),
		character("Bren", "House Aldern", 130.0),
		character("Pell", "", 12.0),
	]
}

#[test]
fn synthetic_root_makes_exactly_one_root() {
	let rooted = add_synthetic_root(&lineage(), "itemLabel", "fatherLabel", "Realm");
	let tree = stratify(&rooted, "itemLabel", "fatherLabel").expect("stratify");

	let roots: Vec<_> = tree.nodes().filter(|node| node.is_root()).collect();
	assert_eq!(roots.len(), 1);
	assert_eq!(roots[0].id, "Realm");
	assert_eq!(tree.root().id, "Realm");
	assert_eq!(tree.len(), lineage().len() + 1);
}

#[test]
fn orphans_without_synthetic_root_do_not_stratify() {
	// Two records with blank parents means two roots.
	let result = stratify(&lineage(), "itemLabel", "fatherLabel");
	assert!(matches!(result, Err(ShapeError::CycleOrOrphan { .. })));
}

#[test]
fn children_counts_match_parent_references() {
	let rooted = add_synthetic_root(&lineage(), "itemLabel", "fatherLabel", "Realm");
	let tree = stratify(&rooted, "itemLabel", "fatherLabel").expect("stratify");

	for node in tree.nodes() {
		let referencing = rooted
			.iter()
			.filter(|record| record.text("fatherLabel") == node.id)
			.count();
		assert_eq!(tree.children(&node.id).len(), referencing, "node {}", node.id);
	}
}

#[test]
fn ancestor_chain_is_root_first_with_depth_plus_one_length() {
	let rooted = add_synthetic_root(&lineage(), "itemLabel", "fatherLabel", "Realm");
	let tree = stratify(&rooted, "itemLabel", "fatherLabel").expect("stratify");

	for node in tree.nodes() {
		let chain = tree.ancestor_chain(node).expect("chain");
		let depth = tree.depth(&node.id).expect("depth");
		assert_eq!(chain.len(), depth + 1, "node {}", node.id);
		assert_eq!(chain[0].id, "Realm");
		assert_eq!(chain[chain.len() - 1].id, node.id);
	}
}

#[test]
fn group_is_the_depth_one_ancestor_with_root_fallback() {
	let rooted = add_synthetic_root(&lineage(), "itemLabel", "fatherLabel", "Realm");
	let tree = stratify(&rooted, "itemLabel", "fatherLabel").expect("stratify");

	let tamsin = tree.node("Tamsin").expect("node");
	assert_eq!(tree.group_of(tamsin).expect("group").id, "House Corvel");

	// A direct child of the root is its own group.
	let corvel = tree.node("House Corvel").expect("node");
	assert_eq!(tree.group_of(corvel).expect("group").id, "House Corvel");

	// The root falls back to itself rather than failing.
	assert_eq!(tree.group_of(tree.root()).expect("group").id, "Realm");
}

#[test]
fn top_level_groups_shorten_to_the_last_token() {
	let rooted = add_synthetic_root(&lineage(), "itemLabel", "fatherLabel", "Realm");
	let tree = stratify(&rooted, "itemLabel", "fatherLabel").expect("stratify");

	assert_eq!(tree.top_level_groups(), vec!["Corvel", "Aldern", "Pell"]);
	assert_eq!(short_label("House Corvel"), "Corvel");
}

#[test]
fn branching_filter_drops_childless_top_level_subtrees() {
	let rooted = add_synthetic_root(&lineage(), "itemLabel", "fatherLabel", "Realm");
	let tree = stratify(&rooted, "itemLabel", "fatherLabel").expect("stratify");

	let reduced = filter_by_minimum_branching(&tree, 1);
	let filtered = stratify(&reduced, "itemLabel", "fatherLabel").expect("re-stratify");

	assert!(filtered.node("Pell").is_none());
	assert!(filtered.node("House Corvel").is_some());
	assert!(filtered.node("Tamsin").is_some());
	assert!(filtered.node("House Aldern").is_some());
	assert_eq!(filtered.root().id, "Realm");
}

#[test]
fn branching_filter_removes_whole_subtrees() {
	let rooted = add_synthetic_root(&lineage(), "itemLabel", "fatherLabel", "Realm");
	let tree = stratify(&rooted, "itemLabel", "fatherLabel").expect("stratify");

	// Only House Corvel has two or more direct children; House Aldern goes,
	// and Bren must go with it or re-stratification would see an orphan.
	let reduced = filter_by_minimum_branching(&tree, 2);
	let filtered = stratify(&reduced, "itemLabel", "fatherLabel").expect("re-stratify");

	assert!(filtered.node("House Aldern").is_none());
	assert!(filtered.node("Bren").is_none());
	assert_eq!(filtered.children("Realm").len(), 1);
}

#[test]
fn unresolved_parent_fails_stratification() {
	let mut records = lineage();
	records.push(character("Wick", "House Veyra", 3.0));
	let rooted = add_synthetic_root(&records, "itemLabel", "fatherLabel", "Realm");

	match stratify(&rooted, "itemLabel", "fatherLabel") {
		Err(ShapeError::CycleOrOrphan { id, .. }) => assert_eq!(id, "Wick"),
		other => panic!("expected CycleOrOrphan, got {other:?}"),
	}
}

#[test]
fn parent_cycles_are_detected() {
	let records = vec![
		character("Realm", "", 0.0),
		character("Osric", "Vale", 10.0),
		character("Vale", "Osric", 20.0),
	];
	assert!(matches!(
		stratify(&records, "itemLabel", "fatherLabel"),
		Err(ShapeError::CycleOrOrphan { .. })
	));
}

#[test]
fn aggregation_sums_subtrees() {
	let rooted = add_synthetic_root(&lineage(), "itemLabel", "fatherLabel", "Realm");
	let tree = stratify(&rooted, "itemLabel", "fatherLabel").expect("stratify");

	let totals = tree.aggregate("screentime", AggregateMode::AllNodes).expect("totals");
	let corvel = tree.position("House Corvel").expect("position");
	assert_eq!(totals[corvel], 211.0 + 188.0 + 97.0 + 45.0);

	let root = tree.position("Realm").expect("position");
	assert_eq!(totals[root], 211.0 + 188.0 + 97.0 + 45.0 + 130.0 + 12.0);
}

#[test]
fn leaves_only_aggregation_ignores_internal_values() {
	// Mara is internal (Tamsin hangs below her), so her own 211 drops out.
	let rooted = add_synthetic_root(&lineage(), "itemLabel", "fatherLabel", "Realm");
	let tree = stratify(&rooted, "itemLabel", "fatherLabel").expect("stratify");

	let totals = tree.aggregate("screentime", AggregateMode::LeavesOnly).expect("totals");
	let corvel = tree.position("House Corvel").expect("position");
	assert_eq!(totals[corvel], 188.0 + 97.0 + 45.0);
}

#[test]
fn sorted_children_order_by_value_and_height() {
	let rooted = add_synthetic_root(&lineage(), "itemLabel", "fatherLabel", "Realm");
	let tree = stratify(&rooted, "itemLabel", "fatherLabel").expect("stratify");
	let totals = tree.aggregate("screentime", AggregateMode::AllNodes).expect("totals");

	let by_value: Vec<_> = tree
		.sorted_children("Realm", &totals, ChildOrder::Value)
		.into_iter()
		.map(|node| node.id.as_str())
		.collect();
	assert_eq!(by_value, vec!["House Corvel", "House Aldern", "Pell"]);

	// Corvel's subtree is the tallest, so it leads regardless of value.
	let by_height: Vec<_> = tree
		.sorted_children("Realm", &totals, ChildOrder::HeightThenValue)
		.into_iter()
		.map(|node| node.id.as_str())
		.collect();
	assert_eq!(by_height[0], "House Corvel");
}
