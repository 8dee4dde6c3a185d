//! Flat tabular records, the input to every shaping component.
//!
//! A [`Record`] is one row of tabular input — a character, a relationship
//! edge — held as an opaque field→value mapping. There is no fixed schema:
//! each operation names which fields act as item, parent, source, target, or
//! weight. Fetching data stays with the caller; this module only decodes
//! already-fetched JSON or CSV text into record sequences.

use std::collections::HashMap;

use log::debug;
use serde::Deserialize;

use crate::error::ShapeError;

/// A single field value: a number, text, or nothing.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
	/// Numeric value. CSV sources deliver numbers as [`FieldValue::Text`];
	/// numeric parsing happens at the access site ([`Record::weight`]).
	Number(f64),
	/// Text value. May still hold a numeric string.
	Text(String),
	/// Explicit null or missing value.
	Empty,
}

impl FieldValue {
	/// Whether the value is absent or empty text.
	pub fn is_blank(&self) -> bool {
		match self {
			FieldValue::Number(_) => false,
			FieldValue::Text(text) => text.trim().is_empty(),
			FieldValue::Empty => true,
		}
	}
}

impl From<&str> for FieldValue {
	fn from(text: &str) -> Self {
		FieldValue::Text(text.to_string())
	}
}

impl From<String> for FieldValue {
	fn from(text: String) -> Self {
		FieldValue::Text(text)
	}
}

impl From<f64> for FieldValue {
	fn from(number: f64) -> Self {
		FieldValue::Number(number)
	}
}

/// One row of tabular input, keyed by field name.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct Record(HashMap<String, FieldValue>);

impl Record {
	/// An empty record. Populate it with [`Record::with`] or [`Record::set`].
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder-style field assignment.
	pub fn with(mut self, key: &str, value: impl Into<FieldValue>) -> Self {
		self.set(key, value);
		self
	}

	/// Set a field, replacing any prior value.
	pub fn set(&mut self, key: &str, value: impl Into<FieldValue>) {
		self.0.insert(key.to_string(), value.into());
	}

	/// The raw value of a field, if present.
	pub fn get(&self, key: &str) -> Option<&FieldValue> {
		self.0.get(key)
	}

	/// The field's value as text. Numbers format with minimal digits;
	/// absent and null fields yield an empty string.
	pub fn text(&self, key: &str) -> String {
		match self.0.get(key) {
			Some(FieldValue::Number(number)) => format!("{number}"),
			Some(FieldValue::Text(text)) => text.clone(),
			Some(FieldValue::Empty) | None => String::new(),
		}
	}

	/// Whether a field is absent, null, or empty text.
	pub fn is_blank(&self, key: &str) -> bool {
		self.0.get(key).is_none_or(FieldValue::is_blank)
	}

	/// Parse a field as a weight. Numbers pass through, numeric text parses,
	/// blank fields contribute nothing, and anything else is an error.
	pub fn weight(&self, key: &str) -> Result<Option<f64>, ShapeError> {
		match self.0.get(key) {
			Some(FieldValue::Number(number)) => Ok(Some(*number)),
			Some(FieldValue::Text(text)) => {
				let trimmed = text.trim();
				if trimmed.is_empty() {
					return Ok(None);
				}
				trimmed
					.parse::<f64>()
					.map(Some)
					.map_err(|_| ShapeError::InvalidWeight {
						field: key.to_string(),
						value: text.clone(),
					})
			}
			Some(FieldValue::Empty) | None => Ok(None),
		}
	}
}

/// Decode records from a JSON array of flat objects.
pub fn records_from_json(text: &str) -> Result<Vec<Record>, ShapeError> {
	let records: Vec<Record> = serde_json::from_str(text)?;
	debug!("saga-shape: decoded {} JSON records", records.len());
	Ok(records)
}

/// Decode records from CSV text with a header row.
///
/// Every cell arrives as [`FieldValue::Text`]; numeric fields parse lazily
/// where they are used as weights.
pub fn records_from_csv(text: &str) -> Result<Vec<Record>, ShapeError> {
	let mut reader = csv::Reader::from_reader(text.as_bytes());
	let headers = reader.headers()?.clone();
	let mut records = Vec::new();

	for row in reader.records() {
		let row = row?;
		let mut record = Record::new();
		for (key, value) in headers.iter().zip(row.iter()) {
			record.set(key, value);
		}
		records.push(record);
	}

	debug!("saga-shape: decoded {} CSV records", records.len());
	Ok(records)
}
