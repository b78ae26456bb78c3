//! Typed node attributes.

use std::collections::HashMap;
use std::fmt;

/// Attribute holding the community label used for coloring.
pub const COMMUNITY_ID: &str = "community_id";
/// Attribute holding an optional numeric size. Parsed but not used for sizing.
pub const SIZE: &str = "size";

const DEFAULT_COMMUNITY_ID: f64 = 0.0;

/// A single attribute value as stored in a graph file.
#[derive(Clone, Debug, PartialEq)]
pub enum AttrValue {
	/// `string` keys, and anything without a declared type.
	Text(String),
	/// `int` and `long` keys.
	Int(i64),
	/// `float` and `double` keys.
	Float(f64),
	/// `boolean` keys.
	Bool(bool),
}

impl AttrValue {
	/// Numeric view of the value, if it has one.
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			AttrValue::Int(v) => Some(*v as f64),
			AttrValue::Float(v) => Some(*v),
			AttrValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
			AttrValue::Text(s) => try_parse_numeric(s),
		}
	}
}

impl fmt::Display for AttrValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			AttrValue::Text(s) => f.write_str(s),
			AttrValue::Int(v) => write!(f, "{v}"),
			AttrValue::Float(v) => write!(f, "{v}"),
			AttrValue::Bool(b) => write!(f, "{b}"),
		}
	}
}

/// Parse numeric-looking text. Returns `None` instead of failing, and rejects
/// non-finite spellings such as `"NaN"` or `"inf"`.
pub fn try_parse_numeric(text: &str) -> Option<f64> {
	text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Attribute map of one node, with typed accessors for the keys the encoder
/// consumes. Unknown keys are carried along untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeAttributes {
	values: HashMap<String, AttrValue>,
}

impl NodeAttributes {
	/// An empty attribute map.
	pub fn new() -> Self {
		Self::default()
	}

	/// Value stored under `key`.
	pub fn get(&self, key: &str) -> Option<&AttrValue> {
		self.values.get(key)
	}

	/// Store `value` under `key`, replacing any previous value.
	pub fn insert(&mut self, key: impl Into<String>, value: AttrValue) {
		self.values.insert(key.into(), value);
	}

	/// Builder-style [`insert`](Self::insert).
	pub fn with(mut self, key: impl Into<String>, value: AttrValue) -> Self {
		self.insert(key, value);
		self
	}

	/// Number of stored attributes.
	pub fn len(&self) -> usize {
		self.values.len()
	}

	/// Whether no attributes are stored.
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Key/value pairs in arbitrary order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
		self.values.iter().map(|(k, v)| (k.as_str(), v))
	}

	/// Overwrite entries with the ones from `other`.
	pub fn merge(&mut self, other: NodeAttributes) {
		self.values.extend(other.values);
	}

	/// Community label as a number; absent or non-numeric values read as 0.
	pub fn community_id(&self) -> f64 {
		self.get(COMMUNITY_ID)
			.and_then(AttrValue::as_f64)
			.unwrap_or(DEFAULT_COMMUNITY_ID)
	}

	/// Numeric `size`, if present and numeric.
	pub fn size(&self) -> Option<f64> {
		self.get(SIZE).and_then(AttrValue::as_f64)
	}

	/// Convert a textual `size` into a float when it looks numeric. Anything
	/// else is left exactly as stored.
	pub fn coerce_size(&mut self) {
		let parsed = match self.values.get(SIZE) {
			Some(AttrValue::Text(text)) => try_parse_numeric(text),
			_ => None,
		};
		if let Some(v) = parsed {
			self.values.insert(SIZE.to_string(), AttrValue::Float(v));
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_numeric_text() {
		assert_eq!(try_parse_numeric("3.5"), Some(3.5));
		assert_eq!(try_parse_numeric("  12 "), Some(12.0));
		assert_eq!(try_parse_numeric("-1e2"), Some(-100.0));
		assert_eq!(try_parse_numeric("abc"), None);
		assert_eq!(try_parse_numeric(""), None);
		assert_eq!(try_parse_numeric("NaN"), None);
		assert_eq!(try_parse_numeric("inf"), None);
	}

	#[test]
	fn community_id_defaults_to_zero() {
		assert_eq!(NodeAttributes::new().community_id(), 0.0);
		let text = NodeAttributes::new().with(COMMUNITY_ID, AttrValue::Text("blue".into()));
		assert_eq!(text.community_id(), 0.0);
	}

	#[test]
	fn community_id_reads_numbers() {
		let int = NodeAttributes::new().with(COMMUNITY_ID, AttrValue::Int(4));
		assert_eq!(int.community_id(), 4.0);
		let text = NodeAttributes::new().with(COMMUNITY_ID, AttrValue::Text("7".into()));
		assert_eq!(text.community_id(), 7.0);
	}

	#[test]
	fn coerce_size_converts_numeric_text() {
		let mut attrs = NodeAttributes::new().with(SIZE, AttrValue::Text("2.25".into()));
		attrs.coerce_size();
		assert_eq!(attrs.get(SIZE), Some(&AttrValue::Float(2.25)));
		assert_eq!(attrs.size(), Some(2.25));
	}

	#[test]
	fn coerce_size_keeps_garbage_as_is() {
		let mut attrs = NodeAttributes::new().with(SIZE, AttrValue::Text("large".into()));
		attrs.coerce_size();
		assert_eq!(attrs.get(SIZE), Some(&AttrValue::Text("large".into())));
		assert_eq!(attrs.size(), None);
	}
}
