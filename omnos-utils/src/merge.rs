//! Shallow merging of sequences and mappings.
//!
//! Two entry points:
//! - [`merge`] picks the strategy from the static type. `Vec`s concatenate,
//!   maps overlay. Mixing kinds does not type-check, so it cannot fail.
//! - [`merge_values`] works on dynamic JSON values, where the kind is only
//!   known at runtime and a mismatch is a [`UtilError::TypeMismatch`].
//!
//! Neither recurses: nested arrays and objects are carried over whole, and a
//! later mapping's value for a key replaces the earlier one outright.

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use serde_json::{Map, Value};

use crate::error::{Result, UtilError};

/// A collection that can be shallow-merged with others of its kind.
pub trait Merge: Sized {
    /// Merge `inputs` in order. An empty input yields an empty collection.
    fn merge_all<I: IntoIterator<Item = Self>>(inputs: I) -> Self;
}

impl<T> Merge for Vec<T> {
    fn merge_all<I: IntoIterator<Item = Self>>(inputs: I) -> Self {
        inputs.into_iter().flatten().collect()
    }
}

impl<K, V, S> Merge for HashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn merge_all<I: IntoIterator<Item = Self>>(inputs: I) -> Self {
        let mut merged = Self::default();
        for input in inputs {
            merged.extend(input);
        }
        merged
    }
}

impl<K: Ord, V> Merge for BTreeMap<K, V> {
    fn merge_all<I: IntoIterator<Item = Self>>(inputs: I) -> Self {
        let mut merged = Self::new();
        for input in inputs {
            merged.extend(input);
        }
        merged
    }
}

/// Shallow-merge `inputs` of one statically known kind.
///
/// ```
/// use omnos_utils::merge::merge;
///
/// assert_eq!(merge([vec![1, 2], vec![3, 4]]), vec![1, 2, 3, 4]);
/// ```
pub fn merge<M, I>(inputs: I) -> M
where
    M: Merge,
    I: IntoIterator<Item = M>,
{
    M::merge_all(inputs)
}

/// The runtime kind of a JSON value, as reported in merge errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// `null`.
    Null,
    /// `true` / `false`.
    Bool,
    /// Any number.
    Number,
    /// A string.
    String,
    /// An array; merges by concatenation.
    Array,
    /// An object; merges by key overlay.
    Object,
}

impl ValueKind {
    /// Classify `value`.
    #[must_use]
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    /// Lower-case name used in error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "a boolean",
            ValueKind::Number => "a number",
            ValueKind::String => "a string",
            ValueKind::Array => "an array",
            ValueKind::Object => "an object",
        }
    }
}

/// Shallow-merge dynamic values according to the kind of the first one.
///
/// # Errors
/// `UtilError::TypeMismatch` when the first input is neither an array nor an
/// object (or there is no first input), or when a later input's kind differs
/// from the first's.
pub fn merge_values(inputs: &[Value]) -> Result<Value> {
    let Some(first) = inputs.first() else {
        return Err(UtilError::TypeMismatch {
            index: 0,
            expected: "an array or an object",
            found: "nothing",
        });
    };

    match ValueKind::of(first) {
        ValueKind::Array => {
            let mut merged = Vec::new();
            for (index, input) in inputs.iter().enumerate() {
                let items = input
                    .as_array()
                    .ok_or_else(|| mismatch(index, ValueKind::Array, input))?;
                merged.extend(items.iter().cloned());
            }
            Ok(Value::Array(merged))
        }
        ValueKind::Object => {
            let mut merged = Map::new();
            for (index, input) in inputs.iter().enumerate() {
                let fields = input
                    .as_object()
                    .ok_or_else(|| mismatch(index, ValueKind::Object, input))?;
                for (key, value) in fields {
                    merged.insert(key.clone(), value.clone());
                }
            }
            Ok(Value::Object(merged))
        }
        other => Err(UtilError::TypeMismatch {
            index: 0,
            expected: "an array or an object",
            found: other.as_str(),
        }),
    }
}

fn mismatch(index: usize, expected: ValueKind, found: &Value) -> UtilError {
    UtilError::TypeMismatch {
        index,
        expected: expected.as_str(),
        found: ValueKind::of(found).as_str(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn vectors_concatenate_in_order() {
        assert_eq!(merge([vec![1, 2], vec![3, 4]]), vec![1, 2, 3, 4]);
        assert_eq!(merge([vec!["a"], vec![], vec!["b", "c"]]), vec!["a", "b", "c"]);
    }

    #[test]
    fn maps_overlay_later_wins() {
        let first: HashMap<_, _> = [("a", 1), ("b", 2)].into_iter().collect();
        let second: HashMap<_, _> = [("b", 3), ("c", 4)].into_iter().collect();
        let merged = merge([first, second]);

        let expected: HashMap<_, _> = [("a", 1), ("b", 3), ("c", 4)].into_iter().collect();
        assert_eq!(merged, expected);
    }

    #[test]
    fn btree_maps_overlay() {
        let merged = merge([
            BTreeMap::from([("x", "old")]),
            BTreeMap::from([("x", "new"), ("y", "added")]),
        ]);
        assert_eq!(merged, BTreeMap::from([("x", "new"), ("y", "added")]));
    }

    #[test]
    fn no_inputs_is_empty() {
        let merged: Vec<u8> = merge(Vec::<Vec<u8>>::new());
        assert!(merged.is_empty());
    }

    #[test]
    fn json_arrays_concatenate() {
        let merged = merge_values(&[json!([1, 2]), json!([3, 4])]).expect("arrays merge");
        assert_eq!(merged, json!([1, 2, 3, 4]));
    }

    #[test]
    fn json_objects_overlay() {
        let merged = merge_values(&[json!({"a": 1, "b": 2}), json!({"b": 3, "c": 4})])
            .expect("objects merge");
        assert_eq!(merged, json!({"a": 1, "b": 3, "c": 4}));
    }

    #[test]
    fn json_merge_is_shallow() {
        let merged = merge_values(&[
            json!({"nested": {"keep": true}}),
            json!({"nested": {"other": 1}}),
        ])
        .expect("objects merge");
        assert_eq!(merged, json!({"nested": {"other": 1}}));
    }

    #[test]
    fn single_input_is_copied() {
        assert_eq!(merge_values(&[json!([])]).expect("one array"), json!([]));
        assert_eq!(
            merge_values(&[json!({"k": null})]).expect("one object"),
            json!({"k": null})
        );
    }

    #[test]
    fn mismatched_kinds_fail() {
        let err = merge_values(&[json!([1]), json!({"a": 1})]).expect_err("should fail");
        assert!(matches!(
            err,
            UtilError::TypeMismatch { index: 1, expected: "an array", found: "an object" }
        ));

        let err =
            merge_values(&[json!({"a": 1}), json!({}), json!([1])]).expect_err("should fail");
        assert!(matches!(err, UtilError::TypeMismatch { index: 2, .. }));
    }

    #[test]
    fn primitive_first_input_fails() {
        for primitive in [json!(1), json!("s"), json!(true), Value::Null] {
            let err = merge_values(&[primitive, json!([1])]).expect_err("should fail");
            assert!(matches!(err, UtilError::TypeMismatch { index: 0, .. }));
        }
    }

    #[test]
    fn empty_input_fails() {
        let err = merge_values(&[]).expect_err("should fail");
        assert!(matches!(err, UtilError::TypeMismatch { found: "nothing", .. }));
    }
}
