//! Partial-match response validation

use serde_json::Value as JsonValue;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Validation {
    Pass,
    Fail(Mismatch),
}

impl Validation {
    pub fn is_pass(&self) -> bool {
        matches!(self, Validation::Pass)
    }

    pub fn mismatch(&self) -> Option<&Mismatch> {
        match self {
            Validation::Pass => None,
            Validation::Fail(m) => Some(m),
        }
    }
}

/// First difference found between the expected document and the response
#[derive(Debug, Clone, PartialEq)]
pub enum Mismatch {
    MissingKey {
        key: String,
    },
    ValueDiffers {
        key: String,
        expected: JsonValue,
        actual: JsonValue,
    },
    /// Expected document is not an object and differs from the response
    DocumentDiffers {
        expected: JsonValue,
        actual: JsonValue,
    },
}

impl Mismatch {
    pub fn key(&self) -> Option<&str> {
        match self {
            Mismatch::MissingKey { key } | Mismatch::ValueDiffers { key, .. } => Some(key.as_str()),
            Mismatch::DocumentDiffers { .. } => None,
        }
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::MissingKey { key } => write!(f, "key '{}' missing from response", key),
            Mismatch::ValueDiffers { key, expected, actual } => {
                write!(f, "key '{}': {} != {}", key, actual, expected)
            }
            Mismatch::DocumentDiffers { expected, actual } => {
                write!(f, "response {} != {}", actual, expected)
            }
        }
    }
}

/// Check that `actual` contains every key of `expected` with an equal value.
///
/// Keys are visited in the expected document's order and the first missing
/// or different key ends the check. Extra keys in `actual` are ignored.
pub fn validate(expected: &JsonValue, actual: &JsonValue) -> Validation {
    let expected_fields = match expected.as_object() {
        Some(fields) => fields,
        None => {
            return if expected == actual {
                Validation::Pass
            } else {
                Validation::Fail(Mismatch::DocumentDiffers {
                    expected: expected.clone(),
                    actual: actual.clone(),
                })
            };
        }
    };

    let actual_fields = actual.as_object();

    for (key, expected_value) in expected_fields {
        match actual_fields.and_then(|fields| fields.get(key)) {
            Some(actual_value) if actual_value == expected_value => continue,
            Some(actual_value) => {
                return Validation::Fail(Mismatch::ValueDiffers {
                    key: key.clone(),
                    expected: expected_value.clone(),
                    actual: actual_value.clone(),
                });
            }
            None => {
                return Validation::Fail(Mismatch::MissingKey { key: key.clone() });
            }
        }
    }

    Validation::Pass
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_exact_match_passes() {
        let body = json!({"success": true, "label": 3});
        assert!(validate(&json!({"success": true, "label": 3}), &body).is_pass());
    }

    #[test]
    fn test_value_mismatch_reports_key() {
        let result = validate(
            &json!({"success": true, "label": 3}),
            &json!({"success": true, "label": 2}),
        );
        assert_eq!(
            result.mismatch(),
            Some(&Mismatch::ValueDiffers {
                key: "label".to_string(),
                expected: json!(3),
                actual: json!(2),
            })
        );
    }

    #[test]
    fn test_extra_keys_ignored() {
        let body = json!({"success": true, "label": 3, "confidence": 0.97});
        assert!(validate(&json!({"label": 3}), &body).is_pass());
        assert!(validate(&json!({}), &body).is_pass());
    }

    #[test]
    fn test_missing_key_fails() {
        let result = validate(&json!({"label": 3}), &json!({"success": true}));
        assert_eq!(result.mismatch().and_then(Mismatch::key), Some("label"));
        assert!(matches!(result, Validation::Fail(Mismatch::MissingKey { .. })));
    }

    #[test]
    fn test_first_mismatch_in_document_order_wins() {
        let result = validate(
            &json!({"b": 1, "a": 1}),
            &json!({"a": 2, "b": 2}),
        );
        assert_eq!(result.mismatch().and_then(Mismatch::key), Some("b"));
    }

    #[test]
    fn test_nested_values_compared_deeply() {
        let expected = json!({"result": {"labels": [1, 2], "meta": {"v": "1"}}});
        assert!(validate(&expected, &json!({"result": {"labels": [1, 2], "meta": {"v": "1"}}})).is_pass());
        // Nested objects are compared whole, not as partial matches.
        assert!(!validate(&expected, &json!({"result": {"labels": [1, 2], "meta": {"v": "1", "x": 0}}})).is_pass());
    }

    #[test]
    fn test_number_representation_matters() {
        assert!(!validate(&json!({"label": 3}), &json!({"label": "3"})).is_pass());
        assert!(!validate(&json!({"label": 3}), &json!({"label": 3.5})).is_pass());
    }

    #[test]
    fn test_non_object_body_against_object_expectation() {
        assert!(!validate(&json!({"label": 3}), &json!([1, 2, 3])).is_pass());
        assert!(validate(&json!({}), &json!("anything")).is_pass());
    }

    #[test]
    fn test_non_object_expectation_requires_equality() {
        assert!(validate(&json!([1, 2]), &json!([1, 2])).is_pass());
        let result = validate(&json!("ok"), &json!("nok"));
        assert!(matches!(result, Validation::Fail(Mismatch::DocumentDiffers { .. })));
        assert!(result.mismatch().unwrap().key().is_none());
    }

    #[test]
    fn test_mismatch_display() {
        let m = Mismatch::ValueDiffers {
            key: "label".to_string(),
            expected: json!(3),
            actual: json!(2),
        };
        assert_eq!(m.to_string(), "key 'label': 2 != 3");
    }
}
