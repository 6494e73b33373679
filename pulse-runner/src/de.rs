//! Deserialization helpers for trigger payloads

use serde::{de, Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Seconds {
    Int(i64),
    Float(f64),
    Str(String),
}

/// Non-negative whole seconds given as a JSON number or a numeric string.
/// Floats are accepted only when they hold a whole number (`5.0`).
pub(crate) fn seconds<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Seconds::deserialize(deserializer)? {
        Seconds::Int(n) => n,
        Seconds::Float(f) => whole(f).ok_or_else(|| {
            de::Error::custom(format!("seconds must be a whole number, got {}", f))
        })?,
        Seconds::Str(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|e| de::Error::custom(format!("invalid seconds '{}': {}", s, e)))?,
    };

    u64::try_from(value)
        .map_err(|_| de::Error::custom(format!("seconds must be non-negative, got {}", value)))
}

fn whole(f: f64) -> Option<i64> {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Cadence {
        #[serde(deserialize_with = "super::seconds")]
        every: u64,
    }

    fn parse(value: serde_json::Value) -> Result<u64, serde_json::Error> {
        serde_json::from_value::<Cadence>(json!({ "every": value })).map(|c| c.every)
    }

    #[test]
    fn test_accepts_integers_strings_and_whole_floats() {
        assert_eq!(parse(json!(5)).unwrap(), 5);
        assert_eq!(parse(json!(" 7 ")).unwrap(), 7);
        assert_eq!(parse(json!(5.0)).unwrap(), 5);
        assert_eq!(parse(json!(0.0)).unwrap(), 0);
    }

    #[test]
    fn test_rejects_fractions_negatives_and_junk() {
        assert!(parse(json!(5.5)).is_err());
        assert!(parse(json!(-1)).is_err());
        assert!(parse(json!(-2.0)).is_err());
        assert!(parse(json!("5.0")).is_err());
        assert!(parse(json!(true)).is_err());
    }
}
