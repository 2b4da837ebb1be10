//! Field coercion helpers shared by the entity sanitizers.
//!
//! Browser forms submit numbers as strings and leave cleared inputs as
//! `null` or `""`. The lenient deserializers below absorb those shapes so
//! the stored document always carries properly typed values.

use std::borrow::Cow;

use serde::{Deserialize, Deserializer, de};
use serde_json::Value;
use veranda_store::StoreError;

pub(crate) fn invalid(message: impl Into<Cow<'static, str>>) -> StoreError {
    StoreError::Validation { message: message.into(), context: None }
}

/// Decodes an inbound payload into a typed draft, surfacing serde's
/// mismatch description as the validation message.
pub(crate) fn from_payload<T: de::DeserializeOwned>(payload: Value) -> Result<T, StoreError> {
    serde_json::from_value(payload).map_err(|source| invalid(source.to_string()))
}

/// Accepts a JSON number, a numeric string, `null`, or `""` and yields a
/// count. Missing and cleared fields both come out as `0`.
pub(crate) fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(number) => number
            .as_u64()
            .and_then(|wide| u32::try_from(wide).ok())
            .ok_or_else(|| de::Error::custom("expected a non-negative whole number")),
        Value::String(text) if text.trim().is_empty() => Ok(0),
        Value::String(text) => text
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("`{text}` is not a whole number"))),
        Value::Null => Ok(0),
        other => Err(de::Error::custom(format!("expected a number, got {other}"))),
    }
}

/// Accepts a JSON number, a numeric string, `null`, or `""` and yields a
/// price. Missing and cleared fields both come out as `0.0`.
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(number) => number
            .as_f64()
            .ok_or_else(|| de::Error::custom("expected a number")),
        Value::String(text) if text.trim().is_empty() => Ok(0.0),
        Value::String(text) => text
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("`{text}` is not a number"))),
        Value::Null => Ok(0.0),
        other => Err(de::Error::custom(format!("expected a number, got {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Probe {
        #[serde(deserialize_with = "super::lenient_u32")]
        count: u32,
        #[serde(deserialize_with = "super::lenient_f64")]
        price: f64,
    }

    #[test]
    fn test_numbers_pass_through() {
        let probe: Probe = serde_json::from_value(json!({"count": 3, "price": 120.5})).unwrap();

        assert_eq!(probe.count, 3);
        assert!((probe.price - 120.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_numeric_strings_are_coerced() {
        let probe: Probe =
            serde_json::from_value(json!({"count": " 2 ", "price": "89.99"})).unwrap();

        assert_eq!(probe.count, 2);
        assert!((probe.price - 89.99).abs() < f64::EPSILON);
    }

    #[test]
    fn test_null_and_empty_string_mean_zero() {
        let probe: Probe = serde_json::from_value(json!({"count": null, "price": ""})).unwrap();

        assert_eq!(probe.count, 0);
        assert!((probe.price - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(serde_json::from_value::<Probe>(json!({"count": "many"})).is_err());
        assert!(serde_json::from_value::<Probe>(json!({"count": -1})).is_err());
        assert!(serde_json::from_value::<Probe>(json!({"count": 2.5})).is_err());
        assert!(serde_json::from_value::<Probe>(json!({"price": true})).is_err());
    }
}
