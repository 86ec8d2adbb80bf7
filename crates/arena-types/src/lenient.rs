//! Lenient integer fields for host records.
//!
//! A numeric field that arrives fractional, out of range, or not as a number
//! at all deserializes as `None` instead of failing the whole frame.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

/// Largest magnitude at which every integer is exact in an `f64`.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_991.0;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberInput {
    Signed(i64),
    Unsigned(u64),
    Float(f64),
    Other(#[allow(dead_code)] IgnoredAny),
}

/// Deserialize an optional integer, mapping unusable values to `None`.
pub(crate) fn int<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    let value = match Option::<NumberInput>::deserialize(deserializer)? {
        Some(NumberInput::Signed(n)) => Some(n),
        Some(NumberInput::Unsigned(n)) => i64::try_from(n).ok(),
        Some(NumberInput::Float(f)) => integral(f),
        Some(NumberInput::Other(_)) | None => None,
    };
    Ok(value.and_then(|n| T::try_from(n).ok()))
}

#[allow(clippy::float_cmp, clippy::cast_possible_truncation)]
fn integral(f: f64) -> Option<i64> {
    (f.is_finite() && f.trunc() == f && f.abs() <= MAX_EXACT_FLOAT).then(|| f as i64)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::snapshot::RawEntity;

    fn parse(json: &str) -> RawEntity {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn fractional_hits_are_unknown() {
        let raw = parse(r#"{"id": "a", "hits": 99.5, "hitsMax": 100}"#);
        assert_eq!(raw.hits, None);
        assert_eq!(raw.hits_max, Some(100));
    }

    #[test]
    fn integral_floats_are_accepted() {
        let raw = parse(r#"{"id": "a", "hits": 100.0, "x": 3.0, "y": -2.0}"#);
        assert_eq!(raw.hits, Some(100));
        assert_eq!((raw.x, raw.y), (Some(3), Some(-2)));
    }

    #[test]
    fn non_numbers_and_out_of_range_are_unknown() {
        let raw = parse(
            r#"{"id": "a", "hits": "lots", "x": 4294967296, "energy": -1,
                "store": {"energy": true, "capacity": 50}}"#,
        );
        assert_eq!(raw.hits, None);
        assert_eq!(raw.x, None);
        assert_eq!(raw.energy, None);
        let store = raw.store.unwrap();
        assert_eq!((store.energy, store.capacity), (None, Some(50)));
    }

    #[test]
    fn null_is_absent() {
        let raw = parse(r#"{"id": "a", "hits": null}"#);
        assert_eq!(raw.hits, None);
    }
}
