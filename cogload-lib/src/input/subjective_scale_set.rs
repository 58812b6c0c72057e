use super::{LOG_TARGET, ScalePolicy, to_number};
use crate::MetricsError;
use compact_str::CompactString;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

/// A single named rating within a [`SubjectiveScaleSet`].
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectiveRating {
    pub name: CompactString,
    pub value: f64,
}

/// Validated subjective ratings, in the order they appeared in the raw input.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubjectiveScaleSet {
    ratings: Vec<SubjectiveRating>,
}

impl SubjectiveScaleSet {
    #[must_use]
    pub const fn len(&self) -> usize {
        self.ratings.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SubjectiveRating> {
        self.ratings.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.ratings.iter().map(|r| r.name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.ratings.iter().map(|r| r.value)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.ratings.iter().find(|r| r.name == name).map(|r| r.value)
    }
}

impl Serialize for SubjectiveScaleSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.ratings.len()))?;
        for rating in &self.ratings {
            map.serialize_entry(rating.name.as_str(), &rating.value)?;
        }
        map.end()
    }
}

/// Validate an object of named ratings against the rating scale.
///
/// Fails as a whole on the first rating that is not a number within `policy`.
pub fn validate_subjective(raw: &Value, policy: &ScalePolicy) -> Result<SubjectiveScaleSet, MetricsError> {
    let Value::Object(map) = raw else {
        return Err(MetricsError::InvalidFormat {
            expected: "an object mapping metric names to ratings",
        });
    };

    let ratings = map
        .iter()
        .map(|(key, raw_value)| {
            let value = to_number(raw_value);
            if policy.contains(value) {
                Ok(SubjectiveRating {
                    name: CompactString::from(key.as_str()),
                    value,
                })
            } else {
                log::trace!(target: LOG_TARGET, "Rejecting rating '{key}' with raw value {raw_value}");
                Err(MetricsError::InvalidValue {
                    key: CompactString::from(key.as_str()),
                })
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SubjectiveScaleSet { ratings })
}
