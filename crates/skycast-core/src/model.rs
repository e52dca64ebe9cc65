// crates/skycast-core/src/model.rs
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Stable identifier of a [`City`].
///
/// Datasets in the wild use both numeric and textual ids, so deserialization
/// accepts either and stores the textual form. The id is searchable just like
/// the name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CityId(String);

impl CityId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CityId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for CityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<u64> for CityId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl<'de> Deserialize<'de> for CityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => CityId::from(n),
            RawId::Text(s) => CityId(s),
        })
    }
}

/// A city from the static dataset. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub id: CityId,
    #[serde(alias = "cityName")]
    pub name: String,
}

impl City {
    pub fn new(id: impl Into<CityId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    pub fn id(&self) -> &CityId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
