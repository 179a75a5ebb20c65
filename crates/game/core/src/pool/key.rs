use core::fmt;
use core::str::FromStr;

/// Resource families a pool can belong to.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum ResourceName {
    Effort,
    Slots,
    Points,
    Strain,
    Uses,
}

/// Errors raised when parsing a pool key from text.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PoolKeyError {
    #[error("pool key '{0}' is missing the ':' separator")]
    MissingSeparator(String),

    #[error("pool key '{0}' names an unknown resource")]
    UnknownResource(String),
}

impl crate::error::EngineError for PoolKeyError {
    fn severity(&self) -> crate::error::ErrorSeverity {
        crate::error::ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingSeparator(_) => "POOL_KEY_MISSING_SEPARATOR",
            Self::UnknownResource(_) => "POOL_KEY_UNKNOWN_RESOURCE",
        }
    }
}

/// Composite pool identifier, written `<Resource>:<SubResource>`.
///
/// The sub-resource is free-form and may be empty (`"Uses:"`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PoolKey {
    pub resource: ResourceName,
    pub sub_resource: String,
}

impl PoolKey {
    pub fn new(resource: ResourceName, sub_resource: impl Into<String>) -> Self {
        Self {
            resource,
            sub_resource: sub_resource.into(),
        }
    }
}

impl fmt::Display for PoolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource, self.sub_resource)
    }
}

impl FromStr for PoolKey {
    type Err = PoolKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (resource, sub_resource) = s
            .split_once(':')
            .ok_or_else(|| PoolKeyError::MissingSeparator(s.to_string()))?;
        let resource = resource
            .trim()
            .parse::<ResourceName>()
            .map_err(|_| PoolKeyError::UnknownResource(s.to_string()))?;
        Ok(Self::new(resource, sub_resource))
    }
}

// Keys serialize as their text form so they can be used as map keys in JSON,
// RON and TOML documents.
#[cfg(feature = "serde")]
impl serde::Serialize for PoolKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PoolKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_parse_agree() {
        let key = PoolKey::new(ResourceName::Effort, "Psychic");
        assert_eq!(key.to_string(), "Effort:Psychic");
        assert_eq!("Effort:Psychic".parse::<PoolKey>(), Ok(key));
    }

    #[test]
    fn empty_sub_resource_is_allowed() {
        let key: PoolKey = "Uses:".parse().unwrap();
        assert_eq!(key, PoolKey::new(ResourceName::Uses, ""));
        assert_eq!(key.to_string(), "Uses:");
    }

    #[test]
    fn splits_on_first_separator_only() {
        let key: PoolKey = "Points:Art:High".parse().unwrap();
        assert_eq!(key.sub_resource, "Art:High");
    }

    #[test]
    fn rejects_malformed_keys() {
        assert_eq!(
            "Effort".parse::<PoolKey>(),
            Err(PoolKeyError::MissingSeparator("Effort".into()))
        );
        assert_eq!(
            "Mana:Blue".parse::<PoolKey>(),
            Err(PoolKeyError::UnknownResource("Mana:Blue".into()))
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_as_map_key() {
        let mut map = std::collections::BTreeMap::new();
        map.insert(PoolKey::new(ResourceName::Slots, "Lv1"), 3u32);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"Slots:Lv1":3}"#);
        let back: std::collections::BTreeMap<PoolKey, u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }
}
