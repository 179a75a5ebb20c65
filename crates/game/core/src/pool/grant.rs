use super::{Cadence, PoolKey, ResourceName};

/// One pool a feature contributes to.
///
/// Grants on the same key from different features sum into that pool's base
/// max.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolGrant {
    pub resource_name: ResourceName,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sub_resource: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cadence: Cadence,
    /// Capacity formula, e.g. `@level + @stats.cha.mod`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub formula: Option<String>,
    /// Gate evaluated before the formula, e.g. `@level >= 3`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub condition: Option<String>,
}

impl PoolGrant {
    pub fn new(resource_name: ResourceName, sub_resource: impl Into<String>, cadence: Cadence) -> Self {
        Self {
            resource_name,
            sub_resource: sub_resource.into(),
            cadence,
            formula: None,
            condition: None,
        }
    }

    pub fn with_formula(mut self, formula: impl Into<String>) -> Self {
        self.formula = Some(formula.into());
        self
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn key(&self) -> PoolKey {
        PoolKey::new(self.resource_name, self.sub_resource.clone())
    }

    /// Formula text, ignoring blank strings.
    pub fn formula_text(&self) -> Option<&str> {
        non_blank(self.formula.as_deref())
    }

    /// Condition text, ignoring blank strings.
    pub fn condition_text(&self) -> Option<&str> {
        non_blank(self.condition.as_deref())
    }
}

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.trim().is_empty())
}
