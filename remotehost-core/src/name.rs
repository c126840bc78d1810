//! Two-level action names of the form `group.action`.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Separator between the two levels of an action name, e.g. `customer.address`.
pub const LEVEL_SEPARATOR: char = '.';

/// A validated two-level action name.
///
/// The first level addresses an action group, the second an action within it.
/// The name is split at the first separator, so the action part may itself
/// contain separators; a name with an empty group or action part is invalid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ActionName {
    group: String,
    action: String,
}

impl ActionName {
    pub fn new(group: impl Into<String>, action: impl Into<String>) -> CoreResult<Self> {
        let group = group.into();
        let action = action.into();
        if group.is_empty() || action.is_empty() {
            return Err(CoreError::Invalid(
                "action name levels must be non-empty".to_string(),
            ));
        }
        Ok(Self { group, action })
    }

    pub fn parse(name: &str) -> CoreResult<Self> {
        match name.split_once(LEVEL_SEPARATOR) {
            Some((group, action)) if !group.is_empty() && !action.is_empty() => Ok(Self {
                group: group.to_string(),
                action: action.to_string(),
            }),
            _ => Err(CoreError::Invalid(format!(
                "action name '{}' is not well formed; expected two parts separated by '{}'",
                name, LEVEL_SEPARATOR
            ))),
        }
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn action(&self) -> &str {
        &self.action
    }
}

impl fmt::Display for ActionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.group, LEVEL_SEPARATOR, self.action)
    }
}

impl FromStr for ActionName {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ActionName {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ActionName> for String {
    fn from(name: ActionName) -> Self {
        name.to_string()
    }
}
