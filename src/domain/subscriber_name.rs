use serde::Serialize;
use std::fmt;

/// A first or last name as typed into the form.
///
/// Only a whitespace-only check is applied; the stored value is the raw input,
/// surrounding whitespace included.
#[derive(Debug, Clone, Serialize)]
pub struct SubscriberName(String);

impl SubscriberName {
    pub fn parse(value: String) -> Result<SubscriberName, String> {
        if value.trim().is_empty() {
            Err(format!("{value:?} is not a valid subscriber name."))
        } else {
            Ok(Self(value))
        }
    }
}

impl AsRef<str> for SubscriberName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubscriberName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
