use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

// Unanchored: a match anywhere in the input is enough.
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("Failed to compile the email pattern"));

#[derive(Debug, Serialize, Clone)]
pub struct SubscriberEmail(String);

impl AsRef<str> for SubscriberEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubscriberEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl SubscriberEmail {
    pub fn parse(s: String) -> Result<Self, String> {
        if !s.trim().is_empty() && EMAIL_PATTERN.is_match(&s) {
            Ok(Self(s))
        } else {
            Err(format!("{s} is not a valid subscriber email."))
        }
    }
}
