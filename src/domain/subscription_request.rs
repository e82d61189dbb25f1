use serde::Serialize;

use crate::form::FormState;

use super::{SubscriberEmail, SubscriberName};

/// Body of the POST sent to the subscription service.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRequest {
    pub first_name: SubscriberName,
    pub last_name: SubscriberName,
    pub email: SubscriberEmail,
}

/// Why the form refused to send a request. The `Display` output is shown to the user.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("First name is required")]
    MissingFirstName,
    #[error("Last name is required")]
    MissingLastName,
    #[error("Valid email is required")]
    InvalidEmail,
}

impl TryFrom<&FormState> for SubscriptionRequest {
    type Error = ValidationError;

    fn try_from(state: &FormState) -> Result<Self, Self::Error> {
        let first_name = SubscriberName::parse(state.first_name.clone())
            .map_err(|_| ValidationError::MissingFirstName)?;
        let last_name = SubscriberName::parse(state.last_name.clone())
            .map_err(|_| ValidationError::MissingLastName)?;
        let email =
            SubscriberEmail::parse(state.email.clone()).map_err(|_| ValidationError::InvalidEmail)?;
        Ok(Self {
            first_name,
            last_name,
            email,
        })
    }
}

/// Checks the current field values, first name, then last name, then email,
/// stopping at the first failure.
pub fn validate(state: &FormState) -> Result<SubscriptionRequest, ValidationError> {
    SubscriptionRequest::try_from(state)
}
