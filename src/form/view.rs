use askama_axum::Template;

use super::FormState;

/// HTML rendering of a [`FormState`].
#[derive(Template)]
#[template(path = "subscription_form.html")]
pub struct SubscriptionFormView {
    first_name: String,
    last_name: String,
    email: String,
    error_message: Option<String>,
    success_message: Option<String>,
}

impl From<&FormState> for SubscriptionFormView {
    fn from(state: &FormState) -> Self {
        Self {
            first_name: state.first_name.clone(),
            last_name: state.last_name.clone(),
            email: state.email.clone(),
            error_message: state.error_message().map(str::to_owned),
            success_message: state.success_message().map(str::to_owned),
        }
    }
}
