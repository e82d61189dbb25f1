use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Form;
use serde::Deserialize;

use crate::form::{Field, FormState, Submission, SubscriptionForm, SubscriptionFormView};
use crate::subscription_client::SubscribeError;
use crate::utils::e500;
use crate::AppState;

#[derive(Deserialize)]
pub struct FormData {
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    email: String,
}

pub async fn subscription_form() -> Response {
    SubscriptionFormView::from(&FormState::default()).into_response()
}

#[tracing::instrument(
    name = "Hosting a subscription form submission",
    skip(state, form),
    fields(subscriber_email = %form.email)
)]
pub async fn submit_subscription_form(state: State<AppState>, form: Form<FormData>) -> Response {
    let subscription_form = SubscriptionForm::new(state.subscription_client.clone());
    subscription_form.update_field(Field::FirstName, form.0.first_name);
    subscription_form.update_field(Field::LastName, form.0.last_name);
    subscription_form.update_field(Field::Email, form.0.email);

    let status = match subscription_form.submit().await {
        Submission::Subscribed { .. } => StatusCode::OK,
        Submission::Rejected(_) | Submission::Failed(SubscribeError::Rejected { .. }) => {
            StatusCode::BAD_REQUEST
        }
        Submission::Failed(_) => StatusCode::BAD_GATEWAY,
        Submission::Stale => {
            return e500("Request-scoped form reported a stale submission").into_response()
        }
    };

    let view = SubscriptionFormView::from(&subscription_form.snapshot());
    (status, view).into_response()
}
