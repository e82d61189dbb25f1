use std::collections::BTreeMap;

use reqwest::{header, Client, ClientBuilder, StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;

use crate::configuration::SubscriptionServiceSettings;
use crate::domain::SubscriptionRequest;
use crate::utils::error_chain_fmt;

const SUBSCRIBE_PATH: &str = "/api/newsletter/subscribe";
const SUBSCRIPTION_FAILED: &str = "Subscription failed";
const NETWORK_ERROR: &str = "Network error. Please try again later.";

pub struct SubscriptionClient {
    http_client: Client,
    url: Url,
}

/// What the service echoes back for an accepted subscription. Other fields are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionReceipt {
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(thiserror::Error)]
pub enum SubscribeError {
    /// The service answered with a non-2xx status.
    #[error("{message}")]
    Rejected {
        status: StatusCode,
        message: String,
        field_errors: BTreeMap<String, String>,
    },
    /// The request never completed, or the body was not JSON.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    /// A 2xx body that does not look like a receipt.
    #[error(transparent)]
    MalformedResponse(#[from] serde_json::Error),
}

impl std::fmt::Debug for SubscribeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl SubscribeError {
    /// The text the form shows for this failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { message, .. } => message.clone(),
            Self::Transport(_) | Self::MalformedResponse(_) => {
                let message = self.to_string();
                if message.trim().is_empty() {
                    NETWORK_ERROR.to_string()
                } else {
                    message
                }
            }
        }
    }

    pub fn is_transport(&self) -> bool {
        !matches!(self, Self::Rejected { .. })
    }

    fn rejected(status: StatusCode, body: &Value) -> Self {
        let message = body
            .get("error")
            .and_then(Value::as_str)
            .filter(|message| !message.is_empty())
            .unwrap_or(SUBSCRIPTION_FAILED)
            .to_string();
        let field_errors: BTreeMap<String, String> = body
            .get("fieldErrors")
            .and_then(Value::as_object)
            .map(|fields| {
                fields
                    .iter()
                    .filter_map(|(field, e)| e.as_str().map(|e| (field.clone(), e.to_string())))
                    .collect()
            })
            .unwrap_or_default();
        if !field_errors.is_empty() {
            tracing::warn!(?field_errors, "Subscription service flagged invalid fields");
        }
        Self::Rejected {
            status,
            message,
            field_errors,
        }
    }
}

impl SubscriptionClient {
    pub fn new(config: SubscriptionServiceSettings) -> anyhow::Result<Self> {
        let url = config
            .base_url
            .join(SUBSCRIBE_PATH)
            .map_err(|e| anyhow::anyhow!("Failed to build the subscription url: {e}"))?;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            "application/json"
                .parse()
                .map_err(|e| anyhow::anyhow!("Failed to parse accept header: {e}"))?,
        );

        let mut builder = ClientBuilder::new().default_headers(headers);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().map_err(|e| anyhow::anyhow!(e.to_string()))?;

        Ok(Self { http_client, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// POST `request` to the service and classify the answer.
    ///
    /// The body is parsed as JSON whatever the status, so a non-JSON error page
    /// surfaces as [`SubscribeError::Transport`] rather than a rejection.
    #[tracing::instrument(
        name = "Sending subscription request",
        skip_all,
        fields(subscriber_email = %request.email)
    )]
    pub async fn subscribe(
        &self,
        request: &SubscriptionRequest,
    ) -> Result<SubscriptionReceipt, SubscribeError> {
        let response = self
            .http_client
            .post(self.url.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body: Value = response.json().await?;

        if !status.is_success() {
            let e = SubscribeError::rejected(status, &body);
            tracing::warn!(%status, error = %e, "Subscription service rejected the request");
            return Err(e);
        }

        let receipt = serde_json::from_value(body)?;
        Ok(receipt)
    }
}
