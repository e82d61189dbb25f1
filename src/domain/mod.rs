mod service_base_url;
mod subscriber_email;
mod subscriber_name;
mod subscription_request;

pub use service_base_url::ServiceBaseUrl;
pub use subscriber_email::SubscriberEmail;
pub use subscriber_name::SubscriberName;
pub use subscription_request::{validate, SubscriptionRequest, ValidationError};
