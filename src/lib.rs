use std::sync::Arc;

use subscription_client::SubscriptionClient;

pub mod configuration;
pub mod domain;
pub mod form;
pub mod routes;
pub mod startup;
pub mod subscription_client;
pub mod telemetry;
pub mod utils;

#[derive(Clone)]
pub struct AppState {
    pub subscription_client: Arc<SubscriptionClient>,
}
