use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::configuration::Settings;
use crate::routes::{health_check, submit_subscription_form, subscription_form};
use crate::subscription_client::SubscriptionClient;
use crate::AppState;

pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    pub async fn build(configuration: Settings) -> anyhow::Result<Self> {
        let subscription_client = SubscriptionClient::new(configuration.subscription_service)?;
        tracing::info!(
            endpoint = %subscription_client.url(),
            "Subscription requests will be sent to the configured service"
        );
        let app_state = AppState {
            subscription_client: Arc::new(subscription_client),
        };

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind {address}: {e}");
            e
        })?;
        let port = listener.local_addr()?.port();

        Ok(Self {
            port,
            listener,
            router: router(app_state),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        tracing::info!("Listening on port {}", self.port);
        axum::serve(self.listener, self.router).await
    }
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health_check", get(health_check))
        .route("/", get(subscription_form).post(submit_subscription_form))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .with_state(app_state)
}
