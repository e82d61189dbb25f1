use anyhow::Context;
use newsletter_form::configuration::get_configuration;
use newsletter_form::startup::Application;
use newsletter_form::telemetry::{get_tracing_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber =
        get_tracing_subscriber("newsletter-form".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_configuration().context("Failed to read configuration.")?;
    let application = Application::build(configuration).await?;
    application.run_until_stopped().await?;
    Ok(())
}
