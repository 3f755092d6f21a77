use anyhow::{Context, Result};
use aws_config::BehaviorVersion;
use lambda_runtime::{service_fn, LambdaEvent};
use outdated_instance_common::ChangeEvent;
use outdated_instance_host::{ConfigEvaluationReporter, LogFormat, RuleHandler, RuntimeConfig};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // CloudWatch stamps every line, so the subscriber does not.
    match format {
        LogFormat::Text => fmt()
            .with_env_filter(filter)
            .with_target(false)
            .without_time()
            .init(),
        LogFormat::Json => fmt()
            .json()
            .with_env_filter(filter)
            .with_target(false)
            .without_time()
            .init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let runtime_config = RuntimeConfig::from_env().context("Invalid runtime configuration")?;
    init_tracing(runtime_config.log_format);

    let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let reporter =
        ConfigEvaluationReporter::new(&sdk_config).with_test_mode(runtime_config.test_mode);
    let handler = RuleHandler::new(reporter);

    info!(
        message = "outdated-instance-rule starting",
        event = "startup",
        version = outdated_instance_common::VERSION,
        region = ?sdk_config.region(),
        test_mode = handler.reporter().test_mode()
    );

    let handler = &handler;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<ChangeEvent>| async move {
        handler.handle_lambda(event).await
    }))
    .await
    .map_err(|e| anyhow::anyhow!(e))
    .context("Lambda runtime terminated")
}
