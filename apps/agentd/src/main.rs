use std::sync::Arc;
use tokio::signal;
use tracing::info;
use verdict_core::{
    telemetry, DecisionWorker, EventBus, EventRouter, RealtimeClient, WorkerConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init();

    info!(target: "agentd", "Starting agentd: broker -> router -> model -> decision");

    let bus = Arc::new(EventBus::new());
    let client = RealtimeClient::from_env()?;
    let router = Arc::new(EventRouter::new(client));

    let cfg = WorkerConfig::default();
    let worker = DecisionWorker::new(Arc::clone(&bus), router, cfg);
    let (handle, shutdown) = worker.start();

    signal::ctrl_c().await?;
    info!(target: "agentd", "Shutdown signal received");

    // Worker drains between messages; never interrupts an in-flight decision.
    let _ = shutdown.send(true);
    handle.await?;

    info!(target: "agentd", "agentd stopped");
    Ok(())
}
