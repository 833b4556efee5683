//! `parrot models` — list the configured models.

use parrot_config::AppConfig;
use parrot_participant::list_models;

use crate::sink::StdoutSink;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let catalog = parrot_providers::build_from_config(&config);

    let mut sink = StdoutSink::new();
    let count = list_models(&catalog, &config.vendor, &mut sink).await?;
    sink.finish();

    if count == 0 {
        println!("No models configured for vendor '{}'.", config.vendor);
    }
    Ok(())
}
