use anyhow::Context;
use clap::Parser;
use optionform::adapters::options_page::OptionsPage;
use optionform::adapters::plugin_store::InMemoryPluginStore;
use optionform::cli::Cli;
use optionform::config::Settings;
use optionform::schema::Submission;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Filter from `RUST_LOG` directives, `info` when unset or unparsable
fn log_filter(directives: Option<String>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the JSON output
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = Settings::new_with_cli(&cli)?;

    let plugin = settings
        .plugin(&cli.plugin)
        .with_context(|| format!("Plugin '{}' is not declared in the configuration", cli.plugin))?;
    let mut builder = plugin.build_schema()?;

    let store = Arc::new(InMemoryPluginStore::from_settings(&settings).await);
    let page = OptionsPage::new(cli.plugin.clone(), store.clone(), store);

    let Some(description) = page.render(&mut builder, settings.render.is_admin).await? else {
        info!("Plugin '{}' declares no options, nothing to render", cli.plugin);
        return Ok(());
    };

    let output = match &cli.validate {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read submission {}", path.display()))?;
            let submission: Submission = serde_json::from_str(&content)?;
            match description.validate_submission(&submission) {
                Ok(()) => serde_json::json!({ "valid": true, "errors": [] }),
                Err(errors) => {
                    warn!("Submission has {} invalid fields", errors.len());
                    let errors: Vec<_> = errors
                        .iter()
                        .map(|e| serde_json::json!({ "field": e.field(), "message": e.to_string() }))
                        .collect();
                    serde_json::json!({ "valid": false, "errors": errors })
                }
            }
        }
        None => serde_json::json!({
            "description": description,
            "client": description.client_mirror()?,
        }),
    };

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", rendered);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_defaults_to_info() {
        assert_eq!(log_filter(None).to_string(), "info");
    }

    #[test]
    fn test_log_filter_uses_directives() {
        let filter = log_filter(Some("optionform=debug".to_string()));
        assert_eq!(filter.to_string(), "optionform=debug");
    }
}
