//! The `geoprep list-models` command.

use anyhow::Result;

use geoprep_core::traits::ModelInfo;
use geoprep_providers::gemini::GeminiProvider;
use geoprep_providers::ollama::OllamaProvider;
use geoprep_providers::{create_provider, ProviderConfig};

use super::{AppContext, Paths};

pub async fn execute(paths: &Paths, provider_filter: Option<String>) -> Result<()> {
    let ctx = AppContext::load(paths)?;

    let mut names: Vec<&String> = ctx.config.providers.keys().collect();
    names.sort();

    let mut found_any = false;
    for name in names {
        if provider_filter.as_ref().is_some_and(|filter| filter != name) {
            continue;
        }
        let provider_config = &ctx.config.providers[name];

        let models: Vec<ModelInfo> = match provider_config {
            ProviderConfig::Ollama { base_url } => {
                match OllamaProvider::new(base_url)?.list_models_async().await {
                    Ok(models) => models,
                    Err(e) => {
                        tracing::warn!(provider = %name, error = %e, "could not list models");
                        continue;
                    }
                }
            }
            ProviderConfig::Gemini { api_key, base_url } => {
                if api_key.is_empty() {
                    tracing::warn!(provider = %name, "skipping provider without an API key");
                    continue;
                }
                match GeminiProvider::new(api_key, base_url.clone())?
                    .list_models_async()
                    .await
                {
                    Ok(models) => models,
                    Err(e) => {
                        tracing::warn!(provider = %name, error = %e, "could not list models");
                        continue;
                    }
                }
            }
            ProviderConfig::Mock { .. } => match create_provider(name, provider_config) {
                Ok(provider) => provider.available_models(),
                Err(e) => {
                    tracing::warn!(provider = %name, error = %e, "skipping provider");
                    continue;
                }
            },
        };

        if !models.is_empty() {
            found_any = true;
            let default = if *name == ctx.config.default_provider {
                " (default)"
            } else {
                ""
            };
            println!("Provider: {name}{default}");
            for model in &models {
                if model.max_context > 0 {
                    println!(
                        "  {}: {} ({}K context)",
                        model.id,
                        model.name,
                        model.max_context / 1000
                    );
                } else {
                    println!("  {}: {}", model.id, model.name);
                }
            }
            println!();
        }
    }

    if !found_any {
        println!("No providers configured. Run `geoprep init` to create a config file.");
    }

    Ok(())
}
