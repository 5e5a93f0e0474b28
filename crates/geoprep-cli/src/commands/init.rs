//! The `geoprep init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    if Path::new("geoprep.toml").exists() {
        println!("geoprep.toml already exists, skipping.");
    } else {
        std::fs::write("geoprep.toml", SAMPLE_CONFIG)?;
        println!("Created geoprep.toml");
    }

    println!("\nNext steps:");
    println!("  1. Export GEOPREP_GEMINI_KEY (or edit geoprep.toml)");
    println!("  2. Run: geoprep signup --username <name> --password <pw> --profile Fresher");
    println!("  3. Run: geoprep chat --username <name> --password <pw>");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# geoprep configuration

default_provider = "gemini"
default_model = "gemini-3-flash-preview"
chat_temperature = 0.7
evaluation_temperature = 0.2
data_dir = "./geoprep-data"
admin_passcode = "BABYMONK"

[providers.gemini]
type = "gemini"
api_key = "${GEOPREP_GEMINI_KEY}"

[providers.ollama]
type = "ollama"
base_url = "http://localhost:11434"

# Canned replies for trying the CLI offline:
# default_provider = "offline"
[providers.offline]
type = "mock"
"#;
