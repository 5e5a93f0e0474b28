//! The `geoprep topics` command.

use anyhow::Result;

use geoprep_core::model::{AppMode, EvaluationModule};
use geoprep_core::prompts::TOPICS;

pub fn execute() -> Result<()> {
    println!("Topics:");
    for topic in TOPICS {
        println!("  {topic}");
    }

    println!("\nModes:");
    for mode in AppMode::STUDENT_MODES {
        println!("  {:<8} {}: {}", mode.id(), mode.title(), mode.description());
    }

    println!("\nEvaluation modules:");
    for module in EvaluationModule::ALL {
        println!(
            "  {:<22} {} ({})",
            module.as_str(),
            module.framework(),
            module.dimension_labels().join(", ")
        );
    }
    Ok(())
}
