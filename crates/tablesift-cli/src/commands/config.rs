use std::path::Path;
use tablesift_core::config::{load_config, ExtractConfig};
use tablesift_core::error::TableError;
use tablesift_core::strategy::StrategyKind;

pub fn show() -> Result<(), TableError> {
    let json = serde_json::to_string_pretty(&ExtractConfig::default())?;
    println!("{json}");
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), TableError> {
    let config = load_config(file)?;

    println!("Config '{}' is valid.", file.display());
    println!("  Standard strategies: {}", join(&config.standard));
    if config.run_aggressive {
        println!("  Aggressive strategies: {}", join(&config.aggressive));
    } else {
        println!("  Aggressive strategies: disabled");
    }
    match config.deadline_secs {
        Some(secs) => println!("  Deadline: {secs} s per document"),
        None => println!("  Deadline: none"),
    }

    // Legal but probably unintended.
    let mut warnings = Vec::new();
    if config.run_aggressive && config.aggressive.is_empty() {
        warnings.push("run_aggressive is set but no aggressive strategies are listed".to_string());
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}

fn join(kinds: &[StrategyKind]) -> String {
    if kinds.is_empty() {
        return "(none)".to_string();
    }
    kinds
        .iter()
        .map(|k| k.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
