use schemars::schema_for;

use crate::config::ConfigFile;

/// Generate and print the JSON Schema for the config file.
pub fn run() -> anyhow::Result<()> {
    let schema = schema_for!(ConfigFile);
    let json = serde_json::to_string_pretty(&schema)?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_lists_camel_case_keys() {
        let schema = serde_json::to_value(schema_for!(ConfigFile)).unwrap();
        let props = schema["properties"].as_object().unwrap();
        for key in ["symbols", "expirationDate", "percentageBelowClose", "userAgents"] {
            assert!(props.contains_key(key), "missing {key}");
        }
    }
}
