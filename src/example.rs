use crate::config::{
    ConfigFile, DEFAULT_EXPIRATION_DATE, DEFAULT_MAX_DELAY_SECS, DEFAULT_MIN_DELAY_SECS,
    DEFAULT_OUTPUT_DIR, DEFAULT_PERCENTAGE, DEFAULT_SYMBOLS, DEFAULT_TIMEOUT_SECS,
};
use crate::fetch::DEFAULT_BASE_URL;

pub fn example_config() -> ConfigFile {
    ConfigFile {
        symbols: Some(DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect()),
        expiration_date: Some(DEFAULT_EXPIRATION_DATE.to_string()),
        percentage_below_close: Some(DEFAULT_PERCENTAGE),
        output_dir: Some(DEFAULT_OUTPUT_DIR.into()),
        base_url: Some(DEFAULT_BASE_URL.to_string()),
        timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
        min_delay_secs: Some(DEFAULT_MIN_DELAY_SECS),
        max_delay_secs: Some(DEFAULT_MAX_DELAY_SECS),
        user_agents: None,
    }
}

/// Print an example config file to stdout.
pub fn run() -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&example_config())?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunConfig;

    #[test]
    fn test_example_round_trips_into_defaults() {
        let json = serde_json::to_string(&example_config()).unwrap();
        let parsed: ConfigFile = serde_json::from_str(&json).unwrap();
        assert_eq!(
            RunConfig::resolve(parsed).unwrap(),
            RunConfig::resolve(ConfigFile::default()).unwrap()
        );
    }
}
