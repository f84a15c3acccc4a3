use pixy_core::config::{AppConfig, LoadOptions, LogFormat};
use serde_json::json;

use crate::commands::CommandResult;

/// Effective configuration after file and environment merging.
pub fn run() -> CommandResult {
    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => CommandResult { exit_code: 0, output: render(&config) },
        Err(error) => CommandResult::failure("config", "config", error.to_string(), 2),
    }
}

fn render(config: &AppConfig) -> String {
    let payload = json!({
        "submission": {
            "endpoint_url": config.submission.endpoint_url,
            "timeout_secs": config.submission.timeout_secs,
            "fallback_email": config.submission.fallback_email,
            "fallback_phone": config.submission.fallback_phone,
        },
        "backup": {
            "path": config.backup.path.display().to_string(),
        },
        "server": {
            "bind_address": config.server.bind_address,
            "port": config.server.port,
            "graceful_shutdown_secs": config.server.graceful_shutdown_secs,
        },
        "widget": {
            "typing_delay_ms": config.widget.typing_delay_ms,
        },
        "logging": {
            "level": config.logging.level,
            "format": match config.logging.format {
                LogFormat::Compact => "compact",
                LogFormat::Pretty => "pretty",
                LogFormat::Json => "json",
            },
        },
    });

    serde_json::to_string_pretty(&payload).unwrap_or_else(|error| {
        json!({
            "status": "error",
            "error_class": "serialization",
            "message": error.to_string(),
        })
        .to_string()
    })
}

#[cfg(test)]
mod tests {
    use crate::commands::config;

    #[test]
    fn config_output_exposes_every_section() {
        let result = config::run();
        assert_eq!(result.exit_code, 0);
        let value: serde_json::Value =
            serde_json::from_str(&result.output).expect("config output should be json");
        for section in ["submission", "backup", "server", "widget", "logging"] {
            assert!(value.get(section).is_some(), "missing section {section}");
        }
    }
}
