use std::env;
use std::sync::{Mutex, OnceLock};

use pixy_cli::commands::{config, doctor};
use serde_json::Value;

#[test]
fn doctor_json_reports_pass_with_default_config() {
    with_env(&[], || {
        let result = doctor::run(true);
        assert_eq!(result.exit_code, 0, "expected passing doctor run");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["checks"].as_array().map(Vec::len), Some(3));
        assert_eq!(payload["checks"][0]["name"], "config_validation");
        assert_eq!(payload["checks"][0]["status"], "pass");
    });
}

#[test]
fn doctor_accepts_a_well_formed_endpoint_override() {
    with_env(&[("PIXY_SUBMISSION_ENDPOINT_URL", "http://valid.example/lead")], || {
        let result = doctor::run(true);
        let payload = parse_payload(&result.output);
        assert_eq!(payload["checks"][1]["name"], "lead_endpoint");
        assert_eq!(payload["checks"][1]["status"], "pass");
    });
}

#[test]
fn doctor_fails_when_backup_directory_is_missing() {
    with_env(&[("PIXY_BACKUP_PATH", "/nonexistent/pixy/backup.json")], || {
        let result = doctor::run(true);
        assert_eq!(result.exit_code, 1, "expected failing doctor run");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["overall_status"], "fail");
        assert_eq!(payload["checks"][2]["name"], "backup_path");
        assert_eq!(payload["checks"][2]["status"], "fail");
    });
}

#[test]
fn config_reflects_environment_overrides() {
    with_env(
        &[
            ("PIXY_SERVER_PORT", "9443"),
            ("PIXY_SUBMISSION_ENDPOINT_URL", "https://leads.example/api/pixy-lead"),
        ],
        || {
            let result = config::run();
            assert_eq!(result.exit_code, 0);

            let payload = parse_payload(&result.output);
            assert_eq!(payload["server"]["port"], 9443);
            assert_eq!(
                payload["submission"]["endpoint_url"],
                "https://leads.example/api/pixy-lead"
            );
        },
    );
}

#[test]
fn config_fails_with_exit_code_two_on_invalid_environment() {
    with_env(&[("PIXY_SUBMISSION_ENDPOINT_URL", "ftp://leads.example")], || {
        let result = config::run();
        assert_eq!(result.exit_code, 2, "expected config validation failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "config");
    });
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "PIXY_CONFIG",
        "PIXY_SUBMISSION_ENDPOINT_URL",
        "PIXY_SUBMISSION_TIMEOUT_SECS",
        "PIXY_BACKUP_PATH",
        "PIXY_SERVER_BIND_ADDRESS",
        "PIXY_SERVER_PORT",
        "PIXY_LOG_LEVEL",
        "PIXY_LOG_FORMAT",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
