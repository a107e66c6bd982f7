use super::*;
use secrecy::ExposeSecret;
use std::collections::HashMap;

fn valid_environment() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("BRANCHING_STRATEGY", "gitflow"),
        ("REPO_NAME", "Payments API"),
        ("GROUP_PATH", "platform/services"),
        ("GITLAB_URL", "https://gitlab.example.com"),
        ("GITLAB_API_TOKEN", "glpat-secret-token"),
    ])
}

fn load(env: &HashMap<&'static str, &'static str>) -> Result<Configuration, ConfigurationError> {
    Configuration::from_lookup(|key| env.get(key).map(|v| v.to_string()))
}

#[test]
fn test_normalize_repo_name_replaces_and_lowercases() {
    assert_eq!(normalize_repo_name("My Repo_2!"), "my-repo-2-");
    assert_eq!(normalize_repo_name("already-fine-123"), "already-fine-123");
    assert_eq!(normalize_repo_name("Team.Service/API"), "team-service-api");
}

#[test]
fn test_normalize_repo_name_replaces_each_non_ascii_character() {
    assert_eq!(normalize_repo_name("Café"), "caf-");
    assert_eq!(normalize_repo_name("a  b"), "a--b");
}

#[test]
fn test_valid_configuration() {
    let config = load(&valid_environment()).expect("configuration should be valid");

    assert_eq!(config.repo_name(), "payments-api");
    assert_eq!(config.branching_strategy(), BranchingStrategy::Gitflow);
    assert_eq!(config.group_path(), "platform/services");
    assert_eq!(config.platform_url().as_str(), "https://gitlab.example.com/");
    assert_eq!(config.api_token().expose_secret(), "glpat-secret-token");
    assert_eq!(config.webhook_url(), DEFAULT_WEBHOOK_URL);
}

#[test]
fn test_missing_branching_strategy() {
    let mut env = valid_environment();
    env.remove("BRANCHING_STRATEGY");

    let err = load(&env).unwrap_err();
    assert_eq!(
        err.to_string(),
        "BRANCHING_STRATEGY is not set. It must be either 'gitflow' or 'trunk'."
    );
}

#[test]
fn test_empty_branching_strategy_counts_as_missing() {
    let mut env = valid_environment();
    env.insert("BRANCHING_STRATEGY", "");

    assert!(matches!(
        load(&env),
        Err(ConfigurationError::MissingVariable { ref name, .. }) if name == "BRANCHING_STRATEGY"
    ));
}

#[test]
fn test_invalid_branching_strategy() {
    let mut env = valid_environment();
    env.insert("BRANCHING_STRATEGY", "Trunk");

    assert_eq!(
        load(&env).unwrap_err(),
        ConfigurationError::InvalidBranchingStrategy {
            value: "Trunk".to_string()
        }
    );
}

#[test]
fn test_strategy_is_checked_before_repo_name() {
    let env = HashMap::from([("BRANCHING_STRATEGY", "release")]);

    assert!(matches!(
        load(&env),
        Err(ConfigurationError::InvalidBranchingStrategy { .. })
    ));
}

#[test]
fn test_missing_repo_name() {
    let mut env = valid_environment();
    env.remove("REPO_NAME");

    assert_eq!(load(&env).unwrap_err().to_string(), "REPO_NAME is not set.");
}

#[test]
fn test_missing_platform_settings() {
    for name in ["GROUP_PATH", "GITLAB_URL", "GITLAB_API_TOKEN"] {
        let mut env = valid_environment();
        env.remove(name);

        assert_eq!(
            load(&env).unwrap_err(),
            ConfigurationError::missing(name),
            "{name} should be required"
        );
    }
}

#[test]
fn test_invalid_gitlab_url() {
    let mut env = valid_environment();
    env.insert("GITLAB_URL", "gitlab.example.com");

    assert!(matches!(
        load(&env),
        Err(ConfigurationError::InvalidUrl { ref name, .. }) if name == "GITLAB_URL"
    ));
}

#[test]
fn test_webhook_url_override() {
    let mut env = valid_environment();
    env.insert("WEBHOOK_URL", "https://hooks.example.com/gitlab");

    let config = load(&env).unwrap();
    assert_eq!(config.webhook_url(), "https://hooks.example.com/gitlab");
}

#[test]
fn test_webhook_url_override_is_kept_verbatim() {
    let mut env = valid_environment();
    env.insert("WEBHOOK_URL", "https://hooks.example.com");

    let config = load(&env).unwrap();
    assert_eq!(config.webhook_url(), "https://hooks.example.com");
}

#[test]
fn test_invalid_webhook_url_override() {
    let mut env = valid_environment();
    env.insert("WEBHOOK_URL", "not a url");

    assert!(matches!(
        load(&env),
        Err(ConfigurationError::InvalidUrl { ref name, .. }) if name == "WEBHOOK_URL"
    ));
}

#[test]
fn test_debug_output_redacts_token() {
    let config = load(&valid_environment()).unwrap();
    let debug_output = format!("{config:?}");

    assert!(!debug_output.contains("glpat-secret-token"));
    assert!(debug_output.contains("payments-api"));
}
