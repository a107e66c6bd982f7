//! Tests for protection_manager module.

use super::*;
use crate::report::StepOutcome;
use crate::test_support::{not_found, server_error, Call, MockProjectClient, MOCK_PROJECT_ID};
use gitlab_client::AccessLevel;

fn protected_names(calls: &[Call]) -> Vec<String> {
    calls
        .iter()
        .filter_map(|call| match call {
            Call::ProtectBranch(payload) => Some(payload.name.clone()),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn test_apply_gitflow_installs_three_rules_after_removing_master() {
    let client = MockProjectClient::new();
    let manager = ProtectionManager::new(&client);

    let steps = manager
        .apply(MOCK_PROJECT_ID, BranchingStrategy::Gitflow)
        .await;

    let calls = client.calls();
    assert_eq!(calls[0], Call::DeleteProtectedBranch("master".to_string()));
    assert_eq!(
        protected_names(&calls),
        vec!["develop", "master", "release*"],
        "Gitflow rules should be installed in order"
    );
    assert_eq!(steps.len(), 4);
    assert!(steps.iter().all(|s| !s.is_failure()));
    assert!(steps.iter().all(|s| s.stage == Stage::ConfigureProtection));
}

#[tokio::test]
async fn test_apply_trunk_installs_single_master_rule() {
    let client = MockProjectClient::new();
    let manager = ProtectionManager::new(&client);

    let steps = manager.apply(MOCK_PROJECT_ID, BranchingStrategy::Trunk).await;

    let calls = client.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(
        calls[1],
        Call::ProtectBranch(ProtectedBranchPayload {
            name: "master".to_string(),
            push_access_level: AccessLevel::Maintainer,
            merge_access_level: Some(AccessLevel::Developer),
            allow_force_push: true,
            code_owner_approval_required: true,
        })
    );
    assert_eq!(
        steps[1].outcome,
        StepOutcome::Succeeded {
            detail: "protected (push: maintainer, merge: developer)".to_string()
        }
    );
}

#[tokio::test]
async fn test_apply_gitflow_master_rule_has_no_merge_level() {
    let client = MockProjectClient::new();
    let manager = ProtectionManager::new(&client);

    let steps = manager
        .apply(MOCK_PROJECT_ID, BranchingStrategy::Gitflow)
        .await;

    // steps: removal, develop, master, release*
    assert_eq!(steps[2].subject, "master");
    assert_eq!(
        steps[2].outcome,
        StepOutcome::Succeeded {
            detail: "protected (push: maintainer)".to_string()
        }
    );
}

#[tokio::test]
async fn test_missing_master_rule_is_skipped() {
    let client = MockProjectClient::new().failing_when(
        |call| matches!(call, Call::DeleteProtectedBranch(_)),
        not_found,
    );
    let manager = ProtectionManager::new(&client);

    let steps = manager.apply(MOCK_PROJECT_ID, BranchingStrategy::Trunk).await;

    assert_eq!(
        steps[0].outcome,
        StepOutcome::Skipped {
            reason: "no existing rule found".to_string()
        }
    );
    assert!(!steps[1].is_failure(), "Rule should still be installed");
}

#[tokio::test]
async fn test_failed_removal_does_not_stop_rule_installation() {
    let client = MockProjectClient::new().failing_when(
        |call| matches!(call, Call::DeleteProtectedBranch(_)),
        server_error,
    );
    let manager = ProtectionManager::new(&client);

    let steps = manager
        .apply(MOCK_PROJECT_ID, BranchingStrategy::Gitflow)
        .await;

    assert!(steps[0].is_failure());
    assert_eq!(protected_names(&client.calls()).len(), 3);
    assert_eq!(steps.iter().filter(|s| s.is_failure()).count(), 1);
}

#[tokio::test]
async fn test_one_failing_rule_does_not_block_the_others() {
    let client = MockProjectClient::new().failing_when(
        |call| matches!(call, Call::ProtectBranch(p) if p.name == "develop"),
        server_error,
    );
    let manager = ProtectionManager::new(&client);

    let steps = manager
        .apply(MOCK_PROJECT_ID, BranchingStrategy::Gitflow)
        .await;

    let failed: Vec<_> = steps.iter().filter(|s| s.is_failure()).collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].subject, "develop");
    assert_eq!(
        protected_names(&client.calls()),
        vec!["develop", "master", "release*"]
    );
}
