//! Tests for webhook_manager module.

use super::*;
use crate::test_support::{server_error, Call, MockProjectClient, MOCK_PROJECT_ID};

const HOOK_URL: &str = "https://hooks.example.com/gitlab";

#[test]
fn test_hooks_for_splits_push_and_merge_request_events() {
    let hooks = WebhookManager::hooks_for(HOOK_URL);

    assert_eq!(hooks.len(), 2);

    let (push_label, push) = &hooks[0];
    assert_eq!(*push_label, "push events");
    assert!(push.push_events);
    assert!(!push.merge_requests_events);

    let (mr_label, mr) = &hooks[1];
    assert_eq!(*mr_label, "merge request events");
    assert!(!mr.push_events);
    assert!(mr.merge_requests_events);

    assert!(hooks.iter().all(|(_, h)| h.url == HOOK_URL));
    assert!(hooks.iter().all(|(_, h)| h.enable_ssl_verification));
}

#[tokio::test]
async fn test_install_creates_both_hooks() {
    let client = MockProjectClient::new();
    let manager = WebhookManager::new(&client);

    let steps = manager.install(MOCK_PROJECT_ID, HOOK_URL).await;

    assert_eq!(steps.len(), 2);
    assert!(steps.iter().all(|s| !s.is_failure()));
    assert!(steps.iter().all(|s| s.stage == Stage::InstallWebhooks));
    assert_eq!(
        client.calls(),
        vec![
            Call::CreateProjectHook(ProjectHookPayload::push_only(HOOK_URL)),
            Call::CreateProjectHook(ProjectHookPayload::merge_requests_only(HOOK_URL)),
        ]
    );
}

#[tokio::test]
async fn test_failing_push_hook_still_installs_merge_request_hook() {
    let client = MockProjectClient::new().failing_when(
        |call| matches!(call, Call::CreateProjectHook(h) if h.push_events),
        server_error,
    );
    let manager = WebhookManager::new(&client);

    let steps = manager.install(MOCK_PROJECT_ID, HOOK_URL).await;

    assert!(steps[0].is_failure());
    assert_eq!(steps[0].subject, "push events");
    assert!(
        !steps[1].is_failure(),
        "Merge request hook should be installed after the push hook failed"
    );
    assert_eq!(client.calls().len(), 2);
}
