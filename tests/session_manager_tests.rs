use studybuddy_relay::services::session_manager::{
    ApiStatus, MessageRole, SessionManager, WELCOME_MESSAGE,
};
use std::time::Duration;
use tokio::time::sleep;

#[tokio::test]
async fn basic_session_flow() {
    let mgr = SessionManager::new(Duration::from_secs(60));
    let sid = mgr.create_session().await;
    assert!(!sid.is_empty());
    // Welcome message plus ours.
    let len = mgr.append_message(&sid, MessageRole::User, "hello").await;
    assert_eq!(len, 2);
    let history = mgr.get_history(&sid).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].role, MessageRole::User);
    assert_eq!(history[1].content, "hello");
    assert!(mgr.remove_session(&sid).await);
}

#[tokio::test]
async fn test_transcript_keeps_order() {
    let mgr = SessionManager::new(Duration::from_secs(60));
    let sid = mgr.create_session().await;
    mgr.append_message(&sid, MessageRole::User, "q1").await;
    mgr.append_message(&sid, MessageRole::Assistant, "a1").await;
    mgr.append_message(&sid, MessageRole::User, "q2").await;

    let history = mgr.get_history(&sid).await.unwrap();
    let contents: Vec<&str> = history.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, [WELCOME_MESSAGE, "q1", "a1", "q2"]);
    assert!(history.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
}

#[tokio::test]
async fn test_clear_history_restores_welcome() {
    let mgr = SessionManager::new(Duration::from_secs(60));
    let sid = mgr.create_session().await;
    mgr.append_message(&sid, MessageRole::User, "hello").await;

    assert!(mgr.clear_history(&sid).await);
    let history = mgr.get_history(&sid).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].role, MessageRole::System);

    assert!(!mgr.clear_history("no-such-session").await);
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let mgr = SessionManager::new(Duration::from_secs(60));
    let a = mgr.create_session().await;
    let b = mgr.create_session().await;
    assert_ne!(a, b);

    mgr.append_message(&a, MessageRole::User, "only in a").await;
    assert_eq!(mgr.get_history(&b).await.unwrap().len(), 1);
    assert_eq!(mgr.len().await, 2);
}

#[tokio::test]
async fn test_api_status_tracking() {
    let mgr = SessionManager::new(Duration::from_secs(60));
    let sid = mgr.create_session().await;
    assert_eq!(mgr.get_status(&sid).await, ApiStatus::Unknown);

    mgr.set_status(&sid, ApiStatus::Offline).await;
    assert_eq!(mgr.get_status(&sid).await, ApiStatus::Offline);
    assert!(!mgr.get_status(&sid).await.is_online());

    mgr.set_status(&sid, ApiStatus::Online).await;
    assert!(mgr.get_status(&sid).await.is_online());
}

#[tokio::test]
async fn test_session_expiration() {
    let mgr = SessionManager::new(Duration::from_millis(10));
    let sid = mgr.create_session().await;

    // Wait for expiration
    sleep(Duration::from_millis(20)).await;

    let removed_count = mgr.purge_expired().await;
    assert_eq!(removed_count, 1, "Should have removed 1 expired session");
    assert!(
        !mgr.remove_session(&sid).await,
        "Session should already be gone"
    );
    assert!(mgr.is_empty().await);
}

#[tokio::test]
async fn test_ensure_session_keeps_existing_history() {
    let mgr = SessionManager::new(Duration::from_secs(60));
    let sid = mgr.create_session().await;
    mgr.append_message(&sid, MessageRole::User, "hello").await;

    mgr.ensure_session(&sid).await;
    assert_eq!(mgr.get_history(&sid).await.unwrap().len(), 2);
}
