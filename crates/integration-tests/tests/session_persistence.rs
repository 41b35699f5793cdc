//! Integration tests for the session store over file storage.
//!
//! Each "page load" is simulated by opening a new `FileStorage` handle and a
//! new `SessionStore` on the same file.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::fs;

use travel_planner_core::storage::keys;
use travel_planner_core::{SessionState, SessionStore, Storage};
use travel_planner_integration_tests::{TestContext, Traveler};

// =============================================================================
// Login / Logout
// =============================================================================

#[test]
fn test_login_survives_reload() {
    let ctx = TestContext::new();

    let mut session = SessionStore::new(ctx.storage());
    session.login(Traveler::named("Ada")).unwrap();

    let reloaded: SessionStore<_, Traveler> = SessionStore::new(ctx.storage());
    assert!(reloaded.is_authenticated());
    assert_eq!(reloaded.current_user(), Some(&Traveler::named("Ada")));
}

#[test]
fn test_logout_survives_reload() {
    let ctx = TestContext::new();

    let mut session = SessionStore::new(ctx.storage());
    session.login(Traveler::named("Ada")).unwrap();
    session.logout().unwrap();

    let reloaded: SessionStore<_, Traveler> = SessionStore::new(ctx.storage());
    assert_eq!(reloaded.state(), &SessionState::Anonymous);
    assert_eq!(ctx.storage().get_item(keys::CURRENT_USER).unwrap(), None);
}

#[test]
fn test_identity_is_stored_verbatim() {
    let ctx = TestContext::new();

    let mut session = SessionStore::new(ctx.storage());
    session.login(Traveler::named("Grace")).unwrap();

    let raw = ctx.storage().get_item(keys::CURRENT_USER).unwrap().unwrap();
    assert_eq!(raw, r#"{"name":"Grace","email":"grace@example.com"}"#);
}

// =============================================================================
// Degraded Storage
// =============================================================================

#[test]
fn test_corrupt_storage_file_means_anonymous() {
    let ctx = TestContext::new();
    fs::write(ctx.storage_path(), "{{{{").unwrap();

    let session: SessionStore<_> = SessionStore::new(ctx.storage());
    assert!(!session.is_authenticated());
}

#[test]
fn test_malformed_identity_means_anonymous() {
    let ctx = TestContext::new();
    ctx.storage()
        .set_item(keys::CURRENT_USER, "{\"name\":")
        .unwrap();

    let session: SessionStore<_, Traveler> = SessionStore::new(ctx.storage());
    assert!(!session.is_authenticated());
    assert_eq!(session.current_user(), None);
}

#[test]
fn test_login_fails_cleanly_when_quota_exceeded() {
    let ctx = TestContext::new();
    let storage = ctx.storage().with_quota(16);

    let mut session = SessionStore::new(&storage);
    assert!(session.login(Traveler::named("Bartholomew")).is_err());
    assert!(!session.is_authenticated());
    assert!(!ctx.storage_path().exists());
}
