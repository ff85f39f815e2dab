use super::common::*;
use crate::board::service::{IdentityEvent, IdentityFacts, ServiceError, SyncOutcome};
use crate::board::store::Collection;

fn facts(external_id: &str, email: &str) -> IdentityFacts {
    IdentityFacts {
        external_id: external_id.to_string(),
        email: Some(email.to_string()),
        first_name: Some("Grace".to_string()),
        last_name: Some("Hopper".to_string()),
        profile_image_url: Some("https://img.example.com/grace.png".to_string()),
    }
}

#[test]
fn created_event_is_idempotent() {
    let fixture = build_service();
    let event = IdentityEvent::Created(facts("user_grace", "Grace@Example.com"));

    let first = fixture
        .service
        .sync_identity(event.clone())
        .expect("first sync");
    let user = match first {
        SyncOutcome::Created(user) => user,
        other => panic!("unexpected outcome: {other:?}"),
    };
    assert_eq!(user.email, "grace@example.com");
    assert_eq!(user.full_name(), "Grace Hopper");
    assert!(user.is_active);
    assert!(user.is_job_seeker());

    let second = fixture.service.sync_identity(event).expect("replay");
    assert!(matches!(second, SyncOutcome::Existing(ref existing) if existing.id == user.id));
    assert_eq!(fixture.users.scan().expect("scan").len(), 1);
}

#[test]
fn created_event_without_email_is_rejected() {
    let fixture = build_service();
    let mut incoming = facts("user_anon", "");
    incoming.email = None;

    let error = fixture
        .service
        .sync_identity(IdentityEvent::Created(incoming))
        .expect_err("email required");
    assert!(matches!(error, ServiceError::Validation(ref errors) if errors.has_field("email")));
    assert!(fixture.users.scan().expect("scan").is_empty());
}

#[test]
fn updated_event_merges_only_non_empty_fields() {
    let fixture = build_service();
    fixture
        .service
        .sync_identity(IdentityEvent::Created(facts(
            "user_grace",
            "grace@example.com",
        )))
        .expect("created");

    let outcome = fixture
        .service
        .sync_identity(IdentityEvent::Updated(IdentityFacts {
            external_id: "user_grace".to_string(),
            email: Some("admiral@example.com".to_string()),
            first_name: Some(String::new()),
            last_name: Some("Murray Hopper".to_string()),
            profile_image_url: None,
        }))
        .expect("updated");

    match outcome {
        SyncOutcome::Updated(user) => {
            assert_eq!(user.email, "admiral@example.com");
            assert_eq!(user.first_name.as_deref(), Some("Grace"));
            assert_eq!(user.last_name.as_deref(), Some("Murray Hopper"));
            assert_eq!(
                user.profile_image.as_deref(),
                Some("https://img.example.com/grace.png")
            );
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn updated_event_for_unknown_user_creates_it() {
    let fixture = build_service();
    let outcome = fixture
        .service
        .sync_identity(IdentityEvent::Updated(facts(
            "user_late",
            "late@example.com",
        )))
        .expect("upserted");

    assert!(matches!(outcome, SyncOutcome::Created(_)));
    assert_eq!(fixture.users.scan().expect("scan").len(), 1);
}

#[test]
fn deleted_event_soft_deletes_and_ignores_unknown_users() {
    let fixture = build_service();
    fixture
        .service
        .sync_identity(IdentityEvent::Created(facts(
            "user_grace",
            "grace@example.com",
        )))
        .expect("created");

    let outcome = fixture
        .service
        .sync_identity(IdentityEvent::Deleted(facts("user_grace", "")))
        .expect("deleted");
    assert!(matches!(outcome, SyncOutcome::Deactivated(ref user) if !user.is_active));

    let stored = fixture.users.scan().expect("scan");
    assert_eq!(stored.len(), 1);
    assert!(!stored[0].is_active);

    let ignored = fixture
        .service
        .sync_identity(IdentityEvent::Deleted(facts("user_ghost", "")))
        .expect("ignored");
    assert_eq!(ignored, SyncOutcome::Ignored);
}

#[test]
fn updated_event_cannot_claim_another_users_email() {
    let fixture = build_service();
    for (external_id, email) in [("user_a", "a@example.com"), ("user_b", "b@example.com")] {
        fixture
            .service
            .sync_identity(IdentityEvent::Created(facts(external_id, email)))
            .expect("created");
    }

    let error = fixture
        .service
        .sync_identity(IdentityEvent::Updated(facts("user_b", "A@Example.com")))
        .expect_err("email taken");
    assert!(matches!(error, ServiceError::Duplicate(_)));
    assert_eq!(error.to_string(), "Email is already in use");

    let mut emails: Vec<String> = fixture
        .users
        .scan()
        .expect("scan")
        .into_iter()
        .map(|user| user.email)
        .collect();
    emails.sort();
    assert_eq!(emails, vec!["a@example.com", "b@example.com"]);

    let own = fixture
        .service
        .sync_identity(IdentityEvent::Updated(facts("user_a", "a@example.com")))
        .expect("own email kept");
    assert!(matches!(own, SyncOutcome::Updated(_)));
}

#[test]
fn padded_external_ids_resolve_to_the_stored_user() {
    let fixture = build_service();
    let first = fixture
        .service
        .sync_identity(IdentityEvent::Created(facts(" user_grace ", "grace@example.com")))
        .expect("created");
    assert!(matches!(first, SyncOutcome::Created(ref user) if user.clerk_user_id == "user_grace"));

    let replay = fixture
        .service
        .sync_identity(IdentityEvent::Created(facts(" user_grace ", "grace@example.com")))
        .expect("replayed");
    assert!(matches!(replay, SyncOutcome::Existing(_)));

    let deleted = fixture
        .service
        .sync_identity(IdentityEvent::Deleted(facts("user_grace\n", "")))
        .expect("deleted");
    assert!(matches!(deleted, SyncOutcome::Deactivated(_)));
    assert_eq!(fixture.users.scan().expect("scan").len(), 1);
}
