//! Root provisioning tests.

use nestfile_core::events::{DomainEvent, EventPayload, UserEvent};
use nestfile_core::types::FolderSelector;
use nestfile_service::context::RequestContext;

use crate::helpers::TestApp;

#[tokio::test]
#[ignore = "requires PostgreSQL; set NESTFILE_TEST_DATABASE_URL"]
async fn registration_event_provisions_exactly_one_root() {
    let app = TestApp::new().await;

    let mut rx = app.events.subscribe();
    let user = app.user_service.register(&unique_name()).await.unwrap();

    // The registration published a creation event.
    let event = rx.recv().await.expect("creation event");
    match event.payload {
        EventPayload::User(UserEvent::Created { user_id, .. }) => assert_eq!(user_id, user.id),
        other => panic!("unexpected event: {other:?}"),
    }

    // Drive provisioning twice: at-least-once delivery must converge.
    let first = app.provisioner.ensure_root(user.id).await.unwrap();
    let second = app.provisioner.ensure_root(user.id).await.unwrap();
    assert_eq!(first.public_id, second.public_id);
    assert_eq!(first.name, "root");
    assert!(first.is_root());

    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM folders WHERE owner_id = $1 AND parent_id IS NULL",
    )
    .bind(user.id)
    .fetch_one(&app.db_pool)
    .await
    .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
#[ignore = "requires PostgreSQL; set NESTFILE_TEST_DATABASE_URL"]
async fn concurrent_duplicate_events_create_single_root() {
    let app = TestApp::new().await;
    let user = app.user_service.register(&unique_name()).await.unwrap();

    // Two racing deliveries of the same creation event.
    let p1 = app.provisioner.clone();
    let p2 = app.provisioner.clone();
    let (a, b) = tokio::join!(p1.ensure_root(user.id), p2.ensure_root(user.id));

    // The loser treats the conflict as success and sees the same root.
    let a = a.unwrap();
    let b = b.unwrap();
    assert_eq!(a.public_id, b.public_id);

    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM folders WHERE owner_id = $1 AND parent_id IS NULL",
    )
    .bind(user.id)
    .fetch_one(&app.db_pool)
    .await
    .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
#[ignore = "requires PostgreSQL; set NESTFILE_TEST_DATABASE_URL"]
async fn provisioner_reacts_to_published_events() {
    let app = TestApp::new().await;

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    let handle = tokio::spawn(
        app.provisioner
            .clone()
            .run(app.events.subscribe(), shutdown_rx),
    );

    let user = app.user_service.register(&unique_name()).await.unwrap();

    // Poll until the background task has provisioned the root.
    let ctx = RequestContext::new(user.id);
    let mut root = None;
    for _ in 0..50 {
        if let Ok(folder) = app
            .folder_service
            .resolve(&ctx, FolderSelector::Default)
            .await
        {
            root = Some(folder);
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    }

    let root = root.expect("root provisioned off the event");
    assert_eq!(root.owner_id, user.id);
    assert_eq!(root.name, "root");

    shutdown_tx.send(true).unwrap();
    handle.await.unwrap();
}

#[tokio::test]
#[ignore = "requires PostgreSQL; set NESTFILE_TEST_DATABASE_URL"]
async fn duplicate_event_for_existing_user_is_harmless() {
    let app = TestApp::new().await;
    let (user, _ctx) = app.seeded_user().await;

    // Redelivered event long after the root exists.
    app.events
        .publish(DomainEvent::new(EventPayload::User(UserEvent::Created {
            user_id: user.id,
            username: user.username.clone(),
        })));
    let again = app.provisioner.ensure_root(user.id).await.unwrap();
    assert_eq!(again.name, "root");
}

fn unique_name() -> String {
    format!("user-{}", uuid::Uuid::new_v4().simple())
}
