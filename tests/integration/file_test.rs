//! File scoping and lifecycle tests.

use nestfile_core::error::ErrorKind;
use nestfile_core::types::{FileId, FolderSelector};
use nestfile_entity::file::CreateFile;

use crate::helpers::TestApp;

#[tokio::test]
#[ignore = "requires PostgreSQL; set NESTFILE_TEST_DATABASE_URL"]
async fn create_and_resolve_file() {
    let app = TestApp::new().await;
    let (user, ctx) = app.seeded_user().await;

    let file = app
        .file_service
        .create(
            &ctx,
            "notes.md",
            Some(FolderSelector::Default),
            Some("blobs/notes".to_string()),
        )
        .await
        .unwrap();

    assert_eq!(file.owner_id, user.id);
    assert!(file.is_filed());

    let resolved = app.file_service.resolve(&ctx, file.public_id).await.unwrap();
    assert_eq!(resolved.name, "notes.md");
    assert_eq!(resolved.content_ref.as_deref(), Some("blobs/notes"));
}

#[tokio::test]
#[ignore = "requires PostgreSQL; set NESTFILE_TEST_DATABASE_URL"]
async fn unfiled_files_are_retained_but_invisible_to_trees() {
    let app = TestApp::new().await;
    let (_user, ctx) = app.seeded_user().await;

    let placeholder = app
        .file_service
        .create(&ctx, "draft.txt", None, None)
        .await
        .unwrap();
    assert!(!placeholder.is_filed());

    // Listed for the owner...
    let all = app.file_service.list(&ctx).await.unwrap();
    assert!(all.iter().any(|f| f.public_id == placeholder.public_id));

    // ...but absent from every tree walk.
    let tree = app
        .tree_service
        .expand(&ctx, FolderSelector::Default)
        .await
        .unwrap();
    assert!(tree.files.is_empty());
}

#[tokio::test]
#[ignore = "requires PostgreSQL; set NESTFILE_TEST_DATABASE_URL"]
async fn foreign_and_absent_files_are_indistinguishable() {
    let app = TestApp::new().await;
    let (_user_a, ctx_a) = app.seeded_user().await;
    let (_user_b, ctx_b) = app.seeded_user().await;

    let secret = app
        .file_service
        .create(&ctx_b, "secret.txt", Some(FolderSelector::Default), None)
        .await
        .unwrap();

    let foreign = app
        .file_service
        .resolve(&ctx_a, secret.public_id)
        .await
        .unwrap_err();
    let absent = app
        .file_service
        .resolve(&ctx_a, FileId::new())
        .await
        .unwrap_err();

    assert_eq!(foreign.kind, ErrorKind::NotFound);
    assert_eq!(absent.kind, ErrorKind::NotFound);
    assert_eq!(foreign.message, absent.message);

    let err = app
        .file_service
        .delete(&ctx_a, secret.public_id)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);

    // Still there for its owner.
    assert!(
        app.file_service
            .resolve(&ctx_b, secret.public_id)
            .await
            .is_ok()
    );
}

#[tokio::test]
#[ignore = "requires PostgreSQL; set NESTFILE_TEST_DATABASE_URL"]
async fn store_rejects_cross_owner_file_placement() {
    let app = TestApp::new().await;
    let (user_a, _ctx_a) = app.seeded_user().await;
    let (user_b, _ctx_b) = app.seeded_user().await;

    let root_b = app.folder_repo.find_root(user_b.id).await.unwrap().unwrap();

    // Bypassing the scoped service, the store still enforces the
    // owner-equality invariant at write time.
    let err = app
        .file_repo
        .create(&CreateFile {
            name: "sneaky.txt".to_string(),
            content_ref: None,
            folder_id: Some(root_b.id),
            owner_id: user_a.id,
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::OwnerMismatch);
}

#[tokio::test]
#[ignore = "requires PostgreSQL; set NESTFILE_TEST_DATABASE_URL"]
async fn delete_file_removes_the_record() {
    let app = TestApp::new().await;
    let (_user, ctx) = app.seeded_user().await;

    let file = app
        .file_service
        .create(&ctx, "tmp.bin", Some(FolderSelector::Default), None)
        .await
        .unwrap();

    app.file_service.delete(&ctx, file.public_id).await.unwrap();

    let err = app
        .file_service
        .resolve(&ctx, file.public_id)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);

    // Unlike folders, a second file delete reports the absence.
    let err = app
        .file_service
        .delete(&ctx, file.public_id)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
#[ignore = "requires PostgreSQL; set NESTFILE_TEST_DATABASE_URL"]
async fn folder_file_listing_is_ordered_by_creation() {
    let app = TestApp::new().await;
    let (_user, ctx) = app.seeded_user().await;

    for name in ["first.txt", "second.txt", "third.txt"] {
        app.file_service
            .create(&ctx, name, Some(FolderSelector::Default), None)
            .await
            .unwrap();
    }

    let files = app
        .file_service
        .list_in(&ctx, FolderSelector::Default)
        .await
        .unwrap();
    let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["first.txt", "second.txt", "third.txt"]);
}
