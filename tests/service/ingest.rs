//! Tests for the upload ingest pipeline.
//!
//! Covers both payload shapes (zip archive with manifest + images, raw JSON
//! manifest), the archive-safety validation, and the guarantee that every
//! failure mode leaves the owner's prior record set untouched.

use tradelist::{
    data::character::{CharacterRepository, NewCharacter},
    error::ingest::IngestError,
    media::MediaStore,
    service::ingest::IngestService,
};
use tradelist_test_utils::{
    fixtures::{
        archive::{archive_with_entries, archive_with_manifest},
        character::{manifest_bytes, manifest_entry},
    },
    prelude::*,
};

fn media_store(test: &TestContext) -> MediaStore {
    MediaStore::persistent(test.media_root.path()).unwrap()
}

/// Expect a valid archive to create one record per manifest entry, in
/// manifest order, with images relocated into the owner's media area
#[tokio::test]
async fn success_with_archive_upload() -> Result<(), TestError> {
    let test = TestBuilder::new().with_character_table().build().await?;
    let media = media_store(&test);
    let ingest_service = IngestService::new(&test.db, &media);

    let manifest = manifest_bytes(&[
        manifest_entry("#1", "Rem", "Re:Zero", "999 ka", "images/rem.png"),
        manifest_entry("#2", "Ram", "Re:Zero", "170 ka", "images/ram.png"),
        manifest_entry("#3", "Emilia", "Re:Zero", "50 ka", ""),
    ]);
    let archive = archive_with_manifest(
        &manifest,
        &[("images/rem.png", b"rem png"), ("images/ram.png", b"ram png")],
    )
    .unwrap();

    let outcome = ingest_service.ingest_archive("owner-a", &archive).await;

    assert!(outcome.is_ok());
    assert_eq!(outcome.unwrap().records_created, 3);

    let records = CharacterRepository::new(&test.db)
        .list_for_owner("owner-a", None, false)
        .await?;
    assert_eq!(records.len(), 3);

    let orders: Vec<i32> = records.iter().map(|c| c.sort_order).collect();
    assert_eq!(orders, vec![0, 1, 2]);

    // Image paths are rewritten to the owner's media area by base name only.
    assert_eq!(records[0].image, "owner-a/rem.png");
    assert_eq!(records[1].image, "owner-a/ram.png");
    assert_eq!(records[2].image, "");
    assert!(media.exists("owner-a/rem.png"));
    assert!(media.exists("owner-a/ram.png"));

    Ok(())
}

/// Expect a path-traversal entry to reject the whole upload before any
/// extraction, leaving the prior record set untouched
#[tokio::test]
async fn zip_slip_entry_rejects_upload_and_keeps_prior_records() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_owner_characters("owner-a", 2)
        .build()
        .await?;
    let media = media_store(&test);
    let ingest_service = IngestService::new(&test.db, &media);

    let manifest = manifest_bytes(&[manifest_entry("#1", "Evil", "", "1 ka", "")]);
    let archive = archive_with_entries(&[
        ("data.json", manifest.as_slice()),
        ("../../etc/passthrough", b"escape attempt"),
    ])
    .unwrap();

    let result = ingest_service.ingest_archive("owner-a", &archive).await;

    assert!(matches!(result, Err(IngestError::UnsafeArchive(_))));
    assert_eq!(
        CharacterRepository::new(&test.db)
            .count_for_owner("owner-a")
            .await?,
        2
    );

    Ok(())
}

/// Expect malformed manifest JSON to fail with InvalidFormat and keep the
/// prior record set
#[tokio::test]
async fn malformed_manifest_json_keeps_prior_records() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_owner_characters("owner-a", 3)
        .build()
        .await?;
    let media = media_store(&test);
    let ingest_service = IngestService::new(&test.db, &media);

    let archive = archive_with_entries(&[("data.json", b"{not json".as_slice())]).unwrap();

    let result = ingest_service.ingest_archive("owner-a", &archive).await;

    assert!(matches!(result, Err(IngestError::InvalidFormat(_))));
    assert_eq!(
        CharacterRepository::new(&test.db)
            .count_for_owner("owner-a")
            .await?,
        3
    );

    Ok(())
}

/// Expect an archive without data.json to fail with InvalidFormat
#[tokio::test]
async fn archive_without_manifest_is_invalid() -> Result<(), TestError> {
    let test = TestBuilder::new().with_character_table().build().await?;
    let media = media_store(&test);
    let ingest_service = IngestService::new(&test.db, &media);

    let archive = archive_with_entries(&[("images/rem.png", b"rem png".as_slice())]).unwrap();

    let result = ingest_service.ingest_archive("owner-a", &archive).await;

    assert!(matches!(result, Err(IngestError::InvalidFormat(_))));

    Ok(())
}

/// Expect a payload that is not a zip container to fail with InvalidFormat
#[tokio::test]
async fn non_archive_payload_is_invalid() -> Result<(), TestError> {
    let test = TestBuilder::new().with_character_table().build().await?;
    let media = media_store(&test);
    let ingest_service = IngestService::new(&test.db, &media);

    let result = ingest_service
        .ingest_archive("owner-a", b"definitely not a zip")
        .await;

    assert!(matches!(result, Err(IngestError::InvalidFormat(_))));

    Ok(())
}

/// Expect a raw JSON manifest to store image URLs verbatim with no file
/// movement
#[tokio::test]
async fn success_with_raw_manifest_upload() -> Result<(), TestError> {
    let test = TestBuilder::new().with_character_table().build().await?;
    let media = media_store(&test);
    let ingest_service = IngestService::new(&test.db, &media);

    let manifest = manifest_bytes(&[manifest_entry(
        "#1,275",
        "Rem",
        "Re:Zero",
        "170 ka",
        "https://cdn.example.com/rem.png",
    )]);

    let outcome = ingest_service.ingest_manifest("owner-a", &manifest).await;

    assert!(outcome.is_ok());
    assert_eq!(outcome.unwrap().records_created, 1);

    let records = CharacterRepository::new(&test.db)
        .list_for_owner("owner-a", None, false)
        .await?;
    assert_eq!(records[0].image, "https://cdn.example.com/rem.png");

    Ok(())
}

/// Expect a manifest without the characters key to fail with InvalidFormat
#[tokio::test]
async fn manifest_missing_characters_key_is_invalid() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_owner_characters("owner-a", 1)
        .build()
        .await?;
    let media = media_store(&test);
    let ingest_service = IngestService::new(&test.db, &media);

    let result = ingest_service
        .ingest_manifest("owner-a", br#"{"items": []}"#)
        .await;

    assert!(matches!(result, Err(IngestError::InvalidFormat(_))));
    assert_eq!(
        CharacterRepository::new(&test.db)
            .count_for_owner("owner-a")
            .await?,
        1
    );

    Ok(())
}

/// Expect re-ingest to fully replace the previous record set
#[tokio::test]
async fn reingest_replaces_previous_set() -> Result<(), TestError> {
    let test = TestBuilder::new().with_character_table().build().await?;
    let media = media_store(&test);
    let ingest_service = IngestService::new(&test.db, &media);

    let first = manifest_bytes(&[
        manifest_entry("#1", "Rem", "", "1 ka", ""),
        manifest_entry("#2", "Ram", "", "2 ka", ""),
        manifest_entry("#3", "Emilia", "", "3 ka", ""),
    ]);
    ingest_service.ingest_manifest("owner-a", &first).await.unwrap();

    let second = manifest_bytes(&[manifest_entry("#9", "Subaru", "", "4 ka", "")]);
    ingest_service.ingest_manifest("owner-a", &second).await.unwrap();

    let records = CharacterRepository::new(&test.db)
        .list_for_owner("owner-a", None, false)
        .await?;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Subaru");
    assert_eq!(records[0].sort_order, 0);

    Ok(())
}

/// Expect re-ingesting an archive to drop the previous upload's images so
/// the media area mirrors the new record set
#[tokio::test]
async fn reingest_replaces_previous_media() -> Result<(), TestError> {
    let test = TestBuilder::new().with_character_table().build().await?;
    let media = media_store(&test);
    let ingest_service = IngestService::new(&test.db, &media);

    let first = archive_with_manifest(
        &manifest_bytes(&[manifest_entry("#1", "Rem", "", "1 ka", "images/rem.png")]),
        &[("images/rem.png", b"rem png")],
    )
    .unwrap();
    ingest_service.ingest_archive("owner-a", &first).await.unwrap();
    assert!(media.exists("owner-a/rem.png"));

    let second = archive_with_manifest(
        &manifest_bytes(&[manifest_entry("#1", "Ram", "", "2 ka", "images/ram.png")]),
        &[("images/ram.png", b"ram png")],
    )
    .unwrap();
    ingest_service.ingest_archive("owner-a", &second).await.unwrap();

    assert!(!media.exists("owner-a/rem.png"));
    assert!(media.exists("owner-a/ram.png"));

    Ok(())
}

/// Expect two replaces racing on one owner to serialize: once either has
/// committed, a query never observes an empty record set
#[tokio::test]
async fn concurrent_replaces_never_expose_an_empty_set() -> Result<(), TestError> {
    use sea_orm::{ConnectionTrait, Database, Schema};

    // File-backed so the racing transactions really run on separate
    // connections from the pool.
    let dir = tempfile::Builder::new()
        .prefix("tradelist_test_db_")
        .tempdir()?;
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("race.db").display());
    let db = Database::connect(url.as_str()).await?;

    let schema = Schema::new(sea_orm::DbBackend::Sqlite);
    db.execute(&schema.create_table_from_entity(entity::prelude::Character))
        .await?;

    let new_character = |name: &str| NewCharacter {
        rank: "#1".to_string(),
        name: name.to_string(),
        series: String::new(),
        value: "1 ka".to_string(),
        note: String::new(),
        image: String::new(),
    };

    let first = vec![new_character("Rem"), new_character("Ram")];
    let second = vec![
        new_character("Emilia"),
        new_character("Subaru"),
        new_character("Beatrice"),
    ];

    let repository_a = CharacterRepository::new(&db);
    let repository_b = CharacterRepository::new(&db);
    let (first, second) = tokio::join!(
        repository_a.replace_for_owner("owner-a", first),
        repository_b.replace_for_owner("owner-a", second),
    );
    first?;
    second?;

    let count = CharacterRepository::new(&db).count_for_owner("owner-a").await?;
    assert_ne!(count, 0);
    assert!(count == 2 || count == 3, "unexpected record count {count}");

    Ok(())
}

/// Expect ingest for one owner to leave other owners' record sets untouched
#[tokio::test]
async fn ingest_is_scoped_to_owner() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_owner_characters("owner-b", 4)
        .build()
        .await?;
    let media = media_store(&test);
    let ingest_service = IngestService::new(&test.db, &media);

    let manifest = manifest_bytes(&[manifest_entry("#1", "Rem", "", "1 ka", "")]);
    ingest_service.ingest_manifest("owner-a", &manifest).await.unwrap();

    let repository = CharacterRepository::new(&test.db);
    assert_eq!(repository.count_for_owner("owner-a").await?, 1);
    assert_eq!(repository.count_for_owner("owner-b").await?, 4);

    Ok(())
}
