use tempfile::tempdir;
use veranda_media::{MediaError, MediaStore};

const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

async fn open_store(root: &std::path::Path) -> MediaStore {
    MediaStore::builder().root(root).max_bytes(64).open().await.unwrap()
}

#[tokio::test]
async fn test_open_creates_the_upload_directory() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("nested").join("uploads");

    let media = open_store(&root).await;

    assert!(root.is_dir());
    assert_eq!(media.max_bytes(), 64);
}

#[tokio::test]
async fn test_store_writes_file_and_returns_public_url() {
    let dir = tempdir().unwrap();
    let media = open_store(dir.path()).await;

    let stored = media.store("image/png", PNG_BYTES).await.unwrap();

    assert!(stored.url.starts_with("/uploads/"));
    assert!(stored.file_name.ends_with(".png"));
    assert_eq!(stored.url, format!("/uploads/{}", stored.file_name));

    let on_disk = std::fs::read(media.root().join(&stored.file_name)).unwrap();
    assert_eq!(on_disk, PNG_BYTES);
}

#[tokio::test]
async fn test_jpeg_content_type_maps_to_jpg_extension() {
    let dir = tempdir().unwrap();
    let media = open_store(dir.path()).await;

    let stored = media.store("image/jpeg", &[0xFF, 0xD8, 0xFF]).await.unwrap();

    assert!(stored.file_name.ends_with(".jpg"));
}

#[tokio::test]
async fn test_generated_names_are_unique() {
    let dir = tempdir().unwrap();
    let media = open_store(dir.path()).await;

    let first = media.store("image/png", PNG_BYTES).await.unwrap();
    let second = media.store("image/png", PNG_BYTES).await.unwrap();

    assert_ne!(first.file_name, second.file_name);
}

#[tokio::test]
async fn test_non_image_content_type_is_rejected() {
    let dir = tempdir().unwrap();
    let media = open_store(dir.path()).await;

    let err = media.store("application/pdf", PNG_BYTES).await.unwrap_err();

    assert!(matches!(err, MediaError::UnsupportedType { .. }));
    assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none(), "nothing may be written");
}

#[tokio::test]
async fn test_oversize_upload_is_rejected() {
    let dir = tempdir().unwrap();
    let media = open_store(dir.path()).await;

    let oversized = vec![0_u8; 65];
    let err = media.store("image/png", &oversized).await.unwrap_err();

    assert!(matches!(err, MediaError::TooLarge { .. }));
    assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none(), "nothing may be written");
}

#[tokio::test]
async fn test_no_temporary_files_remain_after_store() {
    let dir = tempdir().unwrap();
    let media = open_store(dir.path()).await;

    media.store("image/webp", PNG_BYTES).await.unwrap();

    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .flatten()
        .filter(|entry| entry.file_name().to_string_lossy().contains(".mtmp."))
        .collect();
    assert!(leftovers.is_empty());
}

#[tokio::test]
async fn test_fresh_tmp_files_survive_open() {
    let dir = tempdir().unwrap();
    let stray = dir.path().join("abc.png.mtmp.7");
    std::fs::write(&stray, b"in flight").unwrap();

    let _media = open_store(dir.path()).await;

    assert!(stray.exists(), "recent temporary files may belong to a live writer");
}

#[tokio::test]
async fn test_custom_public_base() {
    let dir = tempdir().unwrap();
    let media = MediaStore::builder()
        .root(dir.path())
        .public_base("/static/media/")
        .open()
        .await
        .unwrap();

    let stored = media.store("image/gif", PNG_BYTES).await.unwrap();

    assert!(stored.url.starts_with("/static/media/"));
    assert!(!stored.url.contains("//"), "trailing slash on the base must not double up");
}
