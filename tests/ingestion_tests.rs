//! Integration tests for file ingestion rules
//!
//! These tests verify:
//! - The image-type filter applied before resolution
//! - Single-file, two-file and ignored drop shapes
//! - Files opened from disk carry the right name, size and content type

use camino::Utf8PathBuf;
use imgcompare::SlotId;
use imgcompare::services::{
    FileSource, ImageFile, IngestError, IngestionResolver, filter_images,
};
use tempfile::TempDir;

fn image(name: &str) -> ImageFile {
    ImageFile::from_bytes(name, "image/png", vec![0u8; 32])
}

fn resolve(files: Vec<ImageFile>, target: Option<SlotId>) -> Vec<(SlotId, String)> {
    IngestionResolver::new("raw")
        .unwrap()
        .resolve(filter_images(files), target)
        .into_iter()
        .map(|p| (p.slot, p.file.name().to_string()))
        .collect()
}

#[test]
fn test_raw_heuristic_independent_of_drop_order() {
    for order in [["raw_photo.png", "result.png"], ["result.png", "raw_photo.png"]] {
        let placed = resolve(order.iter().map(|n| image(n)).collect(), Some(SlotId::After));
        assert_eq!(
            placed,
            vec![
                (SlotId::Before, "raw_photo.png".to_string()),
                (SlotId::After, "result.png".to_string()),
            ],
            "drop order {:?}",
            order
        );
    }
}

#[test]
fn test_two_unmarked_files_positional() {
    let placed = resolve(vec![image("second.png"), image("first.png")], None);
    assert_eq!(
        placed,
        vec![
            (SlotId::Before, "second.png".to_string()),
            (SlotId::After, "first.png".to_string()),
        ]
    );
}

#[test]
fn test_non_images_are_filtered_before_counting() {
    // Three files dropped, but only two are images: the pair rule applies
    let files = vec![
        image("result.png"),
        ImageFile::from_bytes("readme.txt", "text/plain", b"hello".to_vec()),
        image("RAW.png"),
    ];
    let placed = resolve(files, Some(SlotId::Before));
    assert_eq!(
        placed,
        vec![
            (SlotId::Before, "RAW.png".to_string()),
            (SlotId::After, "result.png".to_string()),
        ]
    );
}

#[test]
fn test_single_non_image_is_ignored() {
    let files = vec![ImageFile::from_bytes("doc.pdf", "application/pdf", vec![1u8; 8])];
    assert!(resolve(files, Some(SlotId::Before)).is_empty());
}

#[test]
fn test_three_images_are_ignored() {
    let files = vec![image("a.png"), image("raw.png"), image("c.png")];
    assert!(resolve(files, Some(SlotId::After)).is_empty());
}

#[tokio::test]
async fn test_open_file_from_disk() {
    let temp_dir = TempDir::new().unwrap();
    let path = Utf8PathBuf::try_from(temp_dir.path().join("holiday.jpeg")).unwrap();
    std::fs::write(&path, vec![0u8; 3000]).unwrap();

    let file = ImageFile::open(&path).await.unwrap();

    assert_eq!(file.name(), "holiday.jpeg");
    assert_eq!(file.content_type(), "image/jpeg");
    assert_eq!(file.size_bytes(), 3000);
    assert!(file.is_image());
    assert!(matches!(file.source(), FileSource::Path(p) if p == &path));
}

#[tokio::test]
async fn test_open_unknown_extension_is_not_an_image() {
    let temp_dir = TempDir::new().unwrap();
    let path = Utf8PathBuf::try_from(temp_dir.path().join("notes.md")).unwrap();
    std::fs::write(&path, "# notes").unwrap();

    let file = ImageFile::open(&path).await.unwrap();
    assert!(!file.is_image());
    assert!(filter_images(vec![file]).is_empty());
}

#[tokio::test]
async fn test_open_errors() {
    let temp_dir = TempDir::new().unwrap();
    let dir = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();

    let missing = ImageFile::open(dir.join("missing.png")).await;
    assert!(matches!(missing, Err(IngestError::Io { .. })));

    let directory = ImageFile::open(&dir).await;
    assert!(matches!(directory, Err(IngestError::NotAFile(_))));
}
