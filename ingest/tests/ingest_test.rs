//! End-to-end ingestion over on-disk fixtures.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use finsolve_embeddings::{EmbeddingConfig, EmbeddingProvider, HashingEmbedder};
use finsolve_ingest::{IngestConfig, IngestError, IngestPipeline};
use finsolve_vector_store::{ChunkMetadata, MetadataFilter, VectorIndex, VectorStore};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const DIMENSION: usize = 64;

fn embedder() -> Arc<dyn EmbeddingProvider> {
    Arc::new(HashingEmbedder::new(DIMENSION))
}

fn pipeline(root: &Path) -> IngestPipeline {
    let config = IngestConfig::default()
        .with_data_dir(root.join("data"))
        .with_index_dir(root.join("chroma_db"))
        .with_embedding(EmbeddingConfig::hashing().with_dimension(DIMENSION));
    IngestPipeline::new(config, embedder())
}

fn write(root: &Path, relative: &str, content: &[u8]) {
    let path = root.join("data").join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

fn seed_corpus(root: &Path) {
    write(
        root,
        "finance/quarterly_report.md",
        b"# Q1 Financial Report\n\nThe Q1 budget allocated 40% to vendor services.\n\nMarketing spend rose 12%.",
    );
    write(
        root,
        "engineering/architecture.md",
        b"# Architecture\n\nServices run on Kubernetes with a Postgres primary.",
    );
    write(
        root,
        "hr/hr_data.csv",
        b"employee_id,full_name,leave_balance\nFINEMP1000,Aadhya Patel,12\nFINEMP1001,Isha Chowdhury,8\n",
    );
    write(
        root,
        "General/employee_handbook.md",
        b"# Employee Handbook\n\nThe holiday policy grants 20 days of paid leave.",
    );
    write(root, "marketing/campaign.pptx", b"binary deck");
    write(root, "finance/corrupt.txt", &[0xff, 0xfe, 0x00, 0x41]);
    write(root, "README.md", b"not a department");
}

async fn open_index(root: &Path) -> VectorStore {
    VectorStore::open(root.join("chroma_db"), "company_docs", embedder())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_ingest_tags_chunks_by_department() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    seed_corpus(root);

    let report = pipeline(root).run().await.unwrap();

    let names: Vec<&str> = report.departments.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["General", "engineering", "finance", "hr"]);
    assert_eq!(report.skipped_departments, vec!["marketing".to_string()]);

    let finance = &report.departments[2];
    assert_eq!(finance.files_loaded, 1);
    assert_eq!(finance.files_skipped, 1);

    // One document per CSV row.
    assert_eq!(report.departments[3].chunks, 2);
    assert_eq!(report.total_chunks, 5);
    assert_eq!(report.sample_metadata.len(), 3);
    assert_eq!(report.sample_metadata[0], ChunkMetadata::new("general", "general"));
    assert!(!report.removed_previous);

    let store = open_index(root).await;
    let mut expected = BTreeMap::new();
    expected.insert(ChunkMetadata::new("engineering", "engineering"), 1);
    expected.insert(ChunkMetadata::new("finance", "finance"), 1);
    expected.insert(ChunkMetadata::new("general", "general"), 1);
    expected.insert(ChunkMetadata::new("hr", "hr"), 2);
    assert_eq!(store.collection().metadata_distribution(), expected);
}

#[tokio::test]
async fn test_filtered_search_stays_in_department() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    seed_corpus(root);
    pipeline(root).run().await.unwrap();

    let store = open_index(root).await;
    let filter = MetadataFilter::role_eq("finance");
    let hits = store
        .similarity_search("Q1 budget", 3, Some(&filter))
        .await
        .unwrap();

    assert_eq!(hits.len(), 1);
    assert!(hits[0].text.contains("Q1 budget"));
    assert_eq!(hits[0].metadata.role, "finance");
}

#[tokio::test]
async fn test_rerun_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    seed_corpus(root);

    let first = pipeline(root).run().await.unwrap();
    let first_distribution = open_index(root).await.collection().metadata_distribution();

    let second = pipeline(root).run().await.unwrap();
    let second_distribution = open_index(root).await.collection().metadata_distribution();

    assert!(second.removed_previous);
    assert_eq!(first.total_chunks, second.total_chunks);
    assert_eq!(first_distribution, second_distribution);
}

#[tokio::test]
async fn test_empty_corpus_aborts_and_clears_index() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    seed_corpus(root);
    pipeline(root).run().await.unwrap();
    assert!(root.join("chroma_db").exists());

    std::fs::remove_dir_all(root.join("data")).unwrap();
    std::fs::create_dir_all(root.join("data").join("empty_department")).unwrap();

    let result = pipeline(root).run().await;
    assert!(matches!(result, Err(IngestError::EmptyCorpus(_))));
    assert!(!root.join("chroma_db").exists());
}

#[tokio::test]
async fn test_long_document_is_split_with_overlap() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let words: Vec<String> = (0..300).map(|i| format!("w{i:03}")).collect();
    write(root, "engineering/notes.txt", words.join(" ").as_bytes());

    let report = pipeline(root).run().await.unwrap();
    assert_eq!(report.total_chunks, 4);

    let store = open_index(root).await;
    let texts: Vec<&str> = store
        .collection()
        .entries()
        .iter()
        .map(|entry| entry.text.as_str())
        .collect();
    assert!(texts[0].ends_with("w099"));
    assert!(texts[1].starts_with("w090"));
    assert!(texts.iter().all(|t| t.chars().count() <= 500));
}
