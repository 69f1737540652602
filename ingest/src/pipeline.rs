//! Ingestion pipeline orchestration.
//!
//! One run scans every department folder under the data root, loads the
//! supported files, splits and tags them, then embeds and persists the whole
//! set as a fresh collection.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use finsolve_embeddings::EmbeddingProvider;
use finsolve_vector_store::{ChunkMetadata, NewChunk, VectorIndex, VectorStore, reset_index_dir};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::IngestConfig;
use crate::error::{IngestError, Result};
use crate::loader::{Document, FileKind};
use crate::splitter::RecursiveCharacterSplitter;
use crate::tagging::tag_for_department;

/// Number of chunk metadata entries echoed in the report.
const SAMPLE_SIZE: usize = 3;

/// Per-department outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentReport {
    /// Folder name as found on disk.
    pub name: String,

    /// Files that produced at least one document.
    pub files_loaded: usize,

    /// Supported files that failed to load.
    pub files_skipped: usize,

    /// Chunks prepared for this department.
    pub chunks: usize,
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct IngestReport {
    /// Departments that contributed chunks, in name order.
    pub departments: Vec<DepartmentReport>,

    /// Departments with no loadable documents.
    pub skipped_departments: Vec<String>,

    /// Chunks persisted.
    pub total_chunks: usize,

    /// Index directory written.
    pub index_path: PathBuf,

    /// Metadata of the first persisted chunks.
    pub sample_metadata: Vec<ChunkMetadata>,

    /// Whether a previous index directory was deleted.
    pub removed_previous: bool,

    /// Wall-clock duration in milliseconds.
    pub elapsed_ms: u64,
}

/// Documents loaded from one department folder.
#[derive(Debug, Default)]
pub struct DepartmentFiles {
    pub documents: Vec<Document>,
    pub files_loaded: usize,
    pub files_skipped: usize,
}

/// The ingestion pipeline.
pub struct IngestPipeline {
    config: IngestConfig,
    splitter: RecursiveCharacterSplitter,
    embedder: Arc<dyn EmbeddingProvider>,
}

impl IngestPipeline {
    /// Create a pipeline with an explicit embedder.
    pub fn new(config: IngestConfig, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            splitter: RecursiveCharacterSplitter::with_config(config.splitter.clone()),
            config,
            embedder,
        }
    }

    /// Create a pipeline using the embedder named in the configuration.
    pub fn from_config(config: IngestConfig) -> Self {
        let embedder = config.embedding.build_provider();
        Self::new(config, embedder)
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Rebuild the index from the data root.
    ///
    /// The previous index directory is deleted before scanning, so a run
    /// that finds no documents leaves no index behind.
    pub async fn run(&self) -> Result<IngestReport> {
        let start_time = Instant::now();
        let data_dir = self.config.data_dir.as_path();

        tokio::fs::metadata(data_dir)
            .await
            .map_err(|source| IngestError::DataDir {
                path: data_dir.to_path_buf(),
                source,
            })?;

        let removed_previous = reset_index_dir(&self.config.index_dir).await?;

        let mut departments = Vec::new();
        let mut skipped_departments = Vec::new();
        let mut all_chunks = Vec::new();

        for (name, path) in list_departments(data_dir)? {
            info!("Scanning department: {name}");
            let loaded = self.load_department_files(&path).await;

            if loaded.documents.is_empty() {
                warn!("No files found in {name}");
                skipped_departments.push(name);
                continue;
            }

            let chunks = self.split_and_tag(&name, &loaded.documents);
            info!("{} chunks prepared for {name}", chunks.len());

            departments.push(DepartmentReport {
                name,
                files_loaded: loaded.files_loaded,
                files_skipped: loaded.files_skipped,
                chunks: chunks.len(),
            });
            all_chunks.extend(chunks);
        }

        if all_chunks.is_empty() {
            warn!("No documents processed under {}", data_dir.display());
            return Err(IngestError::EmptyCorpus(data_dir.to_path_buf()));
        }

        let store = VectorStore::create(
            &self.config.index_dir,
            &self.config.collection,
            Arc::clone(&self.embedder),
            all_chunks,
            self.config.embedding.batch_size,
        )
        .await?;

        let elapsed_ms = start_time.elapsed().as_millis() as u64;
        info!(
            "Ingestion complete: {} departments, {} chunks in {elapsed_ms}ms",
            departments.len(),
            store.chunk_count()
        );

        Ok(IngestReport {
            departments,
            skipped_departments,
            total_chunks: store.chunk_count(),
            index_path: store.root().to_path_buf(),
            sample_metadata: store.collection().sample_metadata(SAMPLE_SIZE),
            removed_previous,
            elapsed_ms,
        })
    }

    /// Load every supported file directly inside a department folder.
    ///
    /// Unsupported files are ignored; files that fail to load are logged and
    /// counted as skipped.
    pub async fn load_department_files(&self, dir: &Path) -> DepartmentFiles {
        let mut loaded = DepartmentFiles::default();

        for path in list_files(dir) {
            let Some(kind) = FileKind::from_path(&path) else {
                debug!("Ignoring unsupported file {}", path.display());
                continue;
            };

            match kind.load(&path).await {
                Ok(documents) => {
                    debug!("Loaded {} documents from {}", documents.len(), path.display());
                    loaded.files_loaded += 1;
                    loaded.documents.extend(documents);
                }
                Err(e) => {
                    warn!("Skipped {}: {e}", path.display());
                    loaded.files_skipped += 1;
                }
            }
        }

        loaded
    }

    /// Split documents into chunks tagged with the department's metadata.
    pub fn split_and_tag(&self, department: &str, documents: &[Document]) -> Vec<NewChunk> {
        let metadata = tag_for_department(department);

        documents
            .iter()
            .flat_map(|document| {
                let source = document.source.display().to_string();
                self.splitter
                    .split_text(&document.text)
                    .into_iter()
                    .map(move |text| (text, source.clone()))
            })
            .map(|(text, source)| NewChunk::new(text, metadata.clone()).with_source(source))
            .collect()
    }
}

/// Non-hidden sub-directories of the data root, sorted by name.
fn list_departments(data_dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let mut departments = Vec::new();

    for entry in WalkDir::new(data_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| IngestError::DataDir {
            path: data_dir.to_path_buf(),
            source: e.into(),
        })?;

        if !entry.file_type().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') {
            continue;
        }
        departments.push((name, entry.into_path()));
    }

    Ok(departments)
}

/// Non-hidden regular files directly inside `dir`, sorted by name.
fn list_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Cannot read entry in {}: {e}", dir.display());
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| !entry.file_name().to_string_lossy().starts_with('.'))
        .map(walkdir::DirEntry::into_path)
        .collect()
}
