//! Document loaders for the supported file types.

use std::path::{Path, PathBuf};

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use tokio::fs;
use tracing::debug;

use crate::error::LoadError;

/// Text loaded from a source file, before splitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub text: String,
    pub source: PathBuf,
}

/// Supported source formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// `.md` / `.markdown`
    Markdown,
    /// `.txt`
    Text,
    /// `.csv`, one document per row.
    Csv,
}

impl FileKind {
    /// Detect the kind from the path's extension. `None` means unsupported.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "md" | "markdown" => Some(Self::Markdown),
            "txt" => Some(Self::Text),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    /// Load `path` into one or more documents.
    pub async fn load(self, path: &Path) -> Result<Vec<Document>, LoadError> {
        let bytes = fs::read(path).await?;

        let documents = match self {
            Self::Markdown => {
                let raw = String::from_utf8(bytes)?;
                let mut text = markdown_to_text(&raw);
                if text.is_empty() {
                    debug!("Markdown parse of {} was empty, using raw text", path.display());
                    text = raw;
                }
                vec![Document {
                    text,
                    source: path.to_path_buf(),
                }]
            }
            Self::Text => vec![Document {
                text: String::from_utf8(bytes)?,
                source: path.to_path_buf(),
            }],
            Self::Csv => csv_rows(&bytes)?
                .into_iter()
                .map(|text| Document {
                    text,
                    source: path.to_path_buf(),
                })
                .collect(),
        };

        Ok(documents)
    }
}

/// Strip markdown structure, keeping block boundaries as blank lines.
fn markdown_to_text(markdown: &str) -> String {
    let mut out = String::with_capacity(markdown.len());

    for event in Parser::new_ext(markdown, Options::ENABLE_TABLES) {
        match event {
            Event::Text(text) | Event::Code(text) => out.push_str(&text),
            Event::SoftBreak | Event::HardBreak => out.push('\n'),
            Event::Start(Tag::Item) => out.push_str("- "),
            Event::End(TagEnd::TableCell) => out.push(' '),
            Event::End(TagEnd::Item | TagEnd::TableHead | TagEnd::TableRow) => out.push('\n'),
            Event::End(
                TagEnd::Paragraph
                | TagEnd::Heading(_)
                | TagEnd::CodeBlock
                | TagEnd::BlockQuote
                | TagEnd::List(_)
                | TagEnd::Table,
            ) => out.push_str("\n\n"),
            _ => {}
        }
    }

    out.trim().to_string()
}

/// Render each data row as `header: value` lines.
fn csv_rows(bytes: &[u8]) -> Result<Vec<String>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes);
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| format!("{}: {}", header.trim(), value.trim()))
            .collect::<Vec<_>>()
            .join("\n");
        rows.push(row);
    }
    Ok(rows)
}
