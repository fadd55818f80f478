use std::path::{Path, PathBuf};

use contracts::shared::model_metadata::ModelMetaData;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize model metadata: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub fn render_document(document: &ModelMetaData, pretty: bool) -> Result<String, OutputError> {
    let json = if pretty {
        serde_json::to_string_pretty(document)?
    } else {
        serde_json::to_string(document)?
    };
    Ok(json)
}

/// Serialize the document and write it to `path`, creating parent directories.
/// Returns the number of bytes written.
pub fn write_document(
    document: &ModelMetaData,
    path: &Path,
    pretty: bool,
) -> Result<usize, OutputError> {
    let json = render_document(document, pretty)?;
    let io_error = |source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(io_error)?;
    }
    std::fs::write(path, json.as_bytes()).map_err(io_error)?;

    tracing::info!("Model metadata written to {} ({} bytes)", path.display(), json.len());
    Ok(json.len())
}
