use std::path::PathBuf;

/// Everything that can stop a rendering run.
/// All of them abort the batch, there is no per-file recovery.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A data row has more fields than the header names.
    #[error("{path:?}, data row {row}: found {found} fields, header has {expected}")]
    RowTooLong {
        path: PathBuf,
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("no header row in {0:?}")]
    MissingHeader(PathBuf),
}

impl GraphError {
    pub fn io<P: Into<PathBuf>>(path: P, source: std::io::Error) -> GraphError {
        GraphError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn csv<P: Into<PathBuf>>(path: P, source: csv::Error) -> GraphError {
        GraphError::Csv {
            path: path.into(),
            source,
        }
    }
}
