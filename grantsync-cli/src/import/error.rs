//! Error taxonomy for the import pipeline

use std::fmt;
use std::path::PathBuf;

use super::types::UnresolvedReference;

/// Errors that abort an import run
#[derive(Debug)]
pub enum ImportError {
    /// Missing or invalid settings; raised before any store access
    Configuration(String),
    /// Workbook path does not exist
    SourceNotFound(PathBuf),
    /// Workbook is unreadable or a required sheet is missing
    SchemaMismatch(String),
    /// Strict policy: one or more rows did not resolve
    UnresolvedReferences(Vec<UnresolvedReference>),
    /// The store rejected a write or the commit; the transaction was
    /// rolled back
    Write(anyhow::Error),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::Configuration(message) => write!(f, "{}", message),
            ImportError::SourceNotFound(path) => {
                write!(f, "Excel file not found: {}", path.display())
            }
            ImportError::SchemaMismatch(message) => write!(f, "{}", message),
            ImportError::UnresolvedReferences(rows) => {
                writeln!(
                    f,
                    "Import aborted: {} rows have unresolved references:",
                    rows.len()
                )?;
                for miss in rows {
                    writeln!(
                        f,
                        "  row {}: unknown {} '{}'",
                        miss.row, miss.field, miss.value
                    )?;
                }
                Ok(())
            }
            ImportError::Write(source) => write!(f, "Database write failed: {}", source),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Write(source) => Some(source.as_ref()),
            _ => None,
        }
    }
}
