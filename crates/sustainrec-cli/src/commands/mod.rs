//! Command implementations

pub(crate) mod footprint;
pub(crate) mod recommend;
pub mod serve;
pub(crate) mod similar;

use std::path::Path;

use sustainrec::data::CsvLoader;
use sustainrec::recommend::Recommender;

use crate::error::{CliError, Result};

/// Load a dataset strictly: a missing file or header is an error here,
/// unlike the server which degrades to an empty table.
pub(crate) fn load_recommender(path: &Path) -> Result<Recommender> {
    if !path.is_file() {
        return Err(CliError::FileNotFound(path.to_path_buf()));
    }

    let table = CsvLoader::new().load(path)?;
    tracing::info!(path = %path.display(), rows = table.len(), "dataset loaded");
    Ok(Recommender::new(table))
}
