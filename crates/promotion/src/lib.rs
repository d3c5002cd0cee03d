//! Coupon validation against a set of coupon files.
//!
//! A code is valid when at least [`MIN_FILE_COUNT`] distinct files contain
//! it. Files are searched concurrently and the per-code file count is cached
//! in [`Storage`], so repeated checks of a code never touch the files again.

use std::{io, path::PathBuf, sync::Arc};

use storage::Storage;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

pub mod search;

pub const MIN_FILE_COUNT: usize = 2;

#[derive(Debug, Error)]
pub enum PromotionError {
    #[error("failed to read coupon file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("coupon file does not exist: {0}")]
    Missing(PathBuf),
    #[error("coupon file {0} is gzipped; all files must be uncompressed")]
    Compressed(PathBuf),
}

/// Up-front checks on the coupon file list: every file exists and none is
/// gzipped.
pub fn check_coupon_files(files: &[PathBuf]) -> Result<(), PromotionError> {
    for file in files {
        if !file.exists() {
            return Err(PromotionError::Missing(file.clone()));
        }
        if file.extension().is_some_and(|ext| ext == "gz") {
            return Err(PromotionError::Compressed(file.clone()));
        }
    }
    Ok(())
}

/// Codes are compared upper-cased and without surrounding whitespace.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

#[derive(Clone)]
pub struct CouponValidator {
    storage: Storage,
    files: Arc<Vec<PathBuf>>,
}

impl CouponValidator {
    pub fn new(storage: Storage, files: Vec<PathBuf>) -> Self {
        Self {
            storage,
            files: Arc::new(files),
        }
    }

    pub async fn is_valid(&self, code: &str) -> bool {
        let code = normalize_code(code);
        if code.is_empty() {
            return false;
        }

        if let Some(file_count) = self.storage.coupon_match_count(&code).await {
            debug!(%code, file_count, "coupon cache hit");
            return file_count >= MIN_FILE_COUNT;
        }

        let file_count = self.files_containing(&code).await;
        self.storage.record_coupon_match_count(&code, file_count).await;
        info!(%code, file_count, "coupon searched");
        file_count >= MIN_FILE_COUNT
    }

    /// Checks each code in turn, keeping input order.
    pub async fn validate_batch(&self, codes: &[String]) -> Vec<(String, bool)> {
        let mut results = Vec::with_capacity(codes.len());
        for code in codes {
            let valid = self.is_valid(code).await;
            results.push((code.clone(), valid));
        }
        results
    }

    /// Number of files with at least one match. Unreadable files are logged
    /// and count as no match.
    async fn files_containing(&self, code: &str) -> usize {
        let mut tasks = JoinSet::new();
        for path in self.files.iter().cloned() {
            let code = code.to_string();
            tasks.spawn_blocking(move || {
                let result = search::count_in_file(&path, &code);
                (path, result)
            });
        }

        let mut matched = 0;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((_, Ok(count))) if count > 0 => matched += 1,
                Ok((_, Ok(_))) => {}
                Ok((path, Err(err))) => {
                    warn!(path = %path.display(), error = %err, "skipping coupon file")
                }
                Err(err) => warn!(error = %err, "coupon search task failed"),
            }
        }
        matched
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
