use std::path::PathBuf;

use anyhow::Result;
use promotion::{check_coupon_files, CouponValidator};
use storage::Storage;

pub fn describe_coupon(code: &str, valid: bool) -> String {
    if valid {
        format!("{code} is a valid coupon")
    } else {
        format!("{code} is an invalid coupon")
    }
}

/// One verdict line per code, in the order given.
pub async fn check_codes(codes: &[String], files: &[PathBuf]) -> Result<Vec<String>> {
    check_coupon_files(files)?;
    let validator = CouponValidator::new(Storage::new(), files.to_vec());
    Ok(validator
        .validate_batch(codes)
        .await
        .iter()
        .map(|(code, valid)| describe_coupon(code, *valid))
        .collect())
}

#[cfg(test)]
#[path = "tests/coupon_tests.rs"]
mod tests;
