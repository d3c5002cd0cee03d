use super::*;
use std::fs;

#[test]
fn verdict_lines_name_the_code() {
    assert_eq!(describe_coupon("HAPPYHRS", true), "HAPPYHRS is a valid coupon");
    assert_eq!(describe_coupon("NOPE1234", false), "NOPE1234 is an invalid coupon");
}

#[tokio::test]
async fn checks_codes_in_the_order_given() {
    let dir = tempfile::tempdir().expect("tempdir");
    let first = dir.path().join("couponbase1");
    let second = dir.path().join("couponbase2");
    fs::write(&first, "HAPPYHRS\nSUPER100\n").expect("write");
    fs::write(&second, "HAPPYHRS\n").expect("write");

    let lines = check_codes(
        &["SUPER100".to_string(), "happyhrs".to_string()],
        &[first, second],
    )
    .await
    .expect("checked");
    assert_eq!(
        lines,
        vec![
            "SUPER100 is an invalid coupon".to_string(),
            "happyhrs is a valid coupon".to_string(),
        ]
    );
}

#[tokio::test]
async fn missing_coupon_file_is_an_error() {
    let result = check_codes(
        &["HAPPYHRS".to_string()],
        &[PathBuf::from("/definitely/not/here")],
    )
    .await;
    assert!(result.is_err());
}
