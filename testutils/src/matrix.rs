use std::fs;
use std::path::PathBuf;

use rstest::fixture;

pub fn test_matrix_path() -> PathBuf {
    PathBuf::from(format!("{}/data/test_matrix.yaml", env!("CARGO_MANIFEST_DIR")))
}

#[fixture]
pub fn test_matrix_yaml() -> String {
    fs::read_to_string(test_matrix_path()).unwrap()
}
