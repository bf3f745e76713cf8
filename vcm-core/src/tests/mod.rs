mod matrix_test;

use std::path::Path;

use rstest::*;
use vcm_testutils::*;

use crate::prelude::*;

#[fixture]
fn test_matrix(test_matrix_yaml: String) -> CompatibilityMatrix {
    CompatibilityMatrix::from_yaml(&test_matrix_yaml).unwrap()
}

fn scenario_for(matrix: &CompatibilityMatrix, key: &ScenarioKey) -> Scenario {
    let entry = matrix.lookup(key).unwrap();
    Scenario::new(entry, matrix.chart(&key.chart).unwrap(), Path::new(TEST_CHART_ROOT))
}

fn v1_23() -> PlatformVersion {
    PlatformVersion::new(1, 23)
}
