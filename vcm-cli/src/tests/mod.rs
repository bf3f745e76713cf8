mod lookup_test;

use clap::Parser;
use rstest::*;
use vcm_core::prelude::*;
use vcm_testutils::*;

use super::*;

fn parse(args: &[&str]) -> VcmSubcommand {
    let mut argv = vec!["vcmctl"];
    argv.extend(args);
    VcmCommandRoot::try_parse_from(argv).unwrap().subcommand
}

#[fixture]
fn test_matrix(test_matrix_yaml: String) -> CompatibilityMatrix {
    CompatibilityMatrix::from_yaml(&test_matrix_yaml).unwrap()
}

#[rstest]
fn test_verbosity_default() {
    let root = VcmCommandRoot::try_parse_from(["vcmctl", "version"]).unwrap();
    assert_eq!(root.verbosity, "warn");
    assert!(matches!(root.subcommand, VcmSubcommand::Version));
}

#[rstest]
fn test_builtin_matrix_loads() {
    let matrix_args = matrix_args::MatrixArgs { matrix: None };
    let matrix = matrix_args.load().unwrap();
    assert_eq!(matrix.len(), CompatibilityMatrix::embedded().unwrap().len());
}
