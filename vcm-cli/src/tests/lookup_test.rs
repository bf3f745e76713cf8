use super::*;
use crate::lookup::parse_flag;

#[rstest]
#[case::simple("csiController.csiResizer.enabled=true", ("csiController.csiResizer.enabled", "true"))]
#[case::empty_value("foo=", ("foo", ""))]
#[case::extra_equals("foo=a=b", ("foo", "a=b"))]
fn test_parse_flag(#[case] input: &str, #[case] expected: (&str, &str)) {
    assert_eq!(parse_flag(input).unwrap(), (expected.0.to_string(), expected.1.to_string()));
}

#[rstest]
#[case::no_equals("foo")]
#[case::no_key("=true")]
fn test_parse_flag_invalid(#[case] input: &str) {
    assert!(parse_flag(input).is_err());
}

#[rstest]
fn test_lookup_key(test_matrix: CompatibilityMatrix) {
    let flag = format!("{RESIZER_FLAG}=true");
    let VcmSubcommand::Lookup(args) =
        parse(&["lookup", "--chart", CSI_CHART, "-t", CSI_CONTROLLER_TEMPLATE, "-k", "v1.23", "--flag", &flag])
    else {
        panic!("expected lookup subcommand")
    };

    let key = args.key();
    let expected = ScenarioKey::new(CSI_CHART, CSI_CONTROLLER_TEMPLATE, PlatformVersion::new(1, 23))
        .with_flag(RESIZER_FLAG, "true");
    assert_eq!(key, expected);

    let entry = test_matrix.lookup(&key).unwrap();
    assert_eq!(entry.expected_images[1], CSI_RESIZER_IMAGE_1_23);
}

#[rstest]
fn test_lookup_requires_version() {
    let res = VcmCommandRoot::try_parse_from(["vcmctl", "lookup", "--chart", CPI_CHART, "-t", CPI_DAEMONSET_TEMPLATE]);
    assert!(res.is_err());
}
