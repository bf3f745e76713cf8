use assertables::*;

use super::*;
use crate::matrix::MatrixError;

const SMALL_MATRIX_HEADER: &str = "
charts:
  - name: cpi
    path: charts/rancher-vsphere-cpi
    releasePrefix: cpitest
";

fn small_matrix(manifests: &str) -> anyhow::Result<CompatibilityMatrix> {
    CompatibilityMatrix::from_yaml(&format!("{SMALL_MATRIX_HEADER}manifests:\n{manifests}"))
}

fn matrix_err(manifests: &str) -> MatrixError {
    let err = small_matrix(manifests).unwrap_err();
    match err.downcast::<MatrixError>() {
        Ok(e) => e,
        Err(e) => panic!("unexpected error: {e}"),
    }
}

#[rstest]
fn test_embedded_matrix_loads() {
    let matrix = CompatibilityMatrix::embedded().unwrap();
    assert_eq!(matrix.charts().map(|c| c.name.as_str()).collect::<Vec<_>>(), vec!["cpi", "csi"]);

    let cpi_versions: Vec<_> = matrix.versions("cpi").iter().map(|v| v.to_string()).collect();
    assert_eq!(cpi_versions, vec!["1.18", "1.19", "1.20", "1.21", "1.22", "1.23", "1.24", "1.25", "1.26", "1.27"]);

    let csi_versions: Vec<_> = matrix.versions("csi").iter().map(|v| v.to_string()).collect();
    assert_eq!(csi_versions, vec!["1.20", "1.21", "1.22", "1.23"]);
}

#[rstest]
fn test_embedded_matrix_cpi_entries() {
    let matrix = CompatibilityMatrix::embedded().unwrap();
    let entry = matrix.lookup(&ScenarioKey::new(CPI_CHART, CPI_DAEMONSET_TEMPLATE, v1_23())).unwrap();

    assert_eq!(entry.kind, ManifestKind::DaemonSet);
    assert_eq!(entry.expected_images, vec![CPI_MANAGER_IMAGE_1_23]);

    // only the image is pinned for the cpi daemonset; container names and args are up to the chart
    assert!(matrix.entries().all(|e| e.expected_args.is_none()));
}

// Every variant that inserts an image should have exactly one more image than the default entry for
// the same version, and removing that one image should give back the default list.
#[rstest]
fn test_embedded_matrix_variants_add_one_image() {
    let matrix = CompatibilityMatrix::embedded().unwrap();
    let variants: Vec<_> = matrix
        .entries()
        .filter(|e| !e.key.feature_flags.is_empty() && e.extra_templates.is_empty())
        .collect();
    assert_not_empty!(variants);

    for variant in variants {
        let default = matrix.lookup(&variant.key.without_flags()).unwrap();
        assert_eq!(variant.expected_images.len(), default.expected_images.len() + 1, "{}", variant.key);

        let pos = (0..variant.expected_images.len())
            .find(|i| {
                let mut images = variant.expected_images.clone();
                images.remove(*i);
                images == default.expected_images
            })
            .unwrap_or_else(|| panic!("{}: not a single insertion", variant.key));
        assert_le!(pos, default.expected_images.len());
    }
}

#[rstest]
#[case::v1_20(20, "rancher/mirrored-sig-storage-csi-resizer:v1.3.0")]
#[case::v1_23(23, CSI_RESIZER_IMAGE_1_23)]
fn test_embedded_matrix_resizer_position(#[case] minor: u32, #[case] image: &str) {
    let matrix = CompatibilityMatrix::embedded().unwrap();
    let version = PlatformVersion::new(1, minor);
    let key = ScenarioKey::new(CSI_CHART, CSI_CONTROLLER_TEMPLATE, version).with_flag(RESIZER_FLAG, "true");
    let entry = matrix.lookup(&key).unwrap();
    let default = matrix.lookup(&key.without_flags()).unwrap();

    assert_eq!(entry.expected_images[0], default.expected_images[0]);
    assert_eq!(entry.expected_images[1], image);
    assert_eq!(entry.expected_images[2..], default.expected_images[1..]);
}

#[rstest]
fn test_embedded_matrix_windows_variant() {
    let matrix = CompatibilityMatrix::embedded().unwrap();
    for minor in 21..=23 {
        let version = PlatformVersion::new(1, minor);
        let key = ScenarioKey::new(CSI_CHART, CSI_NODE_TEMPLATE, version).with_flag(WINDOWS_FLAG, "true");
        let entry = matrix.lookup(&key).unwrap();
        let default = matrix.lookup(&key.without_flags()).unwrap();

        assert_eq!(entry.expected_images, default.expected_images);
        assert_eq!(entry.templates().collect::<Vec<_>>(), vec![CSI_NODE_TEMPLATE, CSI_WINDOWS_NODE_TEMPLATE]);
    }
}

#[rstest]
fn test_load_from_path(test_matrix: CompatibilityMatrix) {
    let matrix = CompatibilityMatrix::load(&test_matrix_path()).unwrap();
    assert_eq!(matrix.len(), test_matrix.len());
    assert_eq!(matrix.len(), 8);
}

#[rstest]
fn test_lookup_not_found(test_matrix: CompatibilityMatrix) {
    let key = ScenarioKey::new(CPI_CHART, CPI_DAEMONSET_TEMPLATE, PlatformVersion::new(1, 30));
    let err = test_matrix.lookup(&key).unwrap_err();
    assert!(matches!(err.downcast_ref::<MatrixError>(), Some(MatrixError::EntryNotFound(k)) if *k == key));
}

#[rstest]
fn test_lookup_flags_must_match_exactly(test_matrix: CompatibilityMatrix) {
    // the resizer variant only exists for the controller deployment
    let key = ScenarioKey::new(CSI_CHART, CSI_NODE_TEMPLATE, v1_23()).with_flag(RESIZER_FLAG, "true");
    let _ = test_matrix.lookup(&key).unwrap_err();

    let key = ScenarioKey::new(CSI_CHART, CSI_CONTROLLER_TEMPLATE, v1_23()).with_flag(RESIZER_FLAG, "false");
    let _ = test_matrix.lookup(&key).unwrap_err();
}

#[rstest]
fn test_chart_lookup(test_matrix: CompatibilityMatrix) {
    let chart = test_matrix.chart(CSI_CHART).unwrap();
    assert_eq!(chart.randomized_values, vec!["vCenter.clusterId"]);

    let err = test_matrix.chart("nsx").unwrap_err();
    assert!(matches!(err.downcast_ref::<MatrixError>(), Some(MatrixError::UnknownChart(_))));
}

#[rstest]
fn test_duplicate_entry() {
    let err = matrix_err(
        "
  - chart: cpi
    template: templates/service-account.yaml
    kind: ServiceAccount
    entries:
      - kubeVersion: \"1.21\"
      - kubeVersion: \"1.21\"
",
    );
    assert!(matches!(err, MatrixError::DuplicateEntry(_)));
}

#[rstest]
fn test_unknown_chart() {
    let err = matrix_err(
        "
  - chart: csi
    template: templates/controller/deployment.yaml
    kind: Deployment
    entries:
      - kubeVersion: \"1.21\"
        images: [\"foo:v1\"]
",
    );
    assert!(matches!(err, MatrixError::UnknownChart(c) if c == "csi"));
}

#[rstest]
#[case::insert_out_of_range(
    "
  - chart: cpi
    template: templates/daemonset.yaml
    kind: DaemonSet
    entries:
      - kubeVersion: \"1.21\"
        images: [\"foo:v1\"]
        variants:
          - flags: {bar.enabled: \"true\"}
            insertImages:
              - {at: 2, value: \"bar:v1\"}
"
)]
#[case::variant_without_flags(
    "
  - chart: cpi
    template: templates/daemonset.yaml
    kind: DaemonSet
    entries:
      - kubeVersion: \"1.21\"
        images: [\"foo:v1\"]
        variants:
          - flags: {}
            insertImages:
              - {at: 0, value: \"bar:v1\"}
"
)]
#[case::insert_args_without_args(
    "
  - chart: cpi
    template: templates/daemonset.yaml
    kind: DaemonSet
    entries:
      - kubeVersion: \"1.21\"
        images: [\"foo:v1\"]
        variants:
          - flags: {bar.enabled: \"true\"}
            insertArgs:
              - {at: 0, value: --bar}
"
)]
#[case::images_on_secret(
    "
  - chart: cpi
    template: templates/secret.yaml
    kind: Secret
    entries:
      - kubeVersion: \"1.21\"
        images: [\"foo:v1\"]
"
)]
#[case::data_keys_on_daemonset(
    "
  - chart: cpi
    template: templates/daemonset.yaml
    kind: DaemonSet
    entries:
      - kubeVersion: \"1.21\"
        images: [\"foo:v1\"]
        dataKeys: [foo]
"
)]
fn test_invalid_entry(#[case] manifests: &str) {
    let err = matrix_err(manifests);
    assert!(matches!(err, MatrixError::InvalidEntry(_)));
}

#[rstest]
fn test_insert_args() {
    let matrix = small_matrix(
        "
  - chart: cpi
    template: templates/daemonset.yaml
    kind: DaemonSet
    args:
      container: manager
      args: [--a, --c]
    entries:
      - kubeVersion: \"1.21\"
        images: [\"foo:v1\"]
        variants:
          - flags: {b.enabled: \"true\"}
            insertArgs:
              - {at: 1, value: --b}
",
    )
    .unwrap();

    let key =
        ScenarioKey::new(CPI_CHART, CPI_DAEMONSET_TEMPLATE, PlatformVersion::new(1, 21)).with_flag("b.enabled", "true");
    let entry = matrix.lookup(&key).unwrap();
    assert_eq!(entry.expected_args.as_ref().unwrap().args, vec!["--a", "--b", "--c"]);

    let default = matrix.lookup(&key.without_flags()).unwrap();
    assert_eq!(default.expected_args.as_ref().unwrap().args, vec!["--a", "--c"]);
}

#[rstest]
fn test_unknown_field_rejected() {
    let _ = small_matrix(
        "
  - chart: cpi
    template: templates/service-account.yaml
    kind: ServiceAccount
    entries:
      - kubeVersion: \"1.21\"
        imagez: [\"foo:v1\"]
",
    )
    .unwrap_err();
}

#[rstest]
fn test_key_display() {
    let key = ScenarioKey::new(CSI_CHART, CSI_CONTROLLER_TEMPLATE, v1_23()).with_flag(RESIZER_FLAG, "true");
    assert_eq!(
        key.to_string(),
        "csi/templates/controller/deployment.yaml @ kubernetes 1.23 [csiController.csiResizer.enabled=true]"
    );
    assert_eq!(key.without_flags().to_string(), "csi/templates/controller/deployment.yaml @ kubernetes 1.23");
}
