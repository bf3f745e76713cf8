pub const TEST_NAMESPACE: &str = "cpitest-abc123";
pub const TEST_OTHER_NAMESPACE: &str = "cpitest-def456";
pub const TEST_RELEASE_NAME: &str = "cpitest-789xyz";
pub const TEST_CHART_ROOT: &str = "/charts-repo";

pub const CPI_CHART: &str = "cpi";
pub const CSI_CHART: &str = "csi";

pub const CPI_DAEMONSET_TEMPLATE: &str = "templates/daemonset.yaml";
pub const CPI_SECRET_TEMPLATE: &str = "templates/secret.yaml";
pub const CPI_SVC_ACCOUNT_TEMPLATE: &str = "templates/service-account.yaml";
pub const CSI_NODE_TEMPLATE: &str = "templates/node/daemonset.yaml";
pub const CSI_WINDOWS_NODE_TEMPLATE: &str = "templates/node/windows-daemonset.yaml";
pub const CSI_CONTROLLER_TEMPLATE: &str = "templates/controller/deployment.yaml";

pub const CPI_MANAGER_CONTAINER: &str = "vsphere-cloud-controller-manager";
pub const CPI_MANAGER_IMAGE_1_23: &str = "rancher/mirrored-cloud-provider-vsphere-cpi-release-manager:v1.23.3";
pub const CPI_MANAGER_ARGS: [&str; 3] = ["--cloud-provider=vsphere", "--v=2", "--cloud-config=/etc/cloud/vsphere.conf"];

pub const CSI_NODE_IMAGES_1_23: [&str; 2] = [
    "rancher/mirrored-sig-storage-csi-node-driver-registrar:v2.5.0",
    "rancher/mirrored-cloud-provider-vsphere-csi-release-driver:v2.5.1",
];
pub const CSI_CONTROLLER_IMAGES_1_23: [&str; 3] = [
    "rancher/mirrored-sig-storage-csi-attacher:v3.4.0",
    "rancher/mirrored-cloud-provider-vsphere-csi-release-driver:v2.5.1",
    "rancher/mirrored-sig-storage-csi-provisioner:v3.1.0",
];
pub const CSI_RESIZER_IMAGE_1_23: &str = "rancher/mirrored-sig-storage-csi-resizer:v1.4.0";

pub const RESIZER_FLAG: &str = "csiController.csiResizer.enabled";
pub const WINDOWS_FLAG: &str = "csiWindowsSupport.enabled";
