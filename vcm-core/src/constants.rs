// Chart layout
pub const DEFAULT_CHART_ROOT: &str = ".";
pub const DEFAULT_HELM_BIN: &str = "helm";

// Scenario naming
pub const UNIQUE_ID_LEN: usize = 6;

// Concurrency
pub const DEFAULT_PARALLELISM: usize = 4;

// Kinds
pub const DAEMONSET_KIND: &str = "DaemonSet";
pub const DEPLOYMENT_KIND: &str = "Deployment";
pub const SECRET_KIND: &str = "Secret";
pub const SVC_ACCOUNT_KIND: &str = "ServiceAccount";
