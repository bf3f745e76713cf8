mod table;

use std::collections::{
    BTreeMap,
    BTreeSet,
};
use std::fmt;
use std::fs::File;
use std::path::{
    Path,
    PathBuf,
};

use lazy_static::lazy_static;
use serde::{
    Deserialize,
    Serialize,
};
use tracing::*;

use self::table::MatrixFile;
use crate::errors::*;
use crate::prelude::*;

const EMBEDDED_MATRIX_YAML: &str = include_str!("../../data/matrix.yaml");

err_impl! {MatrixError,
    #[error("duplicate matrix entry: {0}")]
    DuplicateEntry(ScenarioKey),

    #[error("no matrix entry for {0}")]
    EntryNotFound(ScenarioKey),

    #[error("invalid matrix entry: {0}")]
    InvalidEntry(String),

    #[error("unknown chart: {0}")]
    UnknownChart(String),
}

// BTreeMap so that lookup keys (and therefore scenario names) are stable
pub type FeatureFlags = BTreeMap<String, String>;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum ManifestKind {
    DaemonSet,
    Deployment,
    Secret,
    ServiceAccount,
}

impl ManifestKind {
    pub fn is_workload(&self) -> bool {
        matches!(self, ManifestKind::DaemonSet | ManifestKind::Deployment)
    }
}

impl fmt::Display for ManifestKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ManifestKind::DaemonSet => DAEMONSET_KIND,
                ManifestKind::Deployment => DEPLOYMENT_KIND,
                ManifestKind::Secret => SECRET_KIND,
                ManifestKind::ServiceAccount => SVC_ACCOUNT_KIND,
            }
        )
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ChartSpec {
    pub name: String,
    pub path: PathBuf,
    pub release_prefix: String,

    // Values the chart refuses to render without; each scenario gets a fresh random value
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub randomized_values: Vec<String>,
}

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioKey {
    pub chart: String,
    pub template: String,
    pub kube_version: PlatformVersion,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub feature_flags: FeatureFlags,
}

impl ScenarioKey {
    pub fn new(chart: &str, template: &str, kube_version: PlatformVersion) -> ScenarioKey {
        ScenarioKey {
            chart: chart.into(),
            template: template.into(),
            kube_version,
            feature_flags: FeatureFlags::new(),
        }
    }

    pub fn with_flag(mut self, name: &str, value: &str) -> ScenarioKey {
        self.feature_flags.insert(name.into(), value.into());
        self
    }

    pub fn without_flags(&self) -> ScenarioKey {
        ScenarioKey { feature_flags: FeatureFlags::new(), ..self.clone() }
    }
}

impl fmt::Display for ScenarioKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{} @ kubernetes {}", self.chart, self.template, self.kube_version)?;
        if !self.feature_flags.is_empty() {
            let flags: Vec<_> = self.feature_flags.iter().map(|(k, v)| format!("{k}={v}")).collect();
            write!(f, " [{}]", flags.join(", "))?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ExpectedArgs {
    pub container: String,
    pub args: Vec<String>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityEntry {
    #[serde(flatten)]
    pub key: ScenarioKey,
    pub kind: ManifestKind,

    // Fixed `--set` overrides that aren't feature flags (e.g., credentials for the secret)
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub values: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub expected_images: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_args: Option<ExpectedArgs>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub expected_data_keys: Vec<String>,

    // Other manifests from the same chart that have to meet the same expectations
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra_templates: Vec<String>,
}

impl CompatibilityEntry {
    pub fn templates(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.key.template.as_str()).chain(self.extra_templates.iter().map(String::as_str))
    }
}

#[derive(Clone, Debug, Default)]
pub struct CompatibilityMatrix {
    charts: BTreeMap<String, ChartSpec>,
    entries: BTreeMap<ScenarioKey, CompatibilityEntry>,
}

impl CompatibilityMatrix {
    pub fn embedded() -> anyhow::Result<&'static CompatibilityMatrix> {
        EMBEDDED_MATRIX.as_ref().map_err(|err| anyhow!("embedded compatibility matrix is invalid: {err}"))
    }

    pub fn load(path: &Path) -> anyhow::Result<CompatibilityMatrix> {
        info!("loading compatibility matrix from {}", path.display());
        let file: MatrixFile = serde_yaml::from_reader(File::open(path)?)?;
        file.expand()
    }

    pub fn from_yaml(data: &str) -> anyhow::Result<CompatibilityMatrix> {
        let file: MatrixFile = serde_yaml::from_str(data)?;
        file.expand()
    }

    pub fn lookup(&self, key: &ScenarioKey) -> anyhow::Result<&CompatibilityEntry> {
        self.entries.get(key).ok_or_else(|| MatrixError::entry_not_found(key))
    }

    pub fn chart(&self, name: &str) -> anyhow::Result<&ChartSpec> {
        self.charts.get(name).ok_or_else(|| MatrixError::unknown_chart(name))
    }

    pub fn charts(&self) -> impl Iterator<Item = &ChartSpec> {
        self.charts.values()
    }

    pub fn entries(&self) -> impl Iterator<Item = &CompatibilityEntry> {
        self.entries.values()
    }

    pub fn versions(&self, chart: &str) -> BTreeSet<PlatformVersion> {
        self.entries.keys().filter(|k| k.chart == chart).map(|k| k.kube_version).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert_chart(&mut self, chart: ChartSpec) -> EmptyResult {
        if self.charts.contains_key(&chart.name) {
            return Err(MatrixError::invalid_entry(&format!("chart {} declared twice", chart.name)));
        }
        self.charts.insert(chart.name.clone(), chart);
        Ok(())
    }

    fn insert_entry(&mut self, entry: CompatibilityEntry) -> EmptyResult {
        if !self.charts.contains_key(&entry.key.chart) {
            return Err(MatrixError::unknown_chart(&entry.key.chart));
        }

        if self.entries.contains_key(&entry.key) {
            return Err(MatrixError::duplicate_entry(&entry.key));
        }
        self.entries.insert(entry.key.clone(), entry);
        Ok(())
    }
}

lazy_static! {
    static ref EMBEDDED_MATRIX: anyhow::Result<CompatibilityMatrix> =
        CompatibilityMatrix::from_yaml(EMBEDDED_MATRIX_YAML);
}
