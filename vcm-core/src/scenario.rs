use std::collections::BTreeMap;
use std::path::{
    Path,
    PathBuf,
};

use uuid::Uuid;

use crate::prelude::*;

// One concrete check: a matrix key plus everything that has to be unique per render.  The
// namespace and release name are randomized so that scenarios can share a rendering context
// without stepping on each other; they don't affect what the matrix expects.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Scenario {
    pub name: String,
    pub key: ScenarioKey,
    pub chart_path: PathBuf,
    pub namespace: String,
    pub release_name: String,
    pub overrides: BTreeMap<String, String>,
}

impl Scenario {
    pub fn new(entry: &CompatibilityEntry, chart: &ChartSpec, chart_root: &Path) -> Scenario {
        let mut overrides: BTreeMap<String, String> =
            chart.randomized_values.iter().map(|k| (k.clone(), unique_id())).collect();
        overrides.extend(entry.values.iter().map(|(k, v)| (k.clone(), v.clone())));
        overrides.extend(entry.key.feature_flags.iter().map(|(k, v)| (k.clone(), v.clone())));

        Scenario {
            name: entry.key.to_string(),
            key: entry.key.clone(),
            chart_path: chart_root.join(&chart.path),
            namespace: format!("{}-{}", chart.release_prefix, unique_id()),
            release_name: format!("{}-{}", chart.release_prefix, unique_id()),
            overrides,
        }
    }

    pub fn render_request(&self, template: &str) -> RenderRequest {
        RenderRequest {
            chart_path: self.chart_path.clone(),
            release_name: self.release_name.clone(),
            namespace: self.namespace.clone(),
            template: template.into(),
            overrides: self.overrides.clone(),
            kube_version: self.key.kube_version,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ScenarioFilter {
    pub chart: Option<String>,
    pub template: Option<String>,
    pub kube_version: Option<PlatformVersion>,
}

impl ScenarioFilter {
    pub fn matches(&self, key: &ScenarioKey) -> bool {
        self.chart.as_ref().is_none_or(|c| *c == key.chart)
            && self.template.as_ref().is_none_or(|t| *t == key.template)
            && self.kube_version.is_none_or(|v| v == key.kube_version)
    }

    pub fn select<'a>(&self, matrix: &'a CompatibilityMatrix) -> impl Iterator<Item = &'a CompatibilityEntry> {
        matrix.entries().filter(|e| self.matches(&e.key))
    }

    pub fn scenarios(&self, matrix: &CompatibilityMatrix, chart_root: &Path) -> anyhow::Result<Vec<Scenario>> {
        self.select(matrix)
            .map(|entry| Ok(Scenario::new(entry, matrix.chart(&entry.key.chart)?, chart_root)))
            .collect()
    }
}

// Kubernetes names have to be lowercase, and the simple uuid format is already lowercase hex
fn unique_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(UNIQUE_ID_LEN);
    id
}
