use std::collections::BTreeMap;

use serde::Deserialize;

use super::*;

// On-disk layout of the matrix.  Each manifest lists one default entry per kubernetes version,
// and each of those can carry a handful of feature-flag variants; `expand` flattens all of that
// into one authoritative CompatibilityEntry per ScenarioKey.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(super) struct MatrixFile {
    charts: Vec<ChartSpec>,
    manifests: Vec<ManifestTable>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ManifestTable {
    chart: String,
    template: String,
    kind: ManifestKind,

    // Applies to every entry below unless the entry has its own
    #[serde(default)]
    args: Option<ExpectedArgs>,

    entries: Vec<EntryTable>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct EntryTable {
    kube_version: PlatformVersion,

    #[serde(default)]
    images: Vec<String>,

    #[serde(default)]
    args: Option<ExpectedArgs>,

    #[serde(default)]
    values: BTreeMap<String, String>,

    #[serde(default)]
    data_keys: Vec<String>,

    #[serde(default)]
    variants: Vec<VariantTable>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct VariantTable {
    flags: FeatureFlags,

    #[serde(default)]
    insert_images: Vec<Insertion>,

    #[serde(default)]
    insert_args: Vec<Insertion>,

    #[serde(default)]
    extra_templates: Vec<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Insertion {
    at: usize,
    value: String,
}

impl MatrixFile {
    pub(super) fn expand(self) -> anyhow::Result<CompatibilityMatrix> {
        let mut matrix = CompatibilityMatrix::default();
        for chart in self.charts {
            matrix.insert_chart(chart)?;
        }

        for manifest in self.manifests {
            for entry in &manifest.entries {
                let default = manifest.default_entry(entry)?;
                for variant in &entry.variants {
                    matrix.insert_entry(variant.apply(&default)?)?;
                }
                matrix.insert_entry(default)?;
            }
        }

        debug!("expanded compatibility matrix with {} entries", matrix.len());
        Ok(matrix)
    }
}

impl ManifestTable {
    fn default_entry(&self, entry: &EntryTable) -> anyhow::Result<CompatibilityEntry> {
        let key = ScenarioKey::new(&self.chart, &self.template, entry.kube_version);
        let expected_args = entry.args.clone().or_else(|| self.args.clone());

        if !self.kind.is_workload() && (!entry.images.is_empty() || expected_args.is_some()) {
            return Err(MatrixError::invalid_entry(&format!("{key}: {} has no containers to check", self.kind)));
        }
        if self.kind != ManifestKind::Secret && !entry.data_keys.is_empty() {
            return Err(MatrixError::invalid_entry(&format!("{key}: data keys are only checked on secrets")));
        }

        Ok(CompatibilityEntry {
            key,
            kind: self.kind,
            values: entry.values.clone(),
            expected_images: entry.images.clone(),
            expected_args,
            expected_data_keys: entry.data_keys.clone(),
            extra_templates: vec![],
        })
    }
}

impl VariantTable {
    fn apply(&self, default: &CompatibilityEntry) -> anyhow::Result<CompatibilityEntry> {
        let mut entry = default.clone();
        entry.key.feature_flags = self.flags.clone();
        if self.flags.is_empty() {
            return Err(MatrixError::invalid_entry(&format!("{}: variant without feature flags", default.key)));
        }

        for ins in &self.insert_images {
            insert_at(&mut entry.expected_images, ins, &entry.key)?;
        }

        if !self.insert_args.is_empty() {
            let Some(expected_args) = entry.expected_args.as_mut() else {
                return Err(MatrixError::invalid_entry(&format!("{}: no args to insert into", entry.key)));
            };
            for ins in &self.insert_args {
                insert_at(&mut expected_args.args, ins, &entry.key)?;
            }
        }

        entry.extra_templates.extend(self.extra_templates.iter().cloned());
        Ok(entry)
    }
}

fn insert_at(list: &mut Vec<String>, ins: &Insertion, key: &ScenarioKey) -> EmptyResult {
    if ins.at > list.len() {
        return Err(MatrixError::invalid_entry(&format!(
            "{key}: cannot insert {} at position {} (list has {} items)",
            ins.value,
            ins.at,
            list.len()
        )));
    }
    list.insert(ins.at, ins.value.clone());
    Ok(())
}
