mod summary;

use std::fmt;

use futures::{
    StreamExt,
    stream,
};
use tracing::*;

pub use self::summary::RunSummary;
use crate::prelude::*;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Mismatch {
    Namespace {
        template: String,
        expected: String,
        actual: Option<String>,
    },
    Images {
        template: String,
        expected: Vec<String>,
        actual: Vec<String>,
    },
    MissingContainer {
        template: String,
        container: String,
    },
    Args {
        template: String,
        container: String,
        expected: Vec<String>,
        actual: Vec<String>,
    },
    EmptyData {
        template: String,
    },
    MissingDataKeys {
        template: String,
        expected: Vec<String>,
        actual: Vec<String>,
    },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Mismatch::Namespace { template, expected, actual } => {
                write!(f, "{template}: expected namespace {expected}, got {}", actual.as_deref().unwrap_or("<none>"))
            },
            Mismatch::Images { template, expected, actual } => {
                write!(f, "{template}: expected images {expected:?}, got {actual:?}")
            },
            Mismatch::MissingContainer { template, container } => {
                write!(f, "{template}: container {container} not found")
            },
            Mismatch::Args { template, container, expected, actual } => {
                write!(f, "{template}: expected args {expected:?} for container {container}, got {actual:?}")
            },
            Mismatch::EmptyData { template } => write!(f, "{template}: secret has no data"),
            Mismatch::MissingDataKeys { template, expected, actual } => {
                write!(f, "{template}: expected data keys {expected:?}, got {actual:?}")
            },
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    Pass,
    Mismatch(Vec<Mismatch>),
}

impl Outcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Pass)
    }
}

// Lookup and render errors end up in `result`; a mismatch is a successful check with a bad outcome
#[derive(Debug)]
pub struct CheckResult {
    pub scenario: String,
    pub result: anyhow::Result<Outcome>,
}

pub struct MatrixValidator<'a, R> {
    matrix: &'a CompatibilityMatrix,
    renderer: R,
}

impl<'a, R: Renderer> MatrixValidator<'a, R> {
    pub fn new(matrix: &'a CompatibilityMatrix, renderer: R) -> MatrixValidator<'a, R> {
        MatrixValidator { matrix, renderer }
    }

    pub async fn validate(&self, scenario: &Scenario) -> anyhow::Result<Outcome> {
        let entry = self.matrix.lookup(&scenario.key)?;

        let mut mismatches = vec![];
        for template in entry.templates() {
            debug!("rendering {template} for {}", scenario.name);
            let document = self.renderer.render(&scenario.render_request(template)).await?;
            let artifact = RenderedArtifact::decode(entry.kind, &document)?;
            mismatches.extend(compare(entry, template, &scenario.namespace, &artifact));
        }

        if mismatches.is_empty() {
            Ok(Outcome::Pass)
        } else {
            Ok(Outcome::Mismatch(mismatches))
        }
    }

    // Scenarios don't share any state, so they can all be in flight at once; results come back
    // in the same order as the input so the report is stable from run to run.
    pub async fn check_all(&self, scenarios: &[Scenario], parallelism: usize) -> Vec<CheckResult> {
        info!("checking {} scenarios ({parallelism} at a time)", scenarios.len());
        stream::iter(scenarios)
            .map(|s| async move {
                let result = self.validate(s).await;
                match &result {
                    Ok(Outcome::Pass) => debug!("{}: pass", s.name),
                    Ok(Outcome::Mismatch(m)) => warn!("{}: {} mismatch(es)", s.name, m.len()),
                    Err(err) => error!("{}: {err}", s.name),
                }
                CheckResult { scenario: s.name.clone(), result }
            })
            .buffered(parallelism.max(1))
            .collect()
            .await
    }
}

// Images and args are compared as sequences, not sets: container order in the manifest is part of
// what the chart promises, and a silent reorder between versions should fail the check.
pub fn compare(
    entry: &CompatibilityEntry,
    template: &str,
    namespace: &str,
    artifact: &RenderedArtifact,
) -> Vec<Mismatch> {
    let mut mismatches = vec![];
    if artifact.namespace.as_deref() != Some(namespace) {
        mismatches.push(Mismatch::Namespace {
            template: template.into(),
            expected: namespace.into(),
            actual: artifact.namespace.clone(),
        });
    }

    match entry.kind {
        ManifestKind::DaemonSet | ManifestKind::Deployment => {
            let images = artifact.images();
            if images != entry.expected_images {
                mismatches.push(Mismatch::Images {
                    template: template.into(),
                    expected: entry.expected_images.clone(),
                    actual: images,
                });
            }

            if let Some(expected) = &entry.expected_args {
                match artifact.container(&expected.container) {
                    None => mismatches.push(Mismatch::MissingContainer {
                        template: template.into(),
                        container: expected.container.clone(),
                    }),
                    Some(c) if c.args != expected.args => mismatches.push(Mismatch::Args {
                        template: template.into(),
                        container: expected.container.clone(),
                        expected: expected.args.clone(),
                        actual: c.args.clone(),
                    }),
                    _ => (),
                }
            }
        },
        ManifestKind::Secret => {
            if artifact.data_keys.is_empty() {
                mismatches.push(Mismatch::EmptyData { template: template.into() });
            } else if !entry.expected_data_keys.iter().all(|k| artifact.data_keys.contains(k)) {
                mismatches.push(Mismatch::MissingDataKeys {
                    template: template.into(),
                    expected: entry.expected_data_keys.clone(),
                    actual: artifact.data_keys.clone(),
                });
            }
        },
        ManifestKind::ServiceAccount => (),
    }

    mismatches
}
