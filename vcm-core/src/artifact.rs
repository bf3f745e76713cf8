use serde::de::DeserializeOwned;
use serde::{
    Deserialize,
    Serialize,
};

use crate::prelude::*;
use crate::render::RenderError;

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct RenderedContainer {
    pub name: String,
    pub image: Option<String>,
    pub args: Vec<String>,
}

// The parts of a rendered manifest that the matrix has opinions about.  Built fresh for every
// check and thrown away afterwards.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct RenderedArtifact {
    pub namespace: Option<String>,
    pub containers: Vec<RenderedContainer>,
    pub data_keys: Vec<String>,
}

impl RenderedArtifact {
    pub fn decode(kind: ManifestKind, document: &str) -> anyhow::Result<RenderedArtifact> {
        Ok(match kind {
            ManifestKind::DaemonSet => RenderedArtifact::from(decode::<appsv1::DaemonSet>(document)?),
            ManifestKind::Deployment => RenderedArtifact::from(decode::<appsv1::Deployment>(document)?),
            ManifestKind::Secret => RenderedArtifact::from(decode::<corev1::Secret>(document)?),
            ManifestKind::ServiceAccount => RenderedArtifact::from(decode::<corev1::ServiceAccount>(document)?),
        })
    }

    pub fn images(&self) -> Vec<String> {
        self.containers.iter().map(|c| c.image.clone().unwrap_or_default()).collect()
    }

    pub fn container(&self, name: &str) -> Option<&RenderedContainer> {
        self.containers.iter().find(|c| c.name == name)
    }

    fn from_pod_template(namespace: Option<String>, template: Option<&corev1::PodTemplateSpec>) -> RenderedArtifact {
        let containers = template
            .and_then(|t| t.spec.as_ref())
            .map(|spec| spec.containers.iter().map(RenderedContainer::from).collect())
            .unwrap_or_default();

        RenderedArtifact { namespace, containers, ..Default::default() }
    }
}

impl From<&corev1::Container> for RenderedContainer {
    fn from(c: &corev1::Container) -> RenderedContainer {
        RenderedContainer {
            name: c.name.clone(),
            image: c.image.clone(),
            args: c.args.clone().unwrap_or_default(),
        }
    }
}

impl From<appsv1::DaemonSet> for RenderedArtifact {
    fn from(ds: appsv1::DaemonSet) -> RenderedArtifact {
        RenderedArtifact::from_pod_template(ds.metadata.namespace, ds.spec.as_ref().map(|s| &s.template))
    }
}

impl From<appsv1::Deployment> for RenderedArtifact {
    fn from(depl: appsv1::Deployment) -> RenderedArtifact {
        RenderedArtifact::from_pod_template(depl.metadata.namespace, depl.spec.as_ref().map(|s| &s.template))
    }
}

impl From<corev1::Secret> for RenderedArtifact {
    fn from(secret: corev1::Secret) -> RenderedArtifact {
        // Only .data counts; a chart that renders stringData alone is reported as having no data
        let data_keys = secret.data.iter().flat_map(|d| d.keys()).cloned().collect();

        RenderedArtifact {
            namespace: secret.metadata.namespace,
            data_keys,
            ..Default::default()
        }
    }
}

impl From<corev1::ServiceAccount> for RenderedArtifact {
    fn from(sa: corev1::ServiceAccount) -> RenderedArtifact {
        RenderedArtifact { namespace: sa.metadata.namespace, ..Default::default() }
    }
}

// `helm template --show-only` prefixes everything with `---` and a `# Source:` comment, and a
// template can produce more than one document; we only care about the first real one.
pub fn decode<K: DeserializeOwned>(document: &str) -> anyhow::Result<K> {
    for doc in serde_yaml::Deserializer::from_str(document) {
        let value = serde_yaml::Value::deserialize(doc)
            .map_err(|err| RenderError::undecodable_document(&err.to_string()))?;
        if value.is_null() {
            continue;
        }
        return serde_yaml::from_value(value).map_err(|err| RenderError::undecodable_document(&err.to_string()));
    }

    Err(RenderError::undecodable_document("no YAML documents found"))
}
