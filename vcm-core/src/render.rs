use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
#[cfg(any(test, feature = "mock"))]
use mockall::automock;
use tokio::process::Command;
use tracing::*;

use crate::errors::*;
use crate::prelude::*;

err_impl! {RenderError,
    #[error("could not render chart: {0}")]
    RenderFailure(String),

    #[error("could not decode rendered document: {0}")]
    UndecodableDocument(String),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RenderRequest {
    pub chart_path: PathBuf,
    pub release_name: String,
    pub namespace: String,
    pub template: String,
    pub overrides: BTreeMap<String, String>,
    pub kube_version: PlatformVersion,
}

// Rendering is treated as a pure function of the request, so nothing upstream retries it
#[cfg_attr(any(test, feature = "mock"), automock)]
#[async_trait]
pub trait Renderer: Send + Sync {
    async fn render(&self, req: &RenderRequest) -> anyhow::Result<String>;
}

#[derive(Clone, Debug)]
pub struct HelmRenderer {
    helm_bin: String,
}

impl HelmRenderer {
    pub fn new(helm_bin: &str) -> HelmRenderer {
        HelmRenderer { helm_bin: helm_bin.into() }
    }

    pub fn args(req: &RenderRequest) -> Vec<String> {
        let mut args = vec![
            "template".into(),
            req.release_name.clone(),
            req.chart_path.to_string_lossy().into_owned(),
            "--namespace".into(),
            req.namespace.clone(),
        ];
        for (k, v) in &req.overrides {
            args.push("--set".into());
            args.push(format!("{k}={v}"));
        }
        args.extend(["--show-only".into(), req.template.clone()]);
        args.extend(["--kube-version".into(), req.kube_version.to_string()]);
        args
    }
}

impl Default for HelmRenderer {
    fn default() -> HelmRenderer {
        HelmRenderer::new(DEFAULT_HELM_BIN)
    }
}

#[async_trait]
impl Renderer for HelmRenderer {
    async fn render(&self, req: &RenderRequest) -> anyhow::Result<String> {
        let args = HelmRenderer::args(req);
        debug!("running `{} {}`", self.helm_bin, args.join(" "));

        let output = Command::new(&self.helm_bin)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|err| RenderError::render_failure(&format!("could not run {}: {err}", self.helm_bin)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RenderError::render_failure(&format!(
                "{} exited with {}: {}",
                self.helm_bin,
                output.status,
                stderr.trim()
            )));
        }

        let document = String::from_utf8(output.stdout)
            .map_err(|err| RenderError::undecodable_document(&format!("output is not utf-8: {err}")))?;
        if document.trim().is_empty() {
            let msg = format!("{} produced no output for {}", self.helm_bin, req.template);
            return Err(RenderError::render_failure(&msg));
        }

        Ok(document)
    }
}
