#![cfg_attr(coverage, feature(coverage_attribute))]
pub mod artifact;
pub mod constants;
pub mod errors;
pub mod logging;
pub mod matrix;
pub mod render;
pub mod scenario;
pub mod validator;
pub mod version;

pub mod prelude {
    pub use k8s_openapi::api::apps::v1 as appsv1;
    pub use k8s_openapi::api::core::v1 as corev1;

    pub use crate::artifact::RenderedArtifact;
    pub use crate::constants::*;
    pub use crate::errors::EmptyResult;
    pub use crate::matrix::{
        ChartSpec,
        CompatibilityEntry,
        CompatibilityMatrix,
        ExpectedArgs,
        FeatureFlags,
        ManifestKind,
        ScenarioKey,
    };
    pub use crate::render::{
        HelmRenderer,
        RenderRequest,
        Renderer,
    };
    pub use crate::scenario::{
        Scenario,
        ScenarioFilter,
    };
    pub use crate::validator::{
        CheckResult,
        MatrixValidator,
        Mismatch,
        Outcome,
        RunSummary,
    };
    pub use crate::version::PlatformVersion;
}

#[cfg(test)]
mod tests;
