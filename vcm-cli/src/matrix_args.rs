use std::path::PathBuf;

use vcm_core::prelude::*;

#[derive(clap::Args)]
pub struct MatrixArgs {
    #[arg(long, long_help = "compatibility matrix file to use instead of the built-in one")]
    pub matrix: Option<PathBuf>,
}

impl MatrixArgs {
    pub fn load(&self) -> anyhow::Result<CompatibilityMatrix> {
        match &self.matrix {
            Some(path) => CompatibilityMatrix::load(path),
            None => Ok(CompatibilityMatrix::embedded()?.clone()),
        }
    }
}
