use anyhow::anyhow;
use vcm_core::prelude::*;

use crate::matrix_args::MatrixArgs;

#[derive(clap::Args)]
pub struct Args {
    #[command(flatten)]
    pub matrix: MatrixArgs,

    #[arg(long, long_help = "chart name from the matrix (e.g. cpi)")]
    pub chart: String,

    #[arg(short, long, long_help = "template path inside the chart (e.g. templates/daemonset.yaml)")]
    pub template: String,

    #[arg(short = 'k', long, long_help = "kubernetes version (e.g. 1.23)")]
    pub kube_version: PlatformVersion,

    #[arg(
        long = "flag",
        long_help = "feature flag that selects a variant, as key=value; may be repeated",
        value_parser = parse_flag,
    )]
    pub flags: Vec<(String, String)>,
}

impl Args {
    pub(crate) fn key(&self) -> ScenarioKey {
        self.flags
            .iter()
            .fold(ScenarioKey::new(&self.chart, &self.template, self.kube_version), |key, (k, v)| key.with_flag(k, v))
    }
}

pub fn cmd(args: &Args) -> EmptyResult {
    let matrix = args.matrix.load()?;
    let entry = matrix.lookup(&args.key())?;
    print!("{}", serde_yaml::to_string(entry)?);
    Ok(())
}

pub(crate) fn parse_flag(s: &str) -> anyhow::Result<(String, String)> {
    match s.split_once('=') {
        Some((k, v)) if !k.is_empty() => Ok((k.into(), v.into())),
        _ => Err(anyhow!("expected key=value, got {s:?}")),
    }
}
