use std::path::PathBuf;

use anyhow::{
    bail,
    ensure,
};
use tracing::*;
use vcm_core::prelude::*;

use crate::matrix_args::MatrixArgs;

#[derive(clap::Args)]
pub struct Args {
    #[command(flatten)]
    pub matrix: MatrixArgs,

    #[arg(long, long_help = "only check scenarios for this chart")]
    pub chart: Option<String>,

    #[arg(short = 'k', long, long_help = "only check scenarios for this kubernetes version (e.g. 1.23)")]
    pub kube_version: Option<PlatformVersion>,

    #[arg(short, long, long_help = "only check scenarios for this template (e.g. templates/daemonset.yaml)")]
    pub template: Option<String>,

    #[arg(
        long,
        long_help = "directory containing the charts listed in the matrix",
        default_value = DEFAULT_CHART_ROOT
    )]
    pub chart_root: PathBuf,

    #[arg(long, long_help = "helm binary used to render the charts", default_value = DEFAULT_HELM_BIN)]
    pub helm_bin: String,

    #[arg(
        short,
        long,
        long_help = "maximum number of charts to render at once",
        default_value_t = DEFAULT_PARALLELISM
    )]
    pub parallelism: usize,
}

impl Args {
    fn filter(&self) -> ScenarioFilter {
        ScenarioFilter {
            chart: self.chart.clone(),
            template: self.template.clone(),
            kube_version: self.kube_version,
        }
    }
}

pub async fn cmd(args: &Args) -> EmptyResult {
    let matrix = args.matrix.load()?;
    let summary = run(args, &matrix, HelmRenderer::new(&args.helm_bin)).await?;
    if !summary.is_success() {
        bail!("{} of {} scenarios failed", summary.mismatched + summary.errored, summary.total());
    }
    Ok(())
}

pub(crate) async fn run<R: Renderer>(
    args: &Args,
    matrix: &CompatibilityMatrix,
    renderer: R,
) -> anyhow::Result<RunSummary> {
    let scenarios = args.filter().scenarios(matrix, &args.chart_root)?;
    ensure!(!scenarios.is_empty(), "no matrix entries match the selected chart/template/version");
    info!("rendering charts from {}", args.chart_root.display());

    let validator = MatrixValidator::new(matrix, renderer);
    let results = validator.check_all(&scenarios, args.parallelism).await;
    for res in &results {
        match &res.result {
            Ok(Outcome::Pass) => (),
            Ok(Outcome::Mismatch(mismatches)) => {
                println!("FAIL {}", res.scenario);
                for m in mismatches {
                    println!("    {m}");
                }
            },
            Err(err) => println!("ERROR {}: {err:#}", res.scenario),
        }
    }

    let summary = RunSummary::new(&results);
    println!("{summary}");
    Ok(summary)
}
