#![cfg_attr(coverage, feature(coverage_attribute))]
mod check;
mod list;
mod lookup;
mod matrix_args;

use clap::{
    Parser,
    Subcommand,
    crate_version,
};
use vcm_core::logging;
use vcm_core::prelude::*;

#[derive(Parser)]
#[command(
    about = "check rendered vSphere CPI/CSI charts against the version compatibility matrix",
    version,
    propagate_version = true
)]
struct VcmCommandRoot {
    #[command(subcommand)]
    subcommand: VcmSubcommand,

    #[arg(short, long, default_value = "warn")]
    verbosity: String,
}

#[derive(Subcommand)]
enum VcmSubcommand {
    #[command(about = "render the charts and check them against the matrix", visible_alias = "c")]
    Check(check::Args),

    #[command(about = "print the compatibility matrix", visible_aliases = &["ls", "l"])]
    List(list::Args),

    #[command(about = "print the expected images and args for one scenario")]
    Lookup(lookup::Args),

    #[command(about = "vcmctl version")]
    Version,
}

#[tokio::main]
async fn main() -> EmptyResult {
    let args = VcmCommandRoot::parse();
    logging::setup_for_cli(&args.verbosity);

    match &args.subcommand {
        VcmSubcommand::Check(args) => check::cmd(args).await,
        VcmSubcommand::List(args) => list::cmd(args),
        VcmSubcommand::Lookup(args) => lookup::cmd(args),
        VcmSubcommand::Version => {
            println!("vcmctl {}", crate_version!());
            Ok(())
        },
    }
}

#[cfg(test)]
mod tests;
