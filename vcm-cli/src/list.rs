use std::io::Write;

use clap::{
    ValueEnum,
    value_parser,
};
use vcm_core::prelude::*;

use crate::matrix_args::MatrixArgs;

#[derive(Clone, Debug, ValueEnum)]
pub enum PrintFormat {
    Json,
    List,
    Table,
    Yaml,
}

#[derive(clap::Args)]
pub struct Args {
    #[command(flatten)]
    pub matrix: MatrixArgs,

    #[arg(
        short,
        long,
        long_help = "format to display the matrix entries",
        default_value = "list",
        value_parser = value_parser!(PrintFormat),
    )]
    pub format: PrintFormat,
}

pub fn cmd(args: &Args) -> EmptyResult {
    let matrix = args.matrix.load()?;
    print(&matrix, &args.format, &mut std::io::stdout().lock())
}

pub(crate) fn print(matrix: &CompatibilityMatrix, format: &PrintFormat, out: &mut impl Write) -> EmptyResult {
    let entries: Vec<_> = matrix.entries().collect();
    match format {
        PrintFormat::Json => writeln!(out, "{}", serde_json::to_string(&entries)?)?,
        PrintFormat::List => print_list(&entries, out)?,
        PrintFormat::Table => print_table(&entries, out)?,
        PrintFormat::Yaml => write!(out, "{}", serde_yaml::to_string(&entries)?)?,
    }

    Ok(())
}

fn print_list(entries: &[&CompatibilityEntry], out: &mut impl Write) -> EmptyResult {
    for entry in entries {
        writeln!(out, "{} ({})", entry.key, entry.kind)?;
        for image in &entry.expected_images {
            writeln!(out, "    {image}")?;
        }
    }
    Ok(())
}

fn print_table(entries: &[&CompatibilityEntry], out: &mut impl Write) -> EmptyResult {
    writeln!(out, "| chart | template | kubernetes | flags | images |")?;
    writeln!(out, "|---|---|---|---|---|")?;
    for entry in entries {
        let flags: Vec<_> = entry.key.feature_flags.iter().map(|(k, v)| format!("{k}={v}")).collect();
        writeln!(
            out,
            "| {} | {} | {} | {} | {} |",
            entry.key.chart,
            entry.key.template,
            entry.key.kube_version,
            flags.join(", "),
            entry.expected_images.join(", "),
        )?;
    }
    Ok(())
}
