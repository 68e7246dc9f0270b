use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use log::info;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tlog_lib::{
    io::{header as header_io, timestamps as timestamps_io},
    pipeline::{process, run, JobFile, ReportPaths},
    report::Report,
};

#[derive(Parser)]
#[command(
    name = "tlog",
    version,
    about = "tlog: hit/miss and drag-drop reports from behavioral test logs"
)]
struct Cli {
    /// Logging verbosity (e.g., debug, info, warn)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Default)]
struct InputArgs {
    /// TOML job file with `header`, `data`, `timestamps` and `out` keys
    #[arg(long)]
    config: Option<PathBuf>,
    /// Header/metadata file
    #[arg(long)]
    header: Option<PathBuf>,
    /// Tab-delimited trial data file
    #[arg(long)]
    data: Option<PathBuf>,
    /// Tab-delimited event timestamps file
    #[arg(long)]
    timestamps: Option<PathBuf>,
}

impl InputArgs {
    /// Merge the job file (if any) with explicit flags, flags winning.
    fn job(&self, out: Option<PathBuf>) -> Result<JobFile> {
        let base = match &self.config {
            Some(path) => JobFile::load(path)?,
            None => JobFile::default(),
        };
        Ok(base.overridden_by(JobFile {
            header: self.header.clone(),
            data: self.data.clone(),
            timestamps: self.timestamps.clone(),
            out,
        }))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Correlate the three logs and write the text report
    Process {
        #[command(flatten)]
        inputs: InputArgs,
        /// Report destination (`.txt` appended when no extension is given)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print hit/miss and per-tipo totals as JSON without writing a report
    Summary {
        #[command(flatten)]
        inputs: InputArgs,
    },
    /// Print the drag/drop relation for each (block, trial) as JSON lines
    Relations {
        #[arg(long)]
        timestamps: PathBuf,
    },
    /// Print the recognized metadata lines of a header file
    Header {
        #[arg(long)]
        header: PathBuf,
    },
}

#[derive(Serialize)]
struct RelationLine<'a> {
    block: &'a str,
    trial: &'a str,
    relation: &'a str,
}

#[derive(Serialize)]
struct SummaryOutput<'a> {
    summary: &'a tlog_lib::metrics::summary::OutcomeSummary,
    tipos: &'a tlog_lib::metrics::summary::TipoSummary,
    rows: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(cli.log_level.as_str())).init();
    match cli.command {
        Commands::Process { inputs, out } => cmd_process(&inputs, out)?,
        Commands::Summary { inputs } => cmd_summary(&inputs)?,
        Commands::Relations { timestamps } => cmd_relations(&timestamps)?,
        Commands::Header { header } => cmd_header(&header)?,
    }
    Ok(())
}

fn cmd_process(inputs: &InputArgs, out: Option<PathBuf>) -> Result<()> {
    let paths = inputs.job(out)?.into_paths()?;
    info!("processing {:?}", paths);
    run(&paths).context("report run failed")?;
    println!("wrote report to {}", paths.out.display());
    Ok(())
}

fn cmd_summary(inputs: &InputArgs) -> Result<()> {
    let job = inputs.job(None)?;
    // summary never writes, so any job-file `out` is only a placeholder
    let paths = JobFile {
        out: Some(job.out.clone().unwrap_or_else(|| PathBuf::from("-"))),
        ..job
    }
    .into_paths()?;
    let report = process(&paths).context("report run failed")?;
    println!("{}", serde_json::to_string(&summary_output(&report))?);
    Ok(())
}

fn summary_output(report: &Report) -> SummaryOutput<'_> {
    SummaryOutput {
        summary: &report.summary,
        tipos: &report.tipos,
        rows: report.rows.len(),
    }
}

fn cmd_relations(path: &Path) -> Result<()> {
    let map = timestamps_io::read_relation_map(path)?;
    for (key, relation) in map.iter() {
        let line = RelationLine {
            block: &key.block,
            trial: &key.trial,
            relation,
        };
        println!("{}", serde_json::to_string(&line)?);
    }
    Ok(())
}

fn cmd_header(path: &Path) -> Result<()> {
    for line in header_io::read_header_lines(path)? {
        println!("{}", line);
    }
    Ok(())
}
