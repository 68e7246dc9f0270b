use crate::error::{ReportError, Result};
use crate::io::{data, header, timestamps};
use crate::report::{write_report, Report};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// The three inputs and the report destination for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub header: PathBuf,
    pub data: PathBuf,
    pub timestamps: PathBuf,
    pub out: PathBuf,
}

/// Job file layout: any subset of the paths, completed from the command line.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobFile {
    #[serde(default)]
    pub header: Option<PathBuf>,
    #[serde(default)]
    pub data: Option<PathBuf>,
    #[serde(default)]
    pub timestamps: Option<PathBuf>,
    #[serde(default)]
    pub out: Option<PathBuf>,
}

impl JobFile {
    /// Load a TOML job file; relative paths resolve against its directory.
    pub fn load(path: &Path) -> Result<Self> {
        let config_err = |message: String| ReportError::Config {
            path: path.to_path_buf(),
            message,
        };
        let contents = fs::read_to_string(path).map_err(|e| config_err(e.to_string()))?;
        let mut job: JobFile = toml::from_str(&contents).map_err(|e| config_err(e.to_string()))?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        for slot in [
            &mut job.header,
            &mut job.data,
            &mut job.timestamps,
            &mut job.out,
        ] {
            if let Some(p) = slot.as_mut() {
                if p.is_relative() {
                    *p = base.join(&*p);
                }
            }
        }
        Ok(job)
    }

    /// Values set in `other` take precedence over this job file.
    pub fn overridden_by(self, other: JobFile) -> JobFile {
        JobFile {
            header: other.header.or(self.header),
            data: other.data.or(self.data),
            timestamps: other.timestamps.or(self.timestamps),
            out: other.out.or(self.out),
        }
    }

    /// Complete run paths, naming the first one still unset.
    pub fn into_paths(self) -> Result<ReportPaths> {
        let missing = |name: &'static str| ReportError::MissingPath { name };
        Ok(ReportPaths {
            header: self.header.ok_or_else(|| missing("header"))?,
            data: self.data.ok_or_else(|| missing("data"))?,
            timestamps: self.timestamps.ok_or_else(|| missing("timestamps"))?,
            out: with_default_extension(self.out.ok_or_else(|| missing("output"))?),
        })
    }
}

/// Append `.txt` when the report path has no extension.
pub fn with_default_extension(out: PathBuf) -> PathBuf {
    if out.extension().is_some() {
        out
    } else {
        out.with_extension("txt")
    }
}

/// Read all three inputs and build the report, stopping at the first failing stage.
pub fn process(paths: &ReportPaths) -> Result<Report> {
    let header = header::read_header_lines(&paths.header)?;
    let relations = timestamps::read_relation_map(&paths.timestamps)?;
    let rows = data::read_trial_rows(&paths.data, &relations)?;
    Ok(Report::new(header, rows))
}

/// Process the inputs and write the report to `paths.out`.
pub fn run(paths: &ReportPaths) -> Result<Report> {
    let report = process(paths)?;
    write_report(&paths.out, &report)?;
    Ok(report)
}
