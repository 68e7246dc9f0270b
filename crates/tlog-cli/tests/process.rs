use assert_cmd::cargo::cargo_bin_cmd;
use std::{error::Error, fs, path::PathBuf};
use tempfile::tempdir;

#[test]
fn process_writes_report_sections() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let out = dir.path().join("report.txt");

    let mut cmd = cargo_bin_cmd!("tlog");
    cmd.args([
        "process",
        "--header",
        &sample_path("test_data/header_sample.txt"),
        "--data",
        &sample_path("test_data/data_sample.tsv"),
        "--timestamps",
        &sample_path("test_data/timestamps_sample.tsv"),
        "--out",
        out.to_str().expect("utf8 path"),
    ]);
    let stdout = cmd.assert().success().get_output().stdout.clone();
    assert!(String::from_utf8(stdout)?.starts_with("wrote report to"));

    let text = fs::read_to_string(&out)?;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Version:1.4.2");
    assert!(!text.contains("Comentario"));
    assert!(lines.contains(&"Hit Count: 3"));
    assert!(lines.contains(&"Miss Count: 1"));
    assert!(lines.contains(&"Hit Trial: 1, 1, 2"));
    assert!(lines.contains(&"Hit Block: 1, 2, 2"));
    assert!(lines.contains(&"Hit Percentage: 75.00%"));
    assert!(lines.contains(&"Miss Percentage: 25.00%"));
    assert!(lines.contains(&"Cor            2            0"));
    assert!(lines.contains(&"Forma            1            1"));
    assert!(lines.contains(&"1            1            Cor            Hit            Apple - Bowl"));
    assert!(lines.contains(&"1            2            Forma            Miss            Pear - Plate"));
    // malformed annotation and unknown key both leave the relation empty
    assert!(lines.contains(&"2            1            Cor            Hit            "));
    assert!(lines.contains(&"2            2            Forma            Hit            "));
    // a result other than Hit/Miss is listed but not tallied
    assert!(lines.contains(&"2            3            Arraste            Timeout            "));
    assert!(!lines.iter().any(|line| line.starts_with("Arraste            ")));
    assert!(!text.contains("Report.Timestamp"));
    Ok(())
}

#[test]
fn process_two_rows_is_even_split() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let out = dir.path().join("report");

    let mut cmd = cargo_bin_cmd!("tlog");
    cmd.args([
        "process",
        "--header",
        &sample_path("test_data/header_sample.txt"),
        "--data",
        &sample_path("test_data/data_two_rows.tsv"),
        "--timestamps",
        &sample_path("test_data/timestamps_sample.tsv"),
        "--out",
        out.to_str().expect("utf8 path"),
    ]);
    cmd.assert().success();

    let text = fs::read_to_string(dir.path().join("report.txt"))?;
    assert!(text.contains("Hit Count: 1\n"));
    assert!(text.contains("Miss Count: 1\n"));
    assert!(text.contains("Hit Percentage: 50.00%\n"));
    Ok(())
}

#[test]
fn missing_result_column_aborts_without_output() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let out = dir.path().join("report.txt");

    let mut cmd = cargo_bin_cmd!("tlog");
    cmd.args([
        "process",
        "--header",
        &sample_path("test_data/header_sample.txt"),
        "--data",
        &sample_path("test_data/data_missing_result.tsv"),
        "--timestamps",
        &sample_path("test_data/timestamps_sample.tsv"),
        "--out",
        out.to_str().expect("utf8 path"),
    ]);
    let stderr = cmd.assert().failure().get_output().stderr.clone();
    assert!(String::from_utf8(stderr)?.contains("missing column 'Result'"));
    assert!(!out.exists());
    Ok(())
}

#[test]
fn process_reads_job_file_with_flag_override() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let out = dir.path().join("from-job.txt");

    let mut cmd = cargo_bin_cmd!("tlog");
    cmd.args([
        "process",
        "--config",
        &sample_path("test_data/job_sample.toml"),
        "--data",
        &sample_path("test_data/data_two_rows.tsv"),
        "--out",
        out.to_str().expect("utf8 path"),
    ]);
    cmd.assert().success();
    let text = fs::read_to_string(&out)?;
    assert!(text.starts_with("Version:1.4.2\n"));
    assert!(text.contains("Hit Count: 1\n"));
    Ok(())
}

#[test]
fn process_requires_all_paths() -> Result<(), Box<dyn Error>> {
    let mut cmd = cargo_bin_cmd!("tlog");
    cmd.args([
        "process",
        "--config",
        &sample_path("test_data/job_sample.toml"),
    ]);
    let stderr = cmd.assert().failure().get_output().stderr.clone();
    assert!(String::from_utf8(stderr)?.contains("no output path given"));
    Ok(())
}

fn sample_path(relative: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root")
        .join(relative)
        .to_string_lossy()
        .to_string()
}
