use crate::error::{ReportError, Result};
use log::info;
use std::path::Path;

/// Metadata keys copied from the header file, in match priority order.
pub const HEADER_KEYS: [&str; 9] = [
    "Version",
    "Nome_do_sujeito",
    "Nome_da_sessao",
    "Data_Inicio",
    "Hora_Inicio",
    "Data_Termino",
    "Hora_Termino",
    "Duration",
    "Resultado",
];

fn is_header_line(line: &str) -> bool {
    HEADER_KEYS.iter().any(|key| {
        line.strip_prefix(key)
            .is_some_and(|rest| rest.starts_with(':'))
    })
}

/// Keep lines of the form `Key:value` for the known keys, preserving order and text.
pub fn parse_header_lines(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| is_header_line(line))
        .map(str::to_string)
        .collect()
}

/// Read the metadata file and extract its header lines.
pub fn read_header_lines(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path).map_err(|source| ReportError::ReadHeader {
        path: path.to_path_buf(),
        source,
    })?;
    let lines = parse_header_lines(&text);
    info!("extracted {} header line(s) from {}", lines.len(), path.display());
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn keeps_known_keys_in_order() {
        let text = "Version:2.1\r\njunk line\nNome_do_sujeito: Ana\n\nResultado:ok\nDuration:00:10:00\n";
        let lines = parse_header_lines(text);
        assert_eq!(
            lines,
            vec![
                "Version:2.1",
                "Nome_do_sujeito: Ana",
                "Resultado:ok",
                "Duration:00:10:00"
            ]
        );
    }

    #[test]
    fn requires_colon_directly_after_key() {
        let text = "Version 2\nVersionX:1\nDuration :5\n Version:3\nHora_Inicio:10:00\n";
        assert_eq!(parse_header_lines(text), vec!["Hora_Inicio:10:00"]);
    }

    #[test]
    fn line_matching_is_not_duplicated() {
        let lines = parse_header_lines("Data_Inicio:01/02/2024\n");
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn missing_file_is_a_header_error() {
        let dir = tempdir().unwrap();
        let err = read_header_lines(&dir.path().join("absent.txt")).unwrap_err();
        assert!(matches!(err, ReportError::ReadHeader { .. }));
        assert!(err.to_string().starts_with("reading header"));
    }

    #[test]
    fn invalid_utf8_is_a_header_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("header.txt");
        fs::write(&path, [0x56, 0xff, 0xfe, 0x3a]).unwrap();
        assert!(matches!(
            read_header_lines(&path),
            Err(ReportError::ReadHeader { .. })
        ));
    }
}
