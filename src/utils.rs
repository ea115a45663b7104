use super::{Cell, COMMENT};
use crate::error::GraphError;
use std::fs;
use std::path::{Path, PathBuf};

/// The input suffix selecting the files of one pass
/// and the suffix of the chart written for each of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuffixPair {
    pub input: &'static str,
    pub output: &'static str,
}

/// An input file and the html file derived from it.
/// The existence of the output is the only state kept between runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePair {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl FilePair {
    /// Derive the output in the same directory,
    /// substituting the trailing input suffix with the output suffix.
    pub fn new<P>(input: P, suffixes: SuffixPair) -> FilePair
    where
        P: AsRef<Path>,
    {
        let input = input.as_ref().to_path_buf();
        let name = file_name(&input);
        let stem = name.strip_suffix(suffixes.input).unwrap_or(name.as_str());
        let output = input.with_file_name(format!("{}{}", stem, suffixes.output));
        FilePair { input, output }
    }

    pub fn is_rendered(&self) -> bool {
        self.output.exists()
    }

    pub fn input_name(&self) -> String {
        file_name(&self.input)
    }
}

/// File name with extension, as shown in the progress lines and used as chart title.
pub fn file_name(p: &Path) -> String {
    p.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// List the regular files directly in dir whose name ends with suffix, sorted by name.
/// Names that are not valid unicode cannot match a suffix and are left out.
pub fn find_files<P>(dir: P, suffix: &str) -> Result<Vec<PathBuf>, GraphError>
where
    P: AsRef<Path>,
{
    let dir = dir.as_ref();
    let entries = fs::read_dir(dir).map_err(|e| GraphError::io(dir, e))?;
    let mut files: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| GraphError::io(dir, e))?;
        let path = entry.path();
        let matches = match entry.file_name().to_str() {
            Some(name) => name.ends_with(suffix),
            None => false,
        };
        if matches && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Comment lines start with the comment marker after optional leading whitespace.
pub fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with(COMMENT)
}

/// Drop the comment and blank lines, keep everything else (line endings normalized to \n).
pub fn strip_comments(text: &str) -> String {
    let mut kept = String::with_capacity(text.len());
    for l in text
        .lines()
        .filter(|l| !is_comment(l) && !l.trim().is_empty())
    {
        kept.push_str(l);
        kept.push('\n');
    }
    kept
}

/// Numbers become numbers, empty fields are missing, anything else stays text.
pub fn parse_cell(field: &str) -> Cell {
    let field = field.trim();
    if field.is_empty() {
        return Cell::Missing;
    }
    match field.parse::<f64>() {
        Ok(v) => Cell::Number(v),
        Err(_) => Cell::Text(field.to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SUFFIX_PAIRS;
    use std::fs;

    #[test]
    fn output_name_replaces_only_the_trailing_suffix() {
        let pair = FilePair::new("runs/a.csv.csv", SUFFIX_PAIRS[0]);
        assert_eq!(pair.output, PathBuf::from("runs/a.csv.html"));
        let pair = FilePair::new("Rec_1_KCC.log", SUFFIX_PAIRS[1]);
        assert_eq!(pair.output, PathBuf::from("Rec_1_KCC.html"));
        assert_eq!(pair.input_name(), "Rec_1_KCC.log");
    }

    #[test]
    fn find_files_by_suffix_only_at_top_level() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.csv"), "t,a\n").unwrap();
        fs::write(dir.path().join("a.csv"), "t,a\n").unwrap();
        fs::write(dir.path().join("a.csv.bak"), "t,a\n").unwrap();
        fs::write(dir.path().join("c.log"), "t,a\n").unwrap();
        fs::create_dir(dir.path().join("sub.csv")).unwrap();
        fs::write(dir.path().join("sub.csv").join("d.csv"), "t,a\n").unwrap();
        let found = find_files(dir.path(), ".csv").unwrap();
        let names: Vec<String> = found.iter().map(|p| file_name(p)).collect();
        assert_eq!(names, vec!["a.csv", "b.csv"]);
    }

    #[test]
    fn find_files_missing_dir_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = find_files(dir.path().join("nope"), ".csv").unwrap_err();
        assert!(matches!(err, GraphError::Io { .. }));
    }

    #[test]
    fn comments_with_leading_whitespace() {
        assert!(is_comment("#caption"));
        assert!(is_comment("   # indented"));
        assert!(!is_comment("1,#2"));
        assert_eq!(strip_comments("#id\nt,a\n  #x\n0,1\r\n"), "t,a\n0,1\n");
        assert_eq!(strip_comments("t,a\n0,1\n   \n1,2\n"), "t,a\n0,1\n1,2\n");
    }

    #[test]
    fn cells() {
        assert_eq!(parse_cell(" 1.5 "), Cell::Number(1.5));
        assert_eq!(parse_cell("-3"), Cell::Number(-3.));
        assert_eq!(parse_cell(""), Cell::Missing);
        assert_eq!(parse_cell("   "), Cell::Missing);
        assert_eq!(parse_cell("idle"), Cell::Text(String::from("idle")));
    }
}
