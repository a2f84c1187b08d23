use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use super::model::{Excitation, ExcitationSet};
use crate::error::{Result, UvVisError};

// ---------------------------------------------------------------------------
// Line pattern
// ---------------------------------------------------------------------------

/// One TDDFT singlet line, e.g.
///
/// ```text
///  Excited State   1:      Singlet-A      3.0000 eV  413.33 nm  f=0.5000  <S**2>=0.000
/// ```
///
/// Captures the energy in eV and the oscillator strength. `.` does not match
/// a newline, so a record wrapped over two lines is never matched.
const SINGLET_PATTERN: &str = r"Excited State.*?Singlet.*?(\d+\.\d+)\s*eV.*?f=(\d+\.\d+)";

fn singlet_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(SINGLET_PATTERN).expect("singlet pattern is a valid regex"))
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Extract the singlet excitations of a log file.
///
/// The file is opened, read to the end and closed before returning.
pub fn extract_file(path: &Path) -> Result<ExcitationSet> {
    let file = File::open(path).map_err(|source| UvVisError::SourceNotFound {
        path: path.to_path_buf(),
        source,
    })?;

    let excitations = extract_reader(BufReader::new(file)).map_err(|e| match e {
        UvVisError::Io(source) => UvVisError::SourceNotFound {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;

    if excitations.is_empty() {
        log::warn!("No singlet excitations found in {}", path.display());
    } else {
        log::info!(
            "Extracted {} singlet excitation(s) from {}",
            excitations.len(),
            path.display()
        );
    }
    Ok(excitations)
}

/// Extract singlet excitations from any buffered text source, in line order.
///
/// Lines are decoded lossily: logs often carry titles or paths in a legacy
/// encoding, and those bytes never belong to a record.
pub fn extract_reader<R: BufRead>(mut reader: R) -> Result<ExcitationSet> {
    let mut excitations = Vec::new();
    let mut buf = Vec::new();
    let mut line_no = 0;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;
        let line = String::from_utf8_lossy(&buf);
        if let Some(ex) = parse_line(line.trim_end_matches(['\n', '\r']), line_no)? {
            excitations.push(ex);
        }
    }
    Ok(excitations)
}

/// Convenience wrapper over [`extract_reader`] for in-memory text.
pub fn extract_str(text: &str) -> Result<ExcitationSet> {
    extract_reader(text.as_bytes())
}

// ---------------------------------------------------------------------------
// Per-line parsing
// ---------------------------------------------------------------------------

/// Parse one line. `line_no` is 1-based and only used in diagnostics.
///
/// Returns `Ok(None)` for lines that do not match the pattern.
fn parse_line(line: &str, line_no: usize) -> Result<Option<Excitation>> {
    let Some(caps) = singlet_regex().captures(line) else {
        return Ok(None);
    };

    let malformed = || UvVisError::MalformedRecord {
        line: line_no,
        text: line.trim().to_string(),
    };
    let energy_ev: f64 = caps[1].parse().map_err(|_| malformed())?;
    let oscillator_strength: f64 = caps[2].parse().map_err(|_| malformed())?;

    if energy_ev <= 0.0 {
        return Err(UvVisError::NonPositiveEnergy {
            line: line_no,
            energy_ev,
        });
    }

    let ex = Excitation::from_energy(energy_ev, oscillator_strength);
    log::trace!(
        "line {line_no}: {energy_ev} eV -> {:.2} nm, f={oscillator_strength}",
        ex.wavelength_nm
    );
    Ok(Some(ex))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn single_gaussian_style_line() {
        let set = extract_str(
            "Excited State 1: Singlet-A 3.0000 eV 413.33 nm f=0.5000 <S**2>=0.000\n",
        )
        .unwrap();
        assert_eq!(set.len(), 1);
        assert_relative_eq!(set[0].wavelength_nm, 1240.0 / 3.0);
        assert_eq!(set[0].oscillator_strength, 0.5);
        assert_eq!(set[0].energy_ev, 3.0);
    }

    #[test]
    fn keeps_line_order_and_duplicates() {
        let text = "\
 Excited State   1:      Singlet-A      4.1000 eV  302.41 nm  f=0.0100  <S**2>=0.000
 junk line
 Excited State   2:      Singlet-A      2.5000 eV  495.94 nm  f=0.3000  <S**2>=0.000
 Excited State   3:      Singlet-A      2.5000 eV  495.94 nm  f=0.3000  <S**2>=0.000
";
        let set = extract_str(text).unwrap();
        let energies: Vec<f64> = set.iter().map(|e| e.energy_ev).collect();
        assert_eq!(energies, vec![4.1, 2.5, 2.5]);
    }

    #[test]
    fn skips_triplets_and_unrelated_lines() {
        let text = "\
 Excitation energies and oscillator strengths:
 Excited State   1:      Triplet-A      1.9000 eV  652.63 nm  f=0.0000  <S**2>=2.000
 Excited State   2:      Singlet-A      3.1000 eV  400.00 nm  f=0.1200  <S**2>=0.000
 SCF Done:  E(RB3LYP) =  -232.2401  A.U. after   12 cycles
";
        let set = extract_str(text).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set[0].oscillator_strength, 0.12);
    }

    #[test]
    fn record_wrapped_over_two_lines_is_ignored() {
        let text = "Excited State 1: Singlet-A 3.0000 eV 413.33 nm\n f=0.5000\n";
        assert!(extract_str(text).unwrap().is_empty());
    }

    #[test]
    fn tolerates_text_between_tokens() {
        let text = "Excited State 7 (root) Singlet-Bu sym 2.0000eV something f=1.2500 end";
        let set = extract_str(text).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set[0].wavelength_nm, 620.0);
        assert_eq!(set[0].oscillator_strength, 1.25);
    }

    #[test]
    fn zero_energy_is_rejected() {
        let text = "\nExcited State 1: Singlet-A 0.0000 eV f=0.5000\n";
        match extract_str(text) {
            Err(UvVisError::NonPositiveEnergy { line, energy_ev }) => {
                assert_eq!(line, 2);
                assert_eq!(energy_ev, 0.0);
            }
            other => panic!("expected NonPositiveEnergy, got {other:?}"),
        }
    }

    #[test]
    fn non_ascii_digits_are_malformed() {
        // `\d` also matches Arabic-Indic digits, which `f64::from_str` refuses.
        let text = "Excited State 1: Singlet-A \u{0663}.\u{0660}\u{0660} eV f=0.5000\n";
        match extract_str(text) {
            Err(UvVisError::MalformedRecord { line, text }) => {
                assert_eq!(line, 1);
                assert!(text.starts_with("Excited State 1"));
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn latin1_title_line_does_not_hide_singlets() {
        let bytes: &[u8] =
            b"Title: caf\xe9 run\n Excited State 1: Singlet-A 3.0000 eV 413.33 nm f=0.5000\n";
        let set = extract_reader(bytes).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set[0].energy_ev, 3.0);
    }

    #[test]
    fn crlf_line_endings_are_accepted() {
        let set = extract_str("header\r\nExcited State 1: Singlet-A 2.0000 eV f=0.2500\r\n").unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set[0].oscillator_strength, 0.25);
    }

    #[test]
    fn empty_input_gives_empty_set() {
        assert!(extract_str("").unwrap().is_empty());
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = extract_file(Path::new("/definitely/not/here.log")).unwrap_err();
        assert!(matches!(err, UvVisError::SourceNotFound { .. }));
        assert!(err.to_string().contains("/definitely/not/here.log"));
    }
}
