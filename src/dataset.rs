//! Sampled trajectory table
//!
//! The data file is a whitespace-delimited table of five f64 columns in a
//! fixed order: `step t r theta p_r`. The simulator writes a `#`-prefixed
//! header block above the rows, so the loader skips comment and blank lines.

use std::fs;
use std::path::Path;

use crate::error::{Result, TwoBodyError};

/// Column-oriented view of one recorded simulation run
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Integrator step index (recorded but unused by plotting)
    pub step: Vec<f64>,
    /// Time
    pub t: Vec<f64>,
    /// Polar radius
    pub r: Vec<f64>,
    /// Angular position (radians)
    pub theta: Vec<f64>,
    /// Radial momentum
    pub p_r: Vec<f64>,
}

impl Dataset {
    /// Load and parse a data file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text, path)
    }

    /// Parse the five-column table from text.
    ///
    /// Any row with the wrong column count or a non-numeric token is fatal;
    /// the error names the offending line.
    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        let mut data = Dataset::default();

        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() != 5 {
                return Err(TwoBodyError::Parse {
                    file: path.to_path_buf(),
                    line: idx + 1,
                    reason: format!("expected 5 columns, found {}", fields.len()),
                });
            }

            let mut row = [0f64; 5];
            for (col, field) in fields.iter().enumerate() {
                row[col] = field.parse().map_err(|_| TwoBodyError::Parse {
                    file: path.to_path_buf(),
                    line: idx + 1,
                    reason: format!("invalid number '{}'", field),
                })?;
            }

            data.step.push(row[0]);
            data.t.push(row[1]);
            data.r.push(row[2]);
            data.theta.push(row[3]);
            data.p_r.push(row[4]);
        }

        if data.is_empty() {
            return Err(TwoBodyError::Parse {
                file: path.to_path_buf(),
                line: 0,
                reason: "no data rows".to_string(),
            });
        }

        Ok(data)
    }

    /// Number of recorded samples
    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// Cartesian projection of the polar state:
    /// `x_i = r_i * cos(theta_i)`, `y_i = r_i * sin(theta_i)`
    pub fn cartesian(&self) -> (Vec<f64>, Vec<f64>) {
        let x = self
            .r
            .iter()
            .zip(&self.theta)
            .map(|(r, th)| r * th.cos())
            .collect();
        let y = self
            .r
            .iter()
            .zip(&self.theta)
            .map(|(r, th)| r * th.sin())
            .collect();
        (x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Dataset> {
        Dataset::parse(text, Path::new("test_data.txt"))
    }

    #[test]
    fn test_parse_basic_table() {
        let data = parse(
            "0 0.0 1.0 0.0 0.1\n\
             100 0.5 1.2 0.3 0.2\n\
             200 1.0 1.4 0.6 0.3\n",
        )
        .unwrap();
        assert_eq!(data.len(), 3);
        assert_eq!(data.step, vec![0.0, 100.0, 200.0]);
        assert_eq!(data.t, vec![0.0, 0.5, 1.0]);
        assert_eq!(data.r, vec![1.0, 1.2, 1.4]);
        assert_eq!(data.theta, vec![0.0, 0.3, 0.6]);
        assert_eq!(data.p_r, vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let data = parse(
            "# 2-body central force problem simulation\n\
             # step t r theta pr\n\
             \n\
             \t0\t0\t1\t0\t0.1\n",
        )
        .unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data.r, vec![1.0]);
    }

    #[test]
    fn test_parse_wrong_column_count() {
        match parse("0 0 1 0\n") {
            Err(TwoBodyError::Parse { line, reason, .. }) => {
                assert_eq!(line, 1);
                assert!(reason.contains("expected 5 columns"), "{}", reason);
            }
            other => panic!("expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_non_numeric_token() {
        match parse("0 0 1 0 0.1\n1 0.5 oops 0.2 0.1\n") {
            Err(TwoBodyError::Parse { line, reason, .. }) => {
                assert_eq!(line, 2);
                assert!(reason.contains("oops"), "{}", reason);
            }
            other => panic!("expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_comment_only_file() {
        assert!(parse("# header only\n").is_err());
    }

    #[test]
    fn test_cartesian_radius_identity() {
        let data = parse(
            "0 0.0 1.5 0.00 0.1\n\
             1 0.1 2.0 0.75 0.1\n\
             2 0.2 0.5 2.50 0.1\n\
             3 0.3 3.0 4.25 0.1\n",
        )
        .unwrap();
        let (x, y) = data.cartesian();
        for i in 0..data.len() {
            let r2 = data.r[i] * data.r[i];
            assert!((x[i] * x[i] + y[i] * y[i] - r2).abs() < 1e-12);
        }
    }

    #[test]
    fn test_cartesian_quarter_turns() {
        // Unit radius at theta = 0, pi/2, pi lands at (1,0), (0,1), (-1,0)
        let data = parse(
            "0 0 1 0 0.1\n\
             0 1 1 1.5708 0.1\n\
             0 2 1 3.1416 0.1\n",
        )
        .unwrap();
        let (x, y) = data.cartesian();
        assert!((x[0] - 1.0).abs() < 1e-4 && y[0].abs() < 1e-4);
        assert!(x[1].abs() < 1e-4 && (y[1] - 1.0).abs() < 1e-4);
        assert!((x[2] + 1.0).abs() < 1e-4 && y[2].abs() < 1e-4);
    }
}
