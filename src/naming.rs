//! Canonical identifiers for datasets, plots, cuts and curves.
//!
//! The console names every derived object after the object it came from:
//! loading `X_des.tdr` yields dataset `X_des` shown in `Plot_X_des`; a
//! cutplane through that plot becomes `C1(X_des)`, and a cutline through the
//! cutplane plot becomes `C1(C1(X_des))`. All of those strings are produced
//! here, from a single [`FileBase`], so a reference emitted in one command
//! always matches the name created by an earlier one.

use std::fmt;

use nom::bytes::complete::{take_till, take_while_m_n};
use nom::character::complete::char;
use nom::combinator::all_consuming;
use nom::multi::separated_list0;
use nom::{IResult, Parser};

use crate::error::{GenerationError, Result};
use crate::ir::{Axis, ParameterName, TdrCode};

/// The axis of {X, Y, Z} used by neither `a` nor `b`.
///
/// Returns `None` when `a == b`, since no single axis remains.
pub fn axis_complement(a: Axis, b: Axis) -> Option<Axis> {
    if a == b {
        return None;
    }
    Axis::ALL.into_iter().find(|&axis| axis != a && axis != b)
}

fn tdr_digits(input: &str) -> IResult<&str, &str> {
    all_consuming(take_while_m_n(1, 2, |c: char| c.is_ascii_digit())).parse(input)
}

/// Turn the user's last two digits into a full TDR code: `"2"` -> `"0002"`.
pub fn format_tdr_code(input: &str) -> Result<TdrCode> {
    let trimmed = input.trim();
    let (_, digits) =
        tdr_digits(trimmed).map_err(|_| GenerationError::MalformedTdrCode(input.to_string()))?;
    Ok(TdrCode(format!("00{:0>2}", digits)))
}

fn comma_segments(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list0(char(','), take_till(|c: char| c == ',')).parse(input)
}

/// Split a comma-separated parameter list, trimming blanks.
///
/// Order and duplicates are kept; names are not checked against
/// [`ParameterName`] here.
pub fn parse_parameter_list(raw: &str) -> Vec<String> {
    let segments = match comma_segments(raw) {
        Ok((_, segments)) => segments,
        Err(_) => vec![raw],
    };
    segments
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Root name of one loaded file; every derived identifier comes from here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBase {
    stem: String,
}

impl FileBase {
    /// `{current_value}_{parameter}_{suffix}`, where the suffix is a TDR code
    /// or, for the synthetic last TDR, a node prefix.
    pub fn tdr(current_value: &str, parameter: ParameterName, suffix: &str) -> Self {
        Self {
            stem: format!("{}_{}_{}", current_value, parameter, suffix),
        }
    }

    /// `{plt_prefix}_{version}_{node_id}`
    pub fn plt(plt_prefix: &str, version: &str, node_id: &str) -> Self {
        Self {
            stem: format!("{}_{}_{}", plt_prefix, version, node_id),
        }
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    pub fn dataset_name(&self) -> String {
        format!("{}_des", self.stem)
    }

    pub fn plot_name(&self) -> String {
        format!("Plot_{}", self.dataset_name())
    }

    pub fn tdr_file_name(&self) -> String {
        format!("{}.tdr", self.dataset_name())
    }

    pub fn plt_file_name(&self) -> String {
        format!("{}.plt", self.dataset_name())
    }

    /// Dataset produced by cutplane number `index` through this file's plot.
    pub fn cutplane_name(&self, index: usize) -> String {
        format!("C{}({})", index, self.dataset_name())
    }

    pub fn cutplane_plot_name(&self, index: usize) -> String {
        format!("Plot_{}", self.cutplane_name(index))
    }

    /// Each cutplane plot carries exactly one cutline, so it is always `C1`.
    pub fn cutline_name(&self, index: usize) -> String {
        format!("C1({})", self.cutplane_name(index))
    }
}

impl fmt::Display for FileBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stem)
    }
}

/// Text before the first `_` of a node name (`n1257_I4.6` -> `n1257`).
pub fn node_prefix(node: &str) -> &str {
    node.split('_').next().unwrap_or(node)
}

/// Console-assigned curve identifier, `Curve_{n}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveId(pub usize);

impl fmt::Display for CurveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Curve_{}", self.0)
    }
}

/// Hands out curve numbers in emission order, starting at 1.
#[derive(Debug, Clone)]
pub struct CurveCounter {
    next: usize,
}

impl Default for CurveCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl CurveCounter {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn advance(&mut self) -> CurveId {
        let id = CurveId(self.next);
        self.next += 1;
        id
    }
}

/// Space-join curve ids the way `export_curves` expects them.
pub fn join_curves(curves: &[CurveId]) -> String {
    curves
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Append `/` unless the path already ends in one.
pub fn with_trailing_slash(path: &str) -> String {
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{}/", path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_complement_all_pairs() {
        assert_eq!(axis_complement(Axis::X, Axis::Y), Some(Axis::Z));
        assert_eq!(axis_complement(Axis::Y, Axis::X), Some(Axis::Z));
        assert_eq!(axis_complement(Axis::X, Axis::Z), Some(Axis::Y));
        assert_eq!(axis_complement(Axis::Z, Axis::X), Some(Axis::Y));
        assert_eq!(axis_complement(Axis::Y, Axis::Z), Some(Axis::X));
        assert_eq!(axis_complement(Axis::Z, Axis::Y), Some(Axis::X));
    }

    #[test]
    fn test_axis_complement_equal_axes() {
        for axis in Axis::ALL {
            assert_eq!(axis_complement(axis, axis), None);
        }
    }

    #[test]
    fn test_format_tdr_code() {
        assert_eq!(format_tdr_code("2").unwrap().as_str(), "0002");
        assert_eq!(format_tdr_code("02").unwrap().as_str(), "0002");
        assert_eq!(format_tdr_code("15").unwrap().as_str(), "0015");
        assert_eq!(format_tdr_code("0").unwrap().as_str(), "0000");
        assert_eq!(format_tdr_code(" 7 ").unwrap().as_str(), "0007");
    }

    #[test]
    fn test_format_tdr_code_rejects_malformed() {
        for bad in ["", "abc", "1a", "123", "-1", "1.5"] {
            assert!(
                matches!(format_tdr_code(bad), Err(GenerationError::MalformedTdrCode(_))),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_parse_parameter_list() {
        assert_eq!(
            parse_parameter_list(" eDensity ,hDensity, ,X"),
            vec!["eDensity", "hDensity", "X"]
        );
    }

    #[test]
    fn test_parse_parameter_list_keeps_duplicates() {
        assert_eq!(
            parse_parameter_list("eDensity,eDensity"),
            vec!["eDensity", "eDensity"]
        );
    }

    #[test]
    fn test_parse_parameter_list_empty() {
        assert!(parse_parameter_list("").is_empty());
        assert!(parse_parameter_list(" , ,").is_empty());
    }

    #[test]
    fn test_file_base_derived_names() {
        let fb = FileBase::tdr("1mA", ParameterName::EDensity, "0002");
        assert_eq!(fb.stem(), "1mA_eDensity_0002");
        assert_eq!(fb.dataset_name(), "1mA_eDensity_0002_des");
        assert_eq!(fb.plot_name(), "Plot_1mA_eDensity_0002_des");
        assert_eq!(fb.tdr_file_name(), "1mA_eDensity_0002_des.tdr");
        assert_eq!(fb.cutplane_name(2), "C2(1mA_eDensity_0002_des)");
        assert_eq!(fb.cutplane_plot_name(2), "Plot_C2(1mA_eDensity_0002_des)");
        assert_eq!(fb.cutline_name(2), "C1(C2(1mA_eDensity_0002_des))");
    }

    #[test]
    fn test_file_base_plt() {
        let fb = FileBase::plt("DeMOS", "4.5", "n1250");
        assert_eq!(fb.plt_file_name(), "DeMOS_4.5_n1250_des.plt");
        assert_eq!(fb.dataset_name(), "DeMOS_4.5_n1250_des");
    }

    #[test]
    fn test_node_prefix() {
        assert_eq!(node_prefix("n1257_I4.6"), "n1257");
        assert_eq!(node_prefix("n1257"), "n1257");
        assert_eq!(node_prefix("_x"), "");
    }

    #[test]
    fn test_curve_counter_sequence() {
        let mut counter = CurveCounter::new();
        let ids: Vec<CurveId> = (0..3).map(|_| counter.advance()).collect();
        assert_eq!(join_curves(&ids), "Curve_1 Curve_2 Curve_3");
    }

    #[test]
    fn test_with_trailing_slash() {
        assert_eq!(with_trailing_slash("/data"), "/data/");
        assert_eq!(with_trailing_slash("/data/"), "/data/");
        assert_eq!(with_trailing_slash(""), "/");
    }
}
