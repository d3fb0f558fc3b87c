//! Raw generation requests, as deserialized from a TOML request file.
//!
//! Nothing here is validated beyond basic shape; the generators turn these
//! into [`crate::ir`] types and reject bad input before emitting commands.

use serde_derive::Deserialize;

use crate::ir::{Axis, AxisScale};
use crate::naming::parse_parameter_list;

/// A fully populated request for exactly one generation mode.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Request {
    /// Mode 1: many nodes crossed with TDR codes.
    #[serde(alias = "1")]
    Nodes(NodeSweepRequest),
    /// Mode 2: PLT transients overlaid in one dual-axis plot.
    #[serde(alias = "2")]
    Plt(PltRequest),
    /// Mode 3: one TDR list reused across cutplane/cutline sets.
    #[serde(alias = "3")]
    Sets(CutSetSweepRequest),
}

impl Request {
    pub fn mode_name(&self) -> &'static str {
        match self {
            Request::Nodes(_) => "nodes",
            Request::Plt(_) => "plt",
            Request::Sets(_) => "sets",
        }
    }
}

/// Parameters given either as `"eDensity, hDensity"` or as an array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ParameterField {
    Joined(String),
    List(Vec<String>),
}

impl ParameterField {
    /// Trimmed, non-empty names in the order given.
    pub fn names(&self) -> Vec<String> {
        match self {
            ParameterField::Joined(raw) => parse_parameter_list(raw),
            ParameterField::List(items) => items
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CutSetRequest {
    pub cutplane_axis: Axis,
    pub cutplane_position: String,
    pub cutline_axis: Axis,
    #[serde(default)]
    pub cutline_positions: Vec<String>,
    pub parameters: ParameterField,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodeSweepRequest {
    pub node_names: Vec<String>,
    /// Last two digits of each TDR code.
    pub tdr_codes: Vec<String>,
    /// Append one extra file named after the first node's prefix.
    #[serde(default)]
    pub include_last_tdr: bool,
    pub current_value: String,
    pub base_path: String,
    #[serde(default)]
    pub y_axis_scale: AxisScale,
    pub csv_path: String,
    pub csv_filename: String,
    pub sets: Vec<CutSetRequest>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodePair {
    pub version: String,
    pub node_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PltRequest {
    pub base_path: String,
    pub plt_prefix: String,
    pub nodes: Vec<NodePair>,
    pub csv_path: String,
    pub csv_filename: String,
    #[serde(default)]
    pub plot_title: String,
    #[serde(default)]
    pub x_axis_title: String,
    #[serde(default)]
    pub y_axis_title: String,
    #[serde(default)]
    pub y2_axis_title: String,
    pub legend_x: String,
    pub legend_y: String,
    pub png_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CutSetSweepRequest {
    pub tdr_codes: Vec<String>,
    pub base_path: String,
    /// Collected for parity with the node sweep; no command uses it.
    #[serde(default)]
    pub file_prefix: Option<String>,
    pub current_value: String,
    #[serde(default)]
    pub y_axis_scale: AxisScale,
    pub csv_path: String,
    pub csv_filename: String,
    pub sets: Vec<CutSetRequest>,
}
