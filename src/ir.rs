//! Validated request model.
//!
//! The request layer deserializes raw user input; the generators convert it
//! into these types before emitting a single command. Once built, every value
//! here is immutable for the rest of the invocation.

use std::fmt;
use std::str::FromStr;

use crate::error::{GenerationError, Result};
use crate::naming::{self, format_tdr_code};
use crate::request::CutSetRequest;

/// Spatial axis of a cutplane, a cutline, or a 1D plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde_derive::Deserialize)]
#[serde(try_from = "String")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Spelling used by `-type` on cutplanes and cutlines.
    pub fn as_lower(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }

    /// Spelling used by `-axisX` on curves.
    pub fn as_upper(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_lower())
    }
}

impl FromStr for Axis {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            _ => Err(format!("invalid axis '{}': expected x, y or z", s)),
        }
    }
}

impl TryFrom<String> for Axis {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

/// Y-axis scale of a unified 1D plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde_derive::Deserialize)]
#[serde(from = "String")]
pub enum AxisScale {
    Linear,
    #[default]
    Log,
}

impl AxisScale {
    pub fn as_str(self) -> &'static str {
        match self {
            AxisScale::Linear => "linear",
            AxisScale::Log => "log",
        }
    }
}

impl fmt::Display for AxisScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything other than `linear` falls back to log.
impl From<String> for AxisScale {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "linear" => AxisScale::Linear,
            "log" | "" => AxisScale::Log,
            other => {
                tracing::warn!(scale = other, "unrecognised Y-axis scale, using log");
                AxisScale::Log
            }
        }
    }
}

/// Four-digit TDR snapshot code, always `00NN`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TdrCode(pub(crate) String);

impl TdrCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TdrCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TdrCode {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self> {
        format_tdr_code(s)
    }
}

/// Format every raw code, rejecting an empty list.
pub fn tdr_codes(raw: &[String]) -> Result<Vec<TdrCode>> {
    if raw.is_empty() {
        return Err(GenerationError::MalformedInput(
            "at least one TDR code is required".to_string(),
        ));
    }
    raw.iter().map(|code| format_tdr_code(code)).collect()
}

macro_rules! parameter_names {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// Physical quantity the console can display and export.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ParameterName {
            $($variant),+
        }

        impl ParameterName {
            /// Every accepted parameter, in the order the console lists them.
            pub const ALL: &'static [ParameterName] = &[$(ParameterName::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(ParameterName::$variant => $name),+
                }
            }
        }

        impl FromStr for ParameterName {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s {
                    $($name => Ok(ParameterName::$variant),)+
                    _ => Err(s.to_string()),
                }
            }
        }
    };
}

parameter_names! {
    ConductionBandEnergy => "ConductionBandEnergy",
    ConductionCurrentDensity => "ConductionCurrentDensity",
    DopingConcentration => "DopingConcentration",
    EffectiveIntrinsicDensity => "EffectiveIntrinsicDensity",
    ElectricField => "ElectricField",
    ElectrostaticPotential => "ElectrostaticPotential",
    EquilibriumPotential => "EquilibriumPotential",
    ImpactIonization => "Impactionization",
    IntrinsicDensity => "IntrinsicDensity",
    LatticeTemperature => "LatticeTemperature",
    QuasiFermiPotential => "QuasiFermiPotential",
    SpaceCharge => "SpaceCharge",
    ValenceBandEnergy => "ValenceBandEnergy",
    EAlphaAvalanche => "eAlphaAvalanche",
    ECurrentDensity => "eCurrentDensity",
    EDensity => "eDensity",
    EMobility => "eMobility",
    EQuasiFermiPotential => "eQuasiFermiPotential",
    HAlphaAvalanche => "hAlphaAvalanche",
    HCurrentDensity => "hCurrentDensity",
    HDensity => "hDensity",
    HMobility => "hMobility",
    HQuasiFermiPotential => "hQuasiFermiPotential",
}

impl fmt::Display for ParameterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated cutplane/cutline set and the parameters plotted through it.
#[derive(Debug, Clone)]
pub struct CutSet {
    pub cutplane_axis: Axis,
    pub cutplane_position: String,
    pub cutline_axis: Axis,
    /// One position per TDR code, in TDR order.
    pub cutline_positions: Vec<String>,
    pub parameters: Vec<ParameterName>,
    /// Axis left over for the curves' X data.
    pub curve_axis: Axis,
}

impl CutSet {
    /// Validate one raw set. `set_index` is 1-based and only used for error
    /// reporting; `tdr_count` is the number of cutline positions expected.
    pub fn from_request(raw: &CutSetRequest, set_index: usize, tdr_count: usize) -> Result<Self> {
        let curve_axis = naming::axis_complement(raw.cutplane_axis, raw.cutline_axis).ok_or(
            GenerationError::AxisConflict {
                set: set_index,
                axis: raw.cutplane_axis,
            },
        )?;

        if raw.cutline_positions.len() != tdr_count {
            return Err(GenerationError::MalformedInput(format!(
                "set {} has {} cutline position(s), expected one per TDR code ({})",
                set_index,
                raw.cutline_positions.len(),
                tdr_count
            )));
        }

        let mut parameters = Vec::new();
        let mut invalid = Vec::new();
        for name in raw.parameters.names() {
            match name.parse::<ParameterName>() {
                Ok(p) => parameters.push(p),
                Err(bad) => invalid.push(bad),
            }
        }
        if !invalid.is_empty() {
            return Err(GenerationError::InvalidParameter {
                set: set_index,
                names: invalid,
            });
        }

        Ok(CutSet {
            cutplane_axis: raw.cutplane_axis,
            cutplane_position: raw.cutplane_position.clone(),
            cutline_axis: raw.cutline_axis,
            cutline_positions: raw.cutline_positions.clone(),
            parameters,
            curve_axis,
        })
    }
}

/// Validate all sets of a request in order; the first failure wins.
pub fn cut_sets(raw: &[CutSetRequest], tdr_count: usize) -> Result<Vec<CutSet>> {
    if raw.is_empty() {
        return Err(GenerationError::MalformedInput(
            "at least one cutplane/cutline set is required".to_string(),
        ));
    }
    raw.iter()
        .enumerate()
        .map(|(i, set)| CutSet::from_request(set, i + 1, tdr_count))
        .collect()
}
