//! Request file parser.
//!
//! Requests are TOML documents tagged by `mode`:
//!
//! ```toml
//! mode = "sets"            # or "nodes" / "plt" (aliases "1" / "2" / "3")
//! tdr_codes = ["00", "05"]
//! base_path = "/sim/tdr"
//! current_value = "1mA"
//! csv_path = "/sim/csv"
//! csv_filename = "cuts"
//!
//! [[sets]]
//! cutplane_axis = "z"
//! cutplane_position = "0.5"
//! cutline_axis = "x"
//! cutline_positions = ["1.0", "1.2"]
//! parameters = "eDensity, hDensity"
//! ```

use std::path::Path;

use crate::error::{GenerationError, Result};
use crate::request::Request;

/// Parse a request document.
pub fn parse(input: &str) -> Result<Request> {
    let request: Request =
        toml::from_str(input).map_err(|e| GenerationError::Request(e.to_string()))?;
    tracing::debug!(mode = request.mode_name(), "request parsed");
    Ok(request)
}

/// Read and parse a request file.
pub fn load(path: impl AsRef<Path>) -> Result<Request> {
    let input = std::fs::read_to_string(path.as_ref())?;
    parse(&input)
}
