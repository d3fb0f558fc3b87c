//! Script output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::script::Script;

/// Write a script verbatim, one line per command line.
///
/// ```text
/// load_file /sim/1mA_eDensity_0002_des.tdr -fod
/// create_plot -dataset 1mA_eDensity_0002_des
/// select_plots {Plot_1mA_eDensity_0002_des}
/// # Plot_1mA_eDensity_0002_des
/// ```
pub fn write_script<W: Write>(script: &Script, writer: &mut W) -> Result<()> {
    for line in script.lines() {
        writeln!(writer, "{}", line)?;
    }
    Ok(())
}

/// Create (or truncate) `path` and write the script into it.
pub fn save_script(script: &Script, path: impl AsRef<Path>) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    write_script(script, &mut writer)?;
    writer.flush()?;
    tracing::info!(path = %path.as_ref().display(), lines = script.len(), "script saved");
    Ok(())
}
