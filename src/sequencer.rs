//! Shared load → cut → curve → export sequence for TDR-based runs.
//!
//! One *run* covers a single (set, parameter) pair over an ordered list of
//! file bases. Commands are emitted in dependency order:
//!
//! 1. load each file and open its dataset plot
//! 2. link every dataset plot of the run
//! 3. field display on the last dataset
//! 4. one cutplane per dataset plot
//! 5. one plot per cutplane
//! 6. one cutline per cutplane plot
//! 7. a single 1D plot seeded from the first cutline
//! 8. one curve per cutline, with axis settings after each
//! 9. CSV export of the run's curves

use crate::error::{GenerationError, Result};
use crate::ir::{AxisScale, CutSet, ParameterName};
use crate::naming::{join_curves, CurveCounter, CurveId, FileBase};
use crate::script::{tcl_list, Script};

/// X range applied to every unified 1D plot.
const X_RANGE: &str = "{-0.9 9.0}";

/// How a file base at position `i` picks its cutline position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutlineIndexing {
    /// `positions[i % positions.len()]`
    Wrapping,
    /// `positions[i]`; running past the end is an error.
    Strict,
}

impl CutlineIndexing {
    fn pick<'a>(self, positions: &'a [String], i: usize) -> Result<&'a str> {
        let idx = match self {
            CutlineIndexing::Wrapping if !positions.is_empty() => i % positions.len(),
            _ => i,
        };
        positions.get(idx).map(String::as_str).ok_or_else(|| {
            GenerationError::MalformedInput(format!(
                "no cutline position for file {} ({} given)",
                i + 1,
                positions.len()
            ))
        })
    }
}

/// Everything one run needs besides the script and curve counter.
#[derive(Debug)]
pub struct CutRun<'a> {
    pub set: &'a CutSet,
    pub parameter: ParameterName,
    /// Directory the TDR files live in, with trailing `/`.
    pub base_path: &'a str,
    pub file_bases: &'a [FileBase],
    /// Namespace of this run's cutplanes: `C{cutplane_index}(...)`.
    pub cutplane_index: usize,
    pub indexing: CutlineIndexing,
    pub unified_plot: String,
    pub y_scale: AxisScale,
    pub csv_file: String,
}

/// Emit one run. Returns the curves it created, in order.
pub fn emit_run(script: &mut Script, run: &CutRun<'_>, curves: &mut CurveCounter) -> Result<Vec<CurveId>> {
    let (first, last) = match (run.file_bases.first(), run.file_bases.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => {
            return Err(GenerationError::MalformedInput(format!(
                "no files to plot for parameter {}",
                run.parameter
            )))
        }
    };
    let k = run.cutplane_index;

    tracing::debug!(
        parameter = %run.parameter,
        files = run.file_bases.len(),
        cutplane = k,
        plot = %run.unified_plot,
        "emitting cut run"
    );

    for fb in run.file_bases {
        let path = format!("{}{}", run.base_path, fb.tdr_file_name());
        script.load_with_plot(&path, &fb.dataset_name(), &fb.plot_name());
    }

    let all_plots = tcl_list(&run.file_bases.iter().map(FileBase::plot_name).collect::<Vec<_>>());
    script.select_and_echo(&first.plot_name());
    script.select_and_echo(&all_plots);
    script.push(format!("link_plots {{{}}}", all_plots));
    script.status(1);

    script.push(format!(
        "set_field_prop {} -plot {} -geom {} -show_bands",
        run.parameter,
        last.plot_name(),
        last.dataset_name()
    ));
    script.status(0);

    for fb in run.file_bases {
        let plot = fb.plot_name();
        script.select_and_echo(&plot);
        script.push(format!(
            "create_cutplane -plot {} -type {} -at {}",
            plot,
            run.set.cutplane_axis.as_lower(),
            run.set.cutplane_position
        ));
        script.echo(fb.cutplane_name(k));
    }

    for fb in run.file_bases {
        script.plot_dataset(
            format!(
                "create_plot -dataset {} -ref_plot {}",
                fb.cutplane_name(k),
                fb.plot_name()
            ),
            &fb.cutplane_plot_name(k),
        );
    }

    for (i, fb) in run.file_bases.iter().enumerate() {
        let cp_plot = fb.cutplane_plot_name(k);
        let position = run.indexing.pick(&run.set.cutline_positions, i)?;
        script.select_and_echo(&cp_plot);
        script.push(format!(
            "create_cutline -plot {} -type {} -at {}",
            cp_plot,
            run.set.cutline_axis.as_lower(),
            position
        ));
        script.echo(fb.cutline_name(k));
    }

    script.plot_dataset(
        format!("create_plot -dataset {} -1d", first.cutline_name(k)),
        &run.unified_plot,
    );

    let mut created = Vec::with_capacity(run.file_bases.len());
    for fb in run.file_bases {
        let curve = curves.advance();
        script.push(format!(
            "create_curve -axisX {} -axisY {} -dataset {{{}}} -plot {}",
            run.set.curve_axis.as_upper(),
            run.parameter,
            fb.cutline_name(k),
            run.unified_plot
        ));
        script.echo(curve.to_string());
        script.push(format!(
            "set_axis_prop -plot {} -axis y -type {}",
            run.unified_plot, run.y_scale
        ));
        script.push(format!(
            "set_axis_prop -plot {} -axis x -range {}",
            run.unified_plot, X_RANGE
        ));
        script.status(0);
        created.push(curve);
    }

    script.select_and_echo(&run.unified_plot);
    script.push(format!(
        "export_curves {{{}}} -plot {} -filename {} -format csv",
        join_curves(&created),
        run.unified_plot,
        run.csv_file
    ));
    script.echo(&run.csv_file);

    Ok(created)
}
