//! Node sweep: every node crossed with every TDR code, per set and parameter.
//!
//! File bases are named `{current_value}_{parameter}_{code}`. The node name
//! only contributes to the optional synthetic entry, which uses the first
//! node's prefix in place of a code. Curve numbers run across the whole
//! script, and cutline positions wrap when there are more files than codes.

use crate::error::{GenerationError, Result};
use crate::ir::{self, ParameterName, TdrCode};
use crate::naming::{node_prefix, with_trailing_slash, CurveCounter, FileBase};
use crate::request::NodeSweepRequest;
use crate::script::Script;
use crate::sequencer::{emit_run, CutRun, CutlineIndexing};

/// Generate the node sweep script.
pub fn generate(request: &NodeSweepRequest) -> Result<Script> {
    let _span = tracing::info_span!("mode1", nodes = request.node_names.len()).entered();

    if request.node_names.is_empty() {
        return Err(GenerationError::MalformedInput(
            "at least one node name is required".to_string(),
        ));
    }
    let codes = ir::tdr_codes(&request.tdr_codes)?;
    let sets = ir::cut_sets(&request.sets, codes.len())?;
    if sets.iter().all(|set| set.parameters.is_empty()) {
        return Err(GenerationError::MalformedInput(
            "no parameters given in any set; nothing to generate".to_string(),
        ));
    }

    let base_path = with_trailing_slash(&request.base_path);
    let csv_path = with_trailing_slash(&request.csv_path);
    let synthetic_prefix = request
        .include_last_tdr
        .then(|| node_prefix(&request.node_names[0]));

    let mut script = Script::new();
    script.banner();

    let mut curves = CurveCounter::new();
    for (set_index, set) in sets.iter().enumerate() {
        let set_index = set_index + 1;
        for (param_index, &parameter) in set.parameters.iter().enumerate() {
            let file_bases = collect_file_bases(request, &codes, parameter, synthetic_prefix);
            let run = CutRun {
                set,
                parameter,
                base_path: &base_path,
                file_bases: &file_bases,
                cutplane_index: set_index,
                indexing: CutlineIndexing::Wrapping,
                unified_plot: unified_plot_name(&file_bases[0], set_index, param_index),
                y_scale: request.y_axis_scale,
                csv_file: format!(
                    "{}{}_set{}_param_{}.csv",
                    csv_path, request.csv_filename, set_index, parameter
                ),
            };
            emit_run(&mut script, &run, &mut curves)?;
        }
    }

    tracing::info!(
        sets = sets.len(),
        lines = script.len(),
        "node sweep generated"
    );
    Ok(script)
}

/// Node × code cross product, then the synthetic entry if requested.
fn collect_file_bases(
    request: &NodeSweepRequest,
    codes: &[TdrCode],
    parameter: ParameterName,
    synthetic_prefix: Option<&str>,
) -> Vec<FileBase> {
    let mut bases: Vec<FileBase> = request
        .node_names
        .iter()
        .flat_map(|_node| {
            codes
                .iter()
                .map(move |code| FileBase::tdr(&request.current_value, parameter, code.as_str()))
        })
        .collect();
    if let Some(prefix) = synthetic_prefix {
        bases.push(FileBase::tdr(&request.current_value, parameter, prefix));
    }
    bases
}

/// `Plot_C1(C{set}({first}_des))_S{set}P{param}`, with `param` 0-based.
fn unified_plot_name(first: &FileBase, set_index: usize, param_index: usize) -> String {
    format!(
        "Plot_{}_S{}P{}",
        first.cutline_name(set_index),
        set_index,
        param_index
    )
}
