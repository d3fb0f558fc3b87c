//! Cut-set sweep: one TDR list replayed for every (set, parameter) pair.
//!
//! Each pair is an independent run with its own banner, 1D plot, curve
//! numbering and CSV file. A running counter namespaces the cutplanes as
//! `C{k}(...)` so runs that load the same files never collide. Cutline
//! positions map 1:1 onto TDR codes.

use crate::error::{GenerationError, Result};
use crate::ir;
use crate::naming::{with_trailing_slash, CurveCounter, FileBase};
use crate::request::CutSetSweepRequest;
use crate::script::Script;
use crate::sequencer::{emit_run, CutRun, CutlineIndexing};

/// Generate the cut-set sweep script.
pub fn generate(request: &CutSetSweepRequest) -> Result<Script> {
    let _span = tracing::info_span!("mode3", sets = request.sets.len()).entered();

    let codes = ir::tdr_codes(&request.tdr_codes)?;
    let sets = ir::cut_sets(&request.sets, codes.len())?;
    if sets.iter().all(|set| set.parameters.is_empty()) {
        return Err(GenerationError::MalformedInput(
            "no parameters given in any set; nothing to generate".to_string(),
        ));
    }

    if let Some(prefix) = request.file_prefix.as_deref() {
        tracing::warn!(
            file_prefix = prefix,
            "file_prefix is not used in file naming; files are named {{current_value}}_{{parameter}}_{{code}}"
        );
    }

    let base_path = with_trailing_slash(&request.base_path);
    let csv_path = with_trailing_slash(&request.csv_path);

    let mut script = Script::new();
    let mut run_counter = 0;
    for (set_index, set) in sets.iter().enumerate() {
        let set_index = set_index + 1;
        for (param_index, &parameter) in set.parameters.iter().enumerate() {
            run_counter += 1;
            script.banner_titled(&format!("--- Set {}, Parameter: {} ---", set_index, parameter));

            let file_bases: Vec<FileBase> = codes
                .iter()
                .map(|code| FileBase::tdr(&request.current_value, parameter, code.as_str()))
                .collect();
            let run = CutRun {
                set,
                parameter,
                base_path: &base_path,
                file_bases: &file_bases,
                cutplane_index: run_counter,
                indexing: CutlineIndexing::Strict,
                unified_plot: format!("Plot_{}", file_bases[0].cutline_name(run_counter)),
                y_scale: request.y_axis_scale,
                csv_file: format!(
                    "{}{}_set{}_param{}_{}.csv",
                    csv_path,
                    request.csv_filename,
                    set_index,
                    param_index + 1,
                    parameter
                ),
            };
            let mut curves = CurveCounter::new();
            emit_run(&mut script, &run, &mut curves)?;
        }
    }

    tracing::info!(runs = run_counter, lines = script.len(), "cut-set sweep generated");
    Ok(script)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Axis, AxisScale};
    use crate::request::{CutSetRequest, ParameterField};

    fn set(cp: Axis, cl: Axis, params: &str) -> CutSetRequest {
        CutSetRequest {
            cutplane_axis: cp,
            cutplane_position: "0.25".to_string(),
            cutline_axis: cl,
            cutline_positions: vec!["1".to_string(), "2".to_string(), "3".to_string()],
            parameters: ParameterField::Joined(params.to_string()),
        }
    }

    fn request(sets: Vec<CutSetRequest>) -> CutSetSweepRequest {
        CutSetSweepRequest {
            tdr_codes: vec!["0".to_string(), "5".to_string(), "10".to_string()],
            base_path: "/tdr/".to_string(),
            file_prefix: Some("n1278_I5_".to_string()),
            current_value: "2mA".to_string(),
            y_axis_scale: AxisScale::Linear,
            csv_path: "/csv".to_string(),
            csv_filename: "cuts".to_string(),
            sets,
        }
    }

    fn matching(script: &Script, prefix: &str) -> Vec<String> {
        script
            .lines()
            .iter()
            .filter(|l| l.starts_with(prefix))
            .cloned()
            .collect()
    }

    #[test]
    fn test_runs_are_namespaced() {
        let script = generate(&request(vec![
            set(Axis::Z, Axis::X, "eDensity"),
            set(Axis::X, Axis::Y, "eDensity"),
        ]))
        .unwrap();

        let cutplanes: Vec<String> = script
            .lines()
            .iter()
            .filter(|l| l.starts_with("# C") && !l.starts_with("# C1(C") && !l.starts_with("# Curve"))
            .cloned()
            .collect();
        assert_eq!(cutplanes.len(), 6);
        assert!(cutplanes[..3].iter().all(|l| l.starts_with("# C1(")));
        assert!(cutplanes[3..].iter().all(|l| l.starts_with("# C2(")));

        assert_eq!(
            matching(&script, "create_plot -dataset C1(C"),
            vec![
                "create_plot -dataset C1(C1(2mA_eDensity_0000_des)) -1d",
                "create_plot -dataset C1(C2(2mA_eDensity_0000_des)) -1d",
            ]
        );
        assert_eq!(matching(&script, "export_curves").len(), 2);
    }

    #[test]
    fn test_curve_numbers_reset_per_run() {
        let script = generate(&request(vec![set(Axis::Z, Axis::X, "eDensity, hDensity")])).unwrap();
        assert_eq!(
            matching(&script, "export_curves"),
            vec![
                "export_curves {Curve_1 Curve_2 Curve_3} -plot Plot_C1(C1(2mA_eDensity_0000_des)) -filename /csv/cuts_set1_param1_eDensity.csv -format csv",
                "export_curves {Curve_1 Curve_2 Curve_3} -plot Plot_C1(C2(2mA_hDensity_0000_des)) -filename /csv/cuts_set1_param2_hDensity.csv -format csv",
            ]
        );
    }

    #[test]
    fn test_banner_per_run() {
        let script = generate(&request(vec![
            set(Axis::Z, Axis::X, "eDensity"),
            set(Axis::Z, Axis::Y, "ElectricField"),
        ]))
        .unwrap();
        assert_eq!(script.lines()[3], "# --- Set 1, Parameter: eDensity ---");
        assert!(script
            .lines()
            .contains(&"# --- Set 2, Parameter: ElectricField ---".to_string()));
        assert_eq!(
            matching(&script, "# Sentaurus Visual Console").len(),
            2
        );
    }

    #[test]
    fn test_strict_cutline_positions_and_axes() {
        let script = generate(&request(vec![set(Axis::Z, Axis::Y, "eDensity")])).unwrap();
        assert_eq!(
            matching(&script, "create_cutline"),
            vec![
                "create_cutline -plot Plot_C1(2mA_eDensity_0000_des) -type y -at 1",
                "create_cutline -plot Plot_C1(2mA_eDensity_0005_des) -type y -at 2",
                "create_cutline -plot Plot_C1(2mA_eDensity_0010_des) -type y -at 3",
            ]
        );
        assert!(matching(&script, "create_curve")
            .iter()
            .all(|l| l.starts_with("create_curve -axisX X -axisY eDensity")));
        assert!(script
            .lines()
            .contains(&"set_axis_prop -plot Plot_C1(C1(2mA_eDensity_0000_des)) -axis y -type linear".to_string()));
    }

    #[test]
    fn test_file_prefix_not_used() {
        let script = generate(&request(vec![set(Axis::Z, Axis::X, "eDensity")])).unwrap();
        assert!(script.lines().iter().all(|l| !l.contains("n1278_I5_")));
    }

    #[test]
    fn test_blank_parameters_rejected() {
        let err = generate(&request(vec![
            set(Axis::Z, Axis::X, " , "),
            set(Axis::X, Axis::Y, ""),
        ]))
        .unwrap_err();
        assert!(matches!(err, GenerationError::MalformedInput(_)));
    }

    #[test]
    fn test_axis_conflict_aborts() {
        let err = generate(&request(vec![
            set(Axis::Z, Axis::X, "eDensity"),
            set(Axis::X, Axis::X, "eDensity"),
        ]))
        .unwrap_err();
        assert!(matches!(err, GenerationError::AxisConflict { set: 2, .. }));
    }
}
