//! PLT overlay: drain voltage and peak temperature transients of several
//! nodes in one dual-axis plot.
//!
//! The console numbers curves in creation order. The first `create_curve`
//! call yields `Curve_1..=N` on the Y axis, and the second yields
//! `Curve_{N+1}..=2N` on Y2. All later styling refers to those numbers.

use crate::error::{GenerationError, Result};
use crate::naming::{join_curves, with_trailing_slash, CurveId, FileBase};
use crate::request::PltRequest;
use crate::script::{tcl_list, Script};

/// Every dataset lands in the plot created by the first load.
const PLOT: &str = "Plot_1";

const Y_QUANTITY: &str = "drain OuterVoltage";
const Y2_QUANTITY: &str = "Tmax";

/// Line colors for the Y2 curves, cycled per node.
const PALETTE: [&str; 6] = ["#ff0000", "#00ff00", "#0000ff", "#ff8000", "#800080", "#008080"];

/// Generate the PLT overlay script.
pub fn generate(request: &PltRequest) -> Result<Script> {
    let _span = tracing::info_span!("mode2", nodes = request.nodes.len()).entered();

    let Some(first) = request.nodes.first() else {
        return Err(GenerationError::MalformedInput(
            "at least one (version, node) pair is required".to_string(),
        ));
    };

    let base_path = with_trailing_slash(&request.base_path);
    let csv_path = with_trailing_slash(&request.csv_path);
    let bases: Vec<FileBase> = request
        .nodes
        .iter()
        .map(|pair| FileBase::plt(&request.plt_prefix, &pair.version, &pair.node_id))
        .collect();
    let n = bases.len();
    let y_curves: Vec<CurveId> = (1..=n).map(CurveId).collect();
    let y2_curves: Vec<CurveId> = (n + 1..=2 * n).map(CurveId).collect();

    let mut script = Script::new();
    script.banner();

    script.push(format!("load_file {}{}", base_path, bases[0].plt_file_name()));
    script.push("create_plot -1d");
    script.select_plots(PLOT);
    script.echo(PLOT);
    script.blank();
    script.echo(PLOT);
    script.blank();
    script.echo(bases[0].dataset_name());

    for fb in &bases[1..] {
        script.push(format!("load_file {}{}", base_path, fb.plt_file_name()));
        script.echo(fb.dataset_name());
    }

    let datasets = tcl_list(&bases.iter().map(FileBase::dataset_name).collect::<Vec<_>>());
    script.push(format!(
        "create_curve -axisX time -axisY {{{}}} -dataset {{{}}} -plot {}",
        Y_QUANTITY, datasets, PLOT
    ));
    script.echo(join_curves(&y_curves));
    script.push(format!(
        "create_curve -axisX time -axisY2 {} -dataset {{{}}} -plot {}",
        Y2_QUANTITY, datasets, PLOT
    ));
    script.echo(join_curves(&y2_curves));

    for (i, curve) in y2_curves.iter().enumerate() {
        curve_prop(&mut script, *curve, "-line_style dash");
        curve_prop(&mut script, *curve, "-line_width 2");
        curve_prop(&mut script, *curve, &format!("-color {}", PALETTE[i % PALETTE.len()]));
        curve_prop(&mut script, *curve, "-hide_legend");
    }
    for curve in &y_curves {
        curve_prop(&mut script, *curve, "-line_width 2");
    }

    axis_title(&mut script, "y2", &request.y2_axis_title);
    axis_title(&mut script, "x", &request.x_axis_title);
    axis_title(&mut script, "y", &request.y_axis_title);

    script.push(format!(
        "set_plot_prop -plot {{{}}} -title \"{}\"",
        PLOT, request.plot_title
    ));
    script.status(0);
    script.push(format!("set_plot_prop -plot {{{}}} -frame_width 2", PLOT));
    script.status(0);

    script.push(format!(
        "set_legend_prop -plot {} -position {{{} {}}}",
        PLOT, request.legend_x, request.legend_y
    ));
    script.status(0);

    script.push(format!("export_view {{{}}} -format png", request.png_path));
    script.status(0);
    script.push(format!("move_plot -plot {} -position {{0 0}}", PLOT));
    script.status(0);

    // Labels go on after the PNG export.
    for (curve, pair) in y_curves.iter().zip(&request.nodes) {
        curve_prop(
            &mut script,
            *curve,
            &format!("-label \"{}_{}\"", Y_QUANTITY, pair.version),
        );
    }

    let all_curves: Vec<CurveId> = y_curves.iter().chain(&y2_curves).copied().collect();
    let csv_file = format!("{}{}.csv", csv_path, request.csv_filename);
    script.push(format!(
        "export_curves {{{}}} -plot {} -filename {} -format csv",
        join_curves(&all_curves),
        PLOT,
        csv_file
    ));
    script.echo(&csv_file);

    tracing::info!(
        first = %first.node_id,
        curves = all_curves.len(),
        lines = script.len(),
        "PLT overlay generated"
    );
    Ok(script)
}

fn curve_prop(script: &mut Script, curve: CurveId, prop: &str) {
    script.push(format!("set_curve_prop {{{}}} -plot {} {}", curve, PLOT, prop));
    script.status(0);
}

fn axis_title(script: &mut Script, axis: &str, title: &str) {
    script.push(format!(
        "set_axis_prop -plot {} -axis {} -title \"{}\"",
        PLOT, axis, title
    ));
    script.status(0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::NodePair;

    fn request(versions: &[&str]) -> PltRequest {
        PltRequest {
            base_path: "/plt".to_string(),
            plt_prefix: "DeMOS".to_string(),
            nodes: versions
                .iter()
                .enumerate()
                .map(|(i, v)| NodePair {
                    version: v.to_string(),
                    node_id: format!("n12{}0", i),
                })
                .collect(),
            csv_path: "/csv/".to_string(),
            csv_filename: "tran".to_string(),
            plot_title: "Title".to_string(),
            x_axis_title: "Time (in ns)".to_string(),
            y_axis_title: "Drain".to_string(),
            y2_axis_title: "Tmax".to_string(),
            legend_x: "0.07".to_string(),
            legend_y: "0.92".to_string(),
            png_path: "/png/p.png".to_string(),
        }
    }

    fn curve_props(script: &Script, curve: usize) -> Vec<String> {
        let prefix = format!("set_curve_prop {{Curve_{}}} ", curve);
        script
            .lines()
            .iter()
            .filter(|l| l.starts_with(&prefix))
            .cloned()
            .collect()
    }

    #[test]
    fn test_loads() {
        let script = generate(&request(&["4.5", "4.6", "4.7"])).unwrap();
        let loads: Vec<&String> = script
            .lines()
            .iter()
            .filter(|l| l.starts_with("load_file"))
            .collect();
        assert_eq!(loads.len(), 3);
        assert_eq!(loads[0], "load_file /plt/DeMOS_4.5_n1200_des.plt");
        assert_eq!(
            script.lines().iter().filter(|l| *l == "create_plot -1d").count(),
            1
        );
    }

    #[test]
    fn test_dual_axis_curves() {
        let script = generate(&request(&["4.5", "4.6"])).unwrap();
        assert!(script.lines().contains(
            &"create_curve -axisX time -axisY {drain OuterVoltage} -dataset {DeMOS_4.5_n1200_des DeMOS_4.6_n1210_des} -plot Plot_1"
                .to_string()
        ));
        assert!(script.lines().contains(&"# Curve_1 Curve_2".to_string()));
        assert!(script.lines().contains(&"# Curve_3 Curve_4".to_string()));
    }

    #[test]
    fn test_styling_split() {
        let script = generate(&request(&["1", "2", "3"])).unwrap();
        for y in 1..=3 {
            let props = curve_props(&script, y);
            assert_eq!(props[0], format!("set_curve_prop {{Curve_{}}} -plot Plot_1 -line_width 2", y));
            assert!(props[1].contains("-label"));
            assert_eq!(props.len(), 2);
        }
        for y2 in 4..=6 {
            let props = curve_props(&script, y2);
            assert_eq!(props.len(), 4);
            assert!(props[0].ends_with("-line_style dash"));
            assert!(props[1].ends_with("-line_width 2"));
            assert!(props[2].contains("-color #"));
            assert!(props[3].ends_with("-hide_legend"));
        }
    }

    #[test]
    fn test_palette_cycles() {
        let versions: Vec<String> = (0..7).map(|i| i.to_string()).collect();
        let refs: Vec<&str> = versions.iter().map(String::as_str).collect();
        let script = generate(&request(&refs)).unwrap();
        // Y2 curves are 8..=14; the 7th wraps back to red
        assert!(curve_props(&script, 8)[2].ends_with("-color #ff0000"));
        assert!(curve_props(&script, 13)[2].ends_with("-color #008080"));
        assert!(curve_props(&script, 14)[2].ends_with("-color #ff0000"));
    }

    #[test]
    fn test_relabel_after_view_export() {
        let script = generate(&request(&["4.5"])).unwrap();
        let pos = |needle: &str| script.lines().iter().position(|l| l.starts_with(needle)).unwrap();
        assert!(pos("export_view {/png/p.png} -format png") < pos("move_plot"));
        let label = script
            .lines()
            .iter()
            .position(|l| l == "set_curve_prop {Curve_1} -plot Plot_1 -label \"drain OuterVoltage_4.5\"")
            .unwrap();
        assert!(pos("move_plot") < label);
        assert!(label < pos("export_curves"));
    }

    #[test]
    fn test_csv_export_lists_all_curves() {
        let script = generate(&request(&["a", "b"])).unwrap();
        assert_eq!(
            script.lines()[script.len() - 2],
            "export_curves {Curve_1 Curve_2 Curve_3 Curve_4} -plot Plot_1 -filename /csv/tran.csv -format csv"
        );
        assert_eq!(script.lines()[script.len() - 1], "# /csv/tran.csv");
    }

    #[test]
    fn test_empty_nodes_rejected() {
        assert!(matches!(
            generate(&request(&[])),
            Err(GenerationError::MalformedInput(_))
        ));
    }
}
