//! Ordered Tcl command buffer for the Sentaurus Visual console.
//!
//! Lines are kept exactly as they will be written. Besides commands, the
//! console's own journal interleaves `# ...` echo lines naming the object a
//! command produced, `# 0` / `# 1` status lines, and blank separators; the
//! generators reproduce that layout so a generated script reads like one
//! recorded from an interactive session.

/// Console banner opening every generated script.
const BANNER: [&str; 4] = [
    "################################################",
    "# Sentaurus Visual Console - Tcl version 8.6.6 #",
    "################################################",
    "# ",
];

/// An ordered sequence of console command lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    lines: Vec<String>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// `# {text}`
    pub fn echo(&mut self, text: impl AsRef<str>) {
        self.lines.push(format!("# {}", text.as_ref()));
    }

    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Console return value of the previous command.
    pub fn status(&mut self, code: u8) {
        self.lines.push(format!("# {}", code));
    }

    pub fn banner(&mut self) {
        for line in BANNER {
            self.push(line);
        }
    }

    /// Banner variant whose last line names the run that follows.
    pub fn banner_titled(&mut self, title: &str) {
        for line in &BANNER[..3] {
            self.push(*line);
        }
        self.echo(title);
    }

    /// `select_plots {a b c}`
    pub fn select_plots(&mut self, plots: &str) {
        self.lines.push(format!("select_plots {{{}}}", plots));
    }

    /// `select_plots {plot}` followed by its echo.
    pub fn select_and_echo(&mut self, plot: &str) {
        self.select_plots(plot);
        self.echo(plot);
    }

    /// Load a TDR file and open its dataset in a plot of its own.
    pub fn load_with_plot(&mut self, path: &str, dataset: &str, plot: &str) {
        self.push(format!("load_file {} -fod", path));
        self.push(format!("create_plot -dataset {}", dataset));
        self.select_plots(plot);
        self.echo(plot);
        self.blank();
        self.echo(plot);
        self.blank();
        self.echo(dataset);
    }

    /// Create a plot for a derived dataset and select it.
    pub fn plot_dataset(&mut self, create: String, plot: &str) {
        self.push(create);
        self.select_plots(plot);
        self.echo(plot);
        self.blank();
        self.echo(plot);
    }
}

/// Space-join identifiers for a braced Tcl list.
pub fn tcl_list<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(" ")
}
