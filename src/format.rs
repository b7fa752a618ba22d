//! Output formatting for figures and binding catalogs.

use crate::error::{DispatchError, DispatchResult};
use crate::scene::{Axes, Figure, Placement};
use serde::Serialize;
use std::path::Path;

/// Serialization format for saved scenes and merged documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "yaml" | "yml" => Some(OutputFormat::Yaml),
            _ => None,
        }
    }

    /// Format implied by a file extension, if any.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension().and_then(|ext| ext.to_str()).and_then(Self::from_str)
    }
}

/// Serialize any value in the given format.
pub fn to_string<T: Serialize>(value: &T, format: OutputFormat, pretty: bool) -> DispatchResult<String> {
    match format {
        OutputFormat::Json if pretty => serde_json::to_string_pretty(value).map_err(DispatchError::backend),
        OutputFormat::Json => serde_json::to_string(value).map_err(DispatchError::backend),
        OutputFormat::Yaml => serde_yaml::to_string(value).map_err(DispatchError::backend),
    }
}

/// Format a figure as a markdown summary.
pub fn format_figure(figure: &Figure) -> String {
    let mut md = String::new();

    let title = figure.suptitle.as_ref().map(|t| t.text.as_str()).unwrap_or("Figure");
    md.push_str(&format!("# {}\n", title));
    let (px_w, px_h) = figure.pixel_size();
    md.push_str(&format!(
        "- **size**: {} x {} in ({} x {} px at {} dpi)\n",
        figure.width, figure.height, px_w, px_h, figure.dpi
    ));
    md.push_str(&format!("- **facecolor**: {}\n", figure.facecolor));
    if !figure.frameon {
        md.push_str("- **frame**: off\n");
    }
    if let Some(ref legend) = figure.legend {
        md.push_str(&format!("- **legend**: {}\n", legend.loc));
    }
    md.push('\n');

    for (id, axes) in figure.axes.iter().enumerate() {
        md.push_str(&format_axes(id, axes));
    }

    md
}

fn format_placement(placement: &Placement) -> String {
    match placement {
        Placement::Grid { rows, cols, index } => format!("grid {}x{} #{}", rows, cols, index),
        Placement::Span { rows, cols, row, col, rowspan, colspan } => {
            format!("span {}x{} at ({}, {}) size {}x{}", rows, cols, row, col, rowspan, colspan)
        }
        Placement::Rect { left, bottom, width, height } => {
            format!("rect [{}, {}, {}, {}]", left, bottom, width, height)
        }
        Placement::Inset => "inset".to_string(),
    }
}

fn format_axes(id: usize, axes: &Axes) -> String {
    let mut md = String::new();

    md.push_str(&format!("## Axes {} ({})\n", id, format_placement(&axes.placement)));
    if let Some(ref title) = axes.title {
        md.push_str(&format!("- **title**: {}\n", title.text));
    }
    let labels: Vec<String> = [("x", &axes.xlabel), ("y", &axes.ylabel)]
        .iter()
        .filter_map(|(axis, label)| label.as_ref().map(|l| format!("{}: {}", axis, l.text)))
        .collect();
    if !labels.is_empty() {
        md.push_str(&format!("- **labels**: {}\n", labels.join(", ")));
    }
    for (axis, limits) in [("xlim", &axes.xlim), ("ylim", &axes.ylim)] {
        if limits.min.is_some() || limits.max.is_some() {
            let bound = |b: Option<f64>| b.map(|v| v.to_string()).unwrap_or_else(|| "auto".to_string());
            md.push_str(&format!("- **{}**: {} .. {}\n", axis, bound(limits.min), bound(limits.max)));
        }
    }
    if let Some(ref legend) = axes.legend {
        md.push_str(&format!("- **legend**: {} ({} handles)\n", legend.loc, axes.handles().len()));
    }

    if axes.artists.is_empty() {
        md.push_str("- _no artists_\n");
    } else {
        let kinds: Vec<&str> = axes.artists.iter().map(|a| a.kind()).collect();
        md.push_str(&format!("- **artists** ({}): {}\n", kinds.len(), kinds.join(", ")));
    }

    md.push('\n');
    md
}

/// Format the binding catalog, optionally restricted to one configurer.
pub fn format_catalog(
    catalog: &[(&'static str, Vec<&'static str>, Vec<&'static str>)],
    only: Option<&str>,
) -> String {
    let mut md = String::new();

    for (kind, direct, branch) in catalog {
        if only.is_some_and(|name| name != *kind) {
            continue;
        }
        md.push_str(&format!("## {}\n", kind));
        md.push_str(&format!("- **direct**: {}\n", direct.join(", ")));
        if !branch.is_empty() {
            md.push_str(&format!("- **branch**: {}\n", branch.join(", ")));
        }
        md.push('\n');
    }

    md
}
