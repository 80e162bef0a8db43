use serde::{Deserialize, Serialize};

/// Line-chart data ready for rendering.
///
/// Built by `ChartService`, drawn by the frontend. `labels` and
/// every dataset's `data` have the same length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    /// X-axis labels (local time of day of each sample)
    pub labels: Vec<String>,

    pub datasets: Vec<ChartDataset>,
}

/// One plotted series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataset {
    /// Legend label (e.g., "Price (USD)")
    pub label: String,

    /// Y values, one per label
    pub data: Vec<f64>,

    /// CSS-style stroke color, e.g. "rgb(75, 192, 192)"
    pub border_color: String,

    /// Curve smoothing factor
    pub tension: f64,

    pub fill: bool,
}

impl ChartData {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Min and max across all datasets, or `None` for an empty chart.
    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        self.datasets
            .iter()
            .flat_map(|d| d.data.iter().copied())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}
