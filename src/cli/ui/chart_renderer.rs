use crate::core::services::ChartSeries;

const BAR: char = '#';

/// Draws `series` as horizontal bars scaled so the largest value spans
/// `width` cells. `format` renders the value printed after each bar.
pub fn render_chart(series: &ChartSeries, width: usize, format: impl Fn(f64) -> String) -> String {
    if series.is_empty() {
        return format!("{}: no data", series.title);
    }
    let peak = series.values.iter().copied().fold(0.0_f64, f64::max);
    let label_width = series
        .labels
        .iter()
        .map(|label| label.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = vec![series.title.clone()];
    for (label, value) in series.labels.iter().zip(&series.values) {
        let cells = if peak > 0.0 {
            ((value / peak) * width as f64).round() as usize
        } else {
            0
        };
        // Non-zero values always get a visible bar.
        let cells = if *value > 0.0 { cells.max(1) } else { cells };
        lines.push(format!(
            "{label:<label_width$} | {} {}",
            BAR.to_string().repeat(cells),
            format(*value)
        ));
    }
    lines.join("\n")
}
