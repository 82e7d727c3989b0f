use crate::core::Renderer;
use crate::domain::model::Analysis;
use crate::render::format::format_value;
use crate::utils::error::Result;
use std::fmt::Write;

pub const DEFAULT_WIDTH: usize = 40;
const BAR: char = '█';

/// Parallel label/value arrays for a bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartData {
    /// Non-finite values become 0; this only affects the chart.
    pub fn from_analysis(analysis: &Analysis) -> Self {
        Self {
            title: analysis.category.title.to_string(),
            labels: analysis.ratios.labels().into_iter().map(String::from).collect(),
            values: analysis
                .ratios
                .values()
                .into_iter()
                .map(|v| if v.is_finite() { v } else { 0.0 })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Horizontal text bars, baseline at zero.
#[derive(Debug, Clone)]
pub struct BarChart {
    width: usize,
}

impl Default for BarChart {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH)
    }
}

impl BarChart {
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(1),
        }
    }

    pub fn draw(&self, data: &ChartData) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", data.title);
        if data.is_empty() {
            return out;
        }

        let label_width = data
            .labels
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0);
        let max = data.values.iter().copied().fold(0.0_f64, f64::max);

        for (label, value) in data.labels.iter().zip(&data.values) {
            let len = self.bar_len(*value, max);
            let bar: String = std::iter::repeat(BAR).take(len).collect();
            let _ = writeln!(
                out,
                "{:<lw$} │{:<bw$} {}",
                label,
                bar,
                format_value(Some(*value)),
                lw = label_width,
                bw = self.width
            );
        }
        out
    }

    fn bar_len(&self, value: f64, max: f64) -> usize {
        if value <= 0.0 || max <= 0.0 {
            return 0;
        }
        ((value / max) * self.width as f64).round() as usize
    }
}

impl Renderer for BarChart {
    fn render(&self, analysis: &Analysis) -> Result<String> {
        Ok(self.draw(&ChartData::from_analysis(analysis)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(labels: &[&str], values: &[f64]) -> ChartData {
        ChartData {
            title: "Test".to_string(),
            labels: labels.iter().map(|l| l.to_string()).collect(),
            values: values.to_vec(),
        }
    }

    #[test]
    fn test_bars_scale_to_largest_value() {
        let chart = BarChart::new(10);
        let out = chart.draw(&data(&["A", "B"], &[10.0, 5.0]));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Test");
        assert_eq!(lines[1].matches(BAR).count(), 10);
        assert_eq!(lines[2].matches(BAR).count(), 5);
        assert!(lines[1].ends_with(" 10"));
    }

    #[test]
    fn test_negative_values_draw_no_bar() {
        let chart = BarChart::new(10);
        let out = chart.draw(&data(&["Loss", "Gain"], &[-3.0, 2.0]));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[1].matches(BAR).count(), 0);
        assert!(lines[1].ends_with("-3"));
        assert_eq!(lines[2].matches(BAR).count(), 10);
    }

    #[test]
    fn test_labels_are_aligned() {
        let out = BarChart::new(4).draw(&data(&["Beta (β)", "Alpha (α) long"], &[1.0, 1.0]));
        let bars: Vec<usize> = out
            .lines()
            .skip(1)
            .map(|l| l.chars().position(|c| c == '│').unwrap())
            .collect();
        assert_eq!(bars[0], bars[1]);
    }

    #[test]
    fn test_empty_chart_is_title_only() {
        let out = BarChart::default().draw(&data(&[], &[]));
        assert_eq!(out, "Test\n");
    }
}
