//! Presentation of an analysis: what a UI would put in its gauge, bars and tip list.

use std::fmt::Write as _;

use anyhow::Result;
use facegrade_vision::{Analysis, RatioSet, RawMeasurements, Tip};
use serde::Serialize;

use crate::config::{Config, OutputFormat};

const EMPTY: &str = "—";
const BAR_WIDTH: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: &'static str,
    pub value: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TipView {
    pub title: &'static str,
    pub body: &'static str,
}

impl From<&Tip> for TipView {
    fn from(tip: &Tip) -> Self {
        Self {
            title: tip.title,
            body: tip.body,
        }
    }
}

/// Display state. [`Report::cleared`] is what the display shows when no face was found.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub faces_detected: usize,
    /// Overall score; `None` renders as a dash with an empty gauge.
    pub overall: Option<u8>,
    pub bars: Vec<Bar>,
    /// Symmetry with one decimal, e.g. "97.3%".
    pub symmetry_percent: Option<String>,
    pub tips: Vec<TipView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratios: Option<RatioSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurements: Option<RawMeasurements>,
}

impl Report {
    pub fn from_analysis(analysis: &Analysis, cfg: &Config) -> Self {
        let s = &analysis.sub_scores;
        Self {
            faces_detected: 1,
            overall: Some(analysis.overall),
            bars: bars([
                Some(s.symmetry),
                Some(s.proportion),
                Some(s.feature),
                Some(s.skin),
            ]),
            symmetry_percent: Some(format!("{:.1}%", analysis.symmetry_percent)),
            tips: analysis.tips.iter().map(TipView::from).collect(),
            ratios: cfg.show_ratios.then_some(analysis.ratios),
            measurements: cfg
                .show_measurements
                .then(|| analysis.measurements.clone()),
        }
    }

    pub fn cleared() -> Self {
        Self {
            faces_detected: 0,
            overall: None,
            bars: bars([None; 4]),
            symmetry_percent: None,
            tips: Vec::new(),
            ratios: None,
            measurements: None,
        }
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            OutputFormat::Text => Ok(self.render_text()),
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let overall = self
            .overall
            .map_or_else(|| EMPTY.to_string(), |v| v.to_string());
        let _ = writeln!(out, "Faces detected: {}", self.faces_detected);
        let _ = writeln!(
            out,
            "Overall: {:>3}  {}",
            overall,
            gauge(self.overall.unwrap_or(0))
        );
        let _ = writeln!(
            out,
            "Symmetry: {}",
            self.symmetry_percent.as_deref().unwrap_or(EMPTY)
        );
        out.push('\n');

        for bar in &self.bars {
            let value = bar.value.map_or_else(|| EMPTY.to_string(), |v| v.to_string());
            let _ = writeln!(
                out,
                "  {:<11} {:>3}  {}",
                bar.label,
                value,
                gauge(bar.value.unwrap_or(0))
            );
        }

        if let Some(r) = &self.ratios {
            out.push('\n');
            let _ = writeln!(out, "Ratios:");
            let _ = writeln!(out, "  face h/w      {:.3}", r.face_ratio);
            let _ = writeln!(out, "  eye spacing   {:.3}", r.eye_spacing);
            let _ = writeln!(out, "  nose width    {:.3}", r.nose_ratio);
            let _ = writeln!(out, "  mouth width   {:.3}", r.mouth_ratio);
            let _ = writeln!(
                out,
                "  eye openness  {:.3} / {:.3}",
                r.eye_openness_l, r.eye_openness_r
            );
        }

        if let Some(m) = &self.measurements {
            out.push('\n');
            let _ = writeln!(out, "Measurements (px):");
            let _ = writeln!(
                out,
                "  face {:.1} x {:.1}, interocular {:.1}",
                m.face_width, m.face_height, m.interocular
            );
            let _ = writeln!(
                out,
                "  eyes {:.1} x {:.1} / {:.1} x {:.1}",
                m.eye_width_l, m.eye_height_l, m.eye_width_r, m.eye_height_r
            );
            let _ = writeln!(
                out,
                "  nose {:.1}, mouth {:.1}, symmetry error {:.2}",
                m.nose_width, m.mouth_width, m.sym_error_sum
            );
        }

        if !self.tips.is_empty() {
            out.push('\n');
            let _ = writeln!(out, "Tips:");
            for tip in &self.tips {
                let _ = writeln!(out, "  * {}: {}", tip.title, tip.body);
            }
        }
        out
    }
}

fn bars(values: [Option<u8>; 4]) -> Vec<Bar> {
    ["Symmetry", "Proportion", "Features", "Skin"]
        .into_iter()
        .zip(values)
        .map(|(label, value)| Bar { label, value })
        .collect()
}

/// Fixed-width bar, filled proportionally to a 0-100 value.
fn gauge(value: u8) -> String {
    let filled = usize::from(value.min(100)) * BAR_WIDTH / 100;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}
