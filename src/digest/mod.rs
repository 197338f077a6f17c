//! Assembles extracted values into the rendered text digest.

use chrono::NaiveDate;

const HEADER_EMOJI: &str = "📊";
const HEADER_TITLE: &str = "Daily PostHog Digest";
const BULLET: &str = "•";

/// One extracted value: a metric label and its display string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

/// One digest section, mirroring a dashboard.
#[derive(Debug, Clone)]
pub struct Section {
    pub emoji: &'static str,
    pub label: &'static str,
    pub metrics: Vec<Metric>,
}

/// The assembled digest: sections in the fixed configured order.
#[derive(Debug, Clone, Default)]
pub struct Digest {
    pub sections: Vec<Section>,
}

impl Digest {
    /// Render the digest to one block of text.
    ///
    /// Sections without metrics are omitted entirely. Rendering is pure:
    /// the same sections and date always produce byte-identical output.
    #[must_use]
    pub fn render(&self, date: NaiveDate) -> String {
        let mut out = format!("{HEADER_EMOJI} {HEADER_TITLE} — {}", date.format("%A, %B %d"));

        for section in self.sections.iter().filter(|s| !s.metrics.is_empty()) {
            out.push_str("\n\n");
            out.push_str(section.emoji);
            out.push(' ');
            out.push_str(section.label);

            for metric in &section.metrics {
                out.push('\n');
                out.push_str(&format!("{BULLET} {}: {}", metric.label, metric.value));
            }
        }

        out
    }
}
