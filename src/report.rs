//! Plain-text report of a suppression run

use boxnms_core::{Detection, DetectionSet};
use boxnms_suppress::SuppressionOutcome;
use std::fmt::Write;

/// Four overlapping-and-isolated candidates used when no input file is given
pub fn sample_detections() -> DetectionSet {
    DetectionSet::from_vec(vec![
        Detection::new(150.0, 150.0, 250.0, 250.0, 0.98).with_label(1),
        Detection::new(155.0, 148.0, 255.0, 248.0, 0.85).with_label(1),
        Detection::new(145.0, 152.0, 245.0, 252.0, 0.72).with_label(1),
        Detection::new(600.0, 100.0, 700.0, 200.0, 0.91).with_label(1),
    ])
}

/// One line per kept detection: top-left corner and confidence in percent
pub fn format_detection(det: &Detection) -> String {
    format!(
        "Location: [{}, {}] Confidence: {:.1}%",
        det.x1,
        det.y1,
        det.confidence * 100.0
    )
}

/// Counts followed by every kept detection
pub fn format_report(outcome: &SuppressionOutcome) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Raw Output Count: {}", outcome.raw_count);
    if !outcome.skipped.is_empty() {
        let _ = writeln!(out, "Skipped Invalid: {}", outcome.skipped.len());
    }
    let _ = writeln!(out, "Final Report: {} detection(s) found.", outcome.kept.len());
    let _ = writeln!(out);

    for det in outcome.kept.iter() {
        let _ = writeln!(out, "{}", format_detection(det));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxnms_suppress::SuppressionEngine;

    #[test]
    fn test_sample_report() {
        let raw = sample_detections();
        let outcome = SuppressionEngine::default().run(raw.as_slice());

        let report = format_report(&outcome);
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Raw Output Count: 4",
                "Final Report: 2 detection(s) found.",
                "",
                "Location: [150, 150] Confidence: 98.0%",
                "Location: [600, 100] Confidence: 91.0%",
            ]
        );
    }

    #[test]
    fn test_report_counts_skipped() {
        let mut raw = sample_detections().into_vec();
        raw.push(Detection::new(f32::NAN, 0.0, 1.0, 1.0, 0.5));

        let outcome = SuppressionEngine::default().run(&raw);
        let report = format_report(&outcome);
        assert!(report.contains("Raw Output Count: 5"));
        assert!(report.contains("Skipped Invalid: 1"));
        assert!(report.contains("Final Report: 2 detection(s) found."));
    }
}
