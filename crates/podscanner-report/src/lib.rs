//! Report rendering for podscanner
//!
//! Renders a [`ScanReport`] either as a box-drawn table for terminals or as
//! JSON for scripts.

mod table;

pub use table::Table;

use podscanner_types::{IdentifiedWorkload, NamespaceFailure, OutputFormat, ScanReport};

/// Render the whole report in the requested format
pub fn render_report(report: &ScanReport, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(report)),
        OutputFormat::Json => serde_json::to_string_pretty(report),
    }
}

/// Workloads table, followed by a failure table when any namespace failed
pub fn render_table(report: &ScanReport) -> String {
    let mut out = render_workloads(&report.workloads);
    if report.has_failures() {
        out.push('\n');
        out.push_str(&render_failures(&report.failures));
    }
    out
}

/// One row per workload, in the order given
pub fn render_workloads(workloads: &[IdentifiedWorkload]) -> String {
    let mut table = Table::new(["Namespace", "Pod", "Container", "Image"]);
    for w in workloads {
        table.push_row([
            w.namespace.as_str(),
            w.pod.as_str(),
            w.container_name.as_str(),
            w.image.as_str(),
        ]);
    }
    table.render()
}

pub fn render_failures(failures: &[NamespaceFailure]) -> String {
    let mut table = Table::new(["Failed Namespace", "Error"]);
    for f in failures {
        table.push_row([f.namespace.as_str(), f.cause.as_str()]);
    }
    table.render()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> ScanReport {
        ScanReport {
            workloads: vec![
                IdentifiedWorkload::new("a", "pod-a", "c1", "redis"),
                IdentifiedWorkload::new("b", "pod-b", "c3", "app:latest"),
            ],
            failures: Vec::new(),
        }
    }

    #[test]
    fn test_workloads_table() {
        let rendered = render_table(&report());
        let expected = "\
┌───────────┬───────┬───────────┬────────────┐
│ NAMESPACE │ POD   │ CONTAINER │ IMAGE      │
├───────────┼───────┼───────────┼────────────┤
│ a         │ pod-a │ c1        │ redis      │
├───────────┼───────┼───────────┼────────────┤
│ b         │ pod-b │ c3        │ app:latest │
└───────────┴───────┴───────────┴────────────┘
";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_failures_appended() {
        let mut report = report();
        report.failures.push(NamespaceFailure {
            namespace: "c".to_string(),
            cause: "forbidden".to_string(),
        });

        let rendered = render_table(&report);
        assert!(rendered.contains("│ FAILED NAMESPACE │ ERROR     │"));
        assert!(rendered.contains("│ c                │ forbidden │"));
    }

    #[test]
    fn test_json_output() {
        let json = render_report(&report(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["workloads"][1]["container_name"], "c3");
        assert_eq!(value["failures"].as_array().map(Vec::len), Some(0));
    }
}
