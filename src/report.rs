//! Rendering of search results as a text table or JSON.

use serde::{Deserialize, Serialize};

use std::fmt::Write;

use crate::{format_value, Error, RMatch, RRes, Topology};

/// Output format of the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Table,
    Json,
}

const HEADERS: [&str; 3] = ["Resistors (Ω)", "Total (Ω)", "Error (%)"];

/// Renders one result set as a table of its `top` best matches, or as an explicit
/// "nothing found" line when it is empty.
pub fn table(res: &RRes, top: usize) -> String {
    if res.is_empty() {
        return format!(
            "No {} combination found within tolerance.\n",
            res.topology()
        );
    }

    let rows: Vec<[String; 3]> = res
        .top(top)
        .map(|m| {
            [
                m.to_string(),
                format!("{:.1}", m.equivalent()),
                format!("{:.1}", m.error_percent()),
            ]
        })
        .collect();
    let widths: Vec<usize> = (0..3)
        .map(|col| {
            rows.iter()
                .map(|r| r[col].chars().count())
                .chain(std::iter::once(HEADERS[col].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = format!(
        "{} combinations (target {}, tolerance {}%)\n",
        capitalize(res.topology().name()),
        format_value(res.target()),
        percent(res.tolerance())
    );
    // `{:<w$}` pads by chars, so the Ω headers line up with ASCII rows.
    let _ = writeln!(
        out,
        "{:<w0$}  {:>w1$}  {:>w2$}",
        HEADERS[0],
        HEADERS[1],
        HEADERS[2],
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2]
    );
    for [combo, total, err] in &rows {
        let _ = writeln!(
            out,
            "{:<w0$}  {:>w1$}  {:>w2$}",
            combo,
            total,
            err,
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2]
        );
    }
    out
}

fn percent(fraction: f64) -> String {
    let s = format!("{:.2}", fraction * 100.0);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Serialize)]
struct JsonSet<'a> {
    topology: Topology,
    target: f64,
    tolerance: f64,
    total: usize,
    entries: Vec<&'a RMatch>,
}

/// Renders all result sets as one JSON document, each truncated to its `top` best matches.
pub fn json(sets: &[RRes], top: usize) -> Result<String, serde_json::Error> {
    let view: Vec<JsonSet> = sets
        .iter()
        .map(|res| JsonSet {
            topology: res.topology(),
            target: res.target(),
            tolerance: res.tolerance(),
            total: res.len(),
            entries: res.top(top).collect(),
        })
        .collect();
    serde_json::to_string_pretty(&view)
}

/// Renders all result sets in the requested format.
pub fn render(sets: &[RRes], format: Format, top: usize) -> Result<String, Error> {
    match format {
        Format::Table => Ok(sets
            .iter()
            .map(|res| table(res, top))
            .collect::<Vec<_>>()
            .join("\n")),
        Format::Json => Ok(json(sets, top)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search;

    #[test]
    fn empty_set_says_so() {
        let res = search(&[10.0, 20.0], 1000.0, 0.05, 2, Topology::Series).unwrap();
        assert_eq!(
            table(&res, 5),
            "No series combination found within tolerance.\n"
        );
        let res = search(&[10.0, 20.0], 1000.0, 0.05, 2, Topology::Parallel).unwrap();
        assert!(table(&res, 5).starts_with("No parallel combination"));
    }

    #[test]
    fn table_is_truncated_and_rounded() {
        let res = search(&[100.0, 220.0, 330.0], 440.0, 0.2, 3, Topology::Series).unwrap();
        assert!(res.len() > 2);
        let out = table(&res, 2);
        let lines: Vec<&str> = out.lines().collect();
        // title, header, two rows
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Series combinations (target 440R, tolerance 20%)"));
        assert!(lines[1].starts_with("Resistors (Ω)"));
        assert!(lines[2].starts_with("220R + 220R"));
        let cols: Vec<&str> = lines[2].split_whitespace().collect();
        assert_eq!(cols[cols.len() - 2..], ["440.0", "0.0"]);
        assert!(lines[3].starts_with("100R + 330R"));
    }

    #[test]
    fn parallel_members_use_parallel_separator() {
        let res = search(&[1000.0], 500.0, 0.01, 2, Topology::Parallel).unwrap();
        let out = table(&res, 5);
        assert!(out.contains("1K || 1K"));
        assert!(out.contains("500.0"));
    }

    #[test]
    fn json_lists_each_topology() {
        let inv = [1000.0, 1000.0];
        let sets = vec![
            search(&inv, 500.0, 0.01, 2, Topology::Series).unwrap(),
            search(&inv, 500.0, 0.01, 2, Topology::Parallel).unwrap(),
        ];
        let out = render(&sets, Format::Json, 2).unwrap();
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v[0]["topology"], "series");
        assert_eq!(v[0]["total"], 0);
        assert_eq!(v[1]["topology"], "parallel");
        assert_eq!(v[1]["total"], 3);
        assert_eq!(v[1]["entries"].as_array().unwrap().len(), 2);
        assert_eq!(v[1]["entries"][0]["indices"], serde_json::json!([0, 0]));
        assert_eq!(v[1]["entries"][0]["equivalent"], 500.0);
    }

    #[test]
    fn table_format_joins_sets() {
        let inv = [1000.0];
        let sets = vec![
            search(&inv, 1000.0, 0.01, 1, Topology::Series).unwrap(),
            search(&inv, 1000.0, 0.01, 1, Topology::Parallel).unwrap(),
        ];
        let out = render(&sets, Format::Table, 5).unwrap();
        assert!(out.contains("Series combinations"));
        assert!(out.contains("Parallel combinations"));
    }
}
