//! Report rendering: geometry CSV rows and the indented cost breakdown.

use std::io::{self, Write};

use crate::compute::{resolve_attribute, EvalError, TraceRow};
use crate::model::{AttributeId, ModelGraph, NodeId, NodeKind};
use thiserror::Error;

/// Columns of the geometry report, a min/int/max triple per measurement.
pub const GEOMETRY_HEADER: [&str; 16] = [
    "Name",
    "Fill volume min",
    "Fill volume int",
    "Fill volume max",
    "Finish volume min",
    "Finish volume int",
    "Finish volume max",
    "Total finish area min",
    "Total finish area int",
    "Total finish area max",
    "Top finish area min",
    "Top finish area int",
    "Top finish area max",
    "Walls finish area min",
    "Walls finish area int",
    "Walls finish area max",
];

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// One geometry row per named building under `root`, depth first.
pub fn geometry_rows(
    graph: &ModelGraph,
    root: NodeId,
) -> Result<Vec<Vec<String>>, EvalError> {
    let mut rows = Vec::new();
    collect_geometry(graph, root, &mut rows)?;
    Ok(rows)
}

fn collect_geometry(
    graph: &ModelGraph,
    id: NodeId,
    rows: &mut Vec<Vec<String>>,
) -> Result<(), EvalError> {
    let node = graph.node(id);
    if matches!(node.kind, NodeKind::Building { .. }) && !node.name.is_empty() {
        let mut row = vec![node.name.clone()];
        for attribute in [
            AttributeId::FillVolume,
            AttributeId::FinishVolume,
            AttributeId::TotalFinishArea,
            AttributeId::TopFinishArea,
            AttributeId::WallsFinishArea,
        ] {
            let value = resolve_attribute(graph, id, attribute)?;
            row.extend(value.magnitudes().iter().map(|m| m.to_string()));
        }
        rows.push(row);
    }
    for slot in &node.inputs {
        collect_geometry(graph, slot.input_id(), rows)?;
    }
    Ok(())
}

/// Writes the geometry report as CSV, header first.
pub fn write_geometry_csv<W: Write>(
    out: &mut W,
    graph: &ModelGraph,
    root: NodeId,
) -> Result<(), ReportError> {
    write_csv_row(out, GEOMETRY_HEADER.iter().copied())?;
    for row in geometry_rows(graph, root)? {
        write_csv_row(out, row.iter().map(String::as_str))?;
    }
    Ok(())
}

fn write_csv_row<'a, W: Write>(
    out: &mut W,
    fields: impl Iterator<Item = &'a str>,
) -> io::Result<()> {
    let mut first = true;
    for field in fields {
        if !first {
            out.write_all(b",")?;
        }
        first = false;
        if field.contains([',', '"', '\n']) {
            write!(out, "\"{}\"", field.replace('"', "\"\""))?;
        } else {
            out.write_all(field.as_bytes())?;
        }
    }
    out.write_all(b"\r\n")
}

/// Renders the evaluation trace as an indented breakdown. Unnamed nodes
/// are silent, like intermediate plumbing.
pub fn format_cost_breakdown(trace: &[TraceRow]) -> String {
    let mut out = String::new();
    for row in trace {
        if row.name.is_empty() {
            continue;
        }
        let blank = "  ".repeat(row.depth);
        out.push('\n');
        out.push_str(&format!("{blank}{}\n", row.name));
        out.push_str(&format!("{blank}{}\n", "=".repeat(row.name.len())));
        out.push_str(&format!("{blank}Amount: {}\n", row.amount));
        out.push_str(&format!("{blank}Cost: {}\n", row.cost));
    }
    out
}
