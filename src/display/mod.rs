//! Human-readable renderings of evaluated models.

pub mod report;

pub use report::{
    format_cost_breakdown, geometry_rows, write_geometry_csv, ReportError, GEOMETRY_HEADER,
};
