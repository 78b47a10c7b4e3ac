// SPDX-License-Identifier: GPL-3.0-only

//! Plain-text rendering of the partitions table

use std::fmt::Write;

use crate::state::PartitionRow;

const HEADERS: [&str; 4] = ["Partition", "Format type", "Mount point", "Reformat"];

fn reformat_cell(row: &PartitionRow) -> String {
    let mark = if row.request.reformat { "[x]" } else { "[ ]" };
    if row.controls.root_hint {
        format!("{mark} (root is always re-formatted)")
    } else if !row.controls.reformat_enabled {
        format!("{mark} (locked)")
    } else {
        mark.to_string()
    }
}

fn mount_point_cell(row: &PartitionRow) -> String {
    let value = if !row.controls.mount_point_enabled {
        "-".to_string()
    } else if row.request.mount_point.is_empty() {
        "(none)".to_string()
    } else {
        row.request.mount_point.clone()
    };

    if row.controls.duplicate {
        format!("{value}  ! Duplicate mount point.")
    } else {
        value
    }
}

pub fn render_table(rows: &[PartitionRow]) -> String {
    if rows.is_empty() {
        return "No partitions\n".to_string();
    }

    let cells: Vec<[String; 4]> = rows
        .iter()
        .map(|row| {
            [
                row.request.device_spec.clone(),
                row.request.format_type.clone(),
                mount_point_cell(row),
                reformat_cell(row),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for line in &cells {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<w0$}  {:<w1$}  {:<w2$}  {}",
        HEADERS[0],
        HEADERS[1],
        HEADERS[2],
        HEADERS[3],
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2],
    );
    for line in &cells {
        let _ = writeln!(
            out,
            "{:<w0$}  {:<w1$}  {:<w2$}  {}",
            line[0],
            line[1],
            line[2],
            line[3],
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
        );
    }
    out
}
