use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table, presets::UTF8_FULL};
use console::style;

use crate::trace::Trace;

const STATUS_WIDTH: usize = 12;

pub fn status(label: &str, message: impl AsRef<str>) {
    eprintln!(
        "{:>width$} {}",
        style(label).green().bold(),
        message.as_ref(),
        width = STATUS_WIDTH
    );
}

pub fn warn(message: impl AsRef<str>) {
    eprintln!("{}: {}", style("warning").yellow().bold(), message.as_ref());
}

pub fn print_table(trace: &Trace) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(Row::from(vec![
            Cell::new("t (ms)").fg(Color::Cyan),
            Cell::new("x").fg(Color::Cyan),
            Cell::new("y").fg(Color::Cyan),
            Cell::new("velocity (px/s)").fg(Color::Cyan),
            Cell::new("over").fg(Color::Cyan),
        ]));

    for frame in &trace.frames {
        let over = if frame.over_scrolled {
            Cell::new("yes").fg(Color::Yellow)
        } else {
            Cell::new("")
        };
        table.add_row(Row::from(vec![
            Cell::new(frame.time_ms.to_string()),
            Cell::new(frame.x.to_string()),
            Cell::new(frame.y.to_string()),
            Cell::new(format!("{:.1}", frame.velocity)),
            over,
        ]));
    }

    println!("{table}");
}

pub fn print_json(trace: &Trace) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(trace)?);
    Ok(())
}

pub fn summarize(trace: &Trace) {
    if trace.truncated {
        warn(format!(
            "stopped after {} frames before the motion settled",
            trace.frames.len()
        ));
    } else {
        status(
            "Settled",
            format!(
                "{} frames over {} ms",
                trace.frames.len(),
                trace.elapsed_ms()
            ),
        );
    }
}
