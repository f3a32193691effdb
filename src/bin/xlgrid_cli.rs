//! CLI tool for xlgrid - lays out a grid description and outputs the
//! render snapshot as JSON
//!
//! Usage:
//!   xlgrid_cli <grid.json>              # Output JSON to stdout
//!   xlgrid_cli <grid.json> -o out.json  # Output JSON to file
//!
//! The input is an object with `columns`, `rows` and optional `options`,
//! `width`, `height`, `scrollLeft`, `scrollTop` and `selected`
//! (`{idx, rowIdx}`).

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use serde::Deserialize;
use std::env;
use std::fs;
use std::io::{self, Write};
use xlgrid::{ColumnSpec, GridController, GridOptions, Position, Row};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GridInput {
    columns: Vec<ColumnSpec>,
    #[serde(default)]
    rows: Vec<Row>,
    #[serde(default)]
    options: GridOptions,
    #[serde(default = "default_width")]
    width: f32,
    #[serde(default = "default_height")]
    height: f32,
    #[serde(default)]
    scroll_left: f32,
    #[serde(default)]
    scroll_top: f32,
    #[serde(default)]
    selected: Option<Position>,
}

fn default_width() -> f32 {
    800.0
}

fn default_height() -> f32 {
    600.0
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: xlgrid_cli <grid.json> [-o output.json]");
        std::process::exit(1);
    }

    let input_path = &args[1];
    let output_path = if args.len() > 3 && args[2] == "-o" {
        Some(&args[3])
    } else {
        None
    };

    // Read input file
    let data = match fs::read_to_string(input_path) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error reading {}: {}", input_path, e);
            std::process::exit(1);
        }
    };

    // Parse grid description
    let input: GridInput = match serde_json::from_str(&data) {
        Ok(i) => i,
        Err(e) => {
            eprintln!("Error parsing grid JSON: {}", e);
            std::process::exit(1);
        }
    };

    let mut grid = GridController::new(input.options);
    grid.resize(input.width, input.height);
    grid.set_columns(input.columns);
    grid.set_rows(input.rows);
    grid.handle_scroll(input.scroll_left, input.scroll_top);
    if let Some(position) = input.selected {
        grid.select_cell(position, false);
    }
    let snapshot = grid.render();

    // Serialize to JSON
    let json = match serde_json::to_string_pretty(&snapshot) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error serializing JSON: {}", e);
            std::process::exit(1);
        }
    };

    // Output
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &json) {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!("Written: {}", path);
        }
        None => {
            io::stdout().write_all(json.as_bytes()).unwrap();
            println!();
        }
    }
}
