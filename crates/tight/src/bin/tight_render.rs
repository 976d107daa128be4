//! `tight-render`: render a JsonML template against JSON data.
//!
//! Usage:
//!   tight-render '<jsonml template>' < data.json
//!
//! The data document is read from stdin and must be an object; each
//! top-level key is written into the store before the HTML is printed.

use std::io::{self, Read, Write};
use tight::cli::render_template;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let template = match args.get(1) {
        Some(t) => t.clone(),
        None => {
            eprintln!("First argument must be a JsonML template.");
            std::process::exit(1);
        }
    };

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }
    let data = if buf.trim().is_empty() { "{}" } else { buf.trim() };

    match render_template(&template, data) {
        Ok(html) => {
            let mut out = io::stdout();
            if let Err(e) = writeln!(out, "{html}") {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
