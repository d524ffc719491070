//! Walk a loop traverse, report the misclosure, and export it with the
//! computed closing point.

use traverse_cogo::{Point, TableRow, TraverseConfig, TraverseDocument, export, walk_rows};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let start = Point::new(2000.0, 3000.0);
    let rows = vec![
        TableRow::new("N12-15-30E", "250.125", "", ""),
        TableRow::new("*", "96.4", "120", "96.4"),
        TableRow::new("S78-02-10E", "180.5", "0", "0"),
        TableRow::new("S15W", "310.0", "", ""),
        TableRow::new("N80-44-00W", "ten", "", ""),
        TableRow::new("274.5", "212.733", "", ""),
    ];

    let config = TraverseConfig::default();
    let result = walk_rows(start, &rows, &config);

    for diagnostic in &result.diagnostics {
        eprintln!("row {} skipped: {}", diagnostic.row, diagnostic.error);
    }

    let misclosure = result.final_point - start;
    println!(
        "closing point {} (misclosure dx {:.3}, dy {:.3}, {:.3} total)",
        result.final_point,
        misclosure.x,
        misclosure.y,
        misclosure.length()
    );

    let records = rows.iter().filter_map(|row| row.to_record().ok()).collect();
    let document = TraverseDocument::new(start, records);
    match export(&document, &config) {
        Ok(exported) => print!("{}", exported.text),
        Err(e) => eprintln!("Error: {:?}", miette::Report::new(e)),
    }
}
