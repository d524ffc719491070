fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(std::io::stderr)
        .init();

    let input = std::env::args()
        .nth(1)
        .map(|path| std::fs::read_to_string(&path).expect("Failed to read file"))
        .unwrap_or_else(|| {
            "SP 1000 5000
DD N45-30-15E 120
CV * 80 62.5
DD * 40
CV S10W -150 95
DD * 30"
                .to_string()
        });

    match traverse_cogo::traverse(&input) {
        Ok(result) => {
            for segment in &result.segments {
                let attrs = segment.attributes();
                println!(
                    "#{:<3} {:<14} {:>10.3} {:>10.3} {:>10.3}",
                    attrs.segment_id,
                    attrs.direction,
                    attrs.distance,
                    attrs.radius,
                    attrs.arc_length
                );
            }
            for diagnostic in &result.diagnostics {
                eprintln!("row {}: {}", diagnostic.row, diagnostic.error);
            }
            println!("closing point: {}", result.final_point);
        }
        Err(e) => eprintln!("Error: {:?}", e),
    }
}
