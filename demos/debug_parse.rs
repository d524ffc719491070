use pest::Parser;
use traverse_cogo::{RecordParser, Rule};

fn main() {
    let input = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "CV N45-30-15E -50 25.5".to_string());

    println!("Parsing: {}", input);
    println!();

    match RecordParser::parse(Rule::line, &input) {
        Ok(pairs) => {
            println!(
                "{}",
                pest_ascii_tree::into_ascii_tree(pairs.clone()).unwrap()
            );
        }
        Err(e) => {
            eprintln!("Parse error: {}", e);
        }
    }

    match traverse_cogo::parse::parse_directive(&input) {
        Ok(Some(directive)) => println!("{directive:?}"),
        Ok(None) => println!("(blank line)"),
        Err(e) => eprintln!("{:?}", miette::Report::new(e)),
    }
}
