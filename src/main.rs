use flexi_logger::Logger;
use kalimba_tab::{Notation, SequencePayload};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::process;

const USAGE: &str = "Usage: kalimba-tab [--from NOTATION] [--to NOTATION] [--json] <input.tab> [output]";

struct Options {
    from: Option<Notation>,
    to: Option<Notation>,
    json: bool,
    input_path: String,
    output_path: Option<String>,
}

fn parse_notation(flag: &str, value: Option<String>) -> Notation {
    let value = value.unwrap_or_else(|| {
        eprintln!("Missing value for {}", flag);
        eprintln!("{}", USAGE);
        process::exit(1);
    });
    value.parse().unwrap_or_else(|e| {
        eprintln!("{}", e);
        process::exit(1);
    })
}

fn parse_args() -> Options {
    let mut args = env::args().skip(1);
    let mut from = None;
    let mut to = None;
    let mut json = false;
    let mut positional = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--from" => from = Some(parse_notation("--from", args.next())),
            "--to" => to = Some(parse_notation("--to", args.next())),
            "--json" => json = true,
            "-h" | "--help" => {
                println!("{}", USAGE);
                process::exit(0);
            }
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let input_path = positional.next().unwrap_or_else(|| {
        eprintln!("{}", USAGE);
        process::exit(1);
    });

    Options {
        from,
        to,
        json,
        input_path,
        output_path: positional.next(),
    }
}

/// Write the output exactly as rendered; a trailing newline is part of the tab.
fn write_output<W: Write>(writer: &mut W, output: &str) -> io::Result<()> {
    writer.write_all(output.as_bytes())?;
    writer.flush()
}

fn main() {
    let _logger = Logger::try_with_env_or_str("warn")
        .and_then(|logger| logger.log_to_stderr().start())
        .unwrap_or_else(|e| {
            eprintln!("Failed to start logger: {}", e);
            process::exit(1);
        });

    let options = parse_args();

    // Read input file
    let source = match fs::read_to_string(&options.input_path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", options.input_path, e);
            process::exit(1);
        }
    };

    // --from overrides the front matter
    let mut doc = match kalimba_tab::parse_document_as(&source, options.from) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Error in '{}': {}", options.input_path, e);
            process::exit(1);
        }
    };

    if let Some(to) = options.to {
        doc.metadata.notation = to;
    }

    let result = if options.json {
        SequencePayload::from_sequence(&doc.sequence).to_json()
    } else {
        kalimba_tab::render_document(&doc)
    };

    let output = match result {
        Ok(output) => output,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    match options.output_path {
        Some(path) => {
            if let Err(e) = fs::write(&path, &output) {
                eprintln!("Error writing to '{}': {}", path, e);
                process::exit(1);
            }
            eprintln!("Wrote {} events to {}", doc.sequence.len(), path);
        }
        None => {
            if let Err(e) = write_output(&mut io::stdout().lock(), &output) {
                eprintln!("Error writing to stdout: {}", e);
                process::exit(1);
            }
        }
    }
}
