use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;
use std::process;

use clap::Parser;
use colored::Colorize;

use sortinghat::cli::{self, ExporterArgs};
use sortinghat::errors::{Error, Result};
use sortinghat::exitcode;
use sortinghat::export;
use sortinghat::parsing::MozilliansParser;

fn main() {
    cli::setup_logging();
    cli::install_interrupt_handler();

    let args = ExporterArgs::parse();

    if let Err(e) = run(&args) {
        eprintln!("{}", format!("Error: {}", e).red());
        process::exit(exitcode::ERROR);
    }
}

fn run(args: &ExporterArgs) -> Result<()> {
    let stream = read_input(args.infile.as_deref())?;

    let parser = MozilliansParser::new(&stream, &args.source)?;
    let (uidentities, organizations) = parser.into_parts();

    let document = export::to_json(&uidentities, &organizations, &args.source)?;
    write_output(args.outfile.as_deref(), &document)
}

/// Read the whole input as UTF-8 text, from `path` or stdin.
fn read_input(path: Option<&Path>) -> Result<String> {
    let name = stream_name(path, "<stdin>");

    let mut bytes = Vec::new();
    let read = match path {
        Some(path) => File::open(path).and_then(|mut file| file.read_to_end(&mut bytes)),
        None => io::stdin().lock().read_to_end(&mut bytes),
    };
    read.map_err(|e| Error::Read {
        path: name.clone(),
        source: e,
    })?;

    String::from_utf8(bytes).map_err(|e| Error::Read {
        path: name,
        source: io::Error::new(io::ErrorKind::InvalidData, e),
    })
}

/// Write the document and a single trailing newline, to `path` or stdout.
fn write_output(path: Option<&Path>, document: &str) -> Result<()> {
    let name = stream_name(path, "<stdout>");

    let written = match path {
        Some(path) => {
            let file = File::create(path);
            file.and_then(|file| {
                let mut writer = BufWriter::new(file);
                writeln!(writer, "{document}")?;
                writer.flush()
            })
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{document}").and_then(|_| stdout.flush())
        }
    };

    written.map_err(|e| Error::Write {
        path: name,
        source: e,
    })
}

fn stream_name(path: Option<&Path>, fallback: &str) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| fallback.to_string())
}
