//! CLI for chatmark - renders chat markdown to safe HTML

use chatmark::{ChatMarkdown, RenderOptions, Result};
use clap::Parser;
use std::io::{Read, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input markdown file path (reads stdin if not specified or "-")
    input: Option<PathBuf>,

    /// Output HTML file path (optional, prints to stdout if not specified)
    output: Option<PathBuf>,

    /// Inputs larger than this many bytes are rendered as plain text
    #[arg(long, default_value_t = RenderOptions::default().max_input_bytes)]
    max_input_bytes: usize,

    /// Nested blockquote levels parsed as markdown
    #[arg(long, default_value_t = RenderOptions::default().max_quote_depth)]
    max_quote_depth: usize,

    /// Log at info level (otherwise RUST_LOG decides)
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let options = RenderOptions {
        max_input_bytes: args.max_input_bytes,
        max_quote_depth: args.max_quote_depth,
    };
    options.validate()?;

    let content = match &args.input {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)?,
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let html = ChatMarkdown::new(options).render(&content);

    match &args.output {
        Some(output) => {
            std::fs::write(output, &html)?;
            tracing::info!(output = %output.display(), bytes = html.len(), "Wrote HTML");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(html.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}
