mod error;

use error::Error;
use rustyline::{error::ReadlineError, DefaultEditor};
use std::{fs::File, io::{self, BufReader, IsTerminal, Read}};
use tac_compiler::{compile, generate_random_expression, Compilation, CompileOptions};
use tac_parser::normalize::normalize;
use tracing::{debug, Level};

/// How the results of a compilation are printed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Output {
    /// Human-readable text.
    #[default]
    Text,

    /// The JSON encoding of the compile result.
    Json,
}

/// The command-line arguments.
#[derive(Debug, Default)]
struct Args {
    output: Output,
    random: bool,
    filename: Option<String>,
}

impl Args {
    /// Parses the arguments passed to the program, skipping the program name.
    fn parse(args: impl Iterator<Item = String>) -> Self {
        let mut parsed = Self::default();
        for arg in args {
            match arg.as_str() {
                "--json" => parsed.output = Output::Json,
                "--random" => parsed.random = true,
                _ => parsed.filename = Some(arg),
            }
        }
        parsed
    }
}

/// Installs the logger. The level is read from the `TAC_LOG` environment variable, and defaults
/// to `warn`.
fn init_logging() {
    let level = std::env::var("TAC_LOG")
        .ok()
        .and_then(|level| level.parse::<Level>().ok())
        .unwrap_or(Level::WARN);

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Prints the compilation as text.
fn print_text(input: &str, compilation: &Compilation) {
    println!("original:  {}", input.trim());
    println!("processed: {}", compilation.processed_expr);

    println!("\ntac:");
    for instruction in &compilation.instructions {
        println!("  {}", instruction);
    }

    println!("\noptimized:");
    for instruction in &compilation.optimized {
        println!("  {}", instruction);
    }

    match compilation.final_result {
        Some(value) => println!("\nresult: {}", value),
        None => println!("\nresult: unresolved"),
    }

    print!("\ntree:\n{}", compilation.tree);
}

/// Compiles the input and prints the result in the requested format.
fn compile_print(input: &str, output: Output) -> Result<(), Error> {
    match output {
        Output::Json => {
            println!("{}", serde_json::to_string_pretty(&compile(input))?);
        },
        Output::Text => {
            let compilation = Compilation::new(input, &CompileOptions::default())?;
            print_text(input, &compilation);
        },
    }
    Ok(())
}

/// Compiles the input, printing the success or failure.
fn execute(input: &str, output: Output) {
    if let Err(err) = compile_print(input, output) {
        err.report_to_stderr(&normalize(input));
    }
}

/// Reads the contents of the given file.
fn read_file(filename: &str) -> Result<String, Error> {
    let mut file = BufReader::new(File::open(filename)?);
    let mut input = String::new();
    file.read_to_string(&mut input)?;
    Ok(input)
}

/// Reads and compiles one line of the REPL.
fn process_line(rl: &mut DefaultEditor, output: Output) -> Result<(), ReadlineError> {
    let input = rl.readline("> ")?;
    if input.trim().is_empty() {
        return Ok(());
    }

    rl.add_history_entry(&input)?;

    execute(&input, output);
    Ok(())
}

/// Runs the interactive mode until the user exits.
fn repl(output: Output) -> Result<(), Error> {
    let mut rl = DefaultEditor::new()?;
    loop {
        if let Err(err) = process_line(&mut rl, output) {
            return match err {
                ReadlineError::Eof | ReadlineError::Interrupted => Ok(()),
                err => Err(err.into()),
            };
        }
    }
}

fn run(args: Args) -> Result<(), Error> {
    if args.random {
        let input = generate_random_expression();
        if args.output == Output::Text {
            println!("generated: {}\n", input);
        }
        execute(&input, args.output);
    } else if let Some(filename) = &args.filename {
        // compile source file
        debug!(%filename, "reading file");
        execute(&read_file(filename)?, args.output);
    } else if !io::stdin().is_terminal() {
        // read source from stdin
        let mut input = String::new();
        io::stdin().read_to_string(&mut input)?;
        execute(&input, args.output);
    } else {
        repl(args.output)?;
    }
    Ok(())
}

fn main() {
    init_logging();

    if let Err(err) = run(Args::parse(std::env::args().skip(1))) {
        err.report_to_stderr("");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Args {
        Args::parse(list.iter().map(ToString::to_string))
    }

    #[test]
    fn parse_flags() {
        let parsed = args(&["--json", "input.txt"]);
        assert_eq!(parsed.output, Output::Json);
        assert!(!parsed.random);
        assert_eq!(parsed.filename.as_deref(), Some("input.txt"));
    }

    #[test]
    fn defaults() {
        let parsed = args(&[]);
        assert_eq!(parsed.output, Output::Text);
        assert!(!parsed.random);
        assert_eq!(parsed.filename, None);
    }

    #[test]
    fn random_flag() {
        assert!(args(&["--random"]).random);
    }
}
