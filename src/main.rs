use clap::{ArgAction, Parser as ClapParser};
use overwrite::cli::{self, BuildOptions, CliError};
use overwrite::{to_json, to_json_pretty};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "overwrite")]
#[command(about = "Overwrite - build a document from JSON/YAML files and KEY=VALUE assignments")]
#[command(
    long_about = "Builds a document starting from an empty object. A JSON document piped on \
stdin is merged first, then each argument is applied in order:\n\n  \
KEY=VALUE or --KEY=VALUE   set the value at KEY, creating missing fields and elements\n  \
FILE.json, FILE.yaml       merge the document's top-level keys onto the object\n\n\
KEYs are dotted and indexed: \"foo.bar=baz\" creates 'foo' if needed and gives it a \
'bar' field with value \"baz\"; \"arr[0]=123\" creates 'arr' as a list and sets its \
first element. Existing values keep their type, so \"count=5\" onto {\"count\": 3} \
stores the number 5."
)]
#[command(version)]
struct Cli {
    /// Assignments (KEY=VALUE) and documents (FILE.json, FILE.yaml), applied in order
    #[arg(allow_hyphen_values = true)]
    args: Vec<String>,

    /// Print compact JSON
    #[arg(short, long)]
    compact: bool,

    /// Print YAML instead of JSON
    #[arg(short, long, conflicts_with = "compact")]
    yaml: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let stdin = if !atty::is(atty::Stream::Stdin) {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|source| CliError::Io {
                path: "<stdin>".into(),
                source,
            })?;
        Some(buffer)
    } else {
        None
    };

    let options = BuildOptions {
        args: cli.args,
        stdin,
    };
    let value = cli::execute_build(&options)?;

    if cli.yaml {
        print!("{}", cli::to_yaml(&value)?);
    } else if cli.compact {
        println!("{}", to_json(&value));
    } else {
        println!("{}", to_json_pretty(&value));
    }
    Ok(())
}
