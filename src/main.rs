use std::{fs, process::ExitCode};

use clap::Parser;
use mava::get_result;
use tracing_subscriber::EnvFilter;

/// mava is a small scripting language whose lists double as vectors and
/// matrices.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells mava to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Pipe mode prints the value returned by a top-level `return`.
    #[arg(short, long)]
    pipe_mode: bool,

    /// Tracing filter used when `RUST_LOG` is not set.
    #[arg(long, value_name = "FILTER", default_value = "warn")]
    log: String,

    contents: String,
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt().with_env_filter(filter)
                             .with_writer(std::io::stderr)
                             .with_target(true)
                             .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(&args.log);

    let script = if args.file {
        match fs::read_to_string(&args.contents) {
            Ok(script) => script,
            Err(e) => {
                eprintln!("Failed to read the input file '{}': {e}", &args.contents);
                return ExitCode::FAILURE;
            },
        }
    } else {
        args.contents
    };

    match get_result(&script, args.pipe_mode) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            let code = u8::try_from(e.exit_code()).unwrap_or(1);
            ExitCode::from(code)
        },
    }
}
