use bundlef::{extract_file, ExtractOptions, Grammar, DEFAULT_ROOT, DEFAULT_SCRIPT};
use clap::Parser;
use log::*;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Bundle to unpack.
    pub file: PathBuf,
    /// Directory the files are written into.
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,
    #[arg(short, long, value_enum, default_value_t = Grammar::Bare)]
    pub grammar: Grammar,
    /// Leading path component of every file marker.
    #[arg(short, long, default_value = DEFAULT_ROOT)]
    pub root: String,
    /// Script to make executable after extraction.
    #[arg(long, default_value = DEFAULT_SCRIPT)]
    pub script: String,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let options = ExtractOptions {
        output: cli.output,
        grammar: cli.grammar,
        root: cli.root,
        script: cli.script,
    };

    match extract_file(&cli.file, &options) {
        Ok(report) => {
            info!(
                "Extraction complete! {} files are in '{}'.",
                report.written.len(),
                options.output.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
