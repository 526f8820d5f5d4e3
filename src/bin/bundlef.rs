use bundlef::{pack_files, Grammar, MarkerMatcher, DEFAULT_ROOT};
use clap::Parser;
use log::*;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Folder to pack.
    pub folder: PathBuf,
    /// Bundle to write. Defaults to stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t = Grammar::Bare)]
    pub grammar: Grammar,
    /// Leading path component of every file marker.
    #[arg(short, long, default_value = DEFAULT_ROOT)]
    pub root: String,
}

fn run(cli: &Cli) -> bundlef::Result<usize> {
    let matcher = MarkerMatcher::new(cli.grammar, &cli.root)?;

    match &cli.output {
        Some(out_path) => {
            let mut out_writer = BufWriter::new(File::create(out_path)?);
            pack_files(&cli.folder, &matcher, &mut out_writer)
        }
        None => pack_files(&cli.folder, &matcher, &mut io::stdout().lock()),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if !cli.folder.is_dir() {
        error!("'{}' is not a directory", cli.folder.display());
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
