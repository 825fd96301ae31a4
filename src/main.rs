mod cli;

use std::env;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::bail;
use clap::Parser;
use log::{error, LevelFilter};

use upload_resetter::{dump, run, AlwaysConfirm, Config, Confirm, Prompt, RunOptions, RunOutcome, StateFile};

use crate::cli::Args;

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose { LevelFilter::Debug } else { LevelFilter::Info };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_target(false)
        .init();

    match use_args(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn use_args(args: Args) -> anyhow::Result<()> {
    let dir = match args.path {
        Some(dir) => {
            if !dir.is_dir() {
                bail!("Directory not found: {}", dir.display());
            }
            dir
        }
        None => env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };

    let config = Config::load(&dir)?;
    let state = StateFile::new(config.state_path(&dir), &config.backup_suffix);

    if args.dump {
        let json = dump(&state)?;
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    if args.single {
        println!("Single file mode enabled\n");
    }

    let stdin = io::stdin();
    let mut prompt = Prompt::new(stdin.lock(), io::stdout());
    let mut always = AlwaysConfirm;
    let confirm: &mut dyn Confirm = if args.single { &mut prompt } else { &mut always };

    let options = RunOptions {
        interactive: args.single,
        dry_run: args.dry_run,
    };

    match run(&state, &config, options, confirm)? {
        RunOutcome::Reset { names, backup } => {
            println!("Backup created: {}", backup.display());
            println!("\nUploaded amount reset successfully for the following torrents:");
            print_names(&names);
        }
        RunOutcome::DryRun { names } => {
            println!("\nDry run: uploaded amount would be reset for the following torrents:");
            print_names(&names);
        }
        RunOutcome::NothingToReset => {
            println!("\nNo torrents with uploaded > 0. Nothing to reset.");
        }
    }
    Ok(())
}

fn print_names(names: &[String]) {
    for (i, name) in names.iter().enumerate() {
        println!("{}. {}", i + 1, name);
    }
}
