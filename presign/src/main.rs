//! `presign` prints a time-limited signed URL for a single s3 object.
//!
//! ```text
//! presign [OPTIONS] (<BUCKET> <KEY> | <OBJECT_URL>)
//! ```
//!
//! The URL is the only thing written to stdout. Diagnostics go to stderr and
//! are controlled with `RUST_LOG`.

mod cli;

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use log::debug;
use reqsign::OsEnv;
use s3presign_aws::AwsPresigner;
use s3presign_core::{Presigner, Result};

use crate::cli::{PresignCli, Target};

/// Exit status for bad invocations: wrong positionals, unparsable flags or
/// input the presigner rejects before signing.
const USAGE_EXIT_CODE: u8 = 1;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::init();

    let cli = match PresignCli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // --help and --version are printed to stdout and are not failures.
            return if err.use_stderr() {
                ExitCode::from(USAGE_EXIT_CODE)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let Some(target) = cli.target() else {
        eprintln!("{}", PresignCli::command().render_help());
        return ExitCode::from(USAGE_EXIT_CODE);
    };

    match presign(&cli, target).await {
        Ok(url) => {
            println!("{url}");
            ExitCode::SUCCESS
        }
        Err(err) if err.is_input_error() => {
            eprintln!("presign: {:#}", anyhow::Error::from(err));
            eprintln!("{}", PresignCli::command().render_usage());
            ExitCode::from(USAGE_EXIT_CODE)
        }
        Err(err) => {
            eprintln!("presign: {:#}", anyhow::Error::from(err));
            ExitCode::FAILURE
        }
    }
}

async fn presign(cli: &PresignCli, target: Target<'_>) -> Result<String> {
    let reference = target.resolve()?;
    debug!("resolved {target:?} to {reference}");

    let config = cli.config().from_env(&OsEnv).from_profile(&OsEnv)?;
    let presigner = Presigner::new(AwsPresigner::new(config)?);

    presigner.presign(&reference, &cli.method, cli.expire).await
}
