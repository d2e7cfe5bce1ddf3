use citation_sync::cli::Cli;
use citation_sync::config::Config;
use citation_sync::git::GitCli;
use citation_sync::{logging, output, source, sync};
use clap::Parser;
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    let config = Config::try_from(Cli::parse())?;
    output::print_working_dir(&config.workspace, &config);

    let progress = output::create_sync_progress(&config);
    logging::init_logging(config.verbosity, progress.bar());

    let source = source::from_config(&config.source).inspect_err(|_| progress.finish())?;

    let vcs = GitCli::new(&config.workspace, config.git_logger());
    let callbacks = output::ConsoleCallbacks::new(progress, &config);

    let result = sync::run(&config, source.as_ref(), &vcs, &callbacks);
    output::print_summary(&result, &config);

    Ok(if result.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
