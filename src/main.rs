//! `git-pushreview`: push, then create a code review for what was pushed.

use std::env;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use pushreview::review::{ExternalEditor, is_bypass, normalise_reviewers};
use pushreview::{
    CommandError, CommandLine, Git2Repository, GitCliPush, HttpReviewService, PushInterceptor,
    PushReviewConfig, ReviewPipeline, ReviewServiceConfig, Reporter, SETUP_HINT, TargetResolver,
};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives.
const LOG_ENV: &str = "PUSHREVIEW_LOG";
const DEFAULT_LOG_LEVEL: &str = "warn";

fn main() -> ExitCode {
    init_logging();
    let mut reporter = Reporter::new(io::stdout().lock(), io::stderr().lock());

    match run(&mut reporter) {
        Ok(code) => ExitCode::from(code),
        Err(error) => {
            emit(reporter.command_error(&error));
            if matches!(error, CommandError::HelpRequested { .. }) {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn run<O: Write, E: Write>(reporter: &mut Reporter<O, E>) -> Result<u8, CommandError> {
    let args = env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned());
    let line = CommandLine::parse(args)?;
    let config = load_config()?;
    let pusher = GitCliPush::default();

    let bypassed = is_bypass(&normalise_reviewers(&line.flags().reviewers));
    let Some(service_url) = config.service_url()? else {
        if !bypassed {
            emit(reporter.note(SETUP_HINT));
        }
        let report = PushInterceptor::new(&pusher, None).run(&line.into_plain_push())?;
        emit(reporter.report(&report));
        return Ok(report.exit_code());
    };

    let invocation = line.into_invocation()?;
    if invocation.review.is_none() {
        let report = PushInterceptor::new(&pusher, None).run(&invocation)?;
        emit(reporter.report(&report));
        return Ok(report.exit_code());
    }

    let vcs = Git2Repository::discover(Path::new("."))?;
    // Push from the repository that was inspected, not wherever discovery started.
    let pusher = match vcs.workdir() {
        Some(workdir) => pusher.with_workdir(workdir),
        None => pusher,
    };
    let target = TargetResolver::new(service_url.clone(), config.repository_mappings()?);
    let credentials = config.credentials();
    let service = HttpReviewService::new(
        ReviewServiceConfig::new(service_url).with_timeout(config.timeout()),
    );
    let editor = ExternalEditor::from_environment(config.editor.as_deref());
    let pipeline = ReviewPipeline::new(&vcs, &target, &credentials, &service, &editor);

    let report = PushInterceptor::new(&pusher, Some(pipeline)).run(&invocation)?;
    emit(reporter.report(&report));
    Ok(report.exit_code())
}

/// Loads configuration from files and the environment.
///
/// Only the program name is handed to ortho-config: every other argument
/// belongs to `git push`.
///
/// # Errors
///
/// Returns [`CommandError::Configuration`] when a configuration source
/// cannot be read or parsed.
fn load_config() -> Result<PushReviewConfig, CommandError> {
    PushReviewConfig::load_from_iter(["git-pushreview"]).map_err(|error| {
        CommandError::Configuration {
            message: error.to_string(),
        }
    })
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_LEVEL))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    if let Err(error) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
    {
        tracing::debug!("keeping the existing subscriber: {error}");
    }
}

/// Reporting is best effort: a closed pipe must not change the exit status.
fn emit(result: io::Result<()>) {
    if let Err(error) = result {
        tracing::debug!("failed to write status output: {error}");
    }
}
