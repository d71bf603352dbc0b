//! Separation of review flags from the arguments passed to `git push`.

use crate::vcs::PushedRefs;

use super::error::CommandError;

/// Review flags that take a value.
const VALUE_FLAGS: [&str; 4] = ["--rr", "--rrev", "--rtitle", "--rcomment"];

/// Review flags that take no value.
const SWITCH_FLAGS: [&str; 2] = ["--reditor", super::flags::HELP_FLAG];

/// `git push` options whose separate value is never the destination.
const PUSH_VALUE_OPTIONS: [&str; 5] = ["-o", "--push-option", "--receive-pack", "--exec", "--repo"];

/// `git push` switches that send every local branch.
const ALL_BRANCH_FLAGS: [&str; 3] = ["--all", "--branches", "--mirror"];

/// `git push` switches that turn refspecs into deletions.
const DELETE_FLAGS: [&str; 2] = ["-d", "--delete"];

/// Command-line arguments split by consumer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionedArgs {
    /// Review flags, normalised to `--flag=value` form.
    pub review: Vec<String>,
    /// Everything else, in the original order.
    pub push: Vec<String>,
}

/// Pulls review flags out of `args` wherever they appear.
///
/// Both `--flag value` and `--flag=value` are accepted. Arguments after a
/// bare `--` belong to `git push`.
///
/// # Errors
///
/// Returns [`CommandError::Usage`] when a value flag is the last argument.
pub fn partition_args<I, S>(args: I) -> Result<PartitionedArgs, CommandError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut partitioned = PartitionedArgs::default();
    let mut remaining = args.into_iter().map(Into::into);

    while let Some(arg) = remaining.next() {
        if arg == "--" {
            partitioned.push.push(arg);
            partitioned.push.extend(remaining.by_ref());
            break;
        }

        let name = arg.split_once('=').map_or(arg.as_str(), |(flag, _)| flag);
        if SWITCH_FLAGS.contains(&name) {
            partitioned.review.push(arg);
        } else if VALUE_FLAGS.contains(&arg.as_str()) {
            let value = remaining.next().ok_or_else(|| CommandError::Usage {
                message: format!("{arg} requires a value"),
            })?;
            partitioned.review.push(format!("{arg}={value}"));
        } else if VALUE_FLAGS.contains(&name) {
            partitioned.review.push(arg);
        } else {
            partitioned.push.push(arg);
        }
    }

    Ok(partitioned)
}

/// What a scan of the `git push` arguments found.
#[derive(Debug, Default)]
struct PushScan<'a> {
    positionals: Vec<&'a str>,
    repo_values: Vec<&'a str>,
    all_branches: bool,
    delete: bool,
}

fn scan_push_args(push_args: &[String]) -> PushScan<'_> {
    let mut scan = PushScan::default();
    let mut args = push_args.iter();

    while let Some(arg) = args.next() {
        if arg == "--" {
            scan.positionals.extend(args.by_ref().map(String::as_str));
            break;
        }
        if let Some(value) = arg.strip_prefix("--repo=") {
            scan.repo_values.push(value);
        } else if PUSH_VALUE_OPTIONS.contains(&arg.as_str()) {
            let value = args.next();
            if arg == "--repo"
                && let Some(repo) = value
            {
                scan.repo_values.push(repo);
            }
        } else if ALL_BRANCH_FLAGS.contains(&arg.as_str()) {
            scan.all_branches = true;
        } else if DELETE_FLAGS.contains(&arg.as_str()) {
            scan.delete = true;
        } else if !arg.starts_with('-') {
            scan.positionals.push(arg);
        }
    }

    scan
}

/// Finds the push destination among `git push` arguments.
///
/// The destination is the first positional argument or the value of
/// `--repo`.
///
/// # Errors
///
/// Returns [`CommandError::Usage`] when `--repo` and a positional argument
/// name different destinations.
pub fn detect_destination(push_args: &[String]) -> Result<Option<String>, CommandError> {
    let scan = scan_push_args(push_args);
    let mut from_repo: Option<&str> = None;
    for value in scan.repo_values {
        from_repo = Some(record_repo(from_repo, value)?);
    }

    match (from_repo, scan.positionals.first().copied()) {
        (Some(repo), Some(other)) if repo != other => Err(more_than_one(repo, other)),
        (repo, other) => Ok(other.or(repo).map(ToOwned::to_owned)),
    }
}

/// Finds the local refs a push sends.
///
/// Positional arguments after the destination are refspecs. With
/// `--delete`, each names a remote ref to remove and sends nothing.
#[must_use]
pub fn detect_pushed_refs(push_args: &[String]) -> PushedRefs {
    let scan = scan_push_args(push_args);
    if scan.all_branches {
        return PushedRefs::AllBranches;
    }

    let refspecs: Vec<String> = scan
        .positionals
        .iter()
        .skip(1)
        .map(|refspec| {
            if scan.delete {
                format!(":{refspec}")
            } else {
                (*refspec).to_owned()
            }
        })
        .collect();
    if refspecs.is_empty() {
        PushedRefs::Head
    } else {
        PushedRefs::Refspecs(refspecs)
    }
}

fn record_repo<'a>(previous: Option<&'a str>, value: &'a str) -> Result<&'a str, CommandError> {
    match previous {
        Some(earlier) if earlier != value => Err(more_than_one(earlier, value)),
        _ => Ok(value),
    }
}

fn more_than_one(first: &str, second: &str) -> CommandError {
    CommandError::Usage {
        message: format!("more than one push destination given ('{first}' and '{second}')"),
    }
}
