//! Review flags accepted alongside the usual `git push` arguments.

use clap::{CommandFactory, Parser};

use super::error::CommandError;

/// Review flags, parsed after [`super::partition_args`] has separated them
/// from the push arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Parser)]
#[command(
    name = "git pushreview",
    about = "Push, then create a code review for the pushed changesets",
    override_usage = "git pushreview --rr <NAMES> [review flags] [git push arguments]",
    disable_help_flag = true,
    disable_version_flag = true,
    args_override_self = true
)]
pub struct ReviewFlags {
    /// Reviewers, comma separated; repeatable. `none` skips the review.
    #[arg(long = "rr", value_name = "NAMES")]
    pub reviewers: Vec<String>,

    /// Changeset or FROM:TO range to review; repeatable. Defaults to the
    /// latest pushed changeset.
    #[arg(long = "rrev", value_name = "REV")]
    pub revisions: Vec<String>,

    /// Review title.
    #[arg(long = "rtitle", value_name = "TEXT")]
    pub title: Option<String>,

    /// Review comment; defaults to the changeset descriptions.
    #[arg(long = "rcomment", value_name = "TEXT")]
    pub comment: Option<String>,

    /// Edit the review comment in an external editor.
    #[arg(long = "reditor")]
    pub editor: bool,
}

/// Flag that prints help for the review flags instead of pushing.
pub const HELP_FLAG: &str = "--rhelp";

impl ReviewFlags {
    /// Parses already-partitioned review flags.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::HelpRequested`] for `--rhelp` and
    /// [`CommandError::Usage`] for anything clap rejects.
    pub fn parse_flags(flags: &[String]) -> Result<Self, CommandError> {
        if flags.iter().any(|flag| flag == HELP_FLAG) {
            return Err(CommandError::HelpRequested {
                text: Self::command().render_help().to_string(),
            });
        }

        let argv = std::iter::once("git-pushreview").chain(flags.iter().map(String::as_str));
        Self::try_parse_from(argv).map_err(|error| CommandError::Usage {
            message: error.render().to_string().trim_end().to_owned(),
        })
    }
}
