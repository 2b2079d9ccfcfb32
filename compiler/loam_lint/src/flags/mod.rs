//! Warning-control driver flags.
//!
//! Builds a [`GlobalPolicy`] from the warning-control portion of a driver
//! invocation:
//!
//! - `-Wwarning <group>` — baseline the group at `warning`
//! - `-Werror <group>` — baseline the group at `error`
//! - `-Wignore <group>` — baseline the group at `ignored`
//! - `-warnings-as-errors` / `-no-warnings-as-errors`
//! - `-suppress-warnings`
//!
//! Later flags for the same group override earlier ones, matching attribute
//! evaluation order elsewhere in the policy engine.

use loam_diagnostic::{GroupRegistry, Severity};
use tracing::debug;

use crate::GlobalPolicy;

/// Errors raised while parsing warning-control flags.
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum FlagError {
    /// An argument that is not a recognized warning-control flag.
    #[error("unknown warning flag `{flag}`")]
    UnknownFlag { flag: String },

    /// A `-W*` flag at the end of the argument list, missing its group.
    #[error("flag `{flag}` expects a diagnostic group name")]
    MissingGroup { flag: String },

    /// A `-W*` flag naming a group the registry does not know.
    #[error("unknown diagnostic group `{name}`")]
    UnknownGroup { name: String },

    /// `-suppress-warnings` combined with `-warnings-as-errors`.
    #[error("cannot combine `-suppress-warnings` with `-warnings-as-errors`")]
    SuppressWithWarningsAsErrors,
}

/// Parse warning-control flags into a [`GlobalPolicy`].
///
/// `args` holds only the warning-control arguments; the driver is expected
/// to have split off everything else already.
pub fn parse_warning_flags(
    registry: &GroupRegistry,
    args: &[&str],
) -> Result<GlobalPolicy, FlagError> {
    let mut policy = GlobalPolicy::new();
    let mut warnings_as_errors = false;
    let mut suppress = false;

    let mut iter = args.iter();
    while let Some(&flag) = iter.next() {
        match flag {
            "-warnings-as-errors" => warnings_as_errors = true,
            "-no-warnings-as-errors" => warnings_as_errors = false,
            "-suppress-warnings" => suppress = true,
            "-Wwarning" | "-Werror" | "-Wignore" => {
                let Some(&name) = iter.next() else {
                    return Err(FlagError::MissingGroup {
                        flag: flag.to_string(),
                    });
                };
                let Some(group) = registry.lookup(name) else {
                    return Err(FlagError::UnknownGroup {
                        name: name.to_string(),
                    });
                };
                let severity = match flag {
                    "-Wwarning" => Severity::Warning,
                    "-Werror" => Severity::Error,
                    _ => Severity::Ignored,
                };
                policy.set_baseline(group, severity);
            }
            other => {
                return Err(FlagError::UnknownFlag {
                    flag: other.to_string(),
                });
            }
        }
    }

    if suppress && warnings_as_errors {
        return Err(FlagError::SuppressWithWarningsAsErrors);
    }
    policy.set_warnings_as_errors(warnings_as_errors);
    policy.set_suppress_all(suppress);

    debug!(
        warnings_as_errors,
        suppress_warnings = suppress,
        "parsed warning-control flags"
    );
    Ok(policy)
}
