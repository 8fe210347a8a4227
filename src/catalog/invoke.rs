use tracing::{debug, error};

use crate::error::StoreError;
use crate::store::StoreClient;

use super::{BenchCommand, KeySpace};

/// What to do when a store call fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Report the failure and stop the run.
    Halt,
    /// Count the failure against the success ratio and keep going.
    Suppress,
}

impl ErrorPolicy {
    #[must_use]
    pub const fn from_show_errors(show_errors: bool) -> Self {
        if show_errors {
            ErrorPolicy::Halt
        } else {
            ErrorPolicy::Suppress
        }
    }
}

/// Issues one catalog command (including any prelude calls) and classifies
/// the outcome.
///
/// Returns `Ok(true)` when the measured call succeeded by the command's own
/// convention and `Ok(false)` when it failed or errored under
/// [`ErrorPolicy::Suppress`].
///
/// # Errors
///
/// Returns the store error of the first failing call when the policy is
/// [`ErrorPolicy::Halt`].
pub async fn invoke<C>(
    client: &mut C,
    command: &dyn BenchCommand,
    keys: &KeySpace,
    member: &str,
    rank: Option<u32>,
    policy: ErrorPolicy,
) -> Result<bool, StoreError>
where
    C: StoreClient,
{
    for step in command.prelude(keys, member) {
        if let Err(err) = client.execute(step.command, &step.args).await {
            handle_error(err, policy)?;
        }
    }

    let args = command.build_args(keys, member, rank);
    match client.execute(command.name(), &args).await {
        Ok(reply) => Ok(command.classify(&reply)),
        Err(err) => {
            handle_error(err, policy)?;
            Ok(false)
        }
    }
}

fn handle_error(err: StoreError, policy: ErrorPolicy) -> Result<(), StoreError> {
    match policy {
        ErrorPolicy::Halt => {
            error!("{}", err);
            Err(err)
        }
        ErrorPolicy::Suppress => {
            debug!("Ignoring store error: {}", err);
            Ok(())
        }
    }
}
