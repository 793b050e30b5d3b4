//! Invocation of the external Serval DNA resolver.

use std::path::PathBuf;

use tracing::debug;

use crate::args::AgiVariables;
use crate::error::{AgiError, Result};
use crate::exec::CommandExecutor;

/// Fixed argument pair selecting the resolver's number-lookup mode.
pub const LOOKUP_MODE: &str = "dna";
pub const LOOKUP_ACTION: &str = "lookup";

/// Environment variable the resolver reads its instance directory from.
pub const INSTANCE_PATH_VAR: &str = "SERVALINSTANCE_PATH";

/// Positional AGI arguments, per the dialplan contract.
pub const ARG_BINARY: &str = "agi_arg_1";
pub const ARG_INSTANCE_DIR: &str = "agi_arg_2";
pub const ARG_NUMBER: &str = "agi_arg_3";

/// One number lookup against one resolver instance. Immutable once built;
/// construction fails before any process is started if an argument is
/// missing.
#[derive(Debug)]
pub struct LookupRequest {
    binary: PathBuf,
    instance_dir: String,
    number: String,
}

impl LookupRequest {
    pub fn from_variables(vars: &AgiVariables) -> Result<Self> {
        Ok(LookupRequest {
            binary: PathBuf::from(vars.required(ARG_BINARY)?),
            instance_dir: vars.required(ARG_INSTANCE_DIR)?.to_string(),
            number: vars.required(ARG_NUMBER)?.to_string(),
        })
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    /// Run the resolver and hand back its captured stdout.
    ///
    /// A non-zero exit is total failure of the lookup; the output is not
    /// looked at in that case.
    pub fn resolve(&self, executor: &dyn CommandExecutor) -> Result<String> {
        debug!(number = %self.number, instance = %self.instance_dir, "resolving");
        let output = executor.execute(
            &self.binary,
            &[LOOKUP_MODE, LOOKUP_ACTION, &self.number],
            &[(INSTANCE_PATH_VAR, &self.instance_dir)],
        )?;
        if output.code != 0 {
            return Err(AgiError::ResolverFailed(output.code));
        }
        Ok(output.stdout)
    }
}
