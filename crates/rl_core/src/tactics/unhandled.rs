use super::tactician::{TacticContext, TacticOutcome, TacticRequest, Tactician};
use crate::error::Result;

/// Placeholder for tactic types with no behavior yet; the manager turns
/// `NotHandled` into neutral controls.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnhandledTactician;

impl Tactician for UnhandledTactician {
    fn execute(
        &self,
        _ctx: &mut TacticContext<'_>,
        request: TacticRequest<'_>,
    ) -> Result<TacticOutcome> {
        log::debug!("No behavior for {} yet", request.kind);
        Ok(TacticOutcome::NotHandled)
    }
}
