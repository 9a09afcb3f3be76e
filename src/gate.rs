use surrealdb::Response;

use crate::errors::{Error, Result};

/// Message thrown inside the redemption transaction when the conditional
/// flip of `used` matches no row. Mapped back to a FailedPrecondition kind.
pub const INVITE_ALREADY_USED: &str = "invite already used";

/// Verify every statement of a gated mutation transaction. The transaction
/// is always `BEGIN; <mutation statements>; <audit append>; COMMIT;` built
/// as one request, so a failure on any statement (including the audit
/// write) rolls the whole unit back; a mutation is never observable
/// without its audit event.
///
/// Permission checks happen before the transaction is sent (fail-fast, no
/// partial side effects): see `utils::permission_context`.
pub fn check_gated(response: Response) -> Result<()> {
    response.check().map_err(map_store_error)?;
    Ok(())
}

fn map_store_error(e: surrealdb::Error) -> Error {
    if e.to_string().contains(INVITE_ALREADY_USED) {
        Error::InviteUsed
    } else {
        Error::SurrealError(e)
    }
}
