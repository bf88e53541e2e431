//! The data source read lifecycle.

use chrono::Utc;
use tfo_error::{Result, is_not_found};
use tfo_traits::ResourceReader;
use tfo_types::format_sdk_time;
use tracing::warn;

/// Run a read: `get`, then `set_data`.
///
/// A not-found error from `get` means the target is gone. The state is
/// voided and the read succeeds. Every other error propagates unchanged.
pub async fn read_resource<R>(reader: &mut R) -> Result<()>
where
    R: ResourceReader + ?Sized,
{
    if let Err(e) = reader.get().await {
        if is_not_found(&e) {
            warn!(error = %e, "Read target no longer exists, removing it from state");
            reader.void_state();
            return Ok(());
        }
        return Err(e);
    }

    reader.set_data()
}

/// Id for a data source read: the current UTC time in SDK string form.
pub fn generate_data_source_id() -> String {
    format_sdk_time(&Utc::now())
}
