//! Resource state traits.

use async_trait::async_trait;
use serde_json::Value;
use tfo_error::Result;

/// Terraform-style resource data: configuration in, computed state out.
pub trait ResourceData: Send {
    /// Returns the value for `key` if it is set.
    fn get_ok(&self, key: &str) -> Option<&Value>;

    /// The resource id; empty when the state is void.
    fn id(&self) -> &str;

    /// Sets the resource id. An empty id voids the state.
    fn set_id(&mut self, id: &str);

    /// Writes `value` under `key`.
    ///
    /// Fails when the key is unknown or the value does not fit the declared type.
    fn set(&mut self, key: &str, value: Value) -> Result<()>;
}

/// The three steps of a data source read.
///
/// `get` talks to the service, `set_data` writes the result into state, and
/// `void_state` clears the state when the read target no longer exists.
#[async_trait]
pub trait ResourceReader: Send {
    /// Fetches everything the read needs from the service.
    async fn get(&mut self) -> Result<()>;

    /// Writes what `get` fetched into resource state.
    fn set_data(&mut self) -> Result<()>;

    /// Clears resource state.
    fn void_state(&mut self);
}
