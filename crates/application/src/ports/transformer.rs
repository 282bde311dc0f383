//! Response transform port

use serde_json::Value;

/// Applies a user-supplied transform script to a parsed JSON body.
pub trait ResponseTransformer: Send + Sync {
    /// Runs `script` against `value`.
    ///
    /// # Errors
    /// Returns a message describing why the script could not be applied.
    fn transform(&self, script: &str, value: &Value) -> Result<Value, String>;
}
