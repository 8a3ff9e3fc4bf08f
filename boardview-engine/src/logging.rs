//! Log formatting helpers.

use serde::Serialize;
use std::fmt::Debug;

/// Wrapper for pretty-printing values in logs as YAML
///
/// ```ignore
/// use boardview_engine::Pretty;
/// use tracing::trace;
///
/// trace!("board: {}", Pretty(&board));
/// ```
///
/// Falls back to `{:#?}` if YAML serialization fails.
pub struct Pretty<T>(pub T);

impl<T: Serialize + Debug> std::fmt::Display for Pretty<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match serde_yaml_ng::to_string(&self.0) {
            Ok(yaml) => write!(f, "\n{}", yaml),
            Err(_) => write!(f, "\n{:#?}", self.0),
        }
    }
}
