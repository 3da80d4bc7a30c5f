//! The traits every command implements

use crate::ExecutionResult;
use async_trait::async_trait;
use serde_json::Value;

/// Metadata describing a command.
///
/// Implemented by `#[operation(...)]`; hand-written impls are fine too.
pub trait Operation {
    /// The action, e.g. `"move"`
    fn verb(&self) -> &'static str;

    /// The entity acted upon, e.g. `"lead"`
    fn noun(&self) -> &'static str;

    /// One-line human description
    fn description(&self) -> &'static str;

    /// Canonical op string used in activity logs (`"move lead"`)
    fn op_string(&self) -> String {
        format!("{} {}", self.verb(), self.noun())
    }
}

/// Run a command against a context `C`, failing with `E`.
#[async_trait]
pub trait Execute<C, E>: Operation + Send + Sync
where
    C: Send + Sync,
    E: Send,
{
    async fn execute(&self, ctx: &C) -> ExecutionResult<Value, E>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation;

    #[operation(verb = "rename", noun = "column", description = "Rename a column")]
    struct RenameColumn {
        title: String,
    }

    #[async_trait]
    impl Execute<(), String> for RenameColumn {
        async fn execute(&self, _ctx: &()) -> ExecutionResult<Value, String> {
            if self.title.is_empty() {
                return ExecutionResult::Failed {
                    error: "empty title".to_string(),
                    log_entry: None,
                };
            }
            ExecutionResult::Unlogged {
                value: Value::String(self.title.clone()),
            }
        }
    }

    #[test]
    fn test_macro_metadata() {
        let op = RenameColumn {
            title: "Won".into(),
        };
        assert_eq!(op.verb(), "rename");
        assert_eq!(op.noun(), "column");
        assert_eq!(op.description(), "Rename a column");
        assert_eq!(op.op_string(), "rename column");
    }

    #[tokio::test]
    async fn test_execute() {
        let ok = RenameColumn {
            title: "Won".into(),
        };
        assert_eq!(
            ok.execute(&()).await.into_result().unwrap(),
            Value::String("Won".into())
        );

        let bad = RenameColumn {
            title: String::new(),
        };
        assert_eq!(bad.execute(&()).await.into_result().unwrap_err(), "empty title");
    }
}
