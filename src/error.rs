use crate::storage::StorageError;

fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{e}\n")?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{cause}")?;
        current = cause.source();
    }
    Ok(())
}

impl std::fmt::Debug for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[derive(thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to persist settings under `{key}`")]
    Storage {
        #[source]
        source: StorageError,
        key: String,
    },
    #[error("Failed to serialize settings")]
    Serialization(#[from] serde_json::Error),
}
