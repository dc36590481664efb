use cyclekit_core::error::{CoreError, Severity};

/// Route a core error to the `tracing` level matching its severity.
pub fn log_core_error(err: &CoreError) {
    let (transaction, item) = match err.transaction {
        Some(t) => (Some(t.id), Some(t.item_index)),
        None => (None, None),
    };
    match err.severity {
        Severity::Trace => tracing::trace!(?transaction, ?item, kind = ?err.kind, "{err}"),
        Severity::Debug => tracing::debug!(?transaction, ?item, kind = ?err.kind, "{err}"),
        Severity::Info => tracing::info!(?transaction, ?item, kind = ?err.kind, "{err}"),
        Severity::Warn => tracing::warn!(?transaction, ?item, kind = ?err.kind, "{err}"),
        Severity::Error | Severity::Fatal => {
            tracing::error!(?transaction, ?item, kind = ?err.kind, "{err}")
        }
    }
}
