use tidemark_core::TidemarkError;

/// Attribute a provider error to `provider` unless it already carries a
/// classification the caller can act on.
pub fn tag_err(provider: &str, e: TidemarkError) -> TidemarkError {
    match e {
        e @ (TidemarkError::Connector { .. }
        | TidemarkError::QuotaExceeded { .. }
        | TidemarkError::AllTiersFailed(_)) => e,
        other => TidemarkError::connector(provider, other.to_string()),
    }
}

/// Collapse per-tier fetch failures into the error returned when every tier failed.
///
/// Rules:
/// - No errors at all is not a failure and yields `None`.
/// - Otherwise the errors are wrapped, in tier order, in `AllTiersFailed`.
#[must_use]
pub fn collapse_tier_errors(errors: Vec<TidemarkError>) -> Option<TidemarkError> {
    if errors.is_empty() {
        return None;
    }
    Some(TidemarkError::AllTiersFailed(errors))
}
