/// Output validation errors.
///
/// Validation itself never fails on bad model output; that is reported in the
/// `ValidationResult`. This error means upstream data was malformed, which is
/// a bug and must not be masked.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("internal validation error: {reason}")]
    Internal { reason: String },
}
