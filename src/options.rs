//! Conversion options.

/// What to do when one sheet does not follow the expected layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop at the first failing sheet and return its error
    #[default]
    Abort,
    /// Leave the failing sheet out, log it, and keep going
    Skip,
}

/// Options controlling how a workbook is converted.
///
/// # Example
///
/// ```
/// use sheetjson::{ConvertOptions, FailurePolicy};
///
/// let options = ConvertOptions::new()
///     .with_failure_policy(FailurePolicy::Skip)
///     .with_brand_fields(true);
/// assert_eq!(options.failure_policy, FailurePolicy::Skip);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Behaviour on per-sheet layout errors
    pub failure_policy: FailurePolicy,

    /// Prefix brand-grouped records with `"brand"` and `"model"` entries
    pub brand_fields: bool,
}

impl ConvertOptions {
    /// Create default options (abort on error, no brand fields).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the failure policy.
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Enable or disable brand/model entries in brand-grouped records.
    pub fn with_brand_fields(mut self, enabled: bool) -> Self {
        self.brand_fields = enabled;
        self
    }
}
