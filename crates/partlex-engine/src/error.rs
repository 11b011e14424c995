//! Error types for the extraction engine

use thiserror::Error;

/// Errors that can occur while compiling a taxonomy into a context.
///
/// A malformed rule is a configuration error and must surface here, at
/// context-creation time - never silently during evaluation.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A rule's pattern failed to compile
    #[error("invalid regex in attribute '{slug}' rule '{rule}': {source}")]
    InvalidRule {
        /// Attribute the rule belongs to
        slug: String,
        /// Rule id
        rule: String,
        /// Underlying regex error
        #[source]
        source: Box<regex::Error>,
    },
}
