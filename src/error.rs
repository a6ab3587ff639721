use swc_core::common::{SourceMapper, Span};
use thiserror::Error;

/// Broad category of a [`TransformError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A node shape the compiler does not understand.
    Structural,
    /// A recognized construct used in an invalid way.
    Semantic,
}

/// Fatal error raised while compiling the JSX of one file.
///
/// Every variant carries the span of the offending node so the host can point
/// at it. There is no recovery: the first error aborts the file.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("namespaced tag `{name}` is not supported")]
    UnsupportedTag { name: String, span: Span },

    #[error("`{directive}` needs an expression container value, e.g. {directive}={{value}}")]
    ModelRequiresExpression { directive: String, span: Span },

    #[error("`v-models` can only be used on components")]
    ModelsOnIntrinsic { span: Span },

    #[error("`v-models` expects a two-dimensional array, e.g. v-models={{[[a, \"a\"], [b, \"b\"]]}}")]
    ModelsNotNested { span: Span },

    #[error("the value bound by `{directive}` is not assignable")]
    NotAssignable { directive: String, span: Span },
}

impl TransformError {
    pub fn span(&self) -> Span {
        match self {
            TransformError::UnsupportedTag { span, .. }
            | TransformError::ModelRequiresExpression { span, .. }
            | TransformError::ModelsOnIntrinsic { span }
            | TransformError::ModelsNotNested { span }
            | TransformError::NotAssignable { span, .. } => *span,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            TransformError::UnsupportedTag { .. } => ErrorKind::Structural,
            _ => ErrorKind::Semantic,
        }
    }

    /// `file:line:col: message`, or just the message for synthetic spans.
    pub fn describe(&self, cm: &dyn SourceMapper) -> String {
        let span = self.span();
        if span.is_dummy() {
            return self.to_string();
        }
        let loc = cm.lookup_char_pos(span.lo());
        format!("{}:{}:{}: {}", loc.file.name, loc.line, loc.col.0 + 1, self)
    }
}

/// Invalid plugin configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed plugin configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid custom element pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

pub type Result<T, E = TransformError> = std::result::Result<T, E>;
