use std::borrow::Cow;

/// A specialized [`StoreError`] enum of this crate.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Validation failure{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Invariant violation{}: {message}", format_context(.context))]
    Invariant { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Document not found{}: {message}", format_context(.context))]
    FileNotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Hardware I/O failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Malformed document{}: {source}", format_context(.context))]
    Malformed { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Decompression failure{}: {source}", format_context(.context))]
    Decompress { source: lz4_flex::block::DecompressError, context: Option<Cow<'static, str>> },

    #[error("Internal failure{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

pub trait StoreErrorExt<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, StoreError>;
}

impl<T> StoreErrorExt<T> for Result<T, StoreError> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Self {
        self.map_err(|mut e| {
            match &mut e {
                StoreError::Validation { context: c, .. }
                | StoreError::NotFound { context: c, .. }
                | StoreError::Invariant { context: c, .. }
                | StoreError::FileNotFound { context: c, .. }
                | StoreError::Io { context: c, .. }
                | StoreError::Malformed { context: c, .. }
                | StoreError::Decompress { context: c, .. }
                | StoreError::Internal { context: c, .. } => *c = Some(context.into()),
            }
            e
        })
    }
}

impl From<std::io::Error> for StoreError {
    #[inline]
    fn from(source: std::io::Error) -> Self {
        Self::Io { source, context: None }
    }
}

impl<T> StoreErrorExt<T> for Result<T, std::io::Error> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, StoreError> {
        self.map_err(|source| StoreError::Io { source, context: Some(context.into()) })
    }
}

impl From<serde_json::Error> for StoreError {
    #[inline]
    fn from(source: serde_json::Error) -> Self {
        Self::Malformed { source, context: None }
    }
}

impl<T> StoreErrorExt<T> for Result<T, serde_json::Error> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, StoreError> {
        self.map_err(|source| StoreError::Malformed { source, context: Some(context.into()) })
    }
}

impl From<lz4_flex::block::DecompressError> for StoreError {
    #[inline]
    fn from(source: lz4_flex::block::DecompressError) -> Self {
        Self::Decompress { source, context: None }
    }
}

impl<T> StoreErrorExt<T> for Result<T, lz4_flex::block::DecompressError> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, StoreError> {
        self.map_err(|source| StoreError::Decompress { source, context: Some(context.into()) })
    }
}

impl From<&'static str> for StoreError {
    #[inline]
    fn from(message: &'static str) -> Self {
        Self::Internal { message: Cow::Borrowed(message), context: None }
    }
}

impl From<String> for StoreError {
    #[inline]
    fn from(message: String) -> Self {
        Self::Internal { message: Cow::Owned(message), context: None }
    }
}

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}
