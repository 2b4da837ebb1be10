use std::borrow::Cow;

/// A specialized [`MediaError`] enum of this crate.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Upload rejected{}: {message}", format_context(.context))]
    TooLarge { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Upload rejected{}: {message}", format_context(.context))]
    UnsupportedType { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Hardware I/O failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },
}

pub trait MediaErrorExt<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, MediaError>;
}

impl<T> MediaErrorExt<T> for Result<T, MediaError> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Self {
        self.map_err(|mut e| {
            match &mut e {
                MediaError::TooLarge { context: c, .. }
                | MediaError::UnsupportedType { context: c, .. }
                | MediaError::Io { context: c, .. } => *c = Some(context.into()),
            }
            e
        })
    }
}

impl From<std::io::Error> for MediaError {
    #[inline]
    fn from(source: std::io::Error) -> Self {
        Self::Io { source, context: None }
    }
}

impl<T> MediaErrorExt<T> for Result<T, std::io::Error> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, MediaError> {
        self.map_err(|source| MediaError::Io { source, context: Some(context.into()) })
    }
}

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}
