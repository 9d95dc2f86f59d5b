use thiserror::Error;

pub type GalaxyResult<T> = Result<T, GalaxyError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GalaxyError {
    #[error("invalid galaxy parameter `{field}`: {reason}")]
    InvalidParameter { field: &'static str, reason: String },

    #[error("invalid color `{0}`, expected #rgb or #rrggbb")]
    InvalidColor(String),
}

impl GalaxyError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }
}
