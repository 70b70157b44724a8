use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("model has not been trained yet")]
    UntrainedModel,

    #[error("unknown meta category: {0}")]
    UnknownMetaCategory(String),

    #[error("no preference given for meta category: {0}")]
    MissingMetaCategory(String),

    #[error("unknown attribute: {0}")]
    UnknownAttribute(String),

    #[error("item '{item}' has no value for attribute '{attribute}'")]
    MissingAttribute { item: String, attribute: String },

    #[error("unknown value '{value}' for attribute '{attribute}'")]
    UnknownAttributeValue { attribute: String, value: String },

    #[error("invalid similarity dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    #[error("similarity channels cover {channels} items but the catalog has {items}")]
    ChannelCountMismatch { channels: usize, items: usize },
}

impl Error {
    /// True for errors caused by malformed training or query input, as
    /// opposed to querying before a model exists.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Error::UntrainedModel)
    }
}
