use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown platform {0:?} (expected one of: Roblox, TikTok, Character.ai)")]
    UnknownPlatform(String),

    #[error("label schema must contain at least one label")]
    EmptyLabelSchema,

    #[error("probability vector is empty")]
    EmptyProbabilities,

    #[error("class index {index} out of range for {classes} labels")]
    ClassOutOfRange { index: usize, classes: usize },
}
