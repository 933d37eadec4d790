use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("At least one {noun} is required")]
    LastRecord { noun: &'static str },

    #[error("No {noun} with id {id}")]
    UnknownRecord { noun: &'static str, id: u32 },
}
