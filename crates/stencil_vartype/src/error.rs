#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("unknown char {0:?}")]
    UnknownChar(char),
    #[error("unexpected eof")]
    UnexpectedEof,
    #[error("unexpected token at {0}")]
    UnexpectedToken(u16),
    #[error("input longer than {} bytes", u16::MAX)]
    InputTooLong,
}

pub type Result<T> = std::result::Result<T, Error>;
