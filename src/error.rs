//! 错误类型定义

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("球队不存在: {0}")]
    UnknownTeam(String),

    #[error("赛程数据不一致: {0}")]
    MalformedSchedule(String),

    #[error("解析错误: {0}")]
    ParseError(String),

    #[error("顶点不存在: {0}")]
    VertexNotFound(usize),

    #[error("算法错误: {0}")]
    AlgorithmError(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("序列化错误: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::SerializationError(e.to_string())
    }
}
