use roomcraft_engine::errors::EngineError;
use roomcraft_io::IoError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrontendError {
    #[error("项目存储失败: {0}")]
    Storage(#[from] IoError),
    #[error("编辑操作失败: {0}")]
    Engine(#[from] EngineError),
    #[error("命令 `{command}` 执行失败: {message}")]
    Command { command: String, message: String },
}
