use std::path::PathBuf;
use thiserror::Error;

/// Result type for operations that can produce FindError
pub type FindResult<T> = Result<T, FindError>;

/// refind 的自定义错误类型
///
/// 前半部分是编译期错误（解析表达式时产生，致命），
/// 后半部分是遍历期错误（只影响单个目录，记录后继续）。
#[derive(Debug, Error)]
pub enum FindError {
    /// 未知的谓词或运算符
    #[error("未知的谓词: {0}")]
    UnknownPredicate(String),

    /// 谓词缺少参数
    #[error("{0} 缺少参数")]
    MissingArgument(String),

    /// 未知的正则方言
    #[error("未知的正则方言: {0}")]
    InvalidDialect(String),

    /// 无效的文件类型
    #[error("无效的文件类型: {0}")]
    InvalidTypeCode(String),

    /// 模式编译失败
    #[error("无效的模式 '{pattern}': {message}")]
    PatternCompile { pattern: String, message: String },

    /// 表达式结构错误（悬空的运算符、括号不匹配等）
    #[error("无效的表达式: {0}")]
    InvalidExpression(String),

    /// 数值参数无效
    #[error("{option} 需要非负整数参数，得到 '{value}'")]
    InvalidNumber { option: String, value: String },

    /// 文件未找到
    #[error("文件未找到: {}", .0.display())]
    FileNotFound(PathBuf),

    /// 权限不足
    #[error("权限不足: {}", .0.display())]
    PermissionDenied(PathBuf),

    /// 目录不可读
    #[error("目录不可读: {}", .0.display())]
    DirectoryUnreadable(PathBuf),

    /// 文件系统错误（其他IO错误）
    #[error("文件系统错误 {}: {source}", .path.display())]
    FilesystemError {
        source: std::io::Error,
        path: PathBuf,
    },

    /// 遍历目录时的错误
    #[error("目录遍历错误: {0}")]
    WalkDirError(String),

    /// 写出结果失败
    #[error("输出错误: {0}")]
    Output(#[from] std::io::Error),
}

impl FindError {
    /// 错误类型名，用于单行错误摘要
    pub fn kind(&self) -> &'static str {
        match self {
            FindError::UnknownPredicate(_) => "UnknownPredicateError",
            FindError::MissingArgument(_) => "MissingArgumentError",
            FindError::InvalidDialect(_) => "InvalidDialectError",
            FindError::InvalidTypeCode(_) => "InvalidTypeCodeError",
            FindError::PatternCompile { .. } => "PatternCompileError",
            FindError::InvalidExpression(_) => "InvalidExpressionError",
            FindError::InvalidNumber { .. } => "InvalidNumberError",
            FindError::FileNotFound(_) => "FileNotFoundError",
            FindError::PermissionDenied(_) => "PermissionError",
            FindError::DirectoryUnreadable(_) => "DirectoryUnreadableError",
            FindError::FilesystemError { .. } => "FilesystemError",
            FindError::WalkDirError(_) => "WalkDirError",
            FindError::Output(_) => "OutputError",
        }
    }

    /// 是否为表达式编译阶段的错误
    pub fn is_compile_error(&self) -> bool {
        matches!(
            self,
            FindError::UnknownPredicate(_)
                | FindError::MissingArgument(_)
                | FindError::InvalidDialect(_)
                | FindError::InvalidTypeCode(_)
                | FindError::PatternCompile { .. }
                | FindError::InvalidExpression(_)
                | FindError::InvalidNumber { .. }
        )
    }

    /// 单行错误摘要，形如 `UnknownPredicateError: 未知的谓词: -foo`
    pub fn summary(&self) -> String {
        format!("{}: {}", self.kind(), self)
    }
}

impl From<walkdir::Error> for FindError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(|p| p.to_path_buf()).unwrap_or_default();
        match err.io_error() {
            Some(io_err) => match io_err.kind() {
                std::io::ErrorKind::NotFound => FindError::FileNotFound(path),
                std::io::ErrorKind::PermissionDenied if err.depth() == 0 => {
                    FindError::DirectoryUnreadable(path)
                }
                std::io::ErrorKind::PermissionDenied => FindError::PermissionDenied(path),
                _ => FindError::FilesystemError {
                    source: std::io::Error::new(io_err.kind(), io_err.to_string()),
                    path,
                },
            },
            None => FindError::WalkDirError(err.to_string()),
        }
    }
}
