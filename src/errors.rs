use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum TikaramError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    /// email 唯一约束冲突（重复报名）
    DuplicateEmail(String),
    /// 其它唯一约束冲突（重复提交）
    DuplicateEntry(String),
    /// 插入成功但拿不到 verification token，属于致命配置错误
    TokenGeneration(String),
    Validation(String),
    NotFound(String),
    Serialization(String),
    DateParse(String),
    FileOperation(String),
}

impl TikaramError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            TikaramError::DatabaseConfig(_) => "E001",
            TikaramError::DatabaseConnection(_) => "E002",
            TikaramError::DatabaseOperation(_) => "E003",
            TikaramError::DuplicateEmail(_) => "E004",
            TikaramError::DuplicateEntry(_) => "E005",
            TikaramError::TokenGeneration(_) => "E006",
            TikaramError::Validation(_) => "E007",
            TikaramError::NotFound(_) => "E008",
            TikaramError::Serialization(_) => "E009",
            TikaramError::DateParse(_) => "E010",
            TikaramError::FileOperation(_) => "E011",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            TikaramError::DatabaseConfig(_) => "Database Configuration Error",
            TikaramError::DatabaseConnection(_) => "Database Connection Error",
            TikaramError::DatabaseOperation(_) => "Database Operation Error",
            TikaramError::DuplicateEmail(_) => "Duplicate Email",
            TikaramError::DuplicateEntry(_) => "Duplicate Entry",
            TikaramError::TokenGeneration(_) => "Token Generation Error",
            TikaramError::Validation(_) => "Validation Error",
            TikaramError::NotFound(_) => "Resource Not Found",
            TikaramError::Serialization(_) => "Serialization Error",
            TikaramError::DateParse(_) => "Date Parse Error",
            TikaramError::FileOperation(_) => "File Operation Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            TikaramError::DatabaseConfig(msg) => msg,
            TikaramError::DatabaseConnection(msg) => msg,
            TikaramError::DatabaseOperation(msg) => msg,
            TikaramError::DuplicateEmail(msg) => msg,
            TikaramError::DuplicateEntry(msg) => msg,
            TikaramError::TokenGeneration(msg) => msg,
            TikaramError::Validation(msg) => msg,
            TikaramError::NotFound(msg) => msg,
            TikaramError::Serialization(msg) => msg,
            TikaramError::DateParse(msg) => msg,
            TikaramError::FileOperation(msg) => msg,
        }
    }

    /// 映射到 HTTP 状态码
    ///
    /// 校验类错误 → 400，重复 email → 409，其余基础设施错误 → 500
    pub fn http_status(&self) -> StatusCode {
        match self {
            TikaramError::Validation(_) | TikaramError::DateParse(_) => StatusCode::BAD_REQUEST,
            TikaramError::DuplicateEmail(_) | TikaramError::DuplicateEntry(_) => {
                StatusCode::CONFLICT
            }
            TikaramError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for TikaramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_type(), self.message())
    }
}

impl std::error::Error for TikaramError {}

// 便捷的构造函数
impl TikaramError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        TikaramError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        TikaramError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        TikaramError::DatabaseOperation(msg.into())
    }

    pub fn duplicate_email<T: Into<String>>(msg: T) -> Self {
        TikaramError::DuplicateEmail(msg.into())
    }

    pub fn duplicate_entry<T: Into<String>>(msg: T) -> Self {
        TikaramError::DuplicateEntry(msg.into())
    }

    pub fn token_generation<T: Into<String>>(msg: T) -> Self {
        TikaramError::TokenGeneration(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        TikaramError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        TikaramError::NotFound(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        TikaramError::Serialization(msg.into())
    }

    pub fn date_parse<T: Into<String>>(msg: T) -> Self {
        TikaramError::DateParse(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        TikaramError::FileOperation(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for TikaramError {
    fn from(err: sea_orm::DbErr) -> Self {
        TikaramError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for TikaramError {
    fn from(err: std::io::Error) -> Self {
        TikaramError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for TikaramError {
    fn from(err: serde_json::Error) -> Self {
        TikaramError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for TikaramError {
    fn from(err: chrono::ParseError) -> Self {
        TikaramError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TikaramError>;

/// 尽力而为操作（邮件发送、geo 查询、流量日志）的错误类型。
///
/// 与 TikaramError 刻意分开：这类错误没有 From 转换、没有 http_status，
/// 无法用 `?` 传播成请求失败，唯一的出口是 `log_and_discard`。
#[derive(Debug, Clone)]
pub struct BestEffortError {
    context: &'static str,
    message: String,
}

impl BestEffortError {
    pub fn new<T: Into<String>>(context: &'static str, message: T) -> Self {
        BestEffortError {
            context,
            message: message.into(),
        }
    }

    pub fn context(&self) -> &'static str {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// 记录日志后丢弃，调用方照常返回主操作的结果
    pub fn log_and_discard(self) {
        tracing::warn!("{} failed (non-blocking): {}", self.context, self.message);
    }
}

impl fmt::Display for BestEffortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.context, self.message)
    }
}

pub type BestEffortResult<T> = std::result::Result<T, BestEffortError>;
