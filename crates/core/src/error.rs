// Central Error Types for Trellis

use thiserror::Error;

/// Numeric RPC error codes carried alongside the string classification
pub mod code {
    pub const VALIDATION_ERROR: i32 = 4000;
    pub const NOT_FOUND: i32 = 4001;
    pub const UNAUTHORIZED: i32 = 4002;
    pub const FORBIDDEN: i32 = 4003;
    pub const THROTTLED: i32 = 4004;
    pub const INTERNAL_ERROR: i32 = 5000;
}

/// Router-construction errors.
///
/// Raised synchronously while the procedure tree is assembled, so a
/// misconfigured controller fails at startup instead of at first request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("duplicate route name '{route}' in class {class}")]
    DuplicateRoute { class: String, route: String },

    #[error("duplicate router namespace '{0}'")]
    DuplicateNamespace(String),

    #[error("declared member '{method}' of class {class} is not callable")]
    NotCallable { class: String, method: String },
}

/// Request-time errors surfaced through middleware and resolvers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RpcError {
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("too many requests: {0}")]
    TooManyRequests(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl RpcError {
    /// String classification handed to the external runtime
    pub fn code_str(&self) -> &'static str {
        match self {
            RpcError::Unauthorized(_) => "UNAUTHORIZED",
            RpcError::Forbidden(_) => "FORBIDDEN",
            RpcError::TooManyRequests(_) => "TOO_MANY_REQUESTS",
            RpcError::Validation(_) => "BAD_REQUEST",
            RpcError::NotFound(_) => "NOT_FOUND",
            RpcError::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Numeric code (see [`code`])
    pub fn code(&self) -> i32 {
        match self {
            RpcError::Unauthorized(_) => code::UNAUTHORIZED,
            RpcError::Forbidden(_) => code::FORBIDDEN,
            RpcError::TooManyRequests(_) => code::THROTTLED,
            RpcError::Validation(_) => code::VALIDATION_ERROR,
            RpcError::NotFound(_) => code::NOT_FOUND,
            RpcError::Internal(_) => code::INTERNAL_ERROR,
        }
    }
}

impl From<crate::port::schema::SchemaError> for RpcError {
    fn from(err: crate::port::schema::SchemaError) -> Self {
        RpcError::Validation(err.message)
    }
}

/// Result alias for router-construction operations
pub type RegistryResult<T> = std::result::Result<T, RegistryError>;
