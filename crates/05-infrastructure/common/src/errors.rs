//! 错误类型定义

use crate::metadata::TypeInfo;
use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置文件读取失败: {source}")]
    FileReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("配置解析失败: {source}")]
    ParseError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("配置验证失败: {message}")]
    ValidationError { message: String },
}

/// 注册错误类型
///
/// 注册选项与参数不兼容时返回，注册表保持不变。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("组件注册失败: {type_info}, 原因: 具体类型注册不能关联到其自身")]
    SelfAlias { type_info: TypeInfo },
}

impl RegistrationError {
    /// 出错的类型标识
    pub fn type_info(&self) -> TypeInfo {
        match self {
            Self::SelfAlias { type_info } => *type_info,
        }
    }
}

/// 解析错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("组件未注册: {type_info}")]
    NotRegistered { type_info: TypeInfo },

    #[error("组件未注册: {type_info}, 限定类型: {qualifier}")]
    QualifierNotRegistered {
        type_info: TypeInfo,
        qualifier: TypeInfo,
    },

    #[error(
        "存在多个可用的限定候选: {type_info}, 候选类型: [{}], 请指定限定类型",
        join_type_names(.candidates)
    )]
    AmbiguousCandidates {
        type_info: TypeInfo,
        candidates: Vec<TypeInfo>,
    },

    #[error("类型转换失败: 期望 {expected}, 实际 {actual}")]
    TypeMismatch { expected: TypeInfo, actual: TypeInfo },

    #[error("依赖注入失败: {type_info}, 原因: {message}")]
    InjectionFailed { type_info: TypeInfo, message: String },

    #[error("超出最大解析深度 {depth}: {type_info}")]
    DepthExceeded { type_info: TypeInfo, depth: usize },
}

impl ResolveError {
    /// 创建依赖注入失败错误
    pub fn injection_failed<T: ?Sized + 'static>(message: impl Into<String>) -> Self {
        Self::InjectionFailed {
            type_info: TypeInfo::of::<T>(),
            message: message.into(),
        }
    }

    /// 出错的类型标识
    pub fn type_info(&self) -> TypeInfo {
        match self {
            Self::NotRegistered { type_info }
            | Self::QualifierNotRegistered { type_info, .. }
            | Self::AmbiguousCandidates { type_info, .. }
            | Self::InjectionFailed { type_info, .. }
            | Self::DepthExceeded { type_info, .. } => *type_info,
            Self::TypeMismatch { expected, .. } => *expected,
        }
    }
}

fn join_type_names(types: &[TypeInfo]) -> String {
    types
        .iter()
        .map(|info| info.name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// 依赖注入错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DependencyError {
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// 基础设施错误类型
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("配置错误: {source}")]
    ConfigError {
        #[from]
        source: ConfigError,
    },

    #[error("依赖注入错误: {source}")]
    DependencyError {
        #[from]
        source: DependencyError,
    },

    #[error("基础设施启动失败: {message}")]
    BootstrapFailed { message: String },
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type RegistrationResult<T> = Result<T, RegistrationError>;
pub type ResolveResult<T> = Result<T, ResolveError>;
pub type InfrastructureResult<T> = Result<T, InfrastructureError>;
