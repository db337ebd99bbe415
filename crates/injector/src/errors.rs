//! 错误类型定义

use thiserror::Error;

/// 自动装配错误类型
///
/// 缺失与类型不匹配是两条独立的失败通道：前者表示注册表中找不到对应
/// 绑定，后者表示绑定存在但存储值无法转换为字段声明的类型。能力描述符
/// 误用不在此枚举中，它直接 panic。
#[derive(Error, Debug)]
pub enum WiringError {
    #[error("未找到类型对应的值: {type_name}")]
    ValueNotFound { type_name: String },

    #[error("类型不匹配: 期望 {expected}, 存储值无法转换")]
    TypeMismatch { expected: String },
}

impl WiringError {
    /// 创建值缺失错误
    pub fn value_not_found(type_name: impl Into<String>) -> Self {
        Self::ValueNotFound {
            type_name: type_name.into(),
        }
    }

    /// 创建类型不匹配错误
    pub fn type_mismatch(expected: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
        }
    }
}

/// 结果类型别名
pub type WiringResult<T> = Result<T, WiringError>;
