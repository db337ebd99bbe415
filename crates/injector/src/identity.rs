//! 类型身份定义
//!
//! 提供具体类型与能力（trait 对象）类型的可比较身份句柄

use std::any::TypeId;
use std::fmt;

/// 类型身份
///
/// 两个 `TypeIdentity` 相等当且仅当它们指向同一个类型。身份携带完整类型
/// 名称用于诊断输出，可廉价复制，可作为映射键。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeIdentity {
    /// 类型ID
    pub id: TypeId,
    /// 完整类型名称
    pub name: &'static str,
}

impl TypeIdentity {
    /// 获取任意类型的身份
    ///
    /// 对具体类型和能力类型都适用；不做形状检查。
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// 获取能力类型的身份
    ///
    /// `C` 必须是 trait 对象类型（`dyn Trait`）。传入其他类型属于调用方
    /// 误用，会在调用点立即 panic，而不是返回可恢复的错误。
    ///
    /// # Panics
    ///
    /// 当 `C` 不是 trait 对象类型时 panic。
    ///
    /// # 示例
    ///
    /// ```rust
    /// use injector::TypeIdentity;
    ///
    /// trait Speaker: Send + Sync {}
    ///
    /// let identity = TypeIdentity::of_capability::<dyn Speaker>();
    /// assert!(identity.is_capability());
    /// ```
    pub fn of_capability<C: ?Sized + 'static>() -> Self {
        let identity = Self::of::<C>();
        let fat_pointer = std::mem::size_of::<*const C>() > std::mem::size_of::<*const ()>();
        if !fat_pointer || !identity.is_capability() {
            panic!(
                "TypeIdentity::of_capability 只接受 trait 对象类型 (dyn Trait), 实际传入: {}",
                identity.name
            );
        }
        identity
    }

    /// 判断该身份是否为能力（trait 对象）形状
    pub fn is_capability(&self) -> bool {
        self.name.starts_with("dyn ")
    }

    /// 获取简短的类型名称（不包含模块路径）
    pub fn short_name(&self) -> &'static str {
        self.name.split("::").last().unwrap_or(self.name)
    }
}

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
