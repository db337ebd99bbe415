//! 自动装配
//!
//! 提供 [`Wireable`] trait 与派生代码使用的字段解析辅助函数。装配把
//! 缺失与类型不匹配作为两条独立的错误通道上报，字段按声明顺序处理，
//! 失败时已处理的字段保持已赋的值（不回滚）。

use crate::errors::{WiringError, WiringResult};
use crate::identity::TypeIdentity;
use crate::registry::Injector;
use std::sync::Arc;
use tracing::warn;

/// 可自动装配的记录
///
/// 通常由 `#[derive(Wireable)]` 生成实现：按字段声明顺序解析每个带
/// `#[inject]` 或 `#[inject(key = "...")]` 标注的字段，未标注的字段
/// 原样保留。手写实现可以直接使用本模块的 [`wire_value`]、
/// [`wire_arc`] 与 [`wire_arc_capability`]，获得与派生代码一致的解析
/// 行为和错误分类。
pub trait Wireable {
    /// 从注册表解析并填充自身的依赖字段
    ///
    /// 第一个解析失败的字段让整个操作立即中止并返回错误；之前已经
    /// 填充的字段保持其新值。
    fn wire(&mut self, injector: &Injector) -> WiringResult<()>;
}

impl Injector {
    /// 对记录执行自动装配
    ///
    /// [`Wireable::wire`] 的便捷入口，等价于 `record.wire(self)`。
    pub fn apply<R: Wireable + ?Sized>(&self, record: &mut R) -> WiringResult<()> {
        record.wire(self)
    }
}

/// 解析具体类型的字段依赖并克隆出值
///
/// 用于声明为普通值类型 `T` 的字段；注册表中存储的是 `Arc<T>`，这里
/// 克隆出一份 `T` 赋给字段。
pub fn wire_value<T>(injector: &Injector, key: &str) -> WiringResult<T>
where
    T: Clone + Send + Sync + 'static,
{
    wire_arc::<T>(injector, key).map(|value| (*value).clone())
}

/// 解析具体类型的字段依赖为共享句柄
///
/// 用于声明为 `Arc<T>` 的字段。缺失返回
/// [`WiringError::ValueNotFound`]；绑定存在但存储值不是 `T` 时返回
/// [`WiringError::TypeMismatch`]（只可能由 [`Injector::set`] 误配造成）。
pub fn wire_arc<T>(injector: &Injector, key: &str) -> WiringResult<Arc<T>>
where
    T: Send + Sync + 'static,
{
    let identity = TypeIdentity::of::<T>();
    let stored = match injector.get(identity, key) {
        Some(stored) => stored,
        None => {
            warn!("装配失败, 未找到绑定: {} (键: {:?})", identity, key);
            return Err(WiringError::value_not_found(identity.name));
        }
    };
    stored
        .downcast::<T>()
        .map_err(|_| WiringError::type_mismatch(identity.name))
}

/// 解析能力类型的字段依赖
///
/// 用于声明为 `Arc<dyn Trait>` 的字段，走完整的解析算法（含能力回退
/// 扫描与父委托）。
///
/// # Panics
///
/// 当 `C` 不是 trait 对象类型时 panic（能力描述符误用）。
pub fn wire_arc_capability<C>(injector: &Injector, key: &str) -> WiringResult<Arc<C>>
where
    C: ?Sized + Send + Sync + 'static,
{
    let identity = TypeIdentity::of_capability::<C>();
    let stored = match injector.get(identity, key) {
        Some(stored) => stored,
        None => {
            warn!("装配失败, 未找到绑定: {} (键: {:?})", identity, key);
            return Err(WiringError::value_not_found(identity.name));
        }
    };
    stored
        .downcast::<Arc<C>>()
        .map(|handle| (*handle).clone())
        .map_err(|_| WiringError::type_mismatch(identity.name))
}
