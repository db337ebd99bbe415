//! 依赖注册表实现
//!
//! 提供按 (类型身份, 键) 组合键存储值的注册表，支持能力回退查找与
//! 父注册表委托

use crate::identity::TypeIdentity;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// 类型擦除后的值句柄
///
/// 取值返回的是 `Arc` 的克隆，按引用语义共享底层值。
pub type BoxedValue = Arc<dyn Any + Send + Sync>;

/// 能力转换函数
///
/// 把按具体类型存储的擦除值转换为按能力句柄存储的擦除值；存储值的
/// 实际类型与声明不符时返回 `None`。
type CapabilityCaster = Box<dyn Fn(&BoxedValue) -> Option<BoxedValue> + Send + Sync>;

/// 绑定键：类型身份与字符串键的组合
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct BindingKey {
    identity: TypeIdentity,
    key: String,
}

/// 能力满足记录
struct CapabilitySatisfier {
    /// 满足该能力的具体类型
    concrete: TypeIdentity,
    /// 擦除值转换函数
    cast: CapabilityCaster,
}

/// 依赖注册表
///
/// 注册表持有 (类型身份, 键) 到值的绑定、注册期声明的能力满足索引，
/// 以及一个可选的父注册表链接。同一 (类型身份, 键) 组合最多存在一个
/// 值，重复注册静默覆盖。
///
/// 注册表内部没有任何锁：写操作要求 `&mut self`，读操作只要求
/// `&self`，跨线程的互斥由嵌入方在外层自行叠加（注册表本身是
/// `Send + Sync` 的）。
///
/// ## 值的存储约定
///
/// - [`register`](Self::register) 存储的擦除值内部是 `T` 本身；
/// - [`register_as`](Self::register_as) 与能力回退扫描产出的擦除值
///   内部是 `Arc<C>` 句柄；
/// - [`set`](Self::set) 存储调用方给定的任意擦除值，后续按类型取值
///   时能否转换由调用方保证。
pub struct Injector {
    /// (类型身份, 键) 到值的绑定
    bindings: HashMap<BindingKey, BoxedValue>,
    /// 能力身份到有序满足者列表的索引
    capabilities: HashMap<TypeIdentity, Vec<CapabilitySatisfier>>,
    /// 父注册表
    parent: Option<Arc<Injector>>,
}

impl Injector {
    /// 创建空注册表
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
            capabilities: HashMap::new(),
            parent: None,
        }
    }

    /// 以值自身的具体类型注册
    ///
    /// 值存储在 `(TypeIdentity::of::<T>(), key)` 槽位下，覆盖该槽位
    /// 已有的绑定。返回 `&mut Self` 以便链式注册。
    pub fn register<T>(&mut self, value: T, key: impl Into<String>) -> &mut Self
    where
        T: Send + Sync + 'static,
    {
        self.set(TypeIdentity::of::<T>(), key, Arc::new(value))
    }

    /// 以能力（trait 对象）类型注册
    ///
    /// 当消费方按抽象能力而不是具体类型索要值时使用。调用点的
    /// `Arc::new(Concrete)` 到 `Arc<dyn Capability>` 的强制转换决定了
    /// 注册身份。
    ///
    /// # Panics
    ///
    /// 当 `C` 不是 trait 对象类型时 panic（能力描述符误用）。
    pub fn register_as<C>(&mut self, value: Arc<C>, key: impl Into<String>) -> &mut Self
    where
        C: ?Sized + Send + Sync + 'static,
    {
        let identity = TypeIdentity::of_capability::<C>();
        self.set(identity, key, Arc::new(value))
    }

    /// 以调用方给定的身份直接存储擦除值
    ///
    /// 最底层的注册原语：绕过从值推导类型的过程，由调用方显式给出
    /// *预期的* 身份。适用于需要绑定在非自身身份下的值；按类型取值
    /// 时存储值必须能转换为该身份对应的类型，否则装配层会报告类型
    /// 不匹配。
    pub fn set(
        &mut self,
        identity: TypeIdentity,
        key: impl Into<String>,
        value: BoxedValue,
    ) -> &mut Self {
        let key = key.into();
        debug!("注册绑定: {} (键: {:?})", identity, key);
        self.bindings.insert(BindingKey { identity, key }, value);
        self
    }

    /// 声明具体类型 `T` 满足能力 `C`
    ///
    /// 满足关系按声明顺序记录；[`get`](Self::get) 的能力回退按同一
    /// 顺序扫描，第一个在请求键下有绑定的满足者胜出。对同一 (T, C)
    /// 组合重复声明只原位替换转换函数，不改变顺序。
    ///
    /// `cast` 是在调用点写出的强制转换函数，通常就是 `|value| value`：
    ///
    /// ```rust
    /// # use injector::Injector;
    /// # use std::sync::Arc;
    /// # trait Speaker: Send + Sync {}
    /// # struct Dog;
    /// # impl Speaker for Dog {}
    /// let mut injector = Injector::new();
    /// injector.declare_capability::<Dog, dyn Speaker>(|dog| dog);
    /// ```
    ///
    /// # Panics
    ///
    /// 当 `C` 不是 trait 对象类型时 panic（能力描述符误用）。
    pub fn declare_capability<T, C>(&mut self, cast: fn(Arc<T>) -> Arc<C>) -> &mut Self
    where
        T: Send + Sync + 'static,
        C: ?Sized + Send + Sync + 'static,
    {
        let capability = TypeIdentity::of_capability::<C>();
        let concrete = TypeIdentity::of::<T>();
        debug!("声明能力满足: {} -> {}", concrete, capability);

        let caster: CapabilityCaster = Box::new(move |stored: &BoxedValue| -> Option<BoxedValue> {
            let concrete_value = stored.clone().downcast::<T>().ok()?;
            let capability_value: Arc<C> = cast(concrete_value);
            Some(Arc::new(capability_value) as BoxedValue)
        });

        let satisfiers = self.capabilities.entry(capability).or_default();
        match satisfiers.iter_mut().find(|s| s.concrete == concrete) {
            Some(existing) => existing.cast = caster,
            None => satisfiers.push(CapabilitySatisfier {
                concrete,
                cast: caster,
            }),
        }
        self
    }

    /// 按身份与键解析值
    ///
    /// 解析顺序固定：
    ///
    /// 1. 在本地绑定中直接查找 `(identity, key)`，命中即返回；
    /// 2. 未命中且该身份有能力满足者声明时，按声明顺序扫描各具体
    ///    类型在 `key` 下的本地绑定，返回第一个转换成功的结果；
    /// 3. 仍未命中且设置了父注册表时，把同样的请求整体委托给父注册
    ///    表，父注册表递归执行同样的三步算法；
    /// 4. 返回 `None`。
    ///
    /// 缺失是正常的受检结果，`get` 本身从不失败，也没有副作用。
    pub fn get(&self, identity: TypeIdentity, key: &str) -> Option<BoxedValue> {
        if let Some(value) = self.lookup_local(identity, key) {
            return Some(value);
        }
        if let Some(value) = self.scan_capability(identity, key) {
            return Some(value);
        }
        if let Some(parent) = &self.parent {
            return parent.get(identity, key);
        }
        None
    }

    /// 按具体类型解析并向下转型
    ///
    /// 等价于 `get(TypeIdentity::of::<T>(), key)` 加 `downcast`。存储值
    /// 无法转换为 `T` 时（只可能由 [`set`](Self::set) 误配造成）同样
    /// 返回 `None`；需要区分缺失与不匹配时使用装配层的
    /// [`wire_arc`](crate::wiring::wire_arc)。
    pub fn resolve<T>(&self, key: &str) -> Option<Arc<T>>
    where
        T: Send + Sync + 'static,
    {
        self.get(TypeIdentity::of::<T>(), key)?.downcast::<T>().ok()
    }

    /// 按能力类型解析
    ///
    /// 走完整的解析算法（含能力回退与父委托），返回可直接调用的
    /// `Arc<C>` 句柄。
    ///
    /// # Panics
    ///
    /// 当 `C` 不是 trait 对象类型时 panic（能力描述符误用）。
    pub fn resolve_capability<C>(&self, key: &str) -> Option<Arc<C>>
    where
        C: ?Sized + Send + Sync + 'static,
    {
        let identity = TypeIdentity::of_capability::<C>();
        let stored = self.get(identity, key)?;
        stored
            .downcast::<Arc<C>>()
            .ok()
            .map(|handle| (*handle).clone())
    }

    /// 判断能否解析出 `(identity, key)` 对应的值
    ///
    /// 使用与 [`get`](Self::get) 相同的完整解析算法。
    pub fn contains(&self, identity: TypeIdentity, key: &str) -> bool {
        self.get(identity, key).is_some()
    }

    /// 安装或替换父注册表
    ///
    /// 父注册表的生命周期由外部管理，同一个父可以被多个子注册表
    /// 共享。委托链不得成环，这由调用方保证。
    pub fn set_parent(&mut self, parent: Arc<Injector>) -> &mut Self {
        debug!("设置父注册表 (父绑定数: {})", parent.binding_count());
        self.parent = Some(parent);
        self
    }

    /// 获取已安装的父注册表
    pub fn parent(&self) -> Option<&Arc<Injector>> {
        self.parent.as_ref()
    }

    /// 本地绑定数量（不含父注册表）
    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// 本地是否没有任何绑定
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// 本地直接查找，不做任何回退
    fn lookup_local(&self, identity: TypeIdentity, key: &str) -> Option<BoxedValue> {
        let binding_key = BindingKey {
            identity,
            key: key.to_string(),
        };
        self.bindings.get(&binding_key).cloned()
    }

    /// 按声明顺序扫描能力满足者
    ///
    /// 只有能力身份会在索引中出现，具体类型身份自然落空。满足者在
    /// 请求键下没有绑定、或存储值转换失败时跳过并继续扫描。
    fn scan_capability(&self, capability: TypeIdentity, key: &str) -> Option<BoxedValue> {
        let satisfiers = self.capabilities.get(&capability)?;
        for satisfier in satisfiers {
            if let Some(stored) = self.lookup_local(satisfier.concrete, key) {
                if let Some(value) = (satisfier.cast)(&stored) {
                    return Some(value);
                }
            }
        }
        None
    }
}

impl Default for Injector {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Injector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Injector")
            .field("bindings", &self.bindings.len())
            .field("capabilities", &self.capabilities.len())
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}
