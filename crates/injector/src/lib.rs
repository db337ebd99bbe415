//! # Injector
//!
//! 这个 crate 提供了一个按键区分的运行时依赖注册表：以类型身份加字符串键
//! 存取任意值，支持按能力（trait 对象）回退查找和父注册表委托，并通过
//! [`Wireable`] trait 将依赖自动装配到结构体的标注字段上。
//!
//! ## 核心组件
//!
//! - [`Injector`] - 依赖注册表，负责绑定存储与解析
//! - [`TypeIdentity`] - 具体类型或能力类型的可比较身份
//! - [`Wireable`] - 自动装配 trait，通常由 `#[derive(Wireable)]` 生成
//! - [`WiringError`] - 装配失败的错误类型
//!
//! ## 设计原则
//!
//! - 基于 `std::any::TypeId` 的显式类型令牌，不依赖运行时反射
//! - 能力满足关系在注册期显式声明，解析期只做有序索引扫描
//! - 缺失是正常的受检结果（`None`），能力描述符误用立即 panic
//! - 不含任何内部锁，并发互斥由嵌入方自行叠加
//!
//! ## 使用示例
//!
//! ```rust
//! use injector::Injector;
//! use std::sync::Arc;
//!
//! trait Speaker: Send + Sync {
//!     fn speak(&self) -> String;
//! }
//!
//! struct Dog;
//!
//! impl Speaker for Dog {
//!     fn speak(&self) -> String {
//!         "汪".to_string()
//!     }
//! }
//!
//! let mut injector = Injector::new();
//! injector
//!     .register("a dep".to_string(), "")
//!     .register(Dog, "")
//!     .declare_capability::<Dog, dyn Speaker>(|dog| dog);
//!
//! assert_eq!(injector.resolve::<String>("").unwrap().as_str(), "a dep");
//! let speaker = injector.resolve_capability::<dyn Speaker>("").unwrap();
//! assert_eq!(speaker.speak(), "汪");
//! ```

pub mod errors;
pub mod identity;
pub mod registry;
pub mod wiring;

pub use errors::{WiringError, WiringResult};
pub use identity::TypeIdentity;
pub use registry::{BoxedValue, Injector};
pub use wiring::Wireable;
