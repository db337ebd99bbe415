//! # Injector Macros
//!
//! 这个 crate 提供了用于自动装配的派生宏。
//!
//! ## 核心宏
//!
//! - [`Wireable`](derive@Wireable) - 自动装配派生宏
//!
//! ## 使用示例
//!
//! ```rust
//! use injector::Injector;
//! use injector_macros::Wireable;
//! use std::sync::Arc;
//!
//! #[derive(Default, Wireable)]
//! struct AppService {
//!     #[inject]
//!     endpoint: String,
//!     #[inject(key = "dev")]
//!     token: String,
//!     request_count: u64,
//! }
//!
//! let mut injector = Injector::new();
//! injector
//!     .register("https://example.com".to_string(), "")
//!     .register("dev-token".to_string(), "dev");
//!
//! let mut service = AppService::default();
//! injector.apply(&mut service).unwrap();
//! assert_eq!(service.endpoint, "https://example.com");
//! assert_eq!(service.token, "dev-token");
//! assert_eq!(service.request_count, 0);
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod utils;
mod wireable;

/// 自动装配派生宏
///
/// 为结构体生成 `injector::Wireable` 实现：按字段声明顺序解析每个带
/// `#[inject]` 标注的字段，未标注的字段原样保留。在枚举或联合体上
/// 派生会生成无操作的成功实现。
///
/// # 字段标注
///
/// - `#[inject]` - 使用默认键（空字符串）解析
/// - `#[inject(key = "name")]` - 使用指定键解析
///
/// # 字段类型
///
/// - `Arc<dyn Trait>` - 按能力解析（含能力回退扫描与父委托）
/// - `Arc<T>` - 按具体类型解析为共享句柄
/// - `T` - 按具体类型解析并克隆出值（要求 `T: Clone`）
///
/// # 示例
///
/// ```rust
/// use injector_macros::Wireable;
/// use std::sync::Arc;
///
/// trait Speaker: Send + Sync {
///     fn speak(&self) -> String;
/// }
///
/// #[derive(Wireable)]
/// struct Announcer {
///     #[inject]
///     voice: Arc<dyn Speaker>,
///     #[inject(key = "greeting")]
///     prefix: String,
/// }
/// ```
#[proc_macro_derive(Wireable, attributes(inject))]
pub fn derive_wireable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    wireable::derive_wireable_impl(input)
}
