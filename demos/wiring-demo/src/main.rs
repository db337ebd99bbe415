//! # 键控依赖注册与自动装配演示
//!
//! 演示依赖注册表的核心用法，包括：
//! - 按类型与键注册、解析值
//! - 能力声明与回退解析
//! - 父注册表分层与委托
//! - 使用派生宏自动装配

use injector::{Injector, WiringResult};
use injector_macros::Wireable;
use std::sync::Arc;
use tracing::{info, warn};

// ========== 示例组件 ==========

/// 示例能力：存储后端
trait Storage: Send + Sync {
    fn describe(&self) -> String;
}

/// 内存存储
struct MemoryStorage;

impl Storage for MemoryStorage {
    fn describe(&self) -> String {
        "内存存储".to_string()
    }
}

/// 磁盘存储
struct DiskStorage {
    path: String,
}

impl DiskStorage {
    fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl Storage for DiskStorage {
    fn describe(&self) -> String {
        format!("磁盘存储 ({})", self.path)
    }
}

/// 自动装配的报表服务
#[derive(Wireable)]
struct ReportService {
    #[inject]
    endpoint: String,
    #[inject]
    storage: Arc<dyn Storage>,
    retries: u32,
}

impl ReportService {
    fn unwired() -> Self {
        Self {
            endpoint: String::new(),
            storage: Arc::new(MemoryStorage),
            retries: 3,
        }
    }
}

// ========== 演示函数 ==========

/// 演示基础注册与解析
fn demo_basic_registration() {
    info!("=== 基础注册与解析演示 ===");

    let mut injector = Injector::new();
    injector
        .register("https://api.example.com".to_string(), "")
        .register("https://staging.example.com".to_string(), "staging")
        .register(8u32, "pool_size");

    if let Some(endpoint) = injector.resolve::<String>("") {
        info!("默认端点: {}", endpoint);
    }
    if let Some(endpoint) = injector.resolve::<String>("staging") {
        info!("staging 端点: {}", endpoint);
    }
    if let Some(pool_size) = injector.resolve::<u32>("pool_size") {
        info!("连接池大小: {}", pool_size);
    }

    // 缺失不是错误，解析返回 None
    if injector.resolve::<String>("prod").is_none() {
        info!("未注册的键解析为 None, 不产生错误");
    }
}

/// 演示能力声明与回退解析
fn demo_capability_fallback() {
    info!("=== 能力回退解析演示 ===");

    let mut injector = Injector::new();
    injector
        .register(MemoryStorage, "")
        .declare_capability::<MemoryStorage, dyn Storage>(|storage| storage);

    // 能力本身没有直接绑定，按声明的满足者回退解析
    if let Some(storage) = injector.resolve_capability::<dyn Storage>("") {
        info!("能力回退命中: {}", storage.describe());
    }

    // 直接按能力注册的绑定优先于回退扫描
    injector.register_as::<dyn Storage>(Arc::new(DiskStorage::new("/var/data")), "archive");
    if let Some(storage) = injector.resolve_capability::<dyn Storage>("archive") {
        info!("直接能力绑定: {}", storage.describe());
    }
}

/// 演示父注册表分层与委托
fn demo_parent_chain() {
    info!("=== 父注册表委托演示 ===");

    let mut platform = Injector::new();
    platform.register("https://platform.example.com".to_string(), "");

    let mut tenant = Injector::new();
    tenant.set_parent(Arc::new(platform));

    // 子注册表未命中时递归委托给父注册表
    if let Some(endpoint) = tenant.resolve::<String>("") {
        info!("委托父注册表命中: {}", endpoint);
    }

    // 子注册表的本地绑定优先
    tenant.register("https://tenant.example.com".to_string(), "");
    if let Some(endpoint) = tenant.resolve::<String>("") {
        info!("子注册表本地绑定优先: {}", endpoint);
    }
}

/// 演示派生宏自动装配
fn demo_auto_wiring() -> WiringResult<()> {
    info!("=== 自动装配演示 ===");

    let mut injector = Injector::new();
    injector
        .register("https://api.example.com".to_string(), "")
        .register(MemoryStorage, "")
        .declare_capability::<MemoryStorage, dyn Storage>(|storage| storage);

    let mut service = ReportService::unwired();
    injector.apply(&mut service)?;
    info!(
        "装配完成: endpoint={}, storage={}",
        service.endpoint,
        service.storage.describe()
    );
    info!("未标注字段保持原值: retries={}", service.retries);

    // 缺失的依赖让装配以错误中止
    let empty = Injector::new();
    let mut service = ReportService::unwired();
    if let Err(e) = empty.apply(&mut service) {
        warn!("空注册表装配失败 (预期): {}", e);
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志
    tracing_subscriber::fmt().with_env_filter("info").init();

    info!("🚀 键控依赖注册表演示程序启动");
    info!("");

    demo_basic_registration();
    info!("");

    demo_capability_fallback();
    info!("");

    demo_parent_chain();
    info!("");

    match demo_auto_wiring() {
        Ok(_) => info!("✓ 自动装配演示完成"),
        Err(e) => warn!("自动装配演示失败: {}", e),
    }
    info!("");

    info!("📋 功能总结:");
    info!("  ✅ 键控注册 - 同一类型按不同键共存多个绑定");
    info!("  ✅ 能力回退 - 未直接绑定的能力按声明的满足者解析");
    info!("  ✅ 父注册表 - 分层注册表递归委托查找");
    info!("  ✅ 自动装配 - 派生宏按字段标注批量解析依赖");

    Ok(())
}
