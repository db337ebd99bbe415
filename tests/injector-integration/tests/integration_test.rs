//! Centralized integration tests for the injector crate
use injector::wiring;
use injector::{Injector, TypeIdentity, Wireable, WiringError, WiringResult};
use std::sync::mpsc;
use std::sync::Arc;

/// 测试能力
trait Speaker: Send + Sync {
    fn speak(&self) -> String;
}

/// 测试组件
struct Dog;

impl Speaker for Dog {
    fn speak(&self) -> String {
        "汪汪".to_string()
    }
}

/// 另一个测试组件
struct Cat;

impl Speaker for Cat {
    fn speak(&self) -> String {
        "喵".to_string()
    }
}

/// 第三个测试组件
struct Parrot;

impl Speaker for Parrot {
    fn speak(&self) -> String {
        "嘎嘎".to_string()
    }
}

#[test]
fn test_register_then_get_returns_value() {
    let mut injector = Injector::new();
    injector.register("a dep".to_string(), "");

    let resolved = injector.resolve::<String>("").unwrap();
    assert_eq!(resolved.as_str(), "a dep");
}

#[test]
fn test_get_returns_the_exact_registered_value() {
    let mut injector = Injector::new();
    injector.register("a dep".to_string(), "");

    let first = injector.resolve::<String>("").unwrap();
    let second = injector.resolve::<String>("").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_register_overwrites_same_type_and_key() {
    let mut injector = Injector::new();
    injector
        .register("first".to_string(), "")
        .register("second".to_string(), "");

    assert_eq!(injector.binding_count(), 1);
    assert_eq!(injector.resolve::<String>("").unwrap().as_str(), "second");
}

#[test]
fn test_keyed_bindings_coexist() {
    let mut injector = Injector::new();
    injector
        .register("default".to_string(), "")
        .register("named".to_string(), "dev");

    assert_eq!(injector.resolve::<String>("").unwrap().as_str(), "default");
    assert_eq!(injector.resolve::<String>("dev").unwrap().as_str(), "named");
}

#[test]
fn test_set_stores_under_caller_supplied_identity() {
    let (tx, rx) = mpsc::channel::<i32>();
    let mut injector = Injector::new();
    injector.set(TypeIdentity::of::<mpsc::Sender<i32>>(), "tx", Arc::new(tx));

    let sender = injector.resolve::<mpsc::Sender<i32>>("tx").unwrap();
    sender.send(42).unwrap();
    assert_eq!(rx.recv().unwrap(), 42);
}

#[test]
fn test_resolve_returns_none_on_set_mismatch() {
    let mut injector = Injector::new();
    injector.set(TypeIdentity::of::<String>(), "", Arc::new(42u32));

    // 绑定存在，但存储值无法转换为请求的类型
    assert!(injector.get(TypeIdentity::of::<String>(), "").is_some());
    assert!(injector.resolve::<String>("").is_none());
}

#[test]
fn test_capability_direct_registration() {
    let mut injector = Injector::new();
    injector.register_as::<dyn Speaker>(Arc::new(Dog), "");

    let speaker = injector.resolve_capability::<dyn Speaker>("").unwrap();
    assert_eq!(speaker.speak(), "汪汪");
}

#[test]
fn test_capability_fallback_finds_declared_satisfier() {
    let mut injector = Injector::new();
    injector
        .register(Dog, "")
        .declare_capability::<Dog, dyn Speaker>(|dog| dog);

    let speaker = injector.resolve_capability::<dyn Speaker>("").unwrap();
    assert_eq!(speaker.speak(), "汪汪");
}

#[test]
fn test_capability_fallback_prefers_declaration_order() {
    let mut injector = Injector::new();
    injector
        .register(Dog, "")
        .register(Cat, "")
        .declare_capability::<Cat, dyn Speaker>(|cat| cat)
        .declare_capability::<Dog, dyn Speaker>(|dog| dog);

    let speaker = injector.resolve_capability::<dyn Speaker>("").unwrap();
    assert_eq!(speaker.speak(), "喵");
}

#[test]
fn test_redeclare_capability_replaces_cast_in_place() {
    let mut injector = Injector::new();
    injector
        .register(Cat, "")
        .register(Dog, "")
        .declare_capability::<Cat, dyn Speaker>(|cat| cat)
        .declare_capability::<Dog, dyn Speaker>(|dog| dog)
        .declare_capability::<Cat, dyn Speaker>(|_| Arc::new(Parrot));

    // 重复声明替换转换函数，Cat 保持先于 Dog 的声明位置
    let speaker = injector.resolve_capability::<dyn Speaker>("").unwrap();
    assert_eq!(speaker.speak(), "嘎嘎");
}

#[test]
fn test_capability_fallback_skips_satisfiers_without_key_binding() {
    let mut injector = Injector::new();
    injector
        .register(Dog, "guard")
        .register(Cat, "house")
        .declare_capability::<Dog, dyn Speaker>(|dog| dog)
        .declare_capability::<Cat, dyn Speaker>(|cat| cat);

    let house = injector.resolve_capability::<dyn Speaker>("house").unwrap();
    assert_eq!(house.speak(), "喵");
    let guard = injector.resolve_capability::<dyn Speaker>("guard").unwrap();
    assert_eq!(guard.speak(), "汪汪");
    assert!(injector.resolve_capability::<dyn Speaker>("").is_none());
}

#[test]
fn test_direct_capability_binding_wins_over_scan() {
    let mut injector = Injector::new();
    injector
        .register(Dog, "")
        .declare_capability::<Dog, dyn Speaker>(|dog| dog)
        .register_as::<dyn Speaker>(Arc::new(Cat), "");

    let speaker = injector.resolve_capability::<dyn Speaker>("").unwrap();
    assert_eq!(speaker.speak(), "喵");
}

#[test]
fn test_parent_delegation_returns_parent_value() {
    let mut parent = Injector::new();
    parent.register("from parent".to_string(), "");
    let parent = Arc::new(parent);

    let mut child = Injector::new();
    child.set_parent(parent.clone());

    let via_child = child.resolve::<String>("").unwrap();
    let via_parent = parent.resolve::<String>("").unwrap();
    assert!(Arc::ptr_eq(&via_child, &via_parent));
}

#[test]
fn test_child_binding_shadows_parent() {
    let mut parent = Injector::new();
    parent.register("from parent".to_string(), "");

    let mut child = Injector::new();
    child
        .register("from child".to_string(), "")
        .set_parent(Arc::new(parent));

    assert_eq!(child.resolve::<String>("").unwrap().as_str(), "from child");
}

#[test]
fn test_parent_chain_delegates_recursively() {
    let mut grandparent = Injector::new();
    grandparent.register(7u64, "");

    let mut parent = Injector::new();
    parent.set_parent(Arc::new(grandparent));

    let mut child = Injector::new();
    child.set_parent(Arc::new(parent));

    assert_eq!(*child.resolve::<u64>("").unwrap(), 7);
}

#[test]
fn test_parent_runs_its_own_capability_scan() {
    let mut parent = Injector::new();
    parent
        .register(Dog, "")
        .declare_capability::<Dog, dyn Speaker>(|dog| dog);

    let mut child = Injector::new();
    child.set_parent(Arc::new(parent));

    let speaker = child.resolve_capability::<dyn Speaker>("").unwrap();
    assert_eq!(speaker.speak(), "汪汪");
}

#[test]
fn test_set_parent_replaces_existing_link() {
    let mut first = Injector::new();
    first.register("first".to_string(), "");
    let mut second = Injector::new();
    second.register("second".to_string(), "");

    let mut child = Injector::new();
    child.set_parent(Arc::new(first)).set_parent(Arc::new(second));

    assert_eq!(child.resolve::<String>("").unwrap().as_str(), "second");
}

#[test]
fn test_absence_returns_none() {
    let injector = Injector::new();
    assert!(injector.resolve::<u64>("").is_none());
    assert!(injector.get(TypeIdentity::of::<u64>(), "missing").is_none());
    assert!(injector.resolve_capability::<dyn Speaker>("").is_none());

    let mut child = Injector::new();
    child.set_parent(Arc::new(Injector::new()));
    assert!(child.resolve::<u64>("").is_none());
    assert!(child.resolve_capability::<dyn Speaker>("").is_none());
}

#[test]
fn test_contains_uses_full_resolution() {
    let mut parent = Injector::new();
    parent.register(1u32, "");

    let mut child = Injector::new();
    child.set_parent(Arc::new(parent));

    assert!(child.contains(TypeIdentity::of::<u32>(), ""));
    assert!(!child.contains(TypeIdentity::of::<u32>(), "dev"));
    assert!(!child.contains(TypeIdentity::of::<dyn Speaker>(), ""));
}

#[test]
#[should_panic(expected = "只接受 trait 对象类型")]
fn test_register_as_rejects_non_capability() {
    let mut injector = Injector::new();
    injector.register_as::<String>(Arc::new("misuse".to_string()), "");
}

#[test]
#[should_panic(expected = "只接受 trait 对象类型")]
fn test_resolve_capability_rejects_non_capability() {
    let injector = Injector::new();
    let _ = injector.resolve_capability::<Vec<u8>>("");
}

#[test]
#[should_panic(expected = "只接受 trait 对象类型")]
fn test_declare_capability_rejects_non_capability() {
    let mut injector = Injector::new();
    injector.declare_capability::<Dog, String>(|_| Arc::new(String::new()));
}

/// 手写装配的服务
#[derive(Default)]
struct GreetingService {
    template: String,
    speaker: Option<Arc<dyn Speaker>>,
    calls: u32,
}

impl Wireable for GreetingService {
    fn wire(&mut self, injector: &Injector) -> WiringResult<()> {
        self.template = wiring::wire_value::<String>(injector, "")?;
        self.speaker = Some(wiring::wire_arc_capability::<dyn Speaker>(injector, "")?);
        Ok(())
    }
}

#[test]
fn test_apply_fills_wireable_record() {
    let mut injector = Injector::new();
    injector
        .register("你好".to_string(), "")
        .register(Dog, "")
        .declare_capability::<Dog, dyn Speaker>(|dog| dog);

    let mut service = GreetingService::default();
    injector.apply(&mut service).unwrap();

    assert_eq!(service.template, "你好");
    assert_eq!(service.speaker.unwrap().speak(), "汪汪");
    assert_eq!(service.calls, 0);
}

#[test]
fn test_apply_aborts_on_miss_and_keeps_earlier_fields() {
    let mut injector = Injector::new();
    injector.register("你好".to_string(), "");

    let mut service = GreetingService::default();
    let err = injector.apply(&mut service).unwrap_err();

    assert!(matches!(err, WiringError::ValueNotFound { .. }));
    assert!(format!("{}", err).contains("Speaker"));
    assert_eq!(service.template, "你好");
    assert!(service.speaker.is_none());
}

#[test]
fn test_apply_surfaces_type_mismatch() {
    let mut injector = Injector::new();
    injector.set(TypeIdentity::of::<String>(), "", Arc::new(42u32));

    let mut service = GreetingService::default();
    let err = injector.apply(&mut service).unwrap_err();

    assert!(matches!(err, WiringError::TypeMismatch { .. }));
    assert_eq!(service.template, "");
}
