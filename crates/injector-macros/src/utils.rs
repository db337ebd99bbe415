//! 宏工具函数

use syn::Type;

/// 检查类型是否为 Arc<T>
pub fn is_arc_type(ty: &Type) -> bool {
    last_segment_is(ty, "Arc")
}

/// 检查类型是否为 Box<T>
pub fn is_box_type(ty: &Type) -> bool {
    last_segment_is(ty, "Box")
}

/// 检查类型是否为 trait 对象 (dyn Trait)
pub fn is_trait_object_type(ty: &Type) -> bool {
    matches!(ty, Type::TraitObject(_))
}

/// 从类型中提取第一个泛型参数
pub fn extract_generic_type(ty: &Type) -> Option<&Type> {
    match ty {
        Type::Path(type_path) => {
            if let Some(segment) = type_path.path.segments.last() {
                if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                    if let Some(syn::GenericArgument::Type(inner_type)) = args.args.first() {
                        return Some(inner_type);
                    }
                }
            }
            None
        }
        _ => None,
    }
}

/// 判断类型路径的最后一段是否为给定标识符
fn last_segment_is(ty: &Type, ident: &str) -> bool {
    match ty {
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .map(|segment| segment.ident == ident)
            .unwrap_or(false),
        _ => false,
    }
}
