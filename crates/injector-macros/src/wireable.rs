//! 自动装配派生宏实现

use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Field, Fields, Index, LitStr, Member, Meta, Result};

use crate::utils::{extract_generic_type, is_arc_type, is_box_type, is_trait_object_type};

/// 实现 #[derive(Wireable)] 宏
pub fn derive_wireable_impl(input: DeriveInput) -> TokenStream {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // 枚举与联合体没有可装配的字段，生成无操作的成功实现
    let statements = match &input.data {
        Data::Struct(data) => match collect_field_statements(&data.fields) {
            Ok(statements) => statements,
            Err(err) => return TokenStream::from(err.to_compile_error()),
        },
        Data::Enum(_) | Data::Union(_) => Vec::new(),
    };

    // 没有任何标注字段时参数未被使用，避免给使用方引入警告
    let injector_param = if statements.is_empty() {
        quote! { _injector }
    } else {
        quote! { injector }
    };

    let expanded = quote! {
        impl #impl_generics injector::Wireable for #struct_name #ty_generics #where_clause {
            fn wire(&mut self, #injector_param: &injector::Injector) -> injector::WiringResult<()> {
                #(#statements)*
                Ok(())
            }
        }
    };

    TokenStream::from(expanded)
}

/// 按声明顺序为每个标注字段生成解析语句
fn collect_field_statements(fields: &Fields) -> Result<Vec<proc_macro2::TokenStream>> {
    let mut statements = Vec::new();

    for (index, field) in fields.iter().enumerate() {
        let key = match parse_inject_key(field)? {
            Some(key) => key,
            None => continue,
        };

        let member = match &field.ident {
            Some(ident) => Member::Named(ident.clone()),
            None => Member::Unnamed(Index::from(index)),
        };

        let field_ty = &field.ty;
        if is_box_type(field_ty) {
            if let Some(inner) = extract_generic_type(field_ty) {
                if is_trait_object_type(inner) {
                    return Err(syn::Error::new_spanned(
                        field_ty,
                        "不支持 Box<dyn Trait> 字段, 请使用 Arc<dyn Trait>",
                    ));
                }
            }
        }

        let resolver = if is_arc_type(field_ty) {
            match extract_generic_type(field_ty) {
                Some(inner) if is_trait_object_type(inner) => {
                    quote! { injector::wiring::wire_arc_capability::<#inner>(injector, #key)? }
                }
                Some(inner) => {
                    quote! { injector::wiring::wire_arc::<#inner>(injector, #key)? }
                }
                None => quote! { injector::wiring::wire_value::<#field_ty>(injector, #key)? },
            }
        } else {
            quote! { injector::wiring::wire_value::<#field_ty>(injector, #key)? }
        };

        statements.push(quote! { self.#member = #resolver; });
    }

    Ok(statements)
}

/// 解析字段上的 inject 标注
///
/// 返回 `None` 表示字段未标注（跳过）；`Some(key)` 表示按该键装配，
/// 裸标注 `#[inject]` 的键为空字符串。
fn parse_inject_key(field: &Field) -> Result<Option<String>> {
    let mut inject_attrs = field
        .attrs
        .iter()
        .filter(|attr| attr.path().is_ident("inject"));

    let attr = match inject_attrs.next() {
        Some(attr) => attr,
        None => return Ok(None),
    };
    if let Some(duplicate) = inject_attrs.next() {
        return Err(syn::Error::new_spanned(duplicate, "重复的 inject 属性"));
    }

    match &attr.meta {
        Meta::Path(_) => Ok(Some(String::new())),
        Meta::List(_) => {
            let mut key = None;
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("key") {
                    if key.is_some() {
                        return Err(meta.error("重复的 key 参数"));
                    }
                    let lit: LitStr = meta.value()?.parse()?;
                    key = Some(lit.value());
                    Ok(())
                } else {
                    Err(meta.error("不支持的 inject 参数, 仅支持 key = \"...\""))
                }
            })?;
            Ok(Some(key.unwrap_or_default()))
        }
        Meta::NameValue(_) => Err(syn::Error::new_spanned(
            attr,
            "inject 属性格式错误, 应为 #[inject] 或 #[inject(key = \"...\")]",
        )),
    }
}
