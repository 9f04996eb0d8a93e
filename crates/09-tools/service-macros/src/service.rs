//! 服务标记宏实现

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{
    parse::Parser, punctuated::Punctuated, Attribute, Expr, ExprPath, Ident, ItemStruct, Lit, Meta,
    Result, Token, Type,
};

/// 服务生命周期
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ServiceLifetime {
    Singleton,
    Scoped,
    Transient,
}

impl ServiceLifetime {
    fn from_ident(ident: &Ident) -> Option<Self> {
        match ident.to_string().as_str() {
            "singleton" => Some(Self::Singleton),
            "scoped" => Some(Self::Scoped),
            "transient" => Some(Self::Transient),
            _ => None,
        }
    }

    fn path_tokens(self) -> TokenStream {
        match self {
            Self::Singleton => quote! { ::infrastructure_common::Lifetime::Singleton },
            Self::Scoped => quote! { ::infrastructure_common::Lifetime::Scoped },
            Self::Transient => quote! { ::infrastructure_common::Lifetime::Transient },
        }
    }
}

/// 单个 `#[service(...)]` 的参数
#[derive(Clone)]
pub struct ServiceArgs {
    pub lifetime: ServiceLifetime,
    pub key: Option<String>,
    pub implements: Vec<Type>,
    pub factory: Option<ExprPath>,
}

impl ServiceArgs {
    /// 解析属性参数
    pub fn parse(args: TokenStream) -> Result<Self> {
        let span = Span::call_site();
        let parsed = Punctuated::<Meta, Token![,]>::parse_terminated.parse2(args)?;

        let mut lifetime = None;
        let mut key = None;
        let mut implements = Vec::new();
        let mut factory = None;

        for meta in parsed {
            match meta {
                Meta::Path(path) => {
                    let Some(ident) = path.get_ident() else {
                        return Err(syn::Error::new_spanned(&path, "无法识别的服务参数"));
                    };
                    let Some(value) = ServiceLifetime::from_ident(ident) else {
                        return Err(syn::Error::new_spanned(
                            ident,
                            format!("无法识别的生命周期: {ident}，可选值为 singleton、scoped、transient"),
                        ));
                    };
                    if lifetime.replace(value).is_some() {
                        return Err(syn::Error::new_spanned(ident, "生命周期只能指定一次"));
                    }
                }
                Meta::NameValue(nv) if nv.path.is_ident("key") => {
                    let Expr::Lit(expr_lit) = &nv.value else {
                        return Err(syn::Error::new_spanned(&nv.value, "服务键必须是字符串字面量"));
                    };
                    let Lit::Str(lit_str) = &expr_lit.lit else {
                        return Err(syn::Error::new_spanned(&nv.value, "服务键必须是字符串字面量"));
                    };
                    if lit_str.value().trim().is_empty() {
                        return Err(syn::Error::new_spanned(lit_str, "服务键不能为空"));
                    }
                    key = Some(lit_str.value());
                }
                Meta::NameValue(nv) if nv.path.is_ident("factory") => {
                    let Expr::Path(path) = &nv.value else {
                        return Err(syn::Error::new_spanned(&nv.value, "factory 必须是函数路径"));
                    };
                    factory = Some(path.clone());
                }
                Meta::List(list) if list.path.is_ident("implements") => {
                    let types = list.parse_args_with(Punctuated::<Type, Token![,]>::parse_terminated)?;
                    implements.extend(types);
                }
                other => {
                    return Err(syn::Error::new_spanned(other, "无法识别的服务参数"));
                }
            }
        }

        let lifetime = lifetime.ok_or_else(|| {
            syn::Error::new(span, "缺少生命周期，请指定 singleton、scoped 或 transient")
        })?;

        Ok(Self {
            lifetime,
            key,
            implements,
            factory,
        })
    }

    fn tag_tokens(&self) -> TokenStream {
        let lifetime = self.lifetime.path_tokens();
        match &self.key {
            Some(key) => quote! {
                ::infrastructure_common::ServiceTag::new(#lifetime)
                    .with_key(::infrastructure_common::ServiceKey::from_static(#key))
            },
            None => quote! { ::infrastructure_common::ServiceTag::new(#lifetime) },
        }
    }
}

fn is_service_attribute(attr: &Attribute) -> bool {
    attr.path()
        .segments
        .last()
        .is_some_and(|segment| segment.ident == "service")
}

/// 展开 `#[service(...)]`
///
/// 结构体上剩余的 `#[service(...)]` 在这里一并处理并移除。
pub fn expand(args: TokenStream, mut item: ItemStruct) -> Result<TokenStream> {
    if !item.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(&item.generics, "服务类型不能带泛型参数"));
    }

    let mut all_args = vec![ServiceArgs::parse(args)?];
    let mut kept = Vec::with_capacity(item.attrs.len());
    for attr in std::mem::take(&mut item.attrs) {
        if is_service_attribute(&attr) {
            let Meta::List(list) = &attr.meta else {
                return Err(syn::Error::new_spanned(&attr, "缺少生命周期，请指定 singleton、scoped 或 transient"));
            };
            all_args.push(ServiceArgs::parse(list.tokens.clone())?);
        } else {
            kept.push(attr);
        }
    }
    item.attrs = kept;

    let factories: Vec<&ExprPath> = all_args.iter().filter_map(|a| a.factory.as_ref()).collect();
    if factories.len() > 1 {
        return Err(syn::Error::new_spanned(factories[1], "factory 只能指定一次"));
    }

    let name = &item.ident;
    let entry = match factories.first() {
        Some(factory) => quote! { ::di_abstractions::ServiceEntry::new::<Self, _>(#factory) },
        None => quote! { ::di_abstractions::ServiceEntry::with_default::<Self>() },
    };

    // 多个标记声明的接口取并集，保持首次出现的顺序
    let mut seen = Vec::new();
    let mut interfaces: Vec<&Type> = Vec::new();
    for ty in all_args.iter().flat_map(|a| a.implements.iter()) {
        let rendered = quote!(#ty).to_string();
        if !seen.contains(&rendered) {
            seen.push(rendered);
            interfaces.push(ty);
        }
    }
    let interfaces = interfaces.iter().map(|ty| {
        quote! {
            .with_interface(::di_abstractions::InterfaceDescriptor::of::<#ty, Self>(
                |it: ::std::sync::Arc<Self>| -> ::std::sync::Arc<#ty> { it },
            ))
        }
    });
    let tags = all_args.iter().map(ServiceArgs::tag_tokens);

    let register_fn = Ident::new(
        &format!("__register_service_{}", name.to_string().to_lowercase()),
        Span::call_site(),
    );

    Ok(quote! {
        #item

        impl ::di_abstractions::Discoverable for #name {
            fn service_entry() -> ::di_abstractions::ServiceEntry {
                #entry
                    #(#interfaces)*
                    #(.with_tag(#tags))*
            }
        }

        // 程序启动时登记到服务目录
        #[::ctor::ctor]
        fn #register_fn() {
            ::di_abstractions::register_catalog_entry(
                ::std::module_path!(),
                ::std::any::type_name::<#name>(),
                <#name as ::di_abstractions::Discoverable>::service_entry,
            );
        }
    })
}
