//! `#[controller]` attribute implementation.
//!
//! # Overview
//!
//! The annotated `impl` block is emitted unchanged, followed by an
//! `impl Controller` that carries:
//!
//! 1. `descriptor()` - the controller name and the conventions given in the attribute
//! 2. `actions()` - one `Action` per route method, in declaration order
//!
//! Route methods are found with the same classifier the registrar uses at
//! runtime, so a method the macro skips would never have been routed.
//!
//! # Generated invoker
//!
//! ```rust,ignore
//! ::autoroute::core::Action::<Self>::new(
//!     ::autoroute::core::ActionMethod::new("getUserAction")
//!         .param(::autoroute::core::ParamSpec::request("req"))
//!         .param(::autoroute::core::ParamSpec::typed("id", "int")),
//!     |__controller, __request, __response, __args| {
//!         Ok(Into::<Reply>::into(__controller.get_user_action(__request, __args.parse(0usize)?)))
//!     },
//! )
//! ```

use autoroute_core::{DEFAULT_ACTION_SUFFIX, FLOAT_TYPE, INT_TYPE, classify_action, lower_camel_case};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    FnArg, GenericArgument, Ident, ImplItem, ImplItemFn, ItemImpl, LitStr, Pat, PathArguments,
    Type, Visibility, ext::IdentExt, meta::ParseNestedMeta, parse_quote, spanned::Spanned,
};

// ============================================================================
// Attribute arguments
// ============================================================================

/// Parsed `#[controller(...)]` arguments.
#[derive(Default)]
pub struct ControllerArgs {
    request: Option<Type>,
    response: Option<Type>,
    output: Option<Type>,
    name: Option<LitStr>,
    prefix: Option<LitStr>,
    fixed_prefix: Option<LitStr>,
    suffix: Option<LitStr>,
    type_patterns: Option<Vec<(String, LitStr)>>,
    name_patterns: Option<Vec<(String, LitStr)>>,
}

impl ControllerArgs {
    pub fn parse(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        if meta.path.is_ident("request") {
            self.request = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("response") {
            self.response = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("output") {
            self.output = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("name") {
            self.name = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("prefix") {
            self.prefix = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("fixed_prefix") {
            self.fixed_prefix = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("suffix") {
            let suffix: LitStr = meta.value()?.parse()?;
            if suffix.value().is_empty() {
                return Err(syn::Error::new(suffix.span(), "action suffix must not be empty"));
            }
            self.suffix = Some(suffix);
        } else if meta.path.is_ident("type_patterns") {
            self.type_patterns = Some(parse_patterns(&meta)?);
        } else if meta.path.is_ident("name_patterns") {
            self.name_patterns = Some(parse_patterns(&meta)?);
        } else {
            return Err(meta.error(
                "unknown controller key; expected request, response, output, name, prefix, \
                 fixed_prefix, suffix, type_patterns or name_patterns",
            ));
        }
        Ok(())
    }
}

/// Parses `(key = "pattern", ...)`.
fn parse_patterns(meta: &ParseNestedMeta) -> syn::Result<Vec<(String, LitStr)>> {
    let mut entries = Vec::new();
    meta.parse_nested_meta(|entry| {
        let key = entry
            .path
            .get_ident()
            .ok_or_else(|| entry.error("expected a type or parameter name"))?
            .unraw()
            .to_string();
        let pattern: LitStr = entry.value()?.parse()?;
        if pattern.value().is_empty() {
            return Err(syn::Error::new(pattern.span(), "pattern must not be empty"));
        }
        entries.push((key, pattern));
        Ok(())
    })?;
    Ok(entries)
}

// ============================================================================
// Type inspection
// ============================================================================

fn last_ident(ty: &Type) -> Option<&Ident> {
    match ty {
        Type::Path(tp) if tp.qself.is_none() => tp.path.segments.last().map(|s| &s.ident),
        Type::Group(group) => last_ident(&group.elem),
        Type::Paren(paren) => last_ident(&paren.elem),
        _ => None,
    }
}

/// `Option<T>` → `T`.
fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(tp) = ty else {
        return None;
    };
    let segment = tp.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

/// Type name used for pattern lookup.
fn declared_type_name(ty: &Type) -> syn::Result<String> {
    if let Type::Reference(reference) = ty {
        return Err(syn::Error::new(
            reference.span(),
            "path parameters must be owned types implementing `FromStr`",
        ));
    }
    let ident = last_ident(ty)
        .ok_or_else(|| syn::Error::new(ty.span(), "unsupported path parameter type"))?;

    let name = ident.to_string();
    Ok(match name.as_str() {
        "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64"
        | "u128" | "usize" => INT_TYPE.to_string(),
        "f32" | "f64" => FLOAT_TYPE.to_string(),
        _ => name,
    })
}

// ============================================================================
// Code generation
// ============================================================================

struct Handles {
    request: Ident,
    response: Ident,
}

pub fn expand(args: ControllerArgs, item: ItemImpl) -> syn::Result<TokenStream> {
    if let Some((_, path, _)) = &item.trait_ {
        return Err(syn::Error::new(
            path.span(),
            "#[controller] must be applied to an inherent impl block",
        ));
    }

    let output = args.output.clone().ok_or_else(|| {
        syn::Error::new(item.impl_token.span, "#[controller] requires `output = Type`")
    })?;
    let request: Type = args.request.clone().unwrap_or_else(|| parse_quote!(Request));
    let response: Type = args.response.clone().unwrap_or_else(|| parse_quote!(Response));

    let handles = Handles {
        request: last_ident(&request)
            .ok_or_else(|| syn::Error::new(request.span(), "request must be a named type"))?
            .clone(),
        response: last_ident(&response)
            .ok_or_else(|| syn::Error::new(response.span(), "response must be a named type"))?
            .clone(),
    };

    let self_ty = &item.self_ty;
    let name = match &args.name {
        Some(name) => name.value(),
        None => last_ident(self_ty)
            .ok_or_else(|| syn::Error::new(self_ty.span(), "cannot derive a controller name"))?
            .unraw()
            .to_string(),
    };
    let suffix = args
        .suffix
        .as_ref()
        .map(LitStr::value)
        .unwrap_or_else(|| DEFAULT_ACTION_SUFFIX.to_string());

    let core = quote! { ::autoroute::core };

    let mut actions = Vec::new();
    for impl_item in &item.items {
        let ImplItem::Fn(method) = impl_item else {
            continue;
        };
        if !matches!(method.vis, Visibility::Public(_)) {
            continue;
        }
        let Some(receiver) = method.sig.receiver() else {
            continue;
        };

        let method_name = lower_camel_case(&method.sig.ident.to_string());
        if classify_action(&method_name, &suffix).is_none() {
            continue;
        }
        if receiver.reference.is_none() || receiver.mutability.is_some() {
            return Err(syn::Error::new(
                receiver.span(),
                "route methods must take `&self`",
            ));
        }

        actions.push(expand_action(&core, method, &method_name, &handles, &output)?);
    }

    let descriptor = expand_descriptor(&core, &args, &name);
    let (impl_generics, _, where_clause) = item.generics.split_for_impl();

    Ok(quote! {
        #item

        impl #impl_generics #core::Controller for #self_ty #where_clause {
            type Request = #request;
            type Response = #response;
            type Output = #output;

            fn descriptor() -> #core::ControllerDescriptor {
                #descriptor
            }

            fn actions() -> ::std::vec::Vec<#core::Action<Self>> {
                ::std::vec![ #( #actions ),* ]
            }
        }
    })
}

fn expand_descriptor(core: &TokenStream, args: &ControllerArgs, name: &str) -> TokenStream {
    let mut calls = Vec::new();

    if let Some(prefix) = &args.prefix {
        calls.push(quote! { .prefix(#prefix) });
    }
    if let Some(fixed) = &args.fixed_prefix {
        calls.push(quote! { .fixed_prefix(#fixed) });
    }
    if let Some(suffix) = &args.suffix {
        calls.push(quote! { .action_suffix(#suffix) });
    }

    if args.type_patterns.is_some() || args.name_patterns.is_some() {
        let mut table = quote! { #core::PatternTable::default() };
        if let Some(entries) = &args.type_patterns {
            let entries = pattern_entries(entries);
            table = quote! { #table.with_type_patterns(#entries) };
        }
        if let Some(entries) = &args.name_patterns {
            let entries = pattern_entries(entries);
            table = quote! { #table.with_name_patterns(#entries) };
        }
        calls.push(quote! { .patterns(#table) });
    }

    quote! {
        #core::ControllerDescriptor::new(#name) #( #calls )*
    }
}

fn pattern_entries(entries: &[(String, LitStr)]) -> TokenStream {
    let keys = entries.iter().map(|(key, _)| key);
    let values = entries.iter().map(|(_, value)| value);
    quote! {
        ::std::vec::Vec::<(&str, &str)>::from([ #( (#keys, #values) ),* ])
    }
}

fn expand_action(
    core: &TokenStream,
    method: &ImplItemFn,
    method_name: &str,
    handles: &Handles,
    output: &Type,
) -> syn::Result<TokenStream> {
    let ident = &method.sig.ident;
    let mut specs = Vec::new();
    let mut call_args = Vec::new();
    let mut slot = 0usize;
    let mut seen_request = false;
    let mut seen_response = false;

    for input in &method.sig.inputs {
        let FnArg::Typed(pat_type) = input else {
            continue;
        };
        let Pat::Ident(pat_ident) = &*pat_type.pat else {
            return Err(syn::Error::new(
                pat_type.pat.span(),
                "action parameters must be plain identifiers",
            ));
        };
        let param_name = pat_ident.ident.unraw().to_string();
        let ty = &*pat_type.ty;

        match last_ident(ty) {
            Some(id) if *id == handles.request => {
                if std::mem::replace(&mut seen_request, true) {
                    return Err(syn::Error::new(ty.span(), "request handle declared twice"));
                }
                specs.push(quote! { #core::ParamSpec::request(#param_name) });
                call_args.push(quote! { __request });
                continue;
            }
            Some(id) if *id == handles.response => {
                if std::mem::replace(&mut seen_response, true) {
                    return Err(syn::Error::new(ty.span(), "response handle declared twice"));
                }
                specs.push(quote! { #core::ParamSpec::response(#param_name) });
                call_args.push(quote! { __response });
                continue;
            }
            _ => {}
        }

        let spec = match option_inner(ty) {
            Some(inner) => {
                let type_name = declared_type_name(inner)?;
                call_args.push(quote! { __args.parse_optional(#slot)? });
                quote! { #core::ParamSpec::typed(#param_name, #type_name).optional() }
            }
            None => {
                let type_name = declared_type_name(ty)?;
                call_args.push(quote! { __args.parse(#slot)? });
                quote! { #core::ParamSpec::typed(#param_name, #type_name) }
            }
        };
        specs.push(spec);
        slot += 1;
    }

    Ok(quote! {
        #core::Action::<Self>::new(
            #core::ActionMethod::new(#method_name) #( .param(#specs) )*,
            |__controller, __request, __response, __args| {
                ::std::result::Result::Ok(::std::convert::Into::<#output>::into(
                    __controller.#ident( #( #call_args ),* )
                ))
            },
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_type_names() {
        let cases: [(Type, &str); 5] = [
            (parse_quote!(u64), "int"),
            (parse_quote!(i32), "int"),
            (parse_quote!(f64), "float"),
            (parse_quote!(String), "String"),
            (parse_quote!(std::net::Ipv4Addr), "Ipv4Addr"),
        ];
        for (ty, expected) in cases {
            assert_eq!(declared_type_name(&ty).unwrap(), expected);
        }
        assert!(declared_type_name(&parse_quote!(&str)).is_err());
    }

    #[test]
    fn test_option_inner() {
        let ty: Type = parse_quote!(Option<f64>);
        assert_eq!(
            option_inner(&ty).and_then(last_ident).map(Ident::to_string),
            Some("f64".to_string())
        );
        assert!(option_inner(&parse_quote!(u64)).is_none());
    }

    #[test]
    fn test_skips_non_route_and_private_methods() {
        let args = ControllerArgs {
            output: Some(parse_quote!(String)),
            ..ControllerArgs::default()
        };
        let item: ItemImpl = parse_quote! {
            impl UserController {
                pub fn get_user_action(&self, id: u64) -> String { id.to_string() }
                fn get_hidden_action(&self) -> String { String::new() }
                pub fn helper_internal(&self) {}
            }
        };
        let tokens = expand(args, item).unwrap().to_string();

        assert!(tokens.contains("\"getUserAction\""));
        assert!(!tokens.contains("\"getHiddenAction\""));
        assert!(!tokens.contains("\"helperInternal\""));
    }

    #[test]
    fn test_requires_output() {
        let item: ItemImpl = parse_quote! {
            impl UserController {}
        };
        assert!(expand(ControllerArgs::default(), item).is_err());
    }

    #[test]
    fn test_rejects_mut_receiver() {
        let args = ControllerArgs {
            output: Some(parse_quote!(String)),
            ..ControllerArgs::default()
        };
        let item: ItemImpl = parse_quote! {
            impl UserController {
                pub fn post_action(&mut self) -> String { String::new() }
            }
        };
        assert!(expand(args, item).is_err());
    }
}
