//! Parsing of `#[xml(...)]` attributes.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, LitStr};
use xmldom::name::is_ncname;

/// One directive parsed from a field attribute.
pub enum DirectiveSpec {
    Attribute(Option<String>),
    Element(Option<String>),
    Array(Option<String>),
    ArrayItem(Option<String>),
    Text,
}

impl DirectiveSpec {
    /// Tokens building the matching `xmlbind::Directive`.
    pub fn to_tokens(&self) -> TokenStream {
        match self {
            DirectiveSpec::Attribute(name) => {
                let name = name_tokens(name);
                quote! { ::xmlbind::Directive::Attribute { name: #name } }
            }
            DirectiveSpec::Element(name) => {
                let name = name_tokens(name);
                quote! { ::xmlbind::Directive::Element { name: #name } }
            }
            DirectiveSpec::Array(name) => {
                let name = name_tokens(name);
                quote! { ::xmlbind::Directive::Array { name: #name } }
            }
            DirectiveSpec::ArrayItem(name) => {
                let name = name_tokens(name);
                quote! { ::xmlbind::Directive::ArrayItem { name: #name } }
            }
            DirectiveSpec::Text => quote! { ::xmlbind::Directive::Text },
        }
    }
}

fn name_tokens(name: &Option<String>) -> TokenStream {
    match name {
        Some(name) => quote! { ::core::option::Option::Some(#name) },
        None => quote! { ::core::option::Option::None },
    }
}

/// Collects the directives of a field from all its `#[xml]` attributes.
pub fn field_directives(attrs: &[Attribute]) -> syn::Result<Vec<DirectiveSpec>> {
    let mut directives = Vec::new();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("xml")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("text") {
                directives.push(DirectiveSpec::Text);
                return Ok(());
            }

            let name = if meta.input.peek(syn::Token![=]) {
                let lit: LitStr = meta.value()?.parse()?;
                if !is_ncname(&lit.value()) {
                    return Err(syn::Error::new_spanned(&lit, "not a valid XML name"));
                }
                Some(lit.value())
            } else {
                None
            };

            if meta.path.is_ident("attribute") {
                directives.push(DirectiveSpec::Attribute(name));
            } else if meta.path.is_ident("element") {
                directives.push(DirectiveSpec::Element(name));
            } else if meta.path.is_ident("array") {
                directives.push(DirectiveSpec::Array(name));
            } else if meta.path.is_ident("array_item") {
                directives.push(DirectiveSpec::ArrayItem(name));
            } else {
                return Err(meta.error(
                    "expected `attribute`, `element`, `array`, `array_item` or `text`",
                ));
            }
            Ok(())
        })?;
    }
    Ok(directives)
}

/// Reads `#[xml(rename = "...")]` from the container attributes.
pub fn container_rename(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut rename = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("xml")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let lit: LitStr = meta.value()?.parse()?;
                if !is_ncname(&lit.value()) {
                    return Err(syn::Error::new_spanned(&lit, "not a valid XML name"));
                }
                rename = Some(lit.value());
                Ok(())
            } else {
                Err(meta.error("expected `rename`"))
            }
        })?;
    }
    Ok(rename)
}
