use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, GenericParam, parse2, parse_quote};

use super::attrs::{container_rename, field_directives};

/// Derive macro for the Bindable trait.
///
/// Generates `Describe`, `Bindable` and `ToValue` impls. Only fields with an
/// `#[xml]` attribute appear in the descriptor.
pub fn expand(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match parse2(input) {
        Ok(i) => i,
        Err(e) => return e.to_compile_error(),
    };

    match expand_struct(input) {
        Ok(tokens) => tokens,
        Err(e) => e.to_compile_error(),
    }
}

fn expand_struct(mut input: DeriveInput) -> syn::Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "#[derive(Bindable)] only supports structs",
        ));
    };
    let Fields::Named(fields) = &data.fields else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "#[derive(Bindable)] requires named fields",
        ));
    };

    let mut descriptors = Vec::new();
    let mut accessors = Vec::new();
    for field in &fields.named {
        let directives = field_directives(&field.attrs)?;
        if directives.is_empty() {
            continue;
        }
        let Some(ident) = &field.ident else {
            continue;
        };
        let field_name = ident.unraw().to_string();
        let directives = directives.iter().map(|d| d.to_tokens());

        descriptors.push(quote! {
            ::xmlbind::FieldDescriptor {
                name: #field_name,
                directives: &[#(#directives),*],
            }
        });
        accessors.push(quote! {
            #field_name => ::core::option::Option::Some(::xmlbind::ToValue::to_value(&self.#ident)),
        });
    }

    let name = input.ident.clone();
    let type_name = container_rename(&input.attrs)?.unwrap_or_else(|| name.unraw().to_string());

    if let Some(lifetime) = input.generics.lifetimes().next() {
        return Err(syn::Error::new_spanned(
            lifetime,
            "#[derive(Bindable)] does not support lifetime parameters",
        ));
    }
    for param in &mut input.generics.params {
        if let GenericParam::Type(ty) = param {
            ty.bounds.push(parse_quote!(::xmlbind::ToValue));
            ty.bounds.push(parse_quote!('static));
        }
    }
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::xmlbind::Describe for #name #ty_generics #where_clause {
            fn type_descriptor() -> &'static ::xmlbind::TypeDescriptor {
                static DESCRIPTOR: ::xmlbind::TypeDescriptor = ::xmlbind::TypeDescriptor {
                    name: #type_name,
                    fields: &[#(#descriptors),*],
                };
                &DESCRIPTOR
            }
        }

        impl #impl_generics ::xmlbind::Bindable for #name #ty_generics #where_clause {
            fn descriptor(&self) -> &'static ::xmlbind::TypeDescriptor {
                <Self as ::xmlbind::Describe>::type_descriptor()
            }

            fn field_value(&self, name: &str) -> ::core::option::Option<::xmlbind::Value<'_>> {
                match name {
                    #(#accessors)*
                    _ => ::core::option::Option::None,
                }
            }

            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }
        }

        impl #impl_generics ::xmlbind::ToValue for #name #ty_generics #where_clause {
            fn to_value(&self) -> ::xmlbind::Value<'_> {
                ::xmlbind::Value::Object(self)
            }
        }
    })
}
