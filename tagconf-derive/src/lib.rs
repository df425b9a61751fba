//! Derive macro implementation for tagconf

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Type};

mod attrs;

use attrs::{FieldAttrs, StructAttrs};

/// Whether a field type is a borrow or raw pointer, which the engine cannot
/// write an owned value through.
fn is_borrowed(ty: &Type) -> bool {
    match ty {
        Type::Reference(_) | Type::Ptr(_) => true,
        Type::Group(group) => is_borrowed(&group.elem),
        Type::Paren(paren) => is_borrowed(&paren.elem),
        _ => false,
    }
}

fn optional(value: Option<String>) -> TokenStream2 {
    match value {
        Some(value) => quote! { ::core::option::Option::Some(#value) },
        None => quote! { ::core::option::Option::None },
    }
}

/// `TagConf` derive macro
///
/// Implements `tagconf::TagConf` for a struct with named fields, listing every
/// field with the tags from its `#[conf(...)]` attributes.
///
/// # Supported Attributes
///
/// **Struct-level**:
/// - `#[conf(prefix = "PREFIX_")]`: Add prefix to every `env` key
///
/// **Field-level**:
/// - `#[conf(env = "KEY")]`: Source key; untagged fields are skipped
/// - `#[conf(default = "value")]`: Raw value used when the source has none
/// - `#[conf(required = true)]`: Fail when no value resolves
/// - `#[conf(choices = "a,b")]`: Permitted raw values
/// - `#[conf(delimiter = ";")]`: Separator for `choices` and list values
///
/// Fields of borrowed types (`&T`, raw pointers) are reported as unsettable
/// when tagged with `env`.
///
/// # Example
///
/// See the `tagconf` crate documentation for usage examples.
#[proc_macro_derive(TagConf, attributes(conf))]
pub fn derive_tagconf(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let struct_attrs = StructAttrs::from_attrs(&input.attrs)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    struct_name,
                    "TagConf only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                struct_name,
                "TagConf only supports structs",
            ));
        }
    };

    let mut descriptors = Vec::with_capacity(fields.len());
    for field in fields {
        let Some(field_ident) = field.ident.as_ref() else {
            continue;
        };
        let field_name = field_ident.to_string();
        let field_type = &field.ty;
        let attrs = FieldAttrs::from_field(field)?;

        let target = if attrs.env.is_none() || is_borrowed(field_type) {
            quote! { ::core::option::Option::None }
        } else {
            quote! {
                ::core::option::Option::Some(::tagconf::Value::target(&mut self.#field_ident))
            }
        };

        let env = optional(
            attrs
                .env
                .map(|key| format!("{}{}", struct_attrs.prefix, key)),
        );
        let default = optional(attrs.default);
        let required = optional(attrs.required);
        let choices = optional(attrs.choices);
        let delimiter = optional(attrs.delimiter);

        descriptors.push(quote! {
            ::tagconf::Field::new(
                #field_name,
                ::core::any::type_name::<#field_type>(),
                ::tagconf::Tags {
                    env: #env,
                    default: #default,
                    required: #required,
                    choices: #choices,
                    delimiter: #delimiter,
                },
                #target,
            )
        });
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::tagconf::TagConf for #struct_name #ty_generics #where_clause {
            fn fields(&mut self) -> ::std::vec::Vec<::tagconf::Field<'_>> {
                ::std::vec![#(#descriptors),*]
            }
        }
    })
}
