//! Attribute parsing for `#[conf(...)]` annotations.
//!
//! Tag values are kept as raw text: the runtime decides what they mean, so a
//! `required = "maybe"` is reported when the record is populated, not here.

use syn::meta::ParseNestedMeta;
use syn::{Attribute, Expr, ExprLit, ExprUnary, Field, Lit, UnOp};

/// Parsed `#[conf(...)]` tags of a struct field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Source key; fields without it are skipped at runtime.
    pub env: Option<String>,
    pub default: Option<String>,
    pub required: Option<String>,
    pub choices: Option<String>,
    pub delimiter: Option<String>,
}

impl FieldAttrs {
    /// Extract the tags from a struct field.
    ///
    /// Unrecognized tags are skipped.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in conf_attrs(&field.attrs) {
            attr.parse_nested_meta(|meta| {
                let slot = if meta.path.is_ident("env") {
                    &mut attrs.env
                } else if meta.path.is_ident("default") {
                    &mut attrs.default
                } else if meta.path.is_ident("required") {
                    &mut attrs.required
                } else if meta.path.is_ident("choices") {
                    &mut attrs.choices
                } else if meta.path.is_ident("delimiter") {
                    &mut attrs.delimiter
                } else {
                    return skip(&meta);
                };
                *slot = Some(tag_text(&meta)?);
                Ok(())
            })?;
        }

        Ok(attrs)
    }
}

/// Parsed struct-level `#[conf(...)]` options.
#[derive(Debug, Default)]
pub struct StructAttrs {
    /// Prepended to every `env` key.
    pub prefix: String,
}

impl StructAttrs {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();

        for attr in conf_attrs(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("prefix") {
                    parsed.prefix = tag_text(&meta)?;
                    return Ok(());
                }
                skip(&meta)
            })?;
        }

        Ok(parsed)
    }
}

fn conf_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs.iter().filter(|attr| attr.path().is_ident("conf"))
}

/// Read `= <literal>` as the literal's raw text.
///
/// Strings give their contents; numbers and booleans their source text, so
/// `default = 8080` and `default = "8080"` are the same tag.
fn tag_text(meta: &ParseNestedMeta) -> syn::Result<String> {
    let expr: Expr = meta.value()?.parse()?;
    let text = match &expr {
        Expr::Lit(ExprLit { lit, .. }) => lit_text(lit),
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_),
            expr: inner,
            ..
        }) => match inner.as_ref() {
            Expr::Lit(ExprLit { lit, .. }) => lit_text(lit).map(|text| format!("-{text}")),
            _ => None,
        },
        _ => None,
    };
    text.ok_or_else(|| syn::Error::new_spanned(&expr, "expected a string, number or boolean literal"))
}

fn lit_text(lit: &Lit) -> Option<String> {
    match lit {
        Lit::Str(s) => Some(s.value()),
        Lit::Int(i) => Some(i.base10_digits().to_string()),
        Lit::Float(f) => Some(f.base10_digits().to_string()),
        Lit::Bool(b) => Some(b.value.to_string()),
        _ => None,
    }
}

/// Consume an unrecognized tag, whatever its shape.
fn skip(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(syn::Token![=]) {
        meta.value()?.parse::<Expr>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        syn::parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_parse_env_attribute() {
        let field: Field = parse_quote! {
            #[conf(env = "PORT")]
            pub port: u16
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.env, Some("PORT".to_string()));
        assert_eq!(attrs.default, None);
    }

    #[test]
    fn test_parse_all_tags() {
        let field: Field = parse_quote! {
            #[conf(env = "MODES", default = "a;b", required = "false", choices = "a;b;c", delimiter = ";")]
            pub modes: Vec<String>
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.env.as_deref(), Some("MODES"));
        assert_eq!(attrs.default.as_deref(), Some("a;b"));
        assert_eq!(attrs.required.as_deref(), Some("false"));
        assert_eq!(attrs.choices.as_deref(), Some("a;b;c"));
        assert_eq!(attrs.delimiter.as_deref(), Some(";"));
    }

    #[test]
    fn test_parse_non_string_literals() {
        let field: Field = parse_quote! {
            #[conf(env = "RATIO", default = -0.5, required = true)]
            pub ratio: f64
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.default.as_deref(), Some("-0.5"));
        assert_eq!(attrs.required.as_deref(), Some("true"));
    }

    #[test]
    fn test_parse_integer_keeps_digits() {
        let field: Field = parse_quote! {
            #[conf(env = "PORT", default = 8080u16)]
            pub port: u16
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.default.as_deref(), Some("8080"));
    }

    #[test]
    fn test_unknown_tags_are_ignored() {
        let field: Field = parse_quote! {
            #[conf(env = "PORT", doc = "the port", flag, nested(a, b = 1), default = "80")]
            pub port: u16
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.env.as_deref(), Some("PORT"));
        assert_eq!(attrs.default.as_deref(), Some("80"));
    }

    #[test]
    fn test_multiple_attributes_merge() {
        let field: Field = parse_quote! {
            #[conf(env = "PORT")]
            #[serde(rename = "port")]
            #[conf(default = "80")]
            pub port: u16
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.env.as_deref(), Some("PORT"));
        assert_eq!(attrs.default.as_deref(), Some("80"));
    }

    #[test]
    fn test_non_literal_is_rejected() {
        let field: Field = parse_quote! {
            #[conf(env = PORT)]
            pub port: u16
        };

        assert!(FieldAttrs::from_field(&field).is_err());
    }

    #[test]
    fn test_parse_prefix() {
        let input: syn::DeriveInput = parse_quote! {
            #[conf(prefix = "APP_")]
            struct Config {}
        };

        let attrs = StructAttrs::from_attrs(&input.attrs).unwrap();
        assert_eq!(attrs.prefix, "APP_");
    }
}
