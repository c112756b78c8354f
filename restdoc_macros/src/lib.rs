use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    ext::IdentExt, parenthesized, parse_macro_input, Attribute, Data, DeriveInput, Fields, LitStr,
    Result as SynResult, Token, Visibility,
};

/// Metadata collected from `#[api(...)]`, `#[serde(rename = ...)]` and doc comments.
#[derive(Default)]
struct FieldTags {
    json: Option<String>,
    xml: Option<String>,
    desc: Option<String>,
    values: Option<String>,
    min: Option<String>,
    max: Option<String>,
}

impl FieldTags {
    fn parse(attrs: &[Attribute]) -> SynResult<Self> {
        let mut tags = FieldTags::default();
        let mut serde_rename = None;
        let mut doc_lines = Vec::new();

        for attr in attrs {
            if attr.path().is_ident("api") {
                attr.parse_nested_meta(|meta| {
                    let slot = if meta.path.is_ident("json") {
                        &mut tags.json
                    } else if meta.path.is_ident("xml") {
                        &mut tags.xml
                    } else if meta.path.is_ident("desc") {
                        &mut tags.desc
                    } else if meta.path.is_ident("values") {
                        &mut tags.values
                    } else if meta.path.is_ident("min") {
                        &mut tags.min
                    } else if meta.path.is_ident("max") {
                        &mut tags.max
                    } else {
                        return Err(meta.error(
                            "unsupported api attribute, expected one of json, xml, desc, values, min, max",
                        ));
                    };
                    let lit: LitStr = meta.value()?.parse()?;
                    *slot = Some(lit.value());
                    Ok(())
                })?;
            } else if attr.path().is_ident("serde") {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("rename") && meta.input.peek(Token![=]) {
                        let lit: LitStr = meta.value()?.parse()?;
                        serde_rename = Some(lit.value());
                    } else if meta.input.peek(Token![=]) {
                        let _: syn::Expr = meta.value()?.parse()?;
                    } else if meta.input.peek(syn::token::Paren) {
                        let _content;
                        parenthesized!(_content in meta.input);
                    }
                    Ok(())
                })?;
            } else if attr.path().is_ident("doc") {
                if let syn::Meta::NameValue(nv) = &attr.meta {
                    if let syn::Expr::Lit(syn::ExprLit {
                        lit: syn::Lit::Str(s),
                        ..
                    }) = &nv.value
                    {
                        doc_lines.push(s.value().trim().to_string());
                    }
                }
            }
        }

        if tags.json.is_none() {
            tags.json = serde_rename;
        }
        if tags.desc.is_none() && !doc_lines.is_empty() {
            tags.desc = Some(doc_lines.join(" ").trim().to_string());
        }
        Ok(tags)
    }
}

fn opt_string(value: &Option<String>) -> TokenStream2 {
    match value {
        Some(v) => quote! { ::core::option::Option::Some(::std::string::String::from(#v)) },
        None => quote! { ::core::option::Option::None },
    }
}

/// Derive `restdoc::reflect::Describe` for a struct with named fields.
///
/// Field metadata is read from `#[api(json = "..", xml = "..", desc = "..", values = "a b",
/// min = "..", max = "..")]`. Without `json`, a `#[serde(rename = "..")]` is used as the
/// JSON name, and without `desc` the field's doc comment is used.
#[proc_macro_derive(Describe, attributes(api))]
pub fn derive_describe(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    match expand(&input) {
        Ok(ts) => TokenStream::from(ts),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}

fn expand(input: &DeriveInput) -> SynResult<TokenStream2> {
    let name = &input.ident;
    let name_str = name.unraw().to_string();

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Describe cannot be derived for generic structs, every record needs one stable identifier",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Describe can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Describe can only be derived for structs",
            ))
        }
    };

    let mut field_descs = Vec::with_capacity(fields.len());
    for field in fields {
        let Some(ident) = &field.ident else { continue };
        let ident_str = ident.unraw().to_string();
        let ty = &field.ty;
        let public = matches!(field.vis, Visibility::Public(_));
        let tags = FieldTags::parse(&field.attrs)?;
        let json = opt_string(&tags.json);
        let xml = opt_string(&tags.xml);
        let desc = opt_string(&tags.desc);
        let values = opt_string(&tags.values);
        let min = opt_string(&tags.min);
        let max = opt_string(&tags.max);

        field_descs.push(quote! {
            ::restdoc::reflect::FieldDesc {
                ident: ::std::string::String::from(#ident_str),
                public: #public,
                ty: <#ty as ::restdoc::reflect::Describe>::describe(),
                tags: ::restdoc::reflect::FieldTags {
                    json: #json,
                    xml: #xml,
                    desc: #desc,
                    values: #values,
                    min: #min,
                    max: #max,
                },
            }
        });
    }

    Ok(quote! {
        impl ::restdoc::reflect::Describe for #name {
            fn describe() -> ::restdoc::reflect::TypeDesc {
                fn record() -> ::restdoc::reflect::RecordDesc {
                    ::restdoc::reflect::RecordDesc {
                        package: ::core::module_path!(),
                        name: #name_str,
                        fields: ::std::vec![#(#field_descs),*],
                    }
                }
                ::restdoc::reflect::TypeDesc::Record(::restdoc::reflect::RecordRef {
                    package: ::core::module_path!(),
                    name: #name_str,
                    describe: record,
                })
            }
        }
    })
}
