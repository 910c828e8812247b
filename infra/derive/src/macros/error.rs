use fxhash::FxHashSet;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::spanned::Spanned;
use syn::{Attribute, Data, DeriveInput, Fields, Ident, Type, Variant};

const INTERNAL: &str = "Internal";

/// What the generator needs to know about a single enum variant.
struct ErrorVariant<'a> {
    ident: &'a Ident,
    /// `(field, type)` of the wrapped upstream error, if any.
    source: Option<(&'a Ident, &'a Type)>,
    has_context: bool,
    /// True when the variant holds nothing but `source` and `context`.
    convertible: bool,
    cfg: Vec<&'a Attribute>,
}

pub fn expand_derive(input: DeriveInput) -> TokenStream {
    expand(&input).unwrap_or_else(syn::Error::into_compile_error)
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(&input.ident, "flip_error can only be applied to enums"));
    };

    let variants = data.variants.iter().map(inspect).collect::<syn::Result<Vec<_>>>()?;
    if let Some(orphan) = variants.iter().find(|v| v.source.is_some() && !v.has_context) {
        return Err(syn::Error::new_spanned(
            orphan.ident,
            "flip_error requires `context: Option<Cow<'static, str>>` next to a `source` field",
        ));
    }

    let name = &input.ident;
    let ext = format_ident!("{name}Ext");
    let derives = missing_derives(&input.attrs);
    let ext_trait = context_trait(name, &ext, &variants);
    let conversions = variants.iter().filter_map(|v| source_conversion(name, &ext, v));
    let internal = internal_conversions(name, &variants);

    Ok(quote! {
        #[allow(non_shorthand_field_patterns)]
        #derives
        #input

        #ext_trait
        #(#conversions)*
        #internal

        #[allow(dead_code)]
        fn format_context(context: &Option<std::borrow::Cow<'static, str>>) -> std::borrow::Cow<'static, str> {
            context.as_ref().map_or(std::borrow::Cow::Borrowed(""), |c| std::borrow::Cow::Owned(format!(" ({c})")))
        }
    })
}

fn inspect(variant: &Variant) -> syn::Result<ErrorVariant<'_>> {
    let Fields::Named(fields) = &variant.fields else {
        return Err(syn::Error::new_spanned(variant, "flip_error requires variants with named fields"));
    };

    let mut source = None;
    let mut has_context = false;
    let mut others = 0usize;

    for field in &fields.named {
        let Some(ident) = &field.ident else { continue };
        if ident == "context" {
            if !is_context_type(&field.ty) {
                return Err(syn::Error::new(
                    field.ty.span(),
                    "context field must be Option<Cow<'static, str>>",
                ));
            }
            has_context = true;
        } else if ident == "source" || has_attr(&field.attrs, "source") || has_attr(&field.attrs, "from")
        {
            source = Some((ident, &field.ty));
        } else {
            others += 1;
        }
    }

    Ok(ErrorVariant {
        ident: &variant.ident,
        source,
        has_context,
        convertible: source.is_some() && has_context && others == 0,
        cfg: variant.attrs.iter().filter(|a| a.path().is_ident("cfg")).collect(),
    })
}

fn context_trait(name: &Ident, ext: &Ident, variants: &[ErrorVariant<'_>]) -> TokenStream {
    let arms = variants.iter().filter(|v| v.has_context).map(|v| {
        let ident = v.ident;
        let cfg = &v.cfg;
        quote! { #(#cfg)* #name::#ident { context: slot, .. } => *slot = Some(context.into()), }
    });

    quote! {
        pub trait #ext<T> {
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> Result<T, #name>;
        }

        #[automatically_derived]
        impl<T> #ext<T> for Result<T, #name> {
            #[inline]
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> Self {
                self.map_err(|mut err| {
                    match &mut err {
                        #(#arms)*
                        _ => {}
                    }
                    err
                })
            }
        }
    }
}

fn source_conversion(name: &Ident, ext: &Ident, v: &ErrorVariant<'_>) -> Option<TokenStream> {
    if v.ident == INTERNAL || !v.convertible {
        return None;
    }
    let (field, ty) = v.source?;
    let ident = v.ident;
    let cfg = &v.cfg;

    Some(quote! {
        #(#cfg)*
        #[automatically_derived]
        impl From<#ty> for #name {
            #[inline]
            fn from(#field: #ty) -> Self { Self::#ident { #field, context: None } }
        }

        #(#cfg)*
        impl<T> #ext<T> for std::result::Result<T, #ty> {
            #[inline]
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> std::result::Result<T, #name> {
                self.map_err(|#field| #name::#ident { #field, context: Some(context.into()) })
            }
        }
    })
}

fn internal_conversions(name: &Ident, variants: &[ErrorVariant<'_>]) -> TokenStream {
    let Some(internal) = variants.iter().find(|v| v.ident == INTERNAL) else {
        return TokenStream::new();
    };
    let cfg = &internal.cfg;

    quote! {
        #(#cfg)*
        impl From<&'static str> for #name {
            #[inline]
            fn from(s: &'static str) -> Self { Self::Internal { message: std::borrow::Cow::Borrowed(s), context: None } }
        }
        #(#cfg)*
        impl From<String> for #name {
            #[inline]
            fn from(s: String) -> Self { Self::Internal { message: std::borrow::Cow::Owned(s), context: None } }
        }
    }
}

fn missing_derives(attrs: &[Attribute]) -> TokenStream {
    let present = derived_idents(attrs);
    let mut wanted = Vec::new();
    if !present.contains("Debug") {
        wanted.push(quote! { Debug });
    }
    if !present.contains("Error") {
        wanted.push(quote! { ::thiserror::Error });
    }
    if wanted.is_empty() { TokenStream::new() } else { quote! { #[derive(#(#wanted),*)] } }
}

fn derived_idents(attrs: &[Attribute]) -> FxHashSet<String> {
    let mut idents = FxHashSet::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("derive")) {
        let _ = attr.parse_nested_meta(|meta| {
            if let Some(last) = meta.path.segments.last() {
                idents.insert(last.ident.to_string());
            }
            Ok(())
        });
    }
    idents
}

fn has_attr(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(name))
}

/// Matches `Option<Cow<'static, str>>` by the last path segment of each type.
fn is_context_type(ty: &Type) -> bool {
    fn generic_args(ty: &Type, expected: &str) -> Option<Vec<syn::GenericArgument>> {
        let Type::Path(path) = ty else { return None };
        let segment = path.path.segments.last()?;
        if segment.ident != expected {
            return None;
        }
        let syn::PathArguments::AngleBracketed(args) = &segment.arguments else { return None };
        Some(args.args.iter().cloned().collect())
    }

    let Some(outer) = generic_args(ty, "Option") else { return false };
    let [syn::GenericArgument::Type(cow)] = outer.as_slice() else { return false };
    let Some(inner) = generic_args(cow, "Cow") else { return false };
    let [syn::GenericArgument::Lifetime(lt), syn::GenericArgument::Type(Type::Path(target))] =
        inner.as_slice()
    else {
        return false;
    };

    lt.ident == "static" && target.path.segments.last().is_some_and(|s| s.ident == "str")
}
