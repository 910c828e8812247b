use fxhash::FxHashSet;
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::parse::Parser;
use syn::punctuated::Punctuated;
use syn::{Attribute, Expr, ItemFn, ItemStruct, Lit, LitStr, Meta, MetaNameValue, Token};

/// Arguments accepted by `#[api_model(...)]`.
#[derive(Default)]
struct ModelArgs {
    rename_all: Option<LitStr>,
    deny_unknown_fields: Option<bool>,
}

/// Serde settings already present on the annotated struct.
#[derive(Default)]
struct ExistingSerde {
    rename_all: Option<LitStr>,
    deny_unknown_fields: bool,
}

/// Expands the `#[api_model]` attribute macro.
pub fn expand_api_model(args: TokenStream, input: ItemStruct) -> TokenStream {
    model(args, &input).unwrap_or_else(syn::Error::into_compile_error)
}

fn model(args: TokenStream, input: &ItemStruct) -> syn::Result<TokenStream> {
    let args = parse_model_args(args)?;
    let existing = existing_serde(&input.attrs)?;
    let derives = derived_idents(&input.attrs);

    let mut wanted = Vec::new();
    if !derives.contains("Debug") {
        wanted.push(quote! { Debug });
    }
    if !derives.contains("Serialize") {
        wanted.push(quote! { ::serde::Serialize });
    }
    if !derives.contains("Deserialize") {
        wanted.push(quote! { ::serde::Deserialize });
    }
    let derive_attr = if wanted.is_empty() { quote! {} } else { quote! { #[derive(#(#wanted),*)] } };

    let schema_attr = if derives.contains("ToSchema") {
        quote! {}
    } else {
        quote! { #[cfg_attr(feature = "server", derive(::utoipa::ToSchema))] }
    };

    let rename = args.rename_all.unwrap_or_else(|| LitStr::new("camelCase", Span::call_site()));
    let rename_attr = match &existing.rename_all {
        Some(current) if current.value() != rename.value() => {
            return Err(syn::Error::new_spanned(
                current,
                "Conflicting serde rename_all; remove it or pass the same value to api_model",
            ));
        },
        Some(_) => quote! {},
        None => quote! { #[serde(rename_all = #rename)] },
    };

    let deny = args.deny_unknown_fields.unwrap_or(true);
    let deny_attr = match (existing.deny_unknown_fields, deny) {
        (true, false) => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "deny_unknown_fields is already set via serde; remove it before disabling",
            ));
        },
        (false, true) => quote! { #[serde(deny_unknown_fields)] },
        _ => quote! {},
    };

    Ok(quote! {
        #derive_attr
        #schema_attr
        #rename_attr
        #deny_attr
        #input
    })
}

/// Expands the `#[api_handler]` attribute macro.
pub fn expand_api_handler(args: TokenStream, input: ItemFn) -> TokenStream {
    let ItemFn { attrs, vis, sig, block } = input;

    quote! {
        #(#attrs)*
        #[allow(clippy::unused_async)]
        #[cfg_attr(feature = "server", ::utoipa::path(#args))]
        #vis #sig #block
    }
}

fn parse_model_args(args: TokenStream) -> syn::Result<ModelArgs> {
    let metas = Punctuated::<Meta, Token![,]>::parse_terminated.parse2(args)?;
    let mut parsed = ModelArgs::default();

    for meta in metas {
        let Meta::NameValue(nv) = meta else {
            return Err(syn::Error::new_spanned(
                meta,
                "Expected name-value arguments like `rename_all = \"...\"`",
            ));
        };
        if nv.path.is_ident("rename_all") {
            ensure_unset(parsed.rename_all.is_some(), &nv)?;
            parsed.rename_all = Some(string_literal(&nv)?);
        } else if nv.path.is_ident("deny_unknown_fields") {
            ensure_unset(parsed.deny_unknown_fields.is_some(), &nv)?;
            parsed.deny_unknown_fields = Some(bool_literal(&nv)?);
        } else {
            return Err(syn::Error::new_spanned(
                nv.path,
                "Unsupported argument; expected rename_all or deny_unknown_fields",
            ));
        }
    }

    Ok(parsed)
}

fn ensure_unset(already_set: bool, nv: &MetaNameValue) -> syn::Result<()> {
    if already_set { Err(syn::Error::new_spanned(nv, "Duplicate argument")) } else { Ok(()) }
}

fn string_literal(nv: &MetaNameValue) -> syn::Result<LitStr> {
    match &nv.value {
        Expr::Lit(syn::ExprLit { lit: Lit::Str(lit), .. }) => Ok(lit.clone()),
        other => Err(syn::Error::new_spanned(other, "expected a string literal")),
    }
}

fn bool_literal(nv: &MetaNameValue) -> syn::Result<bool> {
    match &nv.value {
        Expr::Lit(syn::ExprLit { lit: Lit::Bool(lit), .. }) => Ok(lit.value),
        other => Err(syn::Error::new_spanned(other, "expected a boolean literal")),
    }
}

fn existing_serde(attrs: &[Attribute]) -> syn::Result<ExistingSerde> {
    let mut existing = ExistingSerde::default();

    for attr in attrs.iter().filter(|a| a.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                existing.rename_all = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("deny_unknown_fields") {
                existing.deny_unknown_fields = true;
            } else if meta.input.peek(Token![=]) {
                // Skip values of unrelated serde options.
                let _: Expr = meta.value()?.parse()?;
            }
            Ok(())
        })?;
    }

    Ok(existing)
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
