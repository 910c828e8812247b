#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by every crate of the workspace.
//!
//! * [`macro@flip_error`] turns a plain enum into a context-aware error type.
//! * [`macro@api_model`] applies the serde/OpenAPI policy used for HTTP payloads.
//! * [`macro@api_handler`] attaches `utoipa` path metadata to Axum handlers.
//!
//! The examples below are `ignore`d because proc-macro crates cannot run
//! their own doctests against themselves.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Attribute macro to define a standard API data model.
///
/// # Injected Behaviors
///
/// * **Derives**: Adds `Debug`, `Serialize`, and `Deserialize` if missing.
/// * **`OpenAPI`**: Adds `utoipa::ToSchema` when the consuming crate enables `server`.
/// * **Serde Policy**: `rename_all = "camelCase"` and `deny_unknown_fields` unless overridden.
///
/// # Example
///
/// ```rust,ignore
/// use flip_derive::api_model;
///
/// #[api_model(deny_unknown_fields = false)]
/// pub struct ErrorBody {
///     pub error: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Attribute macro to bridge Axum handlers with `OpenAPI` documentation.
///
/// Accepts standard `utoipa::path` arguments (`get`, `path = "..."`, `params(...)`,
/// `responses(...)`, `tag = "..."`). The path metadata is only emitted when the
/// consuming crate enables its `server` feature.
///
/// # Example
///
/// ```rust,ignore
/// use flip_derive::api_handler;
///
/// #[api_handler(get, path = "/health", responses((status = OK, body = HealthResponse)))]
/// pub async fn health_handler() -> impl IntoResponse {
///     // ...
/// }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_api_handler(args.into(), input).into()
}

/// Attribute macro for defining domain-specific error enums.
///
/// # Generated Items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already derived.
/// * `<ErrorName>Ext` trait with `.context(...)` for `Result<T, ErrorName>`.
/// * For variants holding only `source` and `context`: `From<Source>` and
///   `.context(...)` on `Result<T, Source>`.
/// * `From<&'static str>` and `From<String>` when an `Internal` variant exists.
/// * A module-local `format_context` helper used inside `#[error(...)]` strings.
///
/// # Requirements
///
/// Variants must use named fields. A `context` field must be typed
/// `Option<Cow<'static, str>>`, and every variant holding a `source` needs one.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[flip_derive::flip_error]
/// pub enum CodecError {
///     #[error("Serialization failed{}: {source}", format_context(.context))]
///     Serialize { source: serde_json::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal codec error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn encode(value: &Value) -> Result<String, CodecError> {
///     serde_json::to_string(value).context("Encoding feature")
/// }
/// ```
#[proc_macro_attribute]
pub fn flip_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}
