use flip_derive::flip_error;
use std::borrow::Cow;

#[flip_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Lookup failed for {key}{}: {source}", format_context(.context))]
    Lookup { key: String, source: std::fmt::Error, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<(), DemoError> {
    Err(std::io::Error::other("boom")).context("reading demo file")
}

fn main() {
    let err = read().unwrap_err();
    assert_eq!(err.to_string(), "IO error (reading demo file): boom");

    let internal: DemoError = "broken".into();
    assert!(matches!(internal, DemoError::Internal { .. }));

    let lookup = DemoError::Lookup { key: "k".to_owned(), source: std::fmt::Error, context: None };
    let lookup: Result<(), DemoError> = Err(lookup);
    assert!(lookup.context("resolving").unwrap_err().to_string().contains("(resolving)"));
}
