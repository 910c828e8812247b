use std::borrow::Cow;

/// Model-level validation failures.
#[flip_derive::flip_error]
pub enum DomainError {
    /// A feature identifier was empty or blank.
    #[error("Invalid feature uid{}: {message}", format_context(.context))]
    InvalidUid { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A strategy rejected one of its initialization parameters.
    #[error("Invalid strategy parameter '{param}'{}: {message}", format_context(.context))]
    InvalidParameter {
        param: Cow<'static, str>,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },
}
