use crate::error::CodecError;
use flip_domain::constants::json;
use flip_domain::{Feature, FlippingStrategy, InitParams};
use flip_strategy::StrategyLoader;
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::sync::Arc;
use tracing::debug;

const FEATURE: &str = "Feature";
const FEATURE_ARRAY: &str = "Feature array";
const STRATEGY: &str = "FlippingStrategy";
/// Longest input echoed back in an error.
const SNIPPET_LEN: usize = 512;

type Object = Map<String, Value>;

/// Parses feature documents, resolving strategies through a [`StrategyLoader`].
#[derive(Debug, Clone)]
pub struct FeatureCodec {
    loader: StrategyLoader,
}

impl FeatureCodec {
    #[must_use]
    pub const fn new(loader: StrategyLoader) -> Self {
        Self { loader }
    }

    #[must_use]
    pub const fn loader(&self) -> &StrategyLoader {
        &self.loader
    }

    /// Parses a single feature document.
    ///
    /// # Errors
    /// * [`CodecError::MalformedDocument`] for invalid JSON, a non-object document,
    ///   a missing `uid`, or a mistyped field.
    /// * [`CodecError::Strategy`] if the strategy cannot be resolved or built.
    pub fn parse_feature(&self, input: &str) -> Result<Feature, CodecError> {
        match parse_value(input, FEATURE)? {
            Value::Object(object) => self.feature_from_object(&object),
            other => Err(malformed(FEATURE, None, wrong_type("an object", &other), input)),
        }
    }

    /// Parses a feature array; `None` or empty text yields `None`.
    ///
    /// # Errors
    /// Same as [`FeatureCodec::parse_feature`], for the array or any element.
    pub fn parse_feature_array(&self, input: Option<&str>) -> Result<Option<Vec<Feature>>, CodecError> {
        let Some(input) = input.filter(|s| !s.is_empty()) else { return Ok(None) };

        let Value::Array(items) = parse_value(input, FEATURE_ARRAY)? else {
            return Err(malformed(FEATURE_ARRAY, None, "expected a JSON array".into(), input));
        };

        items
            .iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(object) => self.feature_from_object(object),
                other => Err(malformed(
                    FEATURE_ARRAY,
                    Some(format!("[{index}]").into()),
                    wrong_type("an object", other),
                    input,
                )),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    /// Parses a standalone `flippingStrategy` document for feature `uid`.
    /// `None`, empty text, `null` and `{}` all mean "no strategy".
    ///
    /// # Errors
    /// * [`CodecError::MalformedDocument`] for invalid JSON or a mistyped field.
    /// * [`CodecError::Strategy`] if the strategy cannot be resolved or built.
    pub fn parse_strategy(
        &self,
        uid: &str,
        input: Option<&str>,
    ) -> Result<Option<Arc<dyn FlippingStrategy>>, CodecError> {
        let Some(input) = input.filter(|s| !s.is_empty()) else { return Ok(None) };

        match parse_value(input, STRATEGY)? {
            Value::Null => Ok(None),
            Value::Object(object) => self.parse_strategy_value(uid, Some(&object)),
            other => Err(malformed(STRATEGY, None, wrong_type("an object", &other), input)),
        }
    }

    /// Builds a strategy from an already-parsed `flippingStrategy` object.
    ///
    /// # Errors
    /// See [`FeatureCodec::parse_strategy`].
    pub fn parse_strategy_value(
        &self,
        uid: &str,
        object: Option<&Object>,
    ) -> Result<Option<Arc<dyn FlippingStrategy>>, CodecError> {
        let Some(object) = object.filter(|o| !o.is_empty()) else { return Ok(None) };

        let class_type = match object.get(json::CLASS_TYPE) {
            Some(Value::String(class_type)) => class_type,
            Some(other) => {
                return Err(field_error(STRATEGY, json::CLASS_TYPE, wrong_type("a string", other), object));
            },
            None => {
                return Err(field_error(STRATEGY, json::CLASS_TYPE, "field is required".into(), object));
            },
        };

        let params = init_params(object)?;
        let strategy = self.loader.resolve_and_init(class_type, uid, &params).map_err(|source| {
            CodecError::Strategy {
                class_type: class_type.clone(),
                input: snippet(&Value::Object(object.clone()).to_string()),
                source,
                context: Some(format!("feature '{uid}'").into()),
            }
        })?;

        debug!(uid, class_type = %class_type, "Flipping strategy parsed");
        Ok(Some(strategy))
    }

    fn feature_from_object(&self, object: &Object) -> Result<Feature, CodecError> {
        let uid = match object.get(json::UID) {
            Some(Value::String(uid)) => uid,
            Some(other) => return Err(field_error(FEATURE, json::UID, wrong_type("a string", other), object)),
            None => return Err(field_error(FEATURE, json::UID, "field is required".into(), object)),
        };

        let mut feature = Feature::new(uid.as_str())
            .map_err(|e| field_error(FEATURE, json::UID, e.to_string().into(), object))?
            .with_enable(optional_bool(object, json::ENABLE)?.unwrap_or(false));

        if let Some(description) = optional_str(object, json::DESCRIPTION)? {
            feature = feature.with_description(description);
        }
        if let Some(group) = optional_str(object, json::GROUP)? {
            feature = feature.with_group(group);
        }
        if let Some(permissions) = optional_string_array(object, json::PERMISSIONS)? {
            feature = feature.with_permissions(permissions);
        }

        let strategy = match object.get(json::FLIPPING_STRATEGY) {
            None | Some(Value::Null) => None,
            Some(Value::Object(strategy)) => self.parse_strategy_value(uid, Some(strategy))?,
            Some(other) => {
                return Err(field_error(
                    FEATURE,
                    json::FLIPPING_STRATEGY,
                    wrong_type("an object", other),
                    object,
                ));
            },
        };

        Ok(match strategy {
            Some(strategy) => feature.with_strategy(strategy),
            None => feature,
        })
    }
}

fn parse_value(input: &str, target: &'static str) -> Result<Value, CodecError> {
    serde_json::from_str(input).map_err(|source| CodecError::MalformedDocument {
        target,
        field: None,
        reason: source.to_string().into(),
        input: snippet(input),
        source: Some(source),
        context: None,
    })
}

fn init_params(object: &Object) -> Result<InitParams, CodecError> {
    match object.get(json::INIT_PARAMS) {
        None | Some(Value::Null) => Ok(InitParams::new()),
        Some(Value::Object(params)) => params
            .iter()
            .map(|(key, value)| match value {
                Value::String(value) => Ok((key.clone(), value.clone())),
                other => Err(field_error(
                    STRATEGY,
                    format!("{}.{key}", json::INIT_PARAMS),
                    wrong_type("a string", other),
                    object,
                )),
            })
            .collect(),
        Some(other) => Err(field_error(STRATEGY, json::INIT_PARAMS, wrong_type("an object", other), object)),
    }
}

fn optional_bool(object: &Object, field: &'static str) -> Result<Option<bool>, CodecError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(value)) => Ok(Some(*value)),
        Some(other) => Err(field_error(FEATURE, field, wrong_type("a boolean", other), object)),
    }
}

fn optional_str<'a>(object: &'a Object, field: &'static str) -> Result<Option<&'a str>, CodecError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.as_str())),
        Some(other) => Err(field_error(FEATURE, field, wrong_type("a string", other), object)),
    }
}

fn optional_string_array<'a>(
    object: &'a Object,
    field: &'static str,
) -> Result<Option<Vec<&'a str>>, CodecError> {
    let items = match object.get(field) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Array(items)) => items,
        Some(other) => return Err(field_error(FEATURE, field, wrong_type("an array", other), object)),
    };

    items
        .iter()
        .map(|item| {
            item.as_str().ok_or_else(|| {
                field_error(FEATURE, field, wrong_type("an array of strings", item), object)
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

fn field_error(
    target: &'static str,
    field: impl Into<Cow<'static, str>>,
    reason: Cow<'static, str>,
    object: &Object,
) -> CodecError {
    malformed(target, Some(field.into()), reason, &Value::Object(object.clone()).to_string())
}

fn malformed(
    target: &'static str,
    field: Option<Cow<'static, str>>,
    reason: Cow<'static, str>,
    input: &str,
) -> CodecError {
    if let Some(field) = &field {
        tracing::warn!(target_type = target, field = %field, %reason, "Rejected JSON document");
    }
    CodecError::MalformedDocument { target, field, reason, input: snippet(input), source: None, context: None }
}

fn wrong_type(expected: &str, found: &Value) -> Cow<'static, str> {
    let found = match found {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    };
    format!("expected {expected}, found {found}").into()
}

fn snippet(input: &str) -> String {
    match input.char_indices().nth(SNIPPET_LEN) {
        Some((cut, _)) => format!("{}...", &input[..cut]),
        None => input.to_owned(),
    }
}
