use flip_domain::{DomainError, FlippingContext, FlippingStrategy, InitParams, NamedStrategy};
use flip_strategy::{StrategyCatalog, StrategyError, StrategyLoader, StrategyType, TypeResolver};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
struct Counting {
    params: InitParams,
}

impl NamedStrategy for Counting {
    const TYPE_NAME: &'static str = "acme.Counting";
}

impl FlippingStrategy for Counting {
    fn type_name(&self) -> &str {
        Self::TYPE_NAME
    }

    fn init(&mut self, _uid: &str, params: &InitParams) -> Result<(), DomainError> {
        if params.contains_key("fail") {
            return Err(DomainError::InvalidParameter {
                param: "fail".into(),
                message: "asked to fail".into(),
                context: None,
            });
        }
        self.params = params.clone();
        Ok(())
    }

    fn init_params(&self) -> &InitParams {
        &self.params
    }

    fn evaluate(&self, _uid: &str, _context: &FlippingContext) -> bool {
        true
    }
}

/// Resolver double that counts lookups.
#[derive(Debug, Default)]
struct CountingResolver {
    lookups: AtomicUsize,
}

impl TypeResolver for CountingResolver {
    fn resolve(&self, type_name: &str) -> Option<StrategyType> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        (type_name == Counting::TYPE_NAME).then(StrategyType::of::<Counting>)
    }
}

fn catalog() -> StrategyCatalog {
    StrategyCatalog::new()
        .register::<Counting>()
        .register_abstract("acme.Abstract")
        .register_with("acme.Broken", || Err("constructor exploded".into()))
}

/// Strategy whose `init` calls are counted per constructed catalog entry.
#[derive(Debug)]
struct Tracked {
    calls: Arc<AtomicUsize>,
    params: InitParams,
}

impl FlippingStrategy for Tracked {
    fn type_name(&self) -> &str {
        "acme.Tracked"
    }

    fn init(&mut self, _uid: &str, params: &InitParams) -> Result<(), DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.params = params.clone();
        Ok(())
    }

    fn init_params(&self) -> &InitParams {
        &self.params
    }

    fn evaluate(&self, _uid: &str, _context: &FlippingContext) -> bool {
        true
    }
}

#[test]
fn init_runs_exactly_once_with_given_params() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let loader = StrategyLoader::new(StrategyCatalog::new().register_with("acme.Tracked", move || {
        Ok(Box::new(Tracked { calls: Arc::clone(&counter), params: InitParams::new() })
            as Box<dyn FlippingStrategy>)
    }));
    let params = InitParams::from([("weight".to_owned(), "0.3".to_owned())]);

    let strategy = loader.resolve_and_init("acme.Tracked", "F1", &params).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(strategy.init_params(), &params);
    assert_eq!(strategy.to_ref().class_type, "acme.Tracked");

    loader.resolve_and_init("acme.Tracked", "F2", &params).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn failures_are_distinguishable() {
    let loader = StrategyLoader::with_allowed_namespaces(
        catalog().register_with("other.Thing", || Ok(Box::new(Counting::default()) as Box<dyn FlippingStrategy>)),
        ["acme."],
    );
    let params = InitParams::new();

    let missing = loader.resolve_and_init("acme.Missing", "F1", &params).unwrap_err();
    assert!(matches!(missing, StrategyError::TypeNotFound { .. }));
    assert!(missing.to_string().contains("acme.Missing"));

    let abstract_type = loader.resolve_and_init("acme.Abstract", "F1", &params).unwrap_err();
    assert!(matches!(abstract_type, StrategyError::NotConstructible { .. }));

    let broken = loader.resolve_and_init("acme.Broken", "F1", &params).unwrap_err();
    assert!(matches!(broken, StrategyError::NotConstructible { .. }));
    assert!(broken.to_string().contains("constructor exploded"));

    let denied = loader.resolve_and_init("other.Thing", "F1", &params).unwrap_err();
    assert!(matches!(denied, StrategyError::AccessDenied { .. }));
    assert_eq!(denied.type_name(), "other.Thing");
}

#[test]
fn init_errors_surface_as_not_constructible() {
    let loader = StrategyLoader::new(catalog());
    let params = InitParams::from([("fail".to_owned(), "yes".to_owned())]);

    let err = loader.resolve_and_init("acme.Counting", "F1", &params).unwrap_err();
    match err {
        StrategyError::NotConstructible { source, .. } => {
            assert!(matches!(source, Some(DomainError::InvalidParameter { .. })));
        },
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn concurrent_first_use_resolves_once() {
    let resolver = Arc::new(CountingResolver::default());
    let loader = StrategyLoader::new(Arc::clone(&resolver));

    std::thread::scope(|scope| {
        for i in 0..8 {
            let loader = loader.clone();
            scope.spawn(move || {
                loader
                    .resolve_and_init("acme.Counting", &format!("F{i}"), &InitParams::new())
                    .expect("strategy builds");
            });
        }
    });

    assert_eq!(resolver.lookups.load(Ordering::SeqCst), 1);
    assert_eq!(loader.cached(), 1);
}
