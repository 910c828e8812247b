use super::{CLIENT_FILTER, CLIENT_HOSTNAME, SERVER_FILTER, SERVER_HOSTNAME};
use flip_domain::{DomainError, FlippingContext, FlippingStrategy, InitParams, NamedStrategy};
use std::collections::BTreeSet;

const GRANTED_CLIENTS: &str = "grantedClients";
const GRANTED_SERVERS: &str = "grantedServers";

/// Comma-separated host allow-list shared by the client and server filters.
#[derive(Debug, Default)]
struct HostList {
    params: InitParams,
    hosts: BTreeSet<String>,
}

impl HostList {
    fn init(&mut self, uid: &str, params: &InitParams, key: &'static str) -> Result<(), DomainError> {
        let raw = params.get(key).ok_or_else(|| DomainError::InvalidParameter {
            param: key.into(),
            message: "parameter is required".into(),
            context: Some(format!("feature '{uid}'").into()),
        })?;

        self.hosts =
            raw.split(',').map(str::trim).filter(|h| !h.is_empty()).map(str::to_owned).collect();
        self.params = params.clone();
        Ok(())
    }

    fn grants(&self, context: &FlippingContext, key: &str) -> bool {
        context.get(key).is_some_and(|host| self.hosts.contains(host))
    }
}

/// Active only for callers whose `clientHostName` is listed in `grantedClients`.
#[derive(Debug, Default)]
pub struct ClientFilterStrategy {
    granted: HostList,
}

impl NamedStrategy for ClientFilterStrategy {
    const TYPE_NAME: &'static str = CLIENT_FILTER;
}

impl FlippingStrategy for ClientFilterStrategy {
    fn type_name(&self) -> &str {
        Self::TYPE_NAME
    }

    fn init(&mut self, uid: &str, params: &InitParams) -> Result<(), DomainError> {
        self.granted.init(uid, params, GRANTED_CLIENTS)
    }

    fn init_params(&self) -> &InitParams {
        &self.granted.params
    }

    fn evaluate(&self, _uid: &str, context: &FlippingContext) -> bool {
        self.granted.grants(context, CLIENT_HOSTNAME)
    }
}

/// Active only on servers whose `serverHostName` is listed in `grantedServers`.
#[derive(Debug, Default)]
pub struct ServerFilterStrategy {
    granted: HostList,
}

impl NamedStrategy for ServerFilterStrategy {
    const TYPE_NAME: &'static str = SERVER_FILTER;
}

impl FlippingStrategy for ServerFilterStrategy {
    fn type_name(&self) -> &str {
        Self::TYPE_NAME
    }

    fn init(&mut self, uid: &str, params: &InitParams) -> Result<(), DomainError> {
        self.granted.init(uid, params, GRANTED_SERVERS)
    }

    fn init_params(&self) -> &InitParams {
        &self.granted.params
    }

    fn evaluate(&self, _uid: &str, context: &FlippingContext) -> bool {
        self.granted.grants(context, SERVER_HOSTNAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(key: &str, value: &str) -> InitParams {
        InitParams::from([(key.to_owned(), value.to_owned())])
    }

    #[test]
    fn client_filter_matches_listed_hosts() {
        let mut strategy = ClientFilterStrategy::default();
        strategy.init("F1", &params(GRANTED_CLIENTS, "pc1, pc2,,")).unwrap();

        assert!(strategy.evaluate("F1", &FlippingContext::new().with(CLIENT_HOSTNAME, "pc2")));
        assert!(!strategy.evaluate("F1", &FlippingContext::new().with(CLIENT_HOSTNAME, "pc3")));
        assert!(!strategy.evaluate("F1", &FlippingContext::new()));
    }

    #[test]
    fn server_filter_reads_its_own_keys() {
        let mut strategy = ServerFilterStrategy::default();
        strategy.init("F1", &params(GRANTED_SERVERS, "srv1")).unwrap();

        assert!(strategy.evaluate("F1", &FlippingContext::new().with(SERVER_HOSTNAME, "srv1")));
        assert!(!strategy.evaluate("F1", &FlippingContext::new().with(CLIENT_HOSTNAME, "srv1")));
    }

    #[test]
    fn missing_parameter_is_rejected() {
        let err = ClientFilterStrategy::default().init("F1", &InitParams::new()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidParameter { .. }));
    }

    #[test]
    fn init_params_are_kept_verbatim() {
        let raw = params(GRANTED_CLIENTS, "pc1, pc2");
        let mut strategy = ClientFilterStrategy::default();
        strategy.init("F1", &raw).unwrap();
        assert_eq!(strategy.init_params(), &raw);
    }
}
