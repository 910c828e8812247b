use super::{NOW, RELEASE_DATE};
use chrono::{NaiveDateTime, Utc};
use flip_domain::{DomainError, FlippingContext, FlippingStrategy, InitParams, NamedStrategy};

const RELEASE_DATE_PARAM: &str = "releaseDate";
/// `yyyy-MM-dd-HH:mm`, e.g. `2026-11-01-09:30`.
const DATE_FORMAT: &str = "%Y-%m-%d-%H:%M";

/// Activates a feature once the release date (UTC) is reached.
///
/// The clock can be pinned per call with the `now` context value, using the same format.
#[derive(Debug, Default)]
pub struct ReleaseDateFlipStrategy {
    params: InitParams,
    release: Option<NaiveDateTime>,
}

impl ReleaseDateFlipStrategy {
    #[must_use]
    pub const fn release_date(&self) -> Option<NaiveDateTime> {
        self.release
    }
}

impl NamedStrategy for ReleaseDateFlipStrategy {
    const TYPE_NAME: &'static str = RELEASE_DATE;
}

impl FlippingStrategy for ReleaseDateFlipStrategy {
    fn type_name(&self) -> &str {
        Self::TYPE_NAME
    }

    fn init(&mut self, uid: &str, params: &InitParams) -> Result<(), DomainError> {
        let raw = params.get(RELEASE_DATE_PARAM).ok_or_else(|| DomainError::InvalidParameter {
            param: RELEASE_DATE_PARAM.into(),
            message: "parameter is required".into(),
            context: Some(format!("feature '{uid}'").into()),
        })?;

        let release = NaiveDateTime::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|e| {
            DomainError::InvalidParameter {
                param: RELEASE_DATE_PARAM.into(),
                message: format!("'{raw}' does not match {DATE_FORMAT}: {e}").into(),
                context: Some(format!("feature '{uid}'").into()),
            }
        })?;

        self.release = Some(release);
        self.params = params.clone();
        Ok(())
    }

    fn init_params(&self) -> &InitParams {
        &self.params
    }

    fn evaluate(&self, uid: &str, context: &FlippingContext) -> bool {
        let Some(release) = self.release else { return false };

        let now = match context.get(NOW) {
            Some(raw) => match NaiveDateTime::parse_from_str(raw, DATE_FORMAT) {
                Ok(now) => now,
                Err(e) => {
                    tracing::warn!(uid, now = raw, error = %e, "Ignoring malformed clock override");
                    Utc::now().naive_utc()
                },
            },
            None => Utc::now().naive_utc(),
        };

        now >= release
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strategy(date: &str) -> ReleaseDateFlipStrategy {
        let mut strategy = ReleaseDateFlipStrategy::default();
        strategy
            .init("F1", &InitParams::from([(RELEASE_DATE_PARAM.to_owned(), date.to_owned())]))
            .expect("valid release date");
        strategy
    }

    #[test]
    fn active_from_release_minute() {
        let s = strategy("2026-11-01-09:30");
        let expected = NaiveDateTime::parse_from_str("2026-11-01-09:30", DATE_FORMAT).unwrap();
        assert_eq!(s.release_date(), Some(expected));
        let at = |now: &str| s.evaluate("F1", &FlippingContext::new().with(NOW, now));

        assert!(!at("2026-11-01-09:29"));
        assert!(at("2026-11-01-09:30"));
        assert!(at("2027-01-01-00:00"));
    }

    #[test]
    fn past_release_is_active_on_wall_clock() {
        assert!(strategy("2000-01-01-00:00").evaluate("F1", &FlippingContext::new()));
    }

    #[test]
    fn malformed_date_is_rejected() {
        let err = ReleaseDateFlipStrategy::default()
            .init("F1", &InitParams::from([(RELEASE_DATE_PARAM.to_owned(), "tomorrow".to_owned())]))
            .unwrap_err();
        assert!(err.to_string().contains("releaseDate"));
        assert_eq!(ReleaseDateFlipStrategy::default().release_date(), None);
    }
}
