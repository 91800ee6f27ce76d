//! Contador de visitas por sesión.
//!
//! Una visita cuenta como nueva cuando ha pasado al menos un día completo
//! desde la última registrada. La transición es una función pura de
//! `(ahora, estado previo)`; `visitor_cookie_handler` solo la conecta con la
//! sesión.

use chrono::{DateTime, SecondsFormat, Utc};

use super::session::Session;

pub const VISITS_KEY: &str = "visits";
pub const LAST_VISIT_KEY: &str = "last_visit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitState {
    pub visits: u64,
    pub last_visit: DateTime<Utc>,
}

impl VisitState {
    /// Reconstruye el estado a partir de los valores de la sesión. Valores
    /// ausentes o ilegibles toman el valor por defecto (1 visita, ahora).
    pub fn from_session_values(
        visits: Option<&str>,
        last_visit: Option<&str>,
        now: DateTime<Utc>,
    ) -> Self {
        let visits = visits
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(1);
        let last_visit = last_visit.and_then(parse_timestamp).unwrap_or(now);

        Self { visits, last_visit }
    }

    pub fn advance(self, now: DateTime<Utc>) -> Self {
        if (now - self.last_visit).num_days() > 0 {
            Self {
                visits: self.visits + 1,
                last_visit: now,
            }
        } else {
            self
        }
    }
}

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

/// Actualiza `visits` y `last_visit` en la sesión y devuelve el contador.
pub fn visitor_cookie_handler(session: &Session, now: DateTime<Utc>) -> u64 {
    let state = VisitState::from_session_values(
        session.get(VISITS_KEY).as_deref(),
        session.get(LAST_VISIT_KEY).as_deref(),
        now,
    )
    .advance(now);

    session.insert(VISITS_KEY, state.visits.to_string());
    session.insert(LAST_VISIT_KEY, format_timestamp(state.last_visit));

    state.visits
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn fresh_session_starts_at_one_visit_now() {
        let session = Session::default();
        let visits = visitor_cookie_handler(&session, noon());

        assert_eq!(visits, 1);
        assert_eq!(session.get(VISITS_KEY).as_deref(), Some("1"));
        assert_eq!(
            session.get(LAST_VISIT_KEY).as_deref().and_then(parse_timestamp),
            Some(noon())
        );
    }

    #[test]
    fn same_day_visits_do_not_count() {
        let session = Session::default();
        visitor_cookie_handler(&session, noon());
        visitor_cookie_handler(&session, noon() + Duration::hours(5));
        let visits = visitor_cookie_handler(&session, noon() + Duration::hours(23));

        assert_eq!(visits, 1);
        assert_eq!(
            session.get(LAST_VISIT_KEY).as_deref().and_then(parse_timestamp),
            Some(noon())
        );
    }

    #[test]
    fn visit_after_a_day_increments_once() {
        let prior = VisitState {
            visits: 4,
            last_visit: noon() - Duration::days(3),
        };
        let next = prior.advance(noon());

        assert_eq!(next.visits, 5);
        assert_eq!(next.last_visit, noon());
        // Una segunda petición inmediata ya no suma
        assert_eq!(next.advance(noon() + Duration::seconds(1)), next);
    }

    #[test]
    fn exactly_one_day_counts_as_new() {
        let prior = VisitState {
            visits: 1,
            last_visit: noon(),
        };
        assert_eq!(prior.advance(noon() + Duration::days(1)).visits, 2);
        assert_eq!(
            prior
                .advance(noon() + Duration::days(1) - Duration::seconds(1))
                .visits,
            1
        );
    }

    #[test]
    fn garbage_values_fall_back_to_defaults() {
        let state = VisitState::from_session_values(Some("lots"), Some("2024-03-10 12:00"), noon());
        assert_eq!(
            state,
            VisitState {
                visits: 1,
                last_visit: noon()
            }
        );
    }

    #[test]
    fn timestamps_of_any_precision_parse() {
        for raw in [
            "2024-03-10T12:00:00Z",
            "2024-03-10T12:00:00.5Z",
            "2024-03-10T12:00:00.000000Z",
            "2024-03-10T13:00:00.000000001+01:00",
        ] {
            let parsed = parse_timestamp(raw).unwrap();
            assert_eq!(parsed.timestamp(), noon().timestamp(), "{raw}");
        }
        assert_eq!(format_timestamp(noon()), "2024-03-10T12:00:00.000000Z");
    }

    #[test]
    fn future_last_visit_is_left_alone() {
        let prior = VisitState {
            visits: 2,
            last_visit: noon() + Duration::days(2),
        };
        assert_eq!(prior.advance(noon()), prior);
    }
}
