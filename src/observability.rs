use biometrics::{Collector, Counter};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("verdict.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("verdict.client.request_errors");

pub(crate) static REGISTRATIONS: Counter = Counter::new("verdict.auth.registrations");
pub(crate) static LOGINS: Counter = Counter::new("verdict.auth.logins");
pub(crate) static VERIFY_FAILURES: Counter = Counter::new("verdict.auth.verify_failures");

pub(crate) static TOKEN_SAVE_FAILURES: Counter = Counter::new("verdict.token.save_failures");
pub(crate) static TOKEN_DECODE_FAILURES: Counter = Counter::new("verdict.token.decode_failures");
pub(crate) static EXPIRED_TOKENS_CLEARED: Counter = Counter::new("verdict.token.expired_cleared");

pub(crate) static CHAT_TURNS: Counter = Counter::new("verdict.chat.turns");
pub(crate) static CHAT_FALLBACKS: Counter = Counter::new("verdict.chat.fallbacks");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);

    collector.register_counter(&REGISTRATIONS);
    collector.register_counter(&LOGINS);
    collector.register_counter(&VERIFY_FAILURES);

    collector.register_counter(&TOKEN_SAVE_FAILURES);
    collector.register_counter(&TOKEN_DECODE_FAILURES);
    collector.register_counter(&EXPIRED_TOKENS_CLEARED);

    collector.register_counter(&CHAT_TURNS);
    collector.register_counter(&CHAT_FALLBACKS);
}
