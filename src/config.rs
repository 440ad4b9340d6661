use std::env;
use std::time::Duration;

/// Simulated latencies. Cosmetic only; nothing waits on real work.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timings {
    pub greeting_delay: Duration,
    pub typing_delay: Duration,
    pub quick_action_delay: Duration,
    pub booking_latency: Duration,
    pub signin_latency: Duration,
    pub signup_latency: Duration,
    pub social_latency: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            greeting_delay: Duration::from_millis(1000),
            typing_delay: Duration::from_millis(800),
            quick_action_delay: Duration::from_millis(300),
            booking_latency: Duration::from_millis(2000),
            signin_latency: Duration::from_millis(800),
            signup_latency: Duration::from_millis(1000),
            social_latency: Duration::from_millis(1000),
        }
    }
}

impl Timings {
    pub fn instant() -> Self {
        Self {
            greeting_delay: Duration::ZERO,
            typing_delay: Duration::ZERO,
            quick_action_delay: Duration::ZERO,
            booking_latency: Duration::ZERO,
            signin_latency: Duration::ZERO,
            signup_latency: Duration::ZERO,
            social_latency: Duration::ZERO,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub static_dir: String,
    pub session_ttl: Duration,
    pub purge_interval: Duration,
    pub timings: Timings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            static_dir: "public".to_string(),
            session_ttl: Duration::from_secs(1800),
            purge_interval: Duration::from_secs(60),
            timings: Timings::default(),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

fn env_millis(key: &str, default: Duration) -> Duration {
    env_parse(key).map(Duration::from_millis).unwrap_or(default)
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let t = defaults.timings;
        Self {
            port: env_parse("PORT").unwrap_or(defaults.port),
            static_dir: env::var("STATIC_DIR").unwrap_or(defaults.static_dir),
            session_ttl: env_parse("SESSION_TTL_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.session_ttl),
            purge_interval: env_parse("PURGE_INTERVAL_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.purge_interval),
            timings: Timings {
                greeting_delay: env_millis("GREETING_DELAY_MS", t.greeting_delay),
                typing_delay: env_millis("TYPING_DELAY_MS", t.typing_delay),
                quick_action_delay: env_millis("QUICK_ACTION_DELAY_MS", t.quick_action_delay),
                booking_latency: env_millis("BOOKING_LATENCY_MS", t.booking_latency),
                signin_latency: env_millis("SIGNIN_LATENCY_MS", t.signin_latency),
                signup_latency: env_millis("SIGNUP_LATENCY_MS", t.signup_latency),
                social_latency: env_millis("SOCIAL_LATENCY_MS", t.social_latency),
            },
        }
    }
}
