use serde::Deserialize;

/// Top-level configuration settings for the application.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct Settings {
    pub broker: BrokerSettings,
    pub logging: LoggingSettings,
}

/// Configuration settings for the broker.
///
/// Controls the input queue bound, the backpressure window applied to
/// submitters, and the queue size handed to newly joined users.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct BrokerSettings {
    pub input_capacity: usize,
    pub submit_timeout_ms: u64,
    pub outbox_capacity: usize,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for BrokerSettings {
    fn default() -> Self {
        Self {
            input_capacity: 100,
            submit_timeout_ms: 1000,
            outbox_capacity: 32,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Partial configuration settings loaded from files or environment.
///
/// Allows partial specification of settings. Missing values can be filled using defaults.
#[derive(Debug, Deserialize, Default)]
pub struct PartialSettings {
    pub broker: Option<PartialBrokerSettings>,
    pub logging: Option<PartialLoggingSettings>,
}

#[derive(Debug, Deserialize, Default)]
pub struct PartialBrokerSettings {
    pub input_capacity: Option<usize>,
    pub submit_timeout_ms: Option<u64>,
    pub outbox_capacity: Option<usize>,
}

#[derive(Debug, Deserialize, Default)]
pub struct PartialLoggingSettings {
    pub level: Option<String>,
}

impl PartialSettings {
    /// Fills every value missing here from `default`.
    pub fn merge_onto(self, default: Settings) -> Settings {
        let broker = self.broker.unwrap_or_default();
        let logging = self.logging.unwrap_or_default();

        Settings {
            broker: BrokerSettings {
                input_capacity: broker
                    .input_capacity
                    .unwrap_or(default.broker.input_capacity),
                submit_timeout_ms: broker
                    .submit_timeout_ms
                    .unwrap_or(default.broker.submit_timeout_ms),
                outbox_capacity: broker
                    .outbox_capacity
                    .unwrap_or(default.broker.outbox_capacity),
            },
            logging: LoggingSettings {
                level: logging.level.unwrap_or(default.logging.level),
            },
        }
    }
}
