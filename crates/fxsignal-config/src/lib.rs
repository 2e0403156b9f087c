//! Configuration management.

mod settings;

pub use settings::{
    InstrumentSetting, LoggingSettings, PollSettings, ProviderSettings, ServerSettings, Settings,
};
