//! Renders structured log events as single-line Logstash/GELF-style JSON
//! documents (`@message`, `@full_message`, `@timestamp`, `@source_host`,
//! `@fields`), ready to be shipped to a log aggregator by the host
//! logging framework.

pub mod event;
pub mod config;
pub mod environment;
pub mod system_env;
pub mod static_env;
pub mod record;
pub mod layout;

#[cfg(feature = "subscriber")]
pub mod fmt;

#[cfg(feature = "subscriber")]
pub mod init;
