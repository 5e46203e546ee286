/// Name used in the product identifier and the configuration prefix
pub const PRODUCT_NAME: &str = "Almanac";
pub const PRODUCT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default `PRODID` written on every serialized calendar
pub const PRODUCT_IDENTIFIER: &str =
    const_str::concat!("-//", PRODUCT_NAME, "//", PRODUCT_VERSION, "//EN");

/// The only iCalendar version this implementation speaks
pub const ICALENDAR_VERSION: &str = "2.0";

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "ALMANAC";

/// Optional configuration file, resolved relative to the working directory
pub const CONFIG_FILE: &str = "almanac.toml";
