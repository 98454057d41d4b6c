//! Build-time application metadata generated by `build.rs`.

include!(concat!(env!("OUT_DIR"), "/app_metadata.rs"));

/// Package name baked in at build time.
pub fn name() -> &'static str {
    APP_METADATA_NAME
}

pub fn version() -> &'static str {
    APP_METADATA_VERSION
}

/// Address the client talks to when neither the config file nor the
/// environment name one.
pub fn default_api_url() -> &'static str {
    APP_METADATA_DEFAULT_API_URL
}

/// `User-Agent` header value sent by the HTTP client, e.g. `tudu/0.1.0`.
pub fn user_agent() -> String {
    format!("{}/{}", APP_METADATA_NAME, APP_METADATA_VERSION)
}
