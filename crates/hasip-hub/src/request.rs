use crate::config::HubConfig;
use reqwest::RequestBuilder;

/// Applies the hub's auth headers to a request.
///
/// Header values are not validated here; an unusable token surfaces as a
/// builder error when the request is sent.
pub(crate) fn with_auth(builder: RequestBuilder, config: &HubConfig) -> RequestBuilder {
    config
        .headers()
        .into_iter()
        .fold(builder, |builder, (name, value)| builder.header(name, value))
}
