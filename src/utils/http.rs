use reqwest::header::{CONNECTION, HeaderMap, HeaderValue};
use std::time::Duration;
use url::Url;

pub(crate) const USER_AGENT: &str = concat!("mrscribe/", env!("CARGO_PKG_VERSION"));

/// Transport knobs shared by every outbound client.
#[derive(Debug, Clone)]
pub(crate) struct ClientOptions {
    pub proxy: Option<Url>,
    pub enable_multiplexing: bool,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

pub(crate) fn build_client(opts: &ClientOptions) -> Result<reqwest::Client, reqwest::Error> {
    let mut headers = HeaderMap::new();

    let mut builder = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::none())
        .connect_timeout(opts.connect_timeout)
        .timeout(opts.request_timeout);

    if let Some(proxy_url) = &opts.proxy {
        builder = builder.proxy(reqwest::Proxy::all(proxy_url.as_str())?);
    }

    if opts.enable_multiplexing {
        builder = builder.http2_adaptive_window(true);
    } else {
        headers.insert(CONNECTION, HeaderValue::from_static("close"));

        builder = builder
            .http1_only()
            .pool_max_idle_per_host(0)
            .pool_idle_timeout(Duration::from_secs(0));
    }

    builder.default_headers(headers).build()
}

/// Appends path segments to `base`, keeping whatever path it already has.
///
/// `https://openrouter.ai/api/v1` + `["chat", "completions"]` gives
/// `https://openrouter.ai/api/v1/chat/completions`.
pub(crate) fn append_path(base: &Url, segments: &[&str]) -> Result<Url, crate::ScribeError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| crate::ScribeError::UnexpectedError(format!("URL cannot be a base: {base}")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_path_keeps_existing_prefix() {
        let base = Url::parse("https://openrouter.ai/api/v1").expect("url");
        let url = append_path(&base, &["chat", "completions"]).expect("append");
        assert_eq!(url.as_str(), "https://openrouter.ai/api/v1/chat/completions");

        let base = Url::parse("https://gitlab.example.com/").expect("url");
        let url = append_path(&base, &["api", "v4", "projects", "42"]).expect("append");
        assert_eq!(url.as_str(), "https://gitlab.example.com/api/v4/projects/42");
    }

    #[test]
    fn append_path_escapes_segments() {
        let base = Url::parse("http://127.0.0.1:9000").expect("url");
        let url = append_path(&base, &["projects", "group/sub"]).expect("append");
        assert_eq!(url.as_str(), "http://127.0.0.1:9000/projects/group%2Fsub");
    }

    #[test]
    fn client_builds_with_and_without_multiplexing() {
        let mut opts = ClientOptions {
            proxy: None,
            enable_multiplexing: false,
            connect_timeout: Duration::from_secs(1),
            request_timeout: Duration::from_secs(5),
        };
        assert!(build_client(&opts).is_ok());

        opts.enable_multiplexing = true;
        opts.proxy = Some(Url::parse("http://127.0.0.1:1080").expect("url"));
        assert!(build_client(&opts).is_ok());
    }
}
