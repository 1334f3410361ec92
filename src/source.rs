use std::{fmt, path::PathBuf, str::FromStr};

use reqwest::Url;

/// Where a sidebar script is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    Path(PathBuf),
    Url(Url),
}

impl FromStr for Source {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(Source::Stdin)
        } else if s.starts_with("http://") || s.starts_with("https://") {
            Ok(Source::Url(Url::parse(s)?))
        } else if s.is_empty() {
            anyhow::bail!("empty source")
        } else {
            Ok(Source::Path(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Stdin => f.write_str("<stdin>"),
            Source::Path(path) => write!(f, "{}", path.display()),
            Source::Url(url) => write!(f, "{}", url),
        }
    }
}

const READABLE_KEY_LEN: usize = 96;

/// File name a downloaded script is cached under.
///
/// A readable prefix from host, port and path, followed by a hash of the full
/// URL so that distinct URLs never share a file.
pub fn cache_key(url: &Url) -> String {
    let mut readable = url.host_str().unwrap_or("localhost").to_string();
    if let Some(port) = url.port_or_known_default() {
        readable.push_str(&format!("_{}", port));
    }
    readable.push_str(url.path());
    let readable = readable
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '.' | '-' | '_' => c,
            _ => '_',
        })
        .take(READABLE_KEY_LEN)
        .collect::<String>();
    let digest = xxhash_rust::xxh64::xxh64(url.as_str().as_bytes(), 0);
    format!("{}-{:016x}", readable, digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_each_kind() {
        assert_eq!("-".parse::<Source>().unwrap(), Source::Stdin);
        assert_eq!(
            "doc/dynasmrt/sidebar-items.js".parse::<Source>().unwrap(),
            Source::Path(PathBuf::from("doc/dynasmrt/sidebar-items.js"))
        );
        assert!(matches!(
            "https://docs.rs/dynasmrt/latest/dynasmrt/sidebar-items.js".parse::<Source>(),
            Ok(Source::Url(_))
        ));
        assert!("".parse::<Source>().is_err());
        assert!("https://".parse::<Source>().is_err());
    }

    fn key(url: &str) -> String {
        cache_key(&Url::parse(url).unwrap())
    }

    #[test]
    fn cache_keys_are_flat_file_names() {
        let key = key("https://docs.rs/dynasmrt/1.2.3/dynasmrt/sidebar-items.js?v=2");
        assert!(key.starts_with("docs.rs_443_dynasmrt_1.2.3_dynasmrt_sidebar-items.js-"));
        assert!(!key.contains('/'));
    }

    #[test]
    fn distinct_urls_get_distinct_cache_keys() {
        assert_ne!(
            key("https://docs.rs/x_y/sidebar-items.js"),
            key("https://docs.rs/x/y/sidebar-items.js")
        );
        assert_ne!(
            key("http://localhost:8000/sidebar-items.js"),
            key("http://localhost:9000/sidebar-items.js")
        );
        assert_ne!(
            key("https://docs.rs/dynasmrt/sidebar-items.js?v=1"),
            key("https://docs.rs/dynasmrt/sidebar-items.js?v=2")
        );
        assert_eq!(
            key("https://docs.rs/dynasmrt/sidebar-items.js"),
            key("https://docs.rs/dynasmrt/sidebar-items.js")
        );
    }

    #[test]
    fn deep_urls_are_capped() {
        let deep = format!("https://docs.rs/{}sidebar-items.js", "module/".repeat(200));
        assert!(key(&deep).len() <= READABLE_KEY_LEN + 17);
    }
}
