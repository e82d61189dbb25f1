use reqwest::Url;
use serde::{de::Visitor, Deserialize, Deserializer};

/// Root url of the newsletter subscription service, e.g. `http://localhost:8081/`.
#[derive(Debug, Clone)]
pub struct ServiceBaseUrl(Url);

impl AsRef<Url> for ServiceBaseUrl {
    fn as_ref(&self) -> &Url {
        &self.0
    }
}

impl<'de> Deserialize<'de> for ServiceBaseUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ServiceBaseUrlVisitor;

        impl<'de> Visitor<'de> for ServiceBaseUrlVisitor {
            type Value = ServiceBaseUrl;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a valid service base url string")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                ServiceBaseUrl::parse(value).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(ServiceBaseUrlVisitor)
    }
}

impl ServiceBaseUrl {
    pub fn parse(url: &str) -> Result<Self, String> {
        let url = Url::parse(url).map_err(|e| e.to_string())?;
        if url.cannot_be_a_base() {
            return Err(format!("{url} cannot be used as a base url."));
        }
        if !url.path().eq("/") {
            return Err(format!("expected base url. found: {url}"));
        }
        Ok(Self(url))
    }

    pub fn join(&self, path: &str) -> Result<Url, String> {
        self.0.join(path).map_err(|e| e.to_string())
    }
}
