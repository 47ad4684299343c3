use std::sync::Arc;

use axum::{
    extract, http::HeaderMap, middleware::Next, response::IntoResponse, Json,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Link {
    #[serde(rename = "rel")]
    pub relation: String,

    #[serde(rename = "href")]
    pub hypertext_reference: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Response<T> {
    #[serde(flatten)]
    pub content: T,
    pub links: Vec<Link>,
}

impl<T> Response<T> {
    pub fn new(content: T) -> Self {
        Self {
            content,
            links: vec![],
        }
    }

    pub fn builder(content: T, base_url: Arc<BaseUrl>) -> ResponseBuilder<T> {
        ResponseBuilder::new(content, base_url)
    }

    pub fn json(self) -> Json<Self> {
        Json(self)
    }
}

pub struct ResponseBuilder<T> {
    pub response: Response<T>,
    pub base_url: Arc<BaseUrl>,
}

impl<T> ResponseBuilder<T> {
    pub fn new(content: T, base_url: Arc<BaseUrl>) -> Self {
        Self {
            response: Response::new(content),
            base_url,
        }
    }

    pub fn link<R, H>(self, relation: R, hypertext_reference: H) -> Self
    where
        R: Into<String>,
        H: Into<String>,
    {
        let url = self.base_url.full_url(hypertext_reference);
        self.link_extern(relation, url)
    }

    pub fn link_option<R, H>(
        self,
        relation: R,
        hypertext_reference: Option<H>,
    ) -> Self
    where
        R: Into<String>,
        H: Into<String>,
    {
        let url = hypertext_reference.map(|path| self.base_url.full_url(path));
        self.link_extern_option(relation, url)
    }

    pub fn link_extern<R, H>(mut self, relation: R, hypertext_reference: H) -> Self
    where
        R: Into<String>,
        H: Into<String>,
    {
        self.response.links.push(Link {
            relation: relation.into(),
            hypertext_reference: hypertext_reference.into(),
        });
        self
    }

    pub fn link_extern_option<R, H>(
        self,
        relation: R,
        hypertext_reference: Option<H>,
    ) -> Self
    where
        R: Into<String>,
        H: Into<String>,
    {
        if let Some(href) = hypertext_reference {
            self.link_extern(relation, href)
        } else {
            self
        }
    }

    pub fn build(self) -> Response<T> {
        self.response
    }
}

/// Scheme, host and prefix the service is reachable under, taken from the
/// `X-Forwarded-*` headers a reverse proxy sets.
#[derive(Debug, Clone)]
pub struct BaseUrl {
    proto: String,
    host: String,
    prefix: String,
}

impl BaseUrl {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let proto = headers
            .get("x-forwarded-proto")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("http")
            .to_string();

        let host = headers
            .get("x-forwarded-host")
            .and_then(|v| v.to_str().ok())
            .or_else(|| headers.get("host").and_then(|v| v.to_str().ok()))
            .unwrap_or("localhost")
            .to_string();

        let prefix = headers
            .get("x-forwarded-prefix")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        BaseUrl {
            proto,
            host,
            prefix,
        }
    }

    pub fn full_url<S: Into<String>>(&self, path: S) -> String {
        format!(
            "{}://{}{}{}",
            self.proto,
            self.host,
            self.prefix,
            path.into()
        )
    }
}

pub async fn base_url_middleware(req: extract::Request, next: Next) -> impl IntoResponse {
    let headers = req.headers().clone();
    let base_url = BaseUrl::from_headers(&headers);

    let mut req = req;
    req.extensions_mut().insert(Arc::new(base_url));

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_defaults_to_localhost() {
        let base_url = BaseUrl::from_headers(&HeaderMap::new());
        assert_eq!(base_url.full_url("/api/v1"), "http://localhost/api/v1");
    }

    #[test]
    fn base_url_honors_forwarded_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-proto", "https".parse().unwrap());
        headers.insert("x-forwarded-host", "wifi.example.org".parse().unwrap());
        headers.insert("x-forwarded-prefix", "/wifi".parse().unwrap());

        let base_url = BaseUrl::from_headers(&headers);

        assert_eq!(
            base_url.full_url("/api/v1/access-points"),
            "https://wifi.example.org/wifi/api/v1/access-points"
        );
    }

    #[test]
    fn builder_resolves_links_against_the_base_url() {
        let base_url = Arc::new(BaseUrl::from_headers(&HeaderMap::new()));

        let response = Response::builder((), base_url)
            .link("self", "/api/v1/access-points/7")
            .link_option("nearby", None::<String>)
            .build();

        assert_eq!(response.links.len(), 1);
        assert_eq!(response.links[0].relation, "self");
        assert_eq!(
            response.links[0].hypertext_reference,
            "http://localhost/api/v1/access-points/7"
        );
    }
}
