// Passive page inspection used by the audit command

use crate::error::Result;
use crate::fetcher::PageFetcher;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageInspection {
    pub url: String,
    pub has_login_field: bool,
    pub has_interactive_form: bool,
    /// Response body size in bytes
    pub size: usize,
}

fn has_match(document: &Html, selector: &str) -> bool {
    Selector::parse(selector)
        .map(|selector| document.select(&selector).next().is_some())
        .unwrap_or(false)
}

/// Look for a password input, and for any form or free-text input.
pub fn inspect_html(url: &str, body: &[u8]) -> PageInspection {
    let document = Html::parse_document(&String::from_utf8_lossy(body));

    let has_login_field = has_match(&document, r#"input[type="password" i]"#);
    let has_interactive_form =
        has_match(&document, "form") || has_match(&document, r#"input[type="text" i]"#);

    PageInspection {
        url: url.to_string(),
        has_login_field,
        has_interactive_form,
        size: body.len(),
    }
}

/// Fetch `url` and inspect whatever it serves, whatever the status.
pub async fn inspect_page(fetcher: &PageFetcher, url: &Url) -> Result<PageInspection> {
    let page = fetcher.fetch(url).await?;
    Ok(inspect_html(url.as_str(), &page.body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    #[test]
    fn test_login_page() {
        let html = br#"<form action="/login">
            <input type="text" name="user">
            <input type="password" name="pass">
        </form>"#;
        let inspection = inspect_html("http://a.com/login", html);

        assert!(inspection.has_login_field);
        assert!(inspection.has_interactive_form);
        assert_eq!(inspection.size, html.len());
    }

    #[test]
    fn test_text_input_without_form_is_interactive() {
        let inspection = inspect_html("http://a.com/", br#"<input type="TEXT" name="q">"#);

        assert!(!inspection.has_login_field);
        assert!(inspection.has_interactive_form);
    }

    #[test]
    fn test_static_page() {
        let inspection = inspect_html(
            "http://a.com/about",
            br#"<p>About us</p><input type="checkbox">"#,
        );

        assert!(!inspection.has_login_field);
        assert!(!inspection.has_interactive_form);
    }

    #[tokio::test]
    async fn test_inspect_page_over_http() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/signin"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"<input type="password">"#),
            )
            .mount(&mock_server)
            .await;

        let fetcher = PageFetcher::new().unwrap();
        let url = Url::parse(&format!("{}/signin", mock_server.uri())).unwrap();
        let inspection = inspect_page(&fetcher, &url).await.unwrap();

        assert!(inspection.has_login_field);
        assert_eq!(inspection.size, 23);
    }
}
