use crate::config::SourceConfig;
use crate::error::BingDailyError;

/// Marker that precedes the relative path of the image of the day in the
/// raw page markup.
const IMG_MARKER: &str = "az/hprichbg";

/// Fetches the daily image page and extracts the host-relative path of
/// today's image.
pub struct PageFetcher {
    client: reqwest::Client,
    source: SourceConfig,
}

impl PageFetcher {
    pub fn new(client: reqwest::Client, source: SourceConfig) -> Self {
        Self { client, source }
    }

    /// Retrieves the path of today's image, or `None` when the page does
    /// not reference one. A missing marker is a valid terminal outcome,
    /// not an error; only transport failures are.
    pub async fn fetch_image_path(&self) -> Result<Option<String>, BingDailyError> {
        let url = self.page_url();
        tracing::debug!(url = %url, "Fetching daily image page");

        let mut request = self.client.get(&url);
        for (name, value) in &self.source.headers {
            request = request.header(name, value);
        }

        let html = request.send().await?.error_for_status()?.text().await?;
        tracing::debug!(bytes = html.len(), "Buffered page markup");

        Ok(extract_image_path(&html))
    }

    fn page_url(&self) -> String {
        format!(
            "{}://{}{}",
            self.source.protocol, self.source.host, self.source.page_path
        )
    }
}

/// Scans the page markup for the image marker and returns the relative
/// path it introduces, prefixed with `/`. The path ends at the next `"`;
/// a document that ends before the closing quote yields the remainder of
/// the document.
fn extract_image_path(html: &str) -> Option<String> {
    let start = html.find(IMG_MARKER)?;

    let rest = &html[start..];
    let path = match rest.find('"') {
        Some(end) => &rest[..end],
        None => rest,
    };

    Some(format!("/{path}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_path_between_marker_and_quote() {
        let html = r#"<div style="background: url('az/hprichbg1,WatermarkedImage_1920x1080.jpg" id="bg">"#;

        assert_eq!(
            extract_image_path(html).as_deref(),
            Some("/az/hprichbg1,WatermarkedImage_1920x1080.jpg")
        );
    }

    #[test]
    fn uses_first_marker_occurrence() {
        let html = r#"az/hprichbg/first.jpg" ... az/hprichbg/second.jpg""#;

        assert_eq!(
            extract_image_path(html).as_deref(),
            Some("/az/hprichbg/first.jpg")
        );
    }

    #[test]
    fn missing_marker_is_none() {
        assert_eq!(extract_image_path("<html><body>no image</body></html>"), None);
    }

    #[test]
    fn missing_closing_quote_runs_to_end_of_document() {
        let html = "prefix az/hprichbg/unterminated.jpg";

        assert_eq!(
            extract_image_path(html).as_deref(),
            Some("/az/hprichbg/unterminated.jpg")
        );
    }

    #[test]
    fn extracted_path_starts_with_slash() {
        let html = r#"az/hprichbg/img.jpg""#;

        let path = extract_image_path(html).unwrap();
        assert!(path.starts_with('/'));
    }
}
