#[cfg(test)]
mod tests {
    use crate::fetcher::{Fetcher, FetcherConfig};
    use crate::link_scraper::{
        build_extension_filter, run_scrape, scrape_page, PaginationMode, ScrapeParams,
    };

    fn fetcher() -> Fetcher {
        Fetcher::new(FetcherConfig::default()).expect("Failed to build fetcher")
    }

    fn params(url: String, mode: PaginationMode) -> ScrapeParams {
        ScrapeParams {
            url: url.clone(),
            mode,
            filter: None,
            url_pattern: url,
            page_range: "1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_scrape_page_against_mock_server() {
        let mut server = mockito::Server::new_async().await;
        let _page = server
            .mock("GET", "/docs/")
            .with_status(200)
            .with_header("content-type", "text/html; charset=utf-8")
            .with_body(
                r#"<html><body>
                    <a href="guide.pdf"> User guide </a>
                    <a href="guide.pdf">Duplicate</a>
                    <a href="/data/export.CSV">Export</a>
                    <a href="next.html">Next</a>
                </body></html>"#,
            )
            .create_async()
            .await;

        let url = format!("{}/docs/", server.url());
        let links = scrape_page(&fetcher(), &url, None).await.unwrap();

        assert_eq!(links.len(), 2);
        assert_eq!(links[0].url, format!("{}/docs/guide.pdf", server.url()));
        assert_eq!(links[0].text, "User guide");
        assert_eq!(links[1].url, format!("{}/data/export.CSV", server.url()));
        assert_eq!(links[1].extension, "csv");
    }

    #[tokio::test]
    async fn test_single_mode_propagates_fetch_failure() {
        let mut server = mockito::Server::new_async().await;
        let _page = server
            .mock("GET", "/gone")
            .with_status(500)
            .create_async()
            .await;

        let url = format!("{}/gone", server.url());
        let err = run_scrape(&fetcher(), &params(url.clone(), PaginationMode::Single))
            .await
            .unwrap_err();

        let message = format!("{:#}", err);
        assert!(message.starts_with(&format!("Error scraping {}", url)));
        assert!(message.contains("HTTP 500"));
    }

    #[tokio::test]
    async fn test_manual_mode_skips_failed_page() {
        let mut server = mockito::Server::new_async().await;
        let _p1 = server
            .mock("GET", "/list/1")
            .with_status(200)
            .with_body(r#"<a href="/files/a.pdf">A</a><a href="/files/shared.zip">Shared</a>"#)
            .create_async()
            .await;
        let _p2 = server
            .mock("GET", "/list/2")
            .with_status(503)
            .create_async()
            .await;
        let _p3 = server
            .mock("GET", "/list/3")
            .with_status(200)
            .with_body(r#"<a href="/files/shared.zip">Shared again</a><a href="/files/c.pdf">C</a>"#)
            .create_async()
            .await;

        let base = server.url();
        let mut request = params(format!("{}/list/1", base), PaginationMode::Manual);
        request.url_pattern = format!("{}/list/{{page}}", base);
        request.page_range = "1-3".to_string();

        let summary = run_scrape(&fetcher(), &request).await.unwrap();

        let urls: Vec<&str> = summary.links.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                format!("{}/files/a.pdf", base),
                format!("{}/files/shared.zip", base),
                format!("{}/files/c.pdf", base),
            ]
        );
        assert_eq!(summary.links[1].text, "Shared");
        assert_eq!(summary.count, 3);
        assert_eq!(summary.statistics.get("pdf"), Some(&2));
        assert_eq!(summary.statistics.get("zip"), Some(&1));
    }

    #[tokio::test]
    async fn test_manual_mode_applies_filter_per_page() {
        let mut server = mockito::Server::new_async().await;
        let _p1 = server
            .mock("GET", "/p1")
            .with_status(200)
            .with_body(r#"<a href="a.pdf">A</a><a href="b.docx">B</a>"#)
            .create_async()
            .await;
        let _p2 = server
            .mock("GET", "/p2")
            .with_status(200)
            .with_body(r#"<a href="c.docx">C</a>"#)
            .create_async()
            .await;

        let base = server.url();
        let mut request = params(format!("{}/p1", base), PaginationMode::Manual);
        request.url_pattern = format!("{}/p{{page}}", base);
        request.page_range = "1,2".to_string();
        request.filter = build_extension_filter(&[".DOCX".to_string()]);

        let summary = run_scrape(&fetcher(), &request).await.unwrap();
        assert_eq!(summary.count, 2);
        assert!(summary.links.iter().all(|l| l.extension == "docx"));
    }

    #[tokio::test]
    async fn test_unsupported_mode_returns_empty_summary() {
        let summary = run_scrape(
            &fetcher(),
            &params("https://example.invalid/".to_string(), PaginationMode::Unsupported),
        )
        .await
        .unwrap();
        assert_eq!(summary.count, 0);
        assert!(summary.links.is_empty());
        assert!(summary.statistics.is_empty());
    }
}
