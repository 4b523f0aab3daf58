use std::fs;

use anyhow::Context;
use timeline_engine::{encode_atom, FeedEngine, ReqwestFetcher, SelectorExtractor};
use timeline_logging::timeline_info;

use crate::cli::Cli;
use crate::config::AppConfig;

/// Produces the encoded feed for `cli.handle`. Nothing is written anywhere;
/// the caller decides what to do with the bytes.
pub async fn run(cli: &Cli) -> anyhow::Result<Vec<u8>> {
    let settings = AppConfig::from_cli(cli)?.resolve()?;
    let engine = FeedEngine::new(
        Box::new(ReqwestFetcher::new(settings.fetch)),
        Box::new(SelectorExtractor::new(settings.selectors)),
        settings.site,
    );

    let document = match cli.html_file.as_deref() {
        Some(path) => {
            timeline_info!("Reading @{}'s page from {:?}", cli.handle, path);
            let bytes = fs::read(path)
                .with_context(|| format!("could not read {}", path.display()))?;
            engine.feed_from_bytes(&cli.handle, &bytes, None)
        }
        None => engine.fetch_feed(&cli.handle).await?,
    };

    Ok(encode_atom(&document, settings.pretty)?)
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const PAGE: &str = r#"<html><body><div class="GridTimeline">
        <div class="ProfileTweet" data-screen-name="alice" data-item-id="1">
          <a class="ProfileTweet-timestamp"><span data-time="1000">t</span></a>
          <p class="ProfileTweet-text">hi</p>
        </div>
        <div class="ProfileTweet" data-screen-name="alice" data-item-id="2">
          <a class="ProfileTweet-timestamp"><span data-time="2000">t</span></a>
          <p class="ProfileTweet-text">bye</p>
        </div>
    </div></body></html>"#;

    fn cli(args: &[&str]) -> Cli {
        let mut all = vec!["timeline2atom"];
        all.extend_from_slice(args);
        Cli::try_parse_from(all).unwrap()
    }

    #[tokio::test]
    async fn downloads_and_encodes_profile() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/alice"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(PAGE, "text/html"))
            .expect(1)
            .mount(&server)
            .await;

        let xml = run(&cli(&["alice", "--site", &server.uri()])).await.unwrap();
        let xml = String::from_utf8(xml).unwrap();

        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains(&format!("{}/alice/status/1", server.uri())));
        assert!(xml.contains(&format!("{}/alice/status/2", server.uri())));
        assert!(xml.contains("@alice: bye"));
        assert!(xml.contains("1970-01-01T00:33:20"));
    }

    #[tokio::test]
    async fn http_failure_produces_no_document() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/alice"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = run(&cli(&["alice", "--site", &server.uri()]))
            .await
            .unwrap_err();
        let report = format!("{err:#}");
        assert!(report.contains("@alice"), "{report}");
        assert!(report.contains("503"), "{report}");
    }

    #[tokio::test]
    async fn reads_page_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let page = dir.path().join("alice.html");
        fs::write(&page, PAGE).unwrap();
        let page_arg = page.to_string_lossy().into_owned();

        let xml = run(&cli(&["@alice", "--html-file", &page_arg, "--pretty"]))
            .await
            .unwrap();
        let xml = String::from_utf8(xml).unwrap();

        assert!(xml.contains("https://twitter.com/alice/status/1"));
        assert!(xml.contains("\n  <"));
    }

    #[tokio::test]
    async fn missing_page_file_is_reported() {
        let err = run(&cli(&["alice", "--html-file", "/no/such/page.html"]))
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("/no/such/page.html"));
    }
}
