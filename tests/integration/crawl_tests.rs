//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock comic archives and run the full
//! crawl cycle end-to-end through the public `crawl` entry point, with the
//! real file-backed checkpoint store in a temp directory.

use comic_mirror::config::{ArchiveConfig, Config, DownloaderConfig, UserAgentConfig};
use comic_mirror::crawler::crawl;
use std::path::Path;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock archive
fn create_test_config(base_url: &str, workdir: &Path) -> Config {
    Config {
        archive: ArchiveConfig {
            base_url: base_url.to_string(),
            image_selector: "img#comicimage".to_string(),
            next_selector: "a[rel='next'].comicnavlink".to_string(),
        },
        downloader: DownloaderConfig {
            output_dir: workdir.join("comics").to_str().unwrap().to_string(),
            checkpoint_path: workdir.join("last_page.txt").to_str().unwrap().to_string(),
            politeness_delay_ms: 0, // No pacing against the mock server
            request_timeout_secs: 5,
            connect_timeout_secs: 2,
            max_filename_length: 255,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
            contact_email: "test@example.com".to_string(),
        },
    }
}

/// Mounts an archive page at `/{page}` with the given image and next-link
async fn mount_comic_page(
    server: &MockServer,
    page: u64,
    image_src: Option<(&str, &str)>,
    next_href: Option<String>,
) {
    let image = image_src
        .map(|(src, title)| format!(r#"<img id="comicimage" src="{}" title="{}" />"#, src, title))
        .unwrap_or_default();
    let next = next_href
        .map(|href| format!(r#"<a rel="next" class="comicnavlink" href="{}">Next</a>"#, href))
        .unwrap_or_default();

    Mock::given(method("GET"))
        .and(path(format!("/{}", page)))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            r#"<html><head><title>Page {}</title></head><body>{}{}</body></html>"#,
            page, image, next
        )))
        .mount(server)
        .await;
}

/// Mounts image bytes at the given route
async fn mount_image(server: &MockServer, route: &str, bytes: &[u8]) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(bytes.to_vec()))
        .mount(server)
        .await;
}

/// Lists the file names in the output directory, sorted
fn output_files(workdir: &Path) -> Vec<String> {
    let dir = workdir.join("comics");
    if !dir.exists() {
        return Vec::new();
    }
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn checkpoint_value(workdir: &Path) -> Option<String> {
    std::fs::read_to_string(workdir.join("last_page.txt")).ok()
}

#[tokio::test]
async fn test_fresh_start_two_page_archive() {
    let server = MockServer::start().await;
    let base_url = format!("{}/", server.uri());

    // Page 1 has an image with a caption and links to page 2; page 2 has
    // neither an image nor a next-link.
    mount_comic_page(
        &server,
        1,
        Some(("/images/a.jpg", "Hello")),
        Some("/2".to_string()),
    )
    .await;
    mount_comic_page(&server, 2, None, None).await;
    mount_image(&server, "/images/a.jpg", b"jpeg bytes").await;

    let workdir = tempfile::tempdir().unwrap();
    let config = create_test_config(&base_url, workdir.path());

    let summary = crawl(config, false).await.expect("crawl should complete");

    assert_eq!(summary.pages_visited, 2);
    assert_eq!(summary.images_saved, 1);
    assert_eq!(summary.images_failed, 0);

    // Exactly one file, named from the cursor and caption.
    assert_eq!(output_files(workdir.path()), vec!["0001 Hello.jpg"]);
    let saved = std::fs::read(workdir.path().join("comics").join("0001 Hello.jpg")).unwrap();
    assert_eq!(saved, b"jpeg bytes");

    // The cursor advanced to 2 after page 1 and stayed there; page 2 had no
    // next-link so nothing further was persisted.
    assert_eq!(checkpoint_value(workdir.path()).as_deref(), Some("2"));
}

#[tokio::test]
async fn test_failed_image_mid_chain_does_not_block_later_pages() {
    let server = MockServer::start().await;
    let base_url = format!("{}/", server.uri());

    for page in 1..=5u64 {
        let next = if page < 5 {
            Some(format!("/{}", page + 1))
        } else {
            None
        };
        let src = format!("/images/{}.png", page);
        mount_comic_page(&server, page, Some((&src, "Strip")), next).await;
    }
    for page in [1u64, 2, 4, 5] {
        mount_image(&server, &format!("/images/{}.png", page), b"png").await;
    }
    // Page 3's image is broken.
    Mock::given(method("GET"))
        .and(path("/images/3.png"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let workdir = tempfile::tempdir().unwrap();
    let config = create_test_config(&base_url, workdir.path());

    let summary = crawl(config, false).await.expect("crawl should complete");

    assert_eq!(summary.pages_visited, 5);
    assert_eq!(summary.images_saved, 4);
    assert_eq!(summary.images_failed, 1);

    assert_eq!(
        output_files(workdir.path()),
        vec![
            "0001 Strip.png",
            "0002 Strip.png",
            "0004 Strip.png",
            "0005 Strip.png"
        ]
    );

    // The failure did not stop cursor advancement.
    assert_eq!(checkpoint_value(workdir.path()).as_deref(), Some("5"));
}

#[tokio::test]
async fn test_resume_from_existing_checkpoint() {
    let server = MockServer::start().await;
    let base_url = format!("{}/", server.uri());

    // Only pages 3..5 exist on the server; a resumed run must not touch
    // pages 1 and 2 at all.
    for page in 3..=5u64 {
        let next = if page < 5 {
            Some(format!("/{}", page + 1))
        } else {
            None
        };
        let src = format!("/images/{}.png", page);
        mount_comic_page(&server, page, Some((&src, "Strip")), next).await;
        mount_image(&server, &format!("/images/{}.png", page), b"png").await;
    }

    let workdir = tempfile::tempdir().unwrap();
    std::fs::write(workdir.path().join("last_page.txt"), "3").unwrap();
    let config = create_test_config(&base_url, workdir.path());

    let summary = crawl(config, false).await.expect("crawl should complete");

    assert_eq!(summary.pages_visited, 3);
    assert_eq!(
        output_files(workdir.path()),
        vec!["0003 Strip.png", "0004 Strip.png", "0005 Strip.png"]
    );
    assert_eq!(checkpoint_value(workdir.path()).as_deref(), Some("5"));
}

#[tokio::test]
async fn test_fresh_flag_overrides_checkpoint() {
    let server = MockServer::start().await;
    let base_url = format!("{}/", server.uri());

    mount_comic_page(&server, 1, Some(("/images/1.png", "Strip")), None).await;
    mount_image(&server, "/images/1.png", b"png").await;

    let workdir = tempfile::tempdir().unwrap();
    std::fs::write(workdir.path().join("last_page.txt"), "7").unwrap();
    let config = create_test_config(&base_url, workdir.path());

    let summary = crawl(config, true).await.expect("crawl should complete");

    assert_eq!(summary.pages_visited, 1);
    assert_eq!(output_files(workdir.path()), vec!["0001 Strip.png"]);
}

#[tokio::test]
async fn test_page_fetch_failure_aborts_and_preserves_resume_point() {
    let server = MockServer::start().await;
    let base_url = format!("{}/", server.uri());

    mount_comic_page(
        &server,
        1,
        Some(("/images/1.png", "Strip")),
        Some("/2".to_string()),
    )
    .await;
    mount_image(&server, "/images/1.png", b"png").await;
    Mock::given(method("GET"))
        .and(path("/2"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let workdir = tempfile::tempdir().unwrap();
    let config = create_test_config(&base_url, workdir.path());

    let result = crawl(config, false).await;
    assert!(result.is_err(), "a page fetch failure must abort the run");

    // Page 1's work survived and the checkpoint marks page 2 as the resume
    // point, so a rerun re-attempts only the page that failed.
    assert_eq!(output_files(workdir.path()), vec!["0001 Strip.png"]);
    assert_eq!(checkpoint_value(workdir.path()).as_deref(), Some("2"));
}

#[tokio::test]
async fn test_rerun_after_completion_overwrites_not_duplicates() {
    let server = MockServer::start().await;
    let base_url = format!("{}/", server.uri());

    mount_comic_page(&server, 1, Some(("/images/1.png", "Strip")), None).await;
    mount_image(&server, "/images/1.png", b"png").await;

    let workdir = tempfile::tempdir().unwrap();
    let config = create_test_config(&base_url, workdir.path());

    crawl(config.clone(), true).await.expect("first run");
    crawl(config, true).await.expect("second run");

    // Same page number yields the same file name, overwritten in place.
    assert_eq!(output_files(workdir.path()), vec!["0001 Strip.png"]);
}
