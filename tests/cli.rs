mod cli {
    #![allow(non_snake_case)]

    use assert_cmd::prelude::*;
    use mockito::{Matcher, Server};
    use predicates::str::contains;

    use std::process::Command;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    const NAME: &str = "speedcheck";

    fn psi_body(url: &str, perf_score: f64) -> String {
        serde_json::json!({
            "id": url,
            "lighthouseResult": {
                "categories": {
                    "performance": {
                        "id": "performance",
                        "title": "Performance",
                        "score": perf_score,
                        "auditRefs": [{"id": "speed-index"}]
                    },
                    "seo": {
                        "id": "seo",
                        "title": "SEO",
                        "score": 1,
                        "auditRefs": []
                    }
                },
                "audits": {
                    "speed-index": {
                        "title": "Speed Index",
                        "score": 0.62,
                        "displayValue": "4.2 s"
                    }
                }
            }
        })
        .to_string()
    }

    #[test]
    fn test_output__when_no_urls_provided() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.assert().failure().stderr(contains(
            "error: the following required arguments were not provided:\n  <URLS>...",
        ));
        Ok(())
    }

    #[test]
    fn test_output__help() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("--help");

        cmd.assert().success().stdout(contains("PageSpeed"));
        cmd.assert().success().stdout(contains("--mobile"));
        cmd.assert().success().stdout(contains("Report Options"));
        Ok(())
    }

    #[test]
    fn test_output__when_invalid_audit_filter() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.args(["--audits", "bogus", "https://example.org/"]);

        cmd.assert().failure().stderr(contains("invalid value"));
        Ok(())
    }

    #[test]
    fn test_output__when_zero_workers() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.args(["--workers", "0", "--no-config", "https://example.org/"]);

        cmd.assert()
            .failure()
            .stderr(contains("workers must be positive"));
        Ok(())
    }

    #[tokio::test]
    async fn test_output__when_analysis_succeeds() -> TestResult {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(psi_body("https://example.org/", 0.91))
            .create_async()
            .await;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.args([
            "--no-config",
            "--no-progress",
            "--quiet",
            "--api-endpoint",
            &server.url(),
            "https://example.org/",
        ]);

        cmd.assert().success().stdout(contains("URL"));
        cmd.assert().success().stdout(contains("Perf  SEO"));
        cmd.assert()
            .success()
            .stdout(contains("https://example.org/    91  100"));
        cmd.assert().success().stdout(contains(" 62 Speed Index: 4.2 s"));
        cmd.assert().success().stdout(contains("Generated by speedcheck/"));
        Ok(())
    }

    #[tokio::test]
    async fn test_output__when_server_keeps_failing() -> TestResult {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(500)
            .expect(3)
            .create_async()
            .await;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.args([
            "--no-config",
            "--no-progress",
            "--quiet",
            "--retry",
            "2",
            "--api-endpoint",
            &server.url(),
            "https://down.test/",
        ]);

        // Exit code 1: the URL failed terminally after exhausting retries.
        cmd.assert().code(1).stdout(contains("https://down.test/"));
        m.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn test_output__mixed_success_and_failure() -> TestResult {
        let mut server = Server::new_async().await;
        let _ok = server
            .mock("GET", "/")
            .match_query(Matcher::UrlEncoded(
                "url".into(),
                "https://ok.test/".into(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(psi_body("https://ok.test/", 0.85))
            .create_async()
            .await;
        let _bad = server
            .mock("GET", "/")
            .match_query(Matcher::UrlEncoded(
                "url".into(),
                "https://down.test/".into(),
            ))
            .with_status(503)
            .create_async()
            .await;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.args([
            "--no-config",
            "--no-progress",
            "--quiet",
            "--api-endpoint",
            &server.url(),
            "https://ok.test/",
            "https://down.test/",
        ]);

        cmd.assert().code(1).stdout(contains("https://ok.test/      85  100"));
        cmd.assert().code(1).stdout(contains("https://down.test/"));
        Ok(())
    }
}
