/// Application-wide constants to avoid magic values throughout the codebase.
/// Report layout constants. These are only the defaults; the renderer takes
/// explicit values through `RenderOptions` so it can be tested in isolation.
pub mod layout {
    /// Length of '=' dividers between URL reports
    pub const REPORT_DIVIDER_LEN: usize = 80;
    /// Length of '-' underlines below category names
    pub const CATEGORY_UNDERLINE_LEN: usize = 20;
    /// Default max display width of a detail table cell
    pub const DEFAULT_DETAIL_WIDTH: usize = 40;
    /// Default max number of detail table lines below one audit
    pub const DEFAULT_DETAIL_LINES: i64 = 5;
    /// Spaces between adjacent table columns
    pub const TABLE_SPACING: usize = 2;
}

/// Timeout and duration constants
pub mod timeouts {
    /// Default request timeout in seconds (PSI analyses routinely take tens
    /// of seconds)
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;
    /// Maximum reasonable timeout in seconds (1 hour)
    pub const MAX_TIMEOUT_SECONDS: u64 = 3600;
    /// Default delay between retries in milliseconds
    pub const DEFAULT_RETRY_DELAY_MS: u64 = 0;
}

/// PageSpeed Insights API constants
pub mod api {
    /// The v5 runPagespeed endpoint
    pub const PSI_ENDPOINT: &str =
        "https://www.googleapis.com/pagespeedonline/v5/runPagespeed";
    /// Category query parameters requested with every analysis
    pub const CATEGORY_PARAMS: [&str; 5] =
        ["PERFORMANCE", "ACCESSIBILITY", "BEST_PRACTICES", "SEO", "PWA"];
}

/// Audit filter names accepted on the command line and in config files
pub mod audit_filters {
    /// Every audit in every category
    pub const ALL: &str = "all";
    /// Only scored audits below 100
    pub const FAILED: &str = "failed";
    /// Category scores only
    pub const NONE: &str = "none";

    /// Default audit filter
    pub const DEFAULT: &str = FAILED;

    /// All valid audit filters
    pub const ALL_FILTERS: [&str; 3] = [ALL, FAILED, NONE];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_constants() {
        assert_eq!(layout::REPORT_DIVIDER_LEN, 80);
        assert_eq!(layout::CATEGORY_UNDERLINE_LEN, 20);
        assert_eq!(layout::DEFAULT_DETAIL_WIDTH, 40);
        assert_eq!(layout::DEFAULT_DETAIL_LINES, 5);
    }

    #[test]
    fn test_audit_filter_constants() {
        assert_eq!(audit_filters::DEFAULT, "failed");
        assert_eq!(audit_filters::ALL_FILTERS.len(), 3);
    }

    #[test]
    fn test_api_constants() {
        assert!(api::PSI_ENDPOINT.starts_with("https://"));
        assert_eq!(api::CATEGORY_PARAMS.len(), 5);
    }
}
