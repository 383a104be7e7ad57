//! Shared fixtures for integration tests.

use std::path::PathBuf;

use browscap::Browscap;

pub const MAC_OSX_CHROME: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_10_0) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/37.0.2062.120 Safari/537.36";
pub const PIXEL6_CHROME: &str = "Mozilla/5.0 (Linux; Android 12; Pixel 6) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/95.0.4638.74 Mobile Safari/537.36";
pub const IPHONE12_SAFARI: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 15_1_1 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/15.1 Mobile/15E148 Safari/604.1";
pub const IPAD_SAFARI: &str = "Mozilla/5.0 (iPad; CPU OS 5_0_1 like Mac OS X) AppleWebKit/534.46 (KHTML, like Gecko) Version/5.1 Mobile/9A405 Safari/7534.48.3";
pub const IE9_WIN7: &str = "Mozilla/5.0 (compatible; MSIE 9.0; Windows NT 6.1; Trident/5.0)";

/// Path of the sample dataset shipped with the tests.
pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/browscap_sample.ini")
}

/// A service initialised from the sample dataset.
pub fn service() -> Browscap {
    let service = Browscap::new();
    service
        .init_from_file(&fixture_path(), false)
        .expect("sample dataset must build");
    service
}

/// All user agents the sample dataset recognises.
#[allow(dead_code)]
pub fn known_user_agents() -> Vec<&'static str> {
    vec![
        MAC_OSX_CHROME,
        PIXEL6_CHROME,
        IPHONE12_SAFARI,
        IPAD_SAFARI,
        IE9_WIN7,
        "360Spider",
        "Yandex Browser 1.1",
    ]
}
