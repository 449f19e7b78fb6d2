use super::*;

/// # Safety
/// Tests must run with `--test-threads=1` to avoid env races.
unsafe fn clear_api_env() {
    unsafe {
        std::env::remove_var("OMR_API_BASE_URL");
        std::env::remove_var("OMR_API_REQUEST_TIMEOUT_SECS");
        std::env::remove_var("OMR_API_CONNECT_TIMEOUT_SECS");
    }
}

#[test]
fn from_env_defaults_and_overrides() {
    unsafe { clear_api_env() };
    let cfg = ApiConfig::from_env().unwrap();
    assert_eq!(cfg, ApiConfig::default());
    assert_eq!(cfg.base_url, DEFAULT_API_BASE_URL);

    unsafe {
        std::env::set_var("OMR_API_BASE_URL", "https://omr.example.test/api/");
        std::env::set_var("OMR_API_REQUEST_TIMEOUT_SECS", "45");
        std::env::set_var("OMR_API_CONNECT_TIMEOUT_SECS", "nope");
    }
    let cfg = ApiConfig::from_env().unwrap();
    assert_eq!(cfg.base_url, "https://omr.example.test/api");
    assert_eq!(cfg.timeouts, ApiTimeouts { request_secs: 45, connect_secs: DEFAULT_API_CONNECT_TIMEOUT_SECS });

    unsafe {
        std::env::set_var("OMR_API_BASE_URL", "ftp://nope");
    }
    let err = ApiConfig::from_env().unwrap_err();
    assert!(matches!(err, ApiError::Config(_)));

    unsafe { clear_api_env() };
}

#[test]
fn new_trims_trailing_slashes() {
    let cfg = ApiConfig::new(" http://10.0.0.2:8000/api// ", ApiTimeouts::default()).unwrap();
    assert_eq!(cfg.base_url, "http://10.0.0.2:8000/api");
}

#[test]
fn endpoint_joins_paths() {
    let cfg = ApiConfig::default();
    assert_eq!(cfg.endpoint("/exams/answer-keys"), "http://localhost:8000/api/exams/answer-keys");
    assert_eq!(cfg.endpoint("answer"), "http://localhost:8000/api/answer");
}
