//! Configuration validation, run once after load.
//!
//! Collects every problem instead of stopping at the first, so a broken
//! config reports all of its issues in one pass.

use sitewrap_common::ConfigError;

use crate::schema::AppConfig;

/// Run all validations on a config.
pub fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    if config.target_url.trim().is_empty() {
        errors.push("target_url must not be empty".into());
    } else if let Err(e) = url::Url::parse(&config.target_url) {
        errors.push(format!("target_url is not a valid URL: {e}"));
    }

    if !config.zoom.is_finite() || config.zoom <= 0.0 {
        errors.push(format!("zoom must be finite and positive, got {}", config.zoom));
    }

    if let Some(pattern) = &config.internal_urls {
        if let Err(e) = regex::Regex::new(pattern) {
            errors.push(format!("internal_urls is not a valid regex: {e}"));
        }
    }

    if let Some(rules) = &config.proxy_rules {
        if rules.rsplit_once(':').is_none() {
            errors.push(format!("proxy_rules must be host:port, got {rules:?}"));
        }
    }

    check_bounds(&mut errors, "width", config.min_width, config.max_width);
    check_bounds(&mut errors, "height", config.min_height, config.max_height);

    if config.width == 0 || config.height == 0 {
        errors.push("width and height must be non-zero".into());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn check_bounds(errors: &mut Vec<String>, axis: &str, min: Option<u32>, max: Option<u32>) {
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            errors.push(format!("min_{axis} ({min}) exceeds max_{axis} ({max})"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.target_url = "https://medium.com/".into();
        config
    }

    #[test]
    fn default_with_url_validates() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn rejects_empty_target_url() {
        let mut config = valid_config();
        config.target_url = "  ".into();
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("target_url"));
    }

    #[test]
    fn rejects_unparseable_target_url() {
        let mut config = valid_config();
        config.target_url = "not a url".into();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn rejects_non_positive_zoom() {
        let mut config = valid_config();
        config.zoom = 0.0;
        assert!(validate(&config).is_err());
        config.zoom = f64::NAN;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn rejects_bad_override_regex() {
        let mut config = valid_config();
        config.internal_urls = Some("[unclosed".into());
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("internal_urls"));
    }

    #[test]
    fn accepts_wildcard_override_regex() {
        let mut config = valid_config();
        config.internal_urls = Some(".*".into());
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn rejects_inverted_geometry() {
        let mut config = valid_config();
        config.min_width = Some(900);
        config.max_width = Some(400);
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("min_width"));
    }

    #[test]
    fn rejects_portless_proxy() {
        let mut config = valid_config();
        config.proxy_rules = Some("proxy.internal".into());
        assert!(validate(&config).is_err());
        config.proxy_rules = Some("proxy.internal:8080".into());
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn collects_multiple_errors() {
        let mut config = valid_config();
        config.target_url = String::new();
        config.zoom = -1.0;
        let err = validate(&config).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("target_url"));
        assert!(msg.contains("zoom"));
    }
}
