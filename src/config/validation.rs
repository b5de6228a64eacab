use crate::config::types::{Config, CrawlerConfig, FetcherConfig, OutputConfig, UserAgentConfig};
use crate::document::tokenize;
use crate::links::{parse_seed, SiteScope};
use crate::{ConfigError, ConfigResult};
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_crawler_config(&config.crawler)?;
    validate_fetcher_config(&config.fetcher)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> ConfigResult<()> {
    let seed = parse_seed(&config.seed)?;
    SiteScope::new(&seed, &config.article_prefix)?;

    if config.max_cycles < 1 {
        return Err(ConfigError::Validation(format!(
            "crawler max-cycles must be >= 1, got {}",
            config.max_cycles
        )));
    }

    if config.pages_to_index < 1 {
        return Err(ConfigError::Validation(format!(
            "crawler pages-to-index must be >= 1, got {}",
            config.pages_to_index
        )));
    }

    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> ConfigResult<()> {
    validate_selector("content-root", &config.content_root)?;
    validate_selector("block-selector", &config.block_selector)?;

    if config.timeout_secs < 1 || config.timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "fetcher timeout-secs must be between 1 and 300, got {}",
            config.timeout_secs
        )));
    }

    if let Some(dir) = &config.cache_dir {
        if dir.is_empty() {
            return Err(ConfigError::Validation(
                "fetcher cache-dir cannot be empty when set".to_string(),
            ));
        }
    }

    Ok(())
}

/// Checks that a CSS selector parses
fn validate_selector(field: &str, selector: &str) -> ConfigResult<()> {
    if selector.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{} cannot be empty", field)));
    }

    Selector::parse(selector).map_err(|e| {
        ConfigError::Validation(format!("{} '{}' is not a valid selector: {:?}", field, selector, e))
    })?;

    Ok(())
}

/// Validates the identity sent with every request
fn validate_user_agent_config(config: &UserAgentConfig) -> ConfigResult<()> {
    let name = &config.crawler_name;
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ConfigError::Validation(format!(
            "user-agent crawler-name must be non-empty ASCII letters, digits or hyphens, got '{}'",
            name
        )));
    }

    if config.crawler_version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent crawler-version cannot be empty".to_string(),
        ));
    }

    let contact = Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("user-agent contact-url: {}", e)))?;
    if !matches!(contact.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl(format!(
            "user-agent contact-url must be http or https, got '{}'",
            config.contact_url
        )));
    }

    validate_email(&config.contact_email)
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> ConfigResult<()> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "output database-path cannot be empty".to_string(),
        ));
    }

    for term in &config.report_terms {
        validate_term(term)?;
    }

    Ok(())
}

/// A report term must be a single lowercase token, as stored in the index
fn validate_term(term: &str) -> ConfigResult<()> {
    let tokens: Vec<String> = tokenize(term).collect();
    if tokens.len() != 1 || tokens[0] != term {
        return Err(ConfigError::Validation(format!(
            "report term '{}' must be a single lowercase word",
            term
        )));
    }
    Ok(())
}

/// Accepts `local@domain.tld`
fn validate_email(email: &str) -> ConfigResult<()> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!(
            "user-agent contact-email '{}' is not an email address",
            email
        )))
    }
}
