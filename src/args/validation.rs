use super::types::{Args, CorsOrigin};

impl Args {
    /// # Errors
    ///
    /// Will return `Err` if a required setting is missing or malformed
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.trim().is_empty() {
            return Err("The sports-data api key is required (SPORTSDATA_API_KEY).".to_string());
        }
        let base = self.upstream_base_url.trim();
        if !base.starts_with("http://") && !base.starts_with("https://") {
            return Err(format!(
                "The upstream base url '{base}' must start with http:// or https://."
            ));
        }
        if self.db_name.trim().is_empty() {
            return Err("The favorites database name cannot be empty.".to_string());
        }
        parse_cors_origins(&self.cors_origins)?;
        Ok(())
    }
}

/// # Errors
///
/// Will return `Err` if the value is not a positive integer
pub fn check_page_size(value: &str) -> Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(0) => Err("The page size must be at least 1.".to_string()),
        Ok(size) => Ok(size),
        Err(e) => Err(format!("The page size '{value}' is not a number: {e}")),
    }
}

/// Parse the comma separated origin list.
///
/// # Errors
///
/// Will return `Err` if an entry is neither `*`, a `*.suffix` wildcard nor an http(s) origin
pub fn parse_cors_origins(value: &str) -> Result<Vec<CorsOrigin>, String> {
    let mut origins = Vec::new();
    for entry in value.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let origin = if entry == "*" {
            CorsOrigin::Any
        } else if let Some(suffix) = entry.strip_prefix('*') {
            if !suffix.starts_with('.') || suffix.len() < 2 {
                return Err(format!("The cors wildcard '{entry}' must look like *.example.app."));
            }
            CorsOrigin::Suffix(suffix.to_string())
        } else if entry.starts_with("http://") || entry.starts_with("https://") {
            CorsOrigin::Exact(entry.trim_end_matches('/').to_string())
        } else {
            return Err(format!(
                "The cors origin '{entry}' must start with http:// or https://."
            ));
        };
        origins.push(origin);
    }
    Ok(origins)
}
