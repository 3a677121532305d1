//! npm registry `/latest` lookups

use crate::client::HttpClient;
use crate::error::{Error, Result};
use lnfund_deps::PackageMetadata;

/// Public npm registry
pub const NPM_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// Build the `/latest` URL for a package
pub fn latest_url(registry_url: &str, package_name: &str) -> Result<String> {
    // Validate package name (basic validation)
    if package_name.is_empty() {
        return Err(Error::InvalidPackageName("Package name cannot be empty".to_string()));
    }
    if package_name.chars().any(char::is_whitespace) {
        return Err(Error::InvalidPackageName(format!(
            "'{}' contains whitespace",
            package_name
        )));
    }

    // Encode package name for URL (handle scoped packages like @scope/name)
    let encoded_name = if package_name.starts_with('@') {
        package_name.replace('/', "%2F")
    } else {
        package_name.to_string()
    };

    Ok(format!(
        "{}/{}/latest",
        registry_url.trim_end_matches('/'),
        encoded_name
    ))
}

/// Fetch the latest published metadata of a package
pub async fn fetch_latest(
    client: &HttpClient,
    registry_url: &str,
    package_name: &str,
) -> Result<PackageMetadata> {
    let url = latest_url(registry_url, package_name)?;
    tracing::debug!(package = package_name, url = %url, "fetching latest metadata");

    let body = client.get_text(&url).await?;
    let metadata = PackageMetadata::from_json_str(&body)?;
    Ok(metadata)
}
