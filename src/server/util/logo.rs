/// Builds a logo URL for a firm website by substituting its host into `template`
///
/// The scheme, port, path and a leading `www.` are stripped, so
/// `https://www.lazard.com/about` becomes `lazard.com`.
///
/// # Returns
/// - `Some(String)` - Template with `{domain}` replaced
/// - `None` - The website has no usable host
pub fn logo_url_for(template: &str, website: &str) -> Option<String> {
    let domain = website_domain(website)?;

    Some(template.replace("{domain}", &domain))
}

/// Lowercased host of a website URL without a leading `www.`
pub fn website_domain(website: &str) -> Option<String> {
    let website = website.trim();
    let without_scheme = match website.split_once("://") {
        Some((_, rest)) => rest,
        None => website,
    };

    let authority = without_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    // Drop credentials and port
    let host = authority.rsplit('@').next().unwrap_or_default();
    let host = host.split(':').next().unwrap_or_default().to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);

    if host.is_empty() || !host.contains('.') {
        return None;
    }

    Some(host.to_string())
}
