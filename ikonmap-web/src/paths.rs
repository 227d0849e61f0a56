//! Static asset URLs that respect the deployment base path.
///
/// `PUBLIC_URL` is read at compile time (e.g. `/ikon-map` on GitHub Pages).
/// Builds without it produce root-anchored paths.
#[must_use]
pub fn asset_path(relative: &str) -> String {
    asset_path_with_base(relative, option_env!("PUBLIC_URL").unwrap_or(""))
}

/// Hero image shown when a resort has no photo of its own.
#[must_use]
pub fn placeholder_image() -> String {
    asset_path("static/img/mountain.svg")
}

fn asset_path_with_base(relative: &str, base: &str) -> String {
    let base = base.trim_end_matches('/');
    let rel = relative.trim_start_matches('/');

    if base.is_empty() {
        format!("/{rel}")
    } else {
        format!("{base}/{rel}")
    }
}
