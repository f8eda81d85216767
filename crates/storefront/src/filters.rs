//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Returns the content hash of the static assets, for cache busting.
///
/// Usage in templates: `/static/css/main.css?v={{ ""|asset_version }}`
#[askama::filter_fn]
pub fn asset_version(
    _value: impl Display,
    _env: &dyn askama::Values,
) -> askama::Result<&'static str> {
    Ok(env!("ASSET_VERSION"))
}

/// Returns the visible fraction at which a `fade-in` element is revealed.
///
/// Usage in templates: `data-reveal-threshold="{{ ""|reveal_threshold }}"`
#[askama::filter_fn]
pub fn reveal_threshold(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<f64> {
    Ok(harbor_core::chrome::REVEAL_THRESHOLD)
}

/// Returns the class the header carries once the hero has scrolled away.
///
/// Usage in templates: `data-scrolled-class="{{ ""|scrolled_class }}"`
#[askama::filter_fn]
pub fn scrolled_class(
    _value: impl Display,
    _env: &dyn askama::Values,
) -> askama::Result<&'static str> {
    Ok(harbor_core::chrome::SCROLLED_CLASS)
}

/// Returns the class marking elements that fade in.
#[askama::filter_fn]
pub fn fade_in_class(
    _value: impl Display,
    _env: &dyn askama::Values,
) -> askama::Result<&'static str> {
    Ok(harbor_core::chrome::FADE_IN_CLASS)
}

/// Returns the class added to an element once it has been revealed.
#[askama::filter_fn]
pub fn visible_class(
    _value: impl Display,
    _env: &dyn askama::Values,
) -> askama::Result<&'static str> {
    Ok(harbor_core::chrome::VISIBLE_CLASS)
}
