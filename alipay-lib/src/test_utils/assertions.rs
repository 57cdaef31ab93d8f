//! Assertions over rendered payment forms.

use crate::form::unescape_html_attribute;
use crate::params::Params;

/// Pieces extracted from a rendered payment form.
pub struct FormAssertion;

impl FormAssertion {
    fn attribute<'a>(html: &'a str, marker: &str, terminator: &str) -> Option<&'a str> {
        let start = html.find(marker)? + marker.len();
        let len = html[start..].find(terminator)?;
        Some(&html[start..start + len])
    }

    /// The `action` URL of the form with HTML entities decoded.
    pub fn action(html: &str) -> Option<String> {
        Self::attribute(html, "action='", "'").map(|raw| unescape_html_attribute(raw).into_owned())
    }

    /// The decoded query parameters of the form's `action` URL.
    pub fn query(html: &str) -> Option<Params> {
        let action = Self::action(html)?;
        let (_, query) = action.split_once('?')?;
        Params::from_form_encoded(query).ok()
    }

    /// The `value` of the hidden `biz_content` input with HTML entities decoded.
    pub fn biz_content(html: &str) -> Option<String> {
        Self::attribute(html, "name='biz_content' value='", "' />")
            .map(|raw| unescape_html_attribute(raw).into_owned())
    }
}

/// Look up one decoded query parameter of a rendered form.
pub fn query_param(html: &str, key: &str) -> Option<String> {
    FormAssertion::query(html)?.get_str(key).map(str::to_string)
}

/// Assert that `html` is an auto-submitting form posting to `gateway_url`.
///
/// # Panics
/// Panics if the form shape is wrong.
pub fn assert_payment_form(html: &str, gateway_url: &str) {
    let prefix = format!("<form id='pay' name='pay' action='{}?", gateway_url);
    assert!(
        html.starts_with(&prefix),
        "form should start with {:?}, got {:?}",
        prefix,
        html.get(..prefix.len().min(html.len()))
    );
    assert!(html.contains("method='post'>"), "form should post");
    assert!(
        html.ends_with("</form><script>document.forms['pay'].submit();</script>"),
        "form should auto-submit"
    );
    assert!(
        query_param(html, "sign").is_some(),
        "query should carry a sign field"
    );
}
