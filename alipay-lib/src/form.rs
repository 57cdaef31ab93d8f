//! Query-string and auto-submitting HTML form serialization.
//!
//! The gateway receives every public parameter in the form's `action` URL
//! and the business content as a posted form field, which keeps the URL
//! short. The output is an HTML fragment meant to be written straight into
//! the browser response.

use crate::params::{render_value, Params};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Parameter holding the JSON business content.
pub const BIZ_CONTENT_FIELD: &str = "biz_content";

/// How values are written into HTML attributes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EscapePolicy {
    /// Interpolate values unescaped. A `'` in the business content ends
    /// the attribute early.
    Compatible,
    /// Escape `& < > " '` as HTML entities.
    #[default]
    HtmlAttribute,
}

impl EscapePolicy {
    pub fn apply<'a>(&self, value: &'a str) -> Cow<'a, str> {
        match self {
            Self::Compatible => Cow::Borrowed(value),
            Self::HtmlAttribute => escape_html_attribute(value),
        }
    }
}

/// Escape a value for use inside a quoted HTML attribute.
pub fn escape_html_attribute(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(value);
    }
    let mut out = String::with_capacity(value.len() + 16);
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Reverse [`escape_html_attribute`].
pub fn unescape_html_attribute(value: &str) -> Cow<'_, str> {
    if !value.contains('&') {
        return Cow::Borrowed(value);
    }
    Cow::Owned(
        value
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&amp;", "&"),
    )
}

/// Percent-encode `params` as `k=v&k=v`, in mapping order, skipping `exclude`.
pub fn encode_query(params: &Params, exclude: &[&str]) -> String {
    params
        .iter()
        .filter(|(key, _)| !exclude.contains(key))
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(&render_value(value))
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// A signed request split into URL query and posted business content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestData {
    /// Percent-encoded query of every parameter except `biz_content`.
    pub query: String,
    /// JSON business content, if the request has one.
    pub biz_content: Option<String>,
}

/// Split final (signed) parameters into query string and business content.
pub fn build_request_data(params: &Params) -> RequestData {
    RequestData {
        query: encode_query(params, &[BIZ_CONTENT_FIELD]),
        biz_content: params.get(BIZ_CONTENT_FIELD).map(render_value),
    }
}

/// Render the auto-submitting payment form.
pub fn build_request_form(url: &str, data: &RequestData, policy: EscapePolicy) -> String {
    let action = format!("{}?{}", url, data.query);
    let mut form = String::new();
    form.push_str(&format!(
        "<form id='pay' name='pay' action='{}' method='post'>",
        policy.apply(&action)
    ));
    if let Some(biz_content) = &data.biz_content {
        form.push_str(&format!(
            "<input type='hidden' name='{}' value='{}' />",
            BIZ_CONTENT_FIELD,
            policy.apply(biz_content)
        ));
    }
    form.push_str("</form>");
    form.push_str("<script>document.forms['pay'].submit();</script>");
    form
}
