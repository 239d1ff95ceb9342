//! HTML for each gate decision.
//!
//! Pages are deliberately bare: the application proper is mounted elsewhere,
//! these only carry the login and payment links.

use crate::config::HttpServerConfig;
use axum::response::Html;

/// Page text and button styling.
#[derive(Debug, Clone)]
pub struct PageSettings {
    pub login_text: String,
    pub subscribe_text: String,
    pub button_color: String,
}

impl From<&HttpServerConfig> for PageSettings {
    fn from(config: &HttpServerConfig) -> Self {
        Self {
            login_text: config.login_text.clone(),
            subscribe_text: config.subscribe_text.clone(),
            button_color: config.button_color.clone(),
        }
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\"/>\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\"/>\n\
         <title>{}</title>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        escape(title)
    ))
}

fn button(href: &str, label: &str, color: &str) -> String {
    format!(
        "<a href=\"{}\" target=\"_self\" style=\"display:inline-block;padding:0.5em 1em;\
         color:#fff;background-color:{};border-radius:0.25em;text-decoration:none;\">{}</a>",
        escape(href),
        escape(color),
        escape(label)
    )
}

/// Login link to the identity provider.
pub fn login(url: &str, settings: &PageSettings) -> Html<String> {
    layout(
        "Sign in",
        &button(url, &settings.login_text, &settings.button_color),
    )
}

/// Payment link for a logged-in identity without a subscription.
pub fn payment(url: &str, email: &str, settings: &PageSettings) -> Html<String> {
    let body = format!(
        "<p>Signed in as {}.</p>\n{}\n<p><a href=\"/logout\">Log out</a></p>",
        escape(email),
        button(url, &settings.subscribe_text, &settings.button_color)
    );
    layout("Subscribe", &body)
}

/// Allowlist rejection.
pub fn denied(email: &str) -> Html<String> {
    let body = format!(
        "<p>{} is not permitted to use this application.</p>\n<p><a href=\"/logout\">Log out</a></p>",
        escape(email)
    );
    layout("Access denied", &body)
}

/// The application placeholder shown to subscribers.
pub fn application(email: &str) -> Html<String> {
    let body = format!(
        "<p>Welcome, {}.</p>\n<p><a href=\"/logout\">Log out</a></p>",
        escape(email)
    );
    layout("Welcome", &body)
}

/// Generic failure page; details stay in the logs.
pub fn unavailable() -> Html<String> {
    layout(
        "Service unavailable",
        "<p>The service is temporarily unavailable. Please try again later.</p>",
    )
}
