//! Rendering of message text and message bubbles.
//!
//! Reply bodies use a small markdown subset: `**bold**`, `*italic*`,
//! `` `code` ``, `#` headings and line breaks.

use std::sync::LazyLock;

use chrono::Local;
use regex::Regex;

use crate::conversation::{Message, Role};

static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static ITALIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`(.*?)`").unwrap());
static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").unwrap());

/// Convert markdown-like text to HTML.
///
/// Text is HTML-escaped before markup is applied.
pub fn format_message_text(text: &str) -> String {
    let escaped = escape_html(text);
    let inline = BOLD_RE.replace_all(&escaped, "<strong>${1}</strong>");
    let inline = ITALIC_RE.replace_all(&inline, "<em>${1}</em>");
    let inline = CODE_RE.replace_all(&inline, "<code>${1}</code>");

    inline
        .split('\n')
        .map(|line| match HEADING_RE.captures(line) {
            Some(caps) => {
                let level = caps[1].len();
                format!("<h{level}>{}</h{level}>", &caps[2])
            }
            None => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("<br>")
}

/// Render a message as an HTML chat bubble.
pub fn render_message(message: &Message) -> String {
    let (class, avatar) = match message.role {
        Role::User => ("user", ""),
        Role::Assistant => ("ai", "🤖"),
    };

    let mut body = String::new();
    if let Some(meta) = message.meta.as_ref().filter(|_| message.role == Role::Assistant) {
        if !meta.charts.is_empty() {
            body.push_str(
                "<div class=\"message-charts\"><div class=\"charts-header\">📊 Related Visualizations:</div><div class=\"chart-links\">",
            );
            for chart in &meta.charts {
                body.push_str(&format!(
                    "<button class=\"chart-link\" data-chart=\"{}\">📈 {}</button>",
                    escape_html(chart.as_str()),
                    escape_html(&chart.display_label())
                ));
            }
            body.push_str("</div></div>");
        }
    }

    body.push_str(&format!("<div>{}</div>", format_message_text(&message.text)));

    if let Some(meta) = message.meta.as_ref().filter(|_| message.role == Role::Assistant) {
        if !meta.actions.is_empty() {
            body.push_str(
                "<div class=\"message-actions\"><div class=\"actions-header\">⚡ Quick Actions:</div><div class=\"action-buttons\">",
            );
            for action in &meta.actions {
                body.push_str(&format!(
                    "<button class=\"action-button\">{}</button>",
                    escape_html(action.label())
                ));
            }
            body.push_str("</div></div>");
        }
    }

    format!(
        "<div class=\"message {class}-message\"><div class=\"message-avatar\">{avatar}</div><div class=\"message-content\"><div class=\"message-text\">{body}</div><div class=\"message-time\">{}</div></div></div>",
        local_time(message)
    )
}

/// Render a message for a plain terminal.
pub fn render_plain(message: &Message) -> String {
    let header = match message.role {
        Role::User => "You",
        Role::Assistant => "🤖 Assistant",
    };
    let mut out = format!("[{}] {}\n{}\n", local_time(message), header, message.text);

    if let Some(meta) = &message.meta {
        if !meta.charts.is_empty() {
            let labels: Vec<String> = meta
                .charts
                .iter()
                .map(|c| format!("{} ({})", c.display_label(), c))
                .collect();
            out.push_str(&format!("\n📊 Related Visualizations: {}\n", labels.join(", ")));
        }
        if !meta.actions.is_empty() {
            let labels: Vec<&str> = meta.actions.iter().map(|a| a.label()).collect();
            out.push_str(&format!("⚡ Quick Actions: {}\n", labels.join(" | ")));
        }
    }
    out
}

fn local_time(message: &Message) -> String {
    message
        .created_at
        .with_timezone(&Local)
        .format("%H:%M:%S")
        .to_string()
}

fn escape_html(text: &str) -> String {
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
