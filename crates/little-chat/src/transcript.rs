//! Terminal rendering of conversation messages.

use little_chat_core::Role;
use little_chat_core::conversation::Message;
use owo_colors::OwoColorize;

const BAR_CHAR: &str = "▎";

/// Renders one message as a terminal line.
pub fn render(msg: &Message, colored: bool) -> String {
    let (icon, text) = (icon(msg.role()), msg.text());
    if !colored {
        return format!("{BAR_CHAR}{icon} {text}");
    }
    match msg.role() {
        Role::User => format!(
            "{}{icon} {}",
            BAR_CHAR.bright_green(),
            text.bright_white()
        ),
        Role::Assistant => format!(
            "{}{icon} {}",
            BAR_CHAR.bright_cyan(),
            text.bright_white()
        ),
    }
}

#[inline]
fn icon(role: Role) -> &'static str {
    match role {
        Role::User => "🧑",
        Role::Assistant => "🤖",
    }
}
