use once_cell::sync::Lazy;
use regex::Regex;

// AUTH material must never reach the terminal, even in debug output.
static SECRET_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(pass(?:word)?|auth|requirepass)[\s:=]+[^\s@]+").unwrap()
});

pub fn redact_secrets(message: &str) -> String {
    let redacted = SECRET_PATTERN.replace_all(message, "$1=[REDACTED]");
    redacted.to_string()
}
