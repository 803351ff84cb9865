//! Named ANSI styles and status glyphs for terminal output.
use std::io::IsTerminal;

/// Whether styled output should be written to `stream`.
///
/// The platform must support it and the stream must be a terminal, so piped
/// output stays free of escape codes.
#[must_use]
pub fn enabled_for(supported: bool, stream: &impl IsTerminal) -> bool {
    supported && stream.is_terminal()
}

/// ANSI SGR code for a style name, or `None` if the name is unknown.
fn sgr_code(name: &str) -> Option<&'static str> {
    let code = match name {
        "black" => "30",
        "red" => "31",
        "green" => "32",
        "yellow" => "33",
        "blue" => "34",
        "magenta" => "35",
        "cyan" => "36",
        "white" => "37",
        "bold" => "1",
        "dim" => "2",
        _ => return None,
    };
    Some(code)
}

/// Wrap `text` in the ANSI style called `name`.
///
/// Returns `text` unchanged when `enabled` is false.  An unknown style name
/// is a programming mistake rather than a user error, so it degrades to the
/// unstyled text and a debug diagnostic.
#[must_use]
pub fn paint(name: &str, text: &str, enabled: bool) -> String {
    if !enabled {
        return text.to_string();
    }
    sgr_code(name).map_or_else(
        || {
            tracing::debug!("unknown color {name:?}, leaving text unstyled");
            text.to_string()
        },
        |code| format!("\x1b[{code}m{text}\x1b[0m"),
    )
}

/// Render a link's existence flag.
///
/// With fancy glyphs this is a green `✓` or red `✗`; otherwise the literal
/// `true` / `false`.
#[must_use]
pub fn status_glyph(exists: bool, fancy: bool) -> String {
    match (fancy, exists) {
        (true, true) => paint("green", "✓", true),
        (true, false) => paint("red", "✗", true),
        (false, flag) => flag.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn paint_known_color() {
        assert_eq!(paint("yellow", "warn", true), "\x1b[33mwarn\x1b[0m");
        assert_eq!(paint("bold", "x", true), "\x1b[1mx\x1b[0m");
    }

    #[test]
    fn paint_disabled_is_plain() {
        assert_eq!(paint("yellow", "warn", false), "warn");
    }

    #[test]
    fn paint_unknown_color_degrades_to_plain() {
        assert_eq!(paint("chartreuse", "text", true), "text");
    }

    #[test]
    fn styling_is_off_for_non_terminals() {
        let file = tempfile::tempfile().unwrap();
        assert!(!enabled_for(true, &file));
        assert!(!enabled_for(false, &file));
    }

    #[test]
    fn glyphs() {
        assert_eq!(status_glyph(true, true), "\x1b[32m✓\x1b[0m");
        assert_eq!(status_glyph(false, true), "\x1b[31m✗\x1b[0m");
        assert_eq!(status_glyph(true, false), "true");
        assert_eq!(status_glyph(false, false), "false");
    }
}
