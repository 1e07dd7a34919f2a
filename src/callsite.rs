//! Call-site resolution for the method-trace block.
//!
//! The captured stack starts inside this crate (and the capture machinery
//! itself), and inlining can add or remove wrapper frames between builds, so
//! the first user frame is found by scanning instead of assuming a fixed
//! depth.

use std::sync::LazyLock;

use regex::Regex;

/// Frames whose symbols contain one of these belong to the logging pipeline
/// and are skipped when locating the caller.
const LIBRARY_MODULES: &[&str] = &[
    "backtrace::",
    "prettylog::callsite",
    "prettylog::printer",
    "prettylog::registry",
    "prettylog::bridge",
];

/// Trailing `::h0123456789abcdef` disambiguator on legacy-mangled symbols.
static SYMBOL_HASH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"::h[0-9a-f]{16}$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CallSite {
    pub symbol: String,
    pub file: String,
    pub line: u32,
}

impl CallSite {
    /// One trace line: `module::function (file.rs:line)`.
    pub(crate) fn render(&self) -> String {
        format!("{} ({}:{})", simple_name(&self.symbol), self.file, self.line)
    }
}

/// Resolves up to `method_count` user frames, most recent first, starting
/// `method_offset` frames above the first frame outside this library. The
/// selection is clipped to the available depth; an unresolvable stack yields
/// an empty selection and the trace block is simply omitted.
pub(crate) fn resolve(method_offset: usize, method_count: usize) -> Vec<CallSite> {
    if method_count == 0 {
        return Vec::new();
    }
    let backtrace = backtrace::Backtrace::new();
    let mut frames = Vec::new();
    for frame in backtrace.frames() {
        for symbol in frame.symbols() {
            let Some(name) = symbol.name() else { continue };
            frames.push(CallSite {
                symbol: trim_symbol_hash(&name.to_string()),
                file: symbol
                    .filename()
                    .and_then(|path| path.file_name())
                    .map(|file| file.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "<unknown>".into()),
                line: symbol.lineno().unwrap_or(0),
            });
        }
    }

    let Some(base) = frames
        .iter()
        .position(|frame| !is_library_frame(&frame.symbol))
    else {
        return Vec::new();
    };
    let start = base + method_offset;
    if start >= frames.len() {
        return Vec::new();
    }
    let count = method_count.min(frames.len() - start);
    frames[start..start + count].to_vec()
}

fn is_library_frame(symbol: &str) -> bool {
    LIBRARY_MODULES.iter().any(|module| symbol.contains(module))
}

fn trim_symbol_hash(symbol: &str) -> String {
    SYMBOL_HASH.replace(symbol, "").into_owned()
}

/// Last two path segments of a demangled symbol; the full crate path is
/// noise at trace width.
fn simple_name(symbol: &str) -> &str {
    match symbol.rmatch_indices("::").nth(1) {
        Some((index, _)) => &symbol[index + 2..],
        None => symbol,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_hash_is_stripped() {
        assert_eq!(
            trim_symbol_hash("app::server::start::h0123456789abcdef"),
            "app::server::start"
        );
        assert_eq!(trim_symbol_hash("app::server::start"), "app::server::start");
    }

    #[test]
    fn simple_name_keeps_last_two_segments() {
        assert_eq!(simple_name("app::net::client::connect"), "client::connect");
        assert_eq!(simple_name("connect"), "connect");
        assert_eq!(simple_name("client::connect"), "client::connect");
    }

    #[test]
    fn render_formats_file_and_line() {
        let site = CallSite {
            symbol: "app::net::client::connect".into(),
            file: "client.rs".into(),
            line: 42,
        };
        assert_eq!(site.render(), "client::connect (client.rs:42)");
    }

    #[test]
    fn library_frames_are_recognized() {
        assert!(is_library_frame("prettylog::printer::Printer::print"));
        assert!(is_library_frame(
            "<prettylog::bridge::LogBridge as log::Log>::log"
        ));
        assert!(!is_library_frame("app::main"));
    }

    #[test]
    fn zero_count_resolves_to_nothing() {
        assert!(resolve(0, 0).is_empty());
    }

    #[test]
    fn count_is_clipped_to_stack_depth() {
        let frames = resolve(0, 4);
        assert!(frames.len() <= 4);
    }

    #[test]
    fn offset_past_stack_depth_is_empty() {
        assert!(resolve(100_000, 2).is_empty());
    }
}
