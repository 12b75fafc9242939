//! Capture the current call stack as a raw trace string.
//!
//! Frames are resolved with the `backtrace` crate and rendered in the same
//! `Class.method: line N, column M` layout the resolver parses, so captured
//! and externally supplied traces are filtered identically. Frames from this
//! crate are rendered under the framework class and are therefore stripped by
//! the default marker.

use super::frame::Operation;
use super::resolver::StackTraceResolver;
use crate::utils::config::FRAMEWORK_CLASS;
use backtrace::Backtrace;
use log::debug;

/// Crates whose frames are runtime plumbing rather than caller code
const RUNTIME_CRATES: &[&str] = &["std", "core", "alloc", "backtrace", "test"];

const THIS_CRATE: &str = env!("CARGO_CRATE_NAME");

/// Capture the current call stack
///
/// **Public** - native replacement for throw-to-capture
///
/// # Returns
/// Newline-delimited frames, innermost first
pub fn current_stack_trace() -> String {
    let backtrace = Backtrace::new();

    let lines: Vec<String> = backtrace
        .frames()
        .iter()
        .flat_map(|frame| frame.symbols())
        .filter_map(|symbol| {
            let name = symbol.name()?;
            render_frame(&format!("{:#}", name), symbol.lineno(), symbol.colno())
        })
        .collect();

    debug!("Captured {} stack frames", lines.len());

    lines.join("\n")
}

/// Operation of the code that called into this crate
pub fn current_operation(resolver: &StackTraceResolver) -> Option<Operation> {
    resolver.extract_operation(&current_stack_trace())
}

/// Render a demangled symbol path as a trace line
///
/// **Public** - exposed for testing the frame layout
///
/// Returns `None` for runtime frames and symbols without a module path.
pub fn render_frame(symbol: &str, line: Option<u32>, column: Option<u32>) -> Option<String> {
    let (krate, class, method) = split_symbol(symbol)?;

    if RUNTIME_CRATES.contains(&krate) {
        return None;
    }

    let class = if krate == THIS_CRATE { FRAMEWORK_CLASS } else { class };

    let location = match (line, column) {
        (Some(line), Some(column)) => format!("line {}, column {}", line, column),
        (Some(line), None) => format!("line {}", line),
        (None, _) => "line unknown".to_string(),
    };

    Some(format!("{}.{}: {}", class, method, location))
}

/// Split `krate::module::Type::method` into (krate, Type, method)
///
/// **Private** - closures are attributed to their enclosing function, and
/// `<Type as Trait>::method` is attributed to `Type`.
fn split_symbol(symbol: &str) -> Option<(&str, &str, &str)> {
    let mut path = symbol.trim();
    while let Some(stripped) = path.strip_suffix("::{{closure}}") {
        path = stripped;
    }

    let (owner, method) = path.rsplit_once("::")?;
    if method.is_empty() || method.contains('{') {
        return None;
    }

    let owner = match owner.strip_prefix('<') {
        Some(inner) => {
            let end = inner
                .find(" as ")
                .or_else(|| inner.find('>'))
                .unwrap_or(inner.len());
            &inner[..end]
        }
        None => owner,
    };

    // Drop generic arguments before splitting, they may contain `::`:
    // `orders::Queue<alloc::vec::Vec<u8>>` -> `orders::Queue`
    let owner = owner.split('<').next().unwrap_or(owner);

    let krate = owner.split("::").next()?;
    let class = owner.rsplit("::").next()?;

    if krate.is_empty() || class.is_empty() {
        return None;
    }

    Some((krate, class, method))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_application_frame() {
        assert_eq!(
            render_frame("orders::service::OrderService::process", Some(5), Some(1)).as_deref(),
            Some("OrderService.process: line 5, column 1")
        );
    }

    #[test]
    fn test_render_free_function() {
        assert_eq!(
            render_frame("orders::checkout", Some(12), None).as_deref(),
            Some("orders.checkout: line 12")
        );
    }

    #[test]
    fn test_render_closure_and_trait_impl() {
        assert_eq!(
            render_frame("orders::Queue<T>::drain::{{closure}}", None, None).as_deref(),
            Some("Queue.drain: line unknown")
        );
        assert_eq!(
            render_frame("<orders::Invoice as core::fmt::Display>::fmt", Some(3), Some(9))
                .as_deref(),
            Some("Invoice.fmt: line 3, column 9")
        );
    }

    #[test]
    fn test_render_nested_generic_owner() {
        assert_eq!(
            render_frame("orders::Queue<alloc::vec::Vec<u8>>::drain", Some(7), None).as_deref(),
            Some("Queue.drain: line 7")
        );
        assert_eq!(
            render_frame(
                "<orders::Batch<core::option::Option<u8>> as core::iter::Iterator>::next",
                None,
                None
            )
            .as_deref(),
            Some("Batch.next: line unknown")
        );
    }

    #[test]
    fn test_render_own_frames_as_framework() {
        let symbol = format!("{}::stacktrace::capture::current_stack_trace", THIS_CRATE);
        assert_eq!(
            render_frame(&symbol, Some(30), Some(5)).as_deref(),
            Some("Triton.current_stack_trace: line 30, column 5")
        );
    }

    #[test]
    fn test_render_drops_runtime_and_bare_symbols() {
        assert_eq!(render_frame("std::rt::lang_start", Some(1), None), None);
        assert_eq!(render_frame("core::ops::function::FnOnce::call_once", None, None), None);
        assert_eq!(render_frame("__libc_start_main", None, None), None);
    }

    #[test]
    fn test_captured_trace_has_no_framework_frames() {
        let resolver = StackTraceResolver::default();
        let raw = current_stack_trace();

        assert!(resolver.clean_trace(&raw).lines().all(|l| !l.contains("Triton.")));
        if let Some(op) = current_operation(&resolver) {
            assert!(op.as_str().contains('.'));
        }
    }
}
