use regex::Regex;

/// Compile a hardcoded pattern; a pattern that fails to compile degrades to
/// one that never matches instead of panicking at first use.
pub(crate) fn compile_regex(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(regex) => regex,
        Err(compile_err) => {
            tracing::error!(pattern, error = %compile_err, "built-in regex failed to compile");
            match Regex::new(r"$^") {
                Ok(fallback) => fallback,
                Err(fallback_err) => panic!("hardcoded fallback regex must compile: {fallback_err}"),
            }
        }
    }
}
