// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand!
    () => {
        ::std::string::String::new()
    };
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

/// `plural!(3, "URL")` → "3 URLs", `plural!(1, "match", "matches")` → "1 match"
#[macro_export]
macro_rules! plural {
    ($n:expr, $one:expr) => {{
        let n = $n;
        if n == 1 { format!("{} {}", n, $one) } else { format!("{} {}s", n, $one) }
    }};
    ($n:expr, $one:expr, $many:expr) => {{
        let n = $n;
        if n == 1 { format!("{} {}", n, $one) } else { format!("{} {}", n, $many) }
    }};
}
