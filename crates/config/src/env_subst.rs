/// Result of replacing `${ENV_VAR}` placeholders in raw config text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substituted {
    pub text: String,
    /// Variable names that had no value and were left in place.
    pub unresolved: Vec<String>,
}

/// Replace `${ENV_VAR}` placeholders using `lookup`.
///
/// Unresolvable variables are left as-is and reported in
/// [`Substituted::unresolved`].
pub fn substitute_with(input: &str, lookup: impl Fn(&str) -> Option<String>) -> Substituted {
    let mut text = String::with_capacity(input.len());
    let mut unresolved = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '$' || chars.peek() != Some(&'{') {
            text.push(ch);
            continue;
        }
        chars.next(); // '{'
        let mut var_name = String::new();
        let mut closed = false;
        for c in chars.by_ref() {
            if c == '}' {
                closed = true;
                break;
            }
            var_name.push(c);
        }
        if !closed || var_name.is_empty() {
            text.push_str("${");
            text.push_str(&var_name);
            if closed {
                text.push('}');
            }
            continue;
        }
        match lookup(&var_name) {
            Some(val) => text.push_str(&val),
            None => {
                text.push_str("${");
                text.push_str(&var_name);
                text.push('}');
                unresolved.push(var_name);
            },
        }
    }

    Substituted { text, unresolved }
}
