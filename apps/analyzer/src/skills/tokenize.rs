//! Shared tokenizer for job descriptions, resumes, and taxonomy surface forms.
//!
//! A token is a maximal run of alphanumerics, `+`, `#`, and `.` directly followed
//! by an alphanumeric. Everything else is a boundary, which makes "C++", "C#",
//! "Node.js" and ".NET" single tokens and turns "CI/CD" into `["ci", "cd"]`.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    /// Token as written in the source text.
    pub raw: &'a str,
    /// Lower-cased form used for lookups.
    pub norm: String,
}

impl<'a> Token<'a> {
    fn new(raw: &'a str) -> Self {
        Self {
            raw,
            norm: raw.to_lowercase(),
        }
    }
}

pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        let next_is_alnum = chars.peek().is_some_and(|(_, n)| n.is_alphanumeric());
        let is_token_char =
            c.is_alphanumeric() || c == '+' || c == '#' || (c == '.' && next_is_alnum);

        if is_token_char {
            start.get_or_insert(i);
        } else if let Some(s) = start.take() {
            push_token(&mut tokens, &text[s..i]);
        }
    }
    if let Some(s) = start {
        push_token(&mut tokens, &text[s..]);
    }
    tokens
}

/// Lower-cased token sequence of a surface form such as "Machine Learning".
pub fn normalize_form(form: &str) -> Vec<String> {
    tokenize(form).into_iter().map(|t| t.norm).collect()
}

fn push_token<'a>(tokens: &mut Vec<Token<'a>>, raw: &'a str) {
    // A lone "+" or "#" is punctuation, not a token.
    if raw.chars().any(char::is_alphanumeric) {
        tokens.push(Token::new(raw));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norms(text: &str) -> Vec<String> {
        tokenize(text).into_iter().map(|t| t.norm).collect()
    }

    #[test]
    fn test_splits_on_punctuation_and_whitespace() {
        assert_eq!(
            norms("Python, Rust; Kubernetes/AWS"),
            vec!["python", "rust", "kubernetes", "aws"]
        );
    }

    #[test]
    fn test_keeps_symbolic_language_names() {
        assert_eq!(norms("C++ and C# on .NET"), vec!["c++", "and", "c#", "on", ".net"]);
    }

    #[test]
    fn test_inner_dot_kept_trailing_dot_dropped() {
        assert_eq!(norms("Built with Node.js."), vec!["built", "with", "node.js"]);
    }

    #[test]
    fn test_lone_symbols_are_dropped() {
        assert_eq!(norms("Python + Go # tags"), vec!["python", "go", "tags"]);
    }

    #[test]
    fn test_raw_preserves_case() {
        let tokens = tokenize("Go golang");
        assert_eq!(tokens[0].raw, "Go");
        assert_eq!(tokens[0].norm, "go");
    }

    #[test]
    fn test_normalize_form_matches_text_tokens() {
        assert_eq!(normalize_form("CI/CD"), vec!["ci", "cd"]);
        assert_eq!(normalize_form("scikit-learn"), vec!["scikit", "learn"]);
    }
}
