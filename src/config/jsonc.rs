//! Relaxed JSON dialect support.
//!
//! Configuration files may contain `//` line comments, `/* */` block comments
//! and trailing commas before `}` or `]`. [`strip_jsonc`] removes those and
//! leaves strict JSON for `serde_json`. Nothing else is relaxed.

/// Scanner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    String,
    LineComment,
    BlockComment,
}

/// Strip comments and trailing commas from relaxed JSON text.
///
/// String literal content is never altered. Newlines inside comments are kept
/// so that parse errors still point at the right line. Unterminated strings or
/// block comments are not reported here; the scan simply ends and the JSON
/// parser rejects the result.
pub fn strip_jsonc(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut state = State::Code;
    // Byte offset in `out` of a code comma that has only been followed by whitespace.
    let mut pending_comma: Option<usize> = None;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        match state {
            State::String => {
                out.push(c);
                if c == '\\' {
                    if let Some(escaped) = next {
                        out.push(escaped);
                        i += 1;
                    }
                } else if c == '"' {
                    state = State::Code;
                }
            }
            State::LineComment => {
                if c == '\n' {
                    out.push(c);
                    state = State::Code;
                }
            }
            State::BlockComment => {
                if c == '*' && next == Some('/') {
                    state = State::Code;
                    i += 1;
                } else if c == '\n' {
                    out.push(c);
                }
            }
            State::Code => match (c, next) {
                ('/', Some('/')) => {
                    state = State::LineComment;
                    i += 1;
                }
                ('/', Some('*')) => {
                    state = State::BlockComment;
                    i += 1;
                }
                _ => {
                    if (c == '}' || c == ']')
                        && let Some(at) = pending_comma.take()
                    {
                        out.remove(at);
                    }
                    if c == ',' {
                        pending_comma = Some(out.len());
                    } else if !c.is_whitespace() {
                        pending_comma = None;
                    }
                    if c == '"' {
                        state = State::String;
                    }
                    out.push(c);
                }
            },
        }

        i += 1;
    }

    out
}
