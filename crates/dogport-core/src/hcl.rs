// ── Output syntax ──
//
// A small expression tree for the subset of HCL the exporter emits, and a
// renderer producing two-space indented text. Scalar lists stay on one
// line (`["a","b"]`); anything nested goes one entry per line with a
// trailing comma.

/// A right-hand-side value.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Null,
    Bool(bool),
    Int(i64),
    /// A string literal, quoted and escaped on output.
    Str(String),
    /// Emitted verbatim: references such as `dog_zone.dmz.id`.
    Raw(String),
    List(Vec<Expr>),
    /// Attribute-style object: bare keys (`port = 80`).
    Object(Vec<(String, Expr)>),
    /// Map-style object: quoted keys (`"web1" = {...}`).
    Map(Vec<(String, Expr)>),
    /// A function call with a single argument, e.g. `jsonencode(...)`.
    Call(&'static str, Box<Expr>),
}

impl Expr {
    pub fn str(s: impl Into<String>) -> Self {
        Self::Str(s.into())
    }

    /// An inline list of string literals.
    pub fn strings<S: AsRef<str>>(items: &[S]) -> Self {
        Self::List(items.iter().map(|s| Self::Str(s.as_ref().to_owned())).collect())
    }

    pub fn jsonencode(inner: Expr) -> Self {
        Self::Call("jsonencode", Box::new(inner))
    }

    fn is_scalar(&self) -> bool {
        matches!(
            self,
            Self::Null | Self::Bool(_) | Self::Int(_) | Self::Str(_) | Self::Raw(_)
        )
    }

    /// Append this expression to `out`, continuation lines indented by
    /// `depth` levels.
    pub fn write_to(&self, out: &mut String, depth: usize) {
        match self {
            Self::Null => out.push_str("null"),
            Self::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Self::Int(i) => out.push_str(&i.to_string()),
            Self::Str(s) => out.push_str(&quote(s)),
            Self::Raw(r) => out.push_str(r),
            Self::List(items) if items.iter().all(Self::is_scalar) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    item.write_to(out, depth);
                }
                out.push(']');
            }
            Self::List(items) => {
                out.push_str("[\n");
                for item in items {
                    indent(out, depth + 1);
                    item.write_to(out, depth + 1);
                    out.push_str(",\n");
                }
                indent(out, depth);
                out.push(']');
            }
            Self::Object(entries) => write_entries(out, entries, depth, false),
            Self::Map(entries) => write_entries(out, entries, depth, true),
            Self::Call(name, arg) => {
                out.push_str(name);
                out.push('(');
                arg.write_to(out, depth);
                out.push(')');
            }
        }
    }
}

fn write_entries(out: &mut String, entries: &[(String, Expr)], depth: usize, quoted: bool) {
    if entries.is_empty() {
        out.push_str("{}");
        return;
    }
    out.push_str("{\n");
    for (key, value) in entries {
        indent(out, depth + 1);
        if quoted {
            out.push_str(&quote(key));
        } else {
            out.push_str(key);
        }
        out.push_str(" = ");
        value.write_to(out, depth + 1);
        out.push('\n');
    }
    indent(out, depth);
    out.push('}');
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

/// Quote a string literal, escaping template introducers as well as the
/// usual control characters.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '$' | '%' if chars.peek() == Some(&'{') => {
                out.push(c);
                out.push(c);
            }
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

/// A top-level block: `<keyword> <labels...> { attrs }`.
pub fn block(keyword: &str, labels: &[&str], attrs: &[(String, Expr)]) -> String {
    let mut out = String::from(keyword);
    for label in labels {
        out.push(' ');
        out.push_str(&quote(label));
    }
    out.push(' ');
    write_entries(&mut out, attrs, 0, false);
    out.push('\n');
    out
}
