//! Code fragments and the format template interpreter.
//!
//! A [`CodeBlock`] is a frozen sequence of emission tokens produced by
//! expanding format templates (`"return %S;"`) against a list of
//! [`Arg`]s. Expansion binds and validates arguments eagerly; layout
//! (wrapping, indentation, name resolution) happens later in the writer.

use crate::error::{Error, Result};
use crate::types::TypeRef;

/// An argument bound to a format directive.
///
/// The set of accepted kinds is closed; a directive given an argument it
/// cannot interpret is a construction-time error, never a coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// A string value (`%S`, `%L`, or a plain-text name for `%N`).
    String(String),
    /// The null literal, accepted by `%S` and `%L`.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Char(char),
    /// A type reference for `%T` (or `%L`).
    Type(TypeRef),
    /// A bare identifier for `%N`, usually taken from a named spec node.
    Name(String),
    /// A nested code block, spliced inline by `%L`.
    Block(CodeBlock),
}

impl Arg {
    /// The null literal.
    pub fn null() -> Self {
        Self::Null
    }

    /// Short kind label for error messages.
    fn kind(&self) -> &'static str {
        match self {
            Self::String(_) => "a string",
            Self::Null => "null",
            Self::Bool(_) => "a bool",
            Self::Int(_) => "an integer",
            Self::Float(_) => "a float",
            Self::Char(_) => "a char",
            Self::Type(_) => "a type reference",
            Self::Name(_) => "a name",
            Self::Block(_) => "a code block",
        }
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for Arg {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Arg {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<i64> for Arg {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Arg {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<char> for Arg {
    fn from(value: char) -> Self {
        Self::Char(value)
    }
}

impl From<crate::name::ClassName> for Arg {
    fn from(value: crate::name::ClassName) -> Self {
        Self::Type(TypeRef::Class(value))
    }
}

impl From<TypeRef> for Arg {
    fn from(value: TypeRef) -> Self {
        Self::Type(value)
    }
}

impl From<CodeBlock> for Arg {
    fn from(value: CodeBlock) -> Self {
        Self::Block(value)
    }
}

/// One emission token. The writer consumes these in order; nothing here
/// carries layout state.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Verbatim text; may contain newlines.
    Text(String),
    /// A quoted string literal (`None` renders the unquoted `null`).
    Str(Option<String>),
    /// A type reference, spelled by the resolver at write time.
    Type(TypeRef),
    /// A candidate wrap point: space or line break.
    Wrap,
    /// Push one indentation level.
    Indent,
    /// Pop one indentation level.
    Unindent,
    /// Open an atomic wrapping unit.
    OpenUnit,
    /// Close an atomic wrapping unit.
    CloseUnit,
}

/// A frozen fragment of generated code.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CodeBlock {
    tokens: Vec<Token>,
}

impl CodeBlock {
    /// Expand a single template into a block.
    pub fn of(template: &str, args: impl IntoIterator<Item = Arg>) -> Result<Self> {
        Ok(Self::builder().add(template, args)?.build())
    }

    /// An empty block.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builder() -> CodeBlockBuilder {
        CodeBlockBuilder { tokens: Vec::new() }
    }

    /// Derive a builder seeded with this block's tokens; mutating the
    /// builder never affects this block.
    pub fn to_builder(&self) -> CodeBlockBuilder {
        CodeBlockBuilder {
            tokens: self.tokens.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

/// Accumulates template expansions into a [`CodeBlock`].
///
/// The fallible methods report binding violations immediately, carrying
/// the offending template as diagnostic source.
#[derive(Debug, Clone, Default)]
pub struct CodeBlockBuilder {
    tokens: Vec<Token>,
}

impl CodeBlockBuilder {
    /// Expand a template against its arguments and append the result.
    pub fn add(mut self, template: &str, args: impl IntoIterator<Item = Arg>) -> Result<Self> {
        expand(&mut self.tokens, template, &args.into_iter().collect::<Vec<_>>())?;
        Ok(self)
    }

    /// Expand a template as one statement: the expansion is wrapped in an
    /// atomic unit and terminated with `;` and a newline.
    pub fn add_statement(
        mut self,
        template: &str,
        args: impl IntoIterator<Item = Arg>,
    ) -> Result<Self> {
        self.tokens.push(Token::OpenUnit);
        expand(&mut self.tokens, template, &args.into_iter().collect::<Vec<_>>())?;
        push_text(&mut self.tokens, ";\n");
        self.tokens.push(Token::CloseUnit);
        Ok(self)
    }

    /// Splice another frozen block verbatim.
    pub fn add_code(mut self, block: &CodeBlock) -> Self {
        self.tokens.extend(block.tokens.iter().cloned());
        self
    }

    /// Open a brace block: `<expansion> {` plus one indent level.
    pub fn begin_control_flow(
        mut self,
        template: &str,
        args: impl IntoIterator<Item = Arg>,
    ) -> Result<Self> {
        expand(&mut self.tokens, template, &args.into_iter().collect::<Vec<_>>())?;
        push_text(&mut self.tokens, " {\n");
        self.tokens.push(Token::Indent);
        Ok(self)
    }

    /// Continue a brace block: `} <expansion> {`, e.g. `} else {`.
    pub fn next_control_flow(
        mut self,
        template: &str,
        args: impl IntoIterator<Item = Arg>,
    ) -> Result<Self> {
        self.tokens.push(Token::Unindent);
        push_text(&mut self.tokens, "} ");
        expand(&mut self.tokens, template, &args.into_iter().collect::<Vec<_>>())?;
        push_text(&mut self.tokens, " {\n");
        self.tokens.push(Token::Indent);
        Ok(self)
    }

    /// Close a brace block.
    pub fn end_control_flow(mut self) -> Self {
        self.tokens.push(Token::Unindent);
        push_text(&mut self.tokens, "}\n");
        self
    }

    /// Freeze the accumulated tokens.
    pub fn build(self) -> CodeBlock {
        CodeBlock {
            tokens: self.tokens,
        }
    }
}

/// Append text, coalescing with a trailing text token.
fn push_text(tokens: &mut Vec<Token>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Token::Text(last)) = tokens.last_mut() {
        last.push_str(text);
    } else {
        tokens.push(Token::Text(text.to_string()));
    }
}

/// Expand one template against `args`, appending tokens.
///
/// Consumption may mix relative (`%L`) and indexed (`%2L`) forms; after
/// expansion every argument must have been consumed at least once.
fn expand(tokens: &mut Vec<Token>, template: &str, args: &[Arg]) -> Result<()> {
    let mut used = vec![false; args.len()];
    let mut next_relative = 0usize;
    let mut chars = template.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if c != '%' {
            push_text(tokens, c.encode_utf8(&mut [0u8; 4]));
            continue;
        }

        // Optional 1-based index between '%' and the directive letter.
        let mut digits = String::new();
        while let Some(&(_, d)) = chars.peek() {
            if d.is_ascii_digit() {
                digits.push(d);
                chars.next();
            } else {
                break;
            }
        }

        let Some(&(dir_at, directive)) = chars.peek() else {
            return Err(Error::dangling_percent(template, (start, template.len() - start)));
        };
        chars.next();
        let span = (start, dir_at + directive.len_utf8() - start);

        match directive {
            '%' if digits.is_empty() => push_text(tokens, "%"),
            'W' if digits.is_empty() => tokens.push(Token::Wrap),
            '>' if digits.is_empty() => tokens.push(Token::Indent),
            '<' if digits.is_empty() => tokens.push(Token::Unindent),
            '[' if digits.is_empty() => tokens.push(Token::OpenUnit),
            ']' if digits.is_empty() => tokens.push(Token::CloseUnit),
            'L' | 'N' | 'S' | 'T' => {
                let index = if digits.is_empty() {
                    if next_relative >= args.len() {
                        return Err(Error::missing_argument(template, span, directive, args.len()));
                    }
                    next_relative += 1;
                    next_relative - 1
                } else {
                    let index: usize = digits.parse().unwrap_or(0);
                    if index == 0 || index > args.len() {
                        return Err(Error::index_out_of_range(
                            template,
                            span,
                            digits.parse().unwrap_or(0),
                            directive,
                            args.len(),
                        ));
                    }
                    index - 1
                };
                used[index] = true;
                bind(tokens, template, span, directive, &args[index], index + 1)?;
            }
            other => return Err(Error::unknown_directive(template, span, other)),
        }
    }

    let unused: Vec<usize> = used
        .iter()
        .enumerate()
        .filter(|(_, consumed)| !**consumed)
        .map(|(i, _)| i + 1)
        .collect();
    if !unused.is_empty() {
        return Err(Error::unused_arguments(template, &unused));
    }
    Ok(())
}

/// Bind one consuming directive to its argument.
fn bind(
    tokens: &mut Vec<Token>,
    template: &str,
    span: (usize, usize),
    directive: char,
    arg: &Arg,
    position: usize,
) -> Result<()> {
    match directive {
        'L' => match arg {
            Arg::String(s) => push_text(tokens, s),
            Arg::Null => push_text(tokens, "null"),
            Arg::Bool(b) => push_text(tokens, if *b { "true" } else { "false" }),
            Arg::Int(i) => push_text(tokens, &i.to_string()),
            Arg::Float(f) => push_text(tokens, &f.to_string()),
            Arg::Char(c) => push_text(tokens, c.encode_utf8(&mut [0u8; 4])),
            Arg::Name(n) => push_text(tokens, n),
            Arg::Type(t) => tokens.push(Token::Type(t.clone())),
            Arg::Block(b) => tokens.extend(b.tokens.iter().cloned()),
        },
        'N' => match arg {
            Arg::Name(n) | Arg::String(n) => push_text(tokens, n),
            other => {
                return Err(Error::wrong_argument_kind(
                    template,
                    span,
                    directive,
                    position,
                    "a name or plain text",
                    other.kind(),
                ));
            }
        },
        'S' => match arg {
            Arg::String(s) => tokens.push(Token::Str(Some(s.clone()))),
            Arg::Null => tokens.push(Token::Str(None)),
            other => {
                return Err(Error::wrong_argument_kind(
                    template,
                    span,
                    directive,
                    position,
                    "a string or null",
                    other.kind(),
                ));
            }
        },
        'T' => match arg {
            Arg::Type(t) => tokens.push(Token::Type(t.clone())),
            other => {
                return Err(Error::wrong_argument_kind(
                    template,
                    span,
                    directive,
                    position,
                    "a type reference",
                    other.kind(),
                ));
            }
        },
        _ => unreachable!("bind only receives consuming directives"),
    }
    Ok(())
}
