//! Tokenizer for TypeScript type syntax.
//!
//! Only the subset of the language needed for type expressions and type-level
//! declarations is recognised. Keywords are scanned as dedicated kinds; the
//! parser treats most of them as identifiers where TypeScript allows that
//! (property names, parameter names).

use serde::Serialize;
use typebrand_common::Span;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum SyntaxKind {
    Unknown,
    EndOfFileToken,

    // Literals and names
    Identifier,
    StringLiteral,
    NumericLiteral,
    BigIntLiteral,

    // Punctuation
    OpenParenToken,
    CloseParenToken,
    OpenBraceToken,
    CloseBraceToken,
    OpenBracketToken,
    CloseBracketToken,
    LessThanToken,
    GreaterThanToken,
    CommaToken,
    SemicolonToken,
    ColonToken,
    QuestionToken,
    DotToken,
    DotDotDotToken,
    BarToken,
    AmpersandToken,
    EqualsToken,
    EqualsGreaterThanToken,
    MinusToken,

    // Type keywords
    AnyKeyword,
    UnknownKeyword,
    NeverKeyword,
    VoidKeyword,
    UndefinedKeyword,
    NullKeyword,
    BooleanKeyword,
    NumberKeyword,
    StringKeyword,
    BigIntKeyword,
    SymbolKeyword,
    ObjectKeyword,
    TrueKeyword,
    FalseKeyword,

    // Contextual and declaration keywords
    ThisKeyword,
    NewKeyword,
    AbstractKeyword,
    ReadonlyKeyword,
    UniqueKeyword,
    AssertsKeyword,
    IsKeyword,
    TypeofKeyword,
    TypeKeyword,
    InterfaceKeyword,
    DeclareKeyword,
    FunctionKeyword,
    ConstKeyword,
    LetKeyword,
    ExportKeyword,
}

impl SyntaxKind {
    /// Keyword kinds that may still be used as property or parameter names.
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            SyntaxKind::AnyKeyword
                | SyntaxKind::UnknownKeyword
                | SyntaxKind::NeverKeyword
                | SyntaxKind::VoidKeyword
                | SyntaxKind::UndefinedKeyword
                | SyntaxKind::NullKeyword
                | SyntaxKind::BooleanKeyword
                | SyntaxKind::NumberKeyword
                | SyntaxKind::StringKeyword
                | SyntaxKind::BigIntKeyword
                | SyntaxKind::SymbolKeyword
                | SyntaxKind::ObjectKeyword
                | SyntaxKind::TrueKeyword
                | SyntaxKind::FalseKeyword
                | SyntaxKind::ThisKeyword
                | SyntaxKind::NewKeyword
                | SyntaxKind::AbstractKeyword
                | SyntaxKind::ReadonlyKeyword
                | SyntaxKind::UniqueKeyword
                | SyntaxKind::AssertsKeyword
                | SyntaxKind::IsKeyword
                | SyntaxKind::TypeofKeyword
                | SyntaxKind::TypeKeyword
                | SyntaxKind::InterfaceKeyword
                | SyntaxKind::DeclareKeyword
                | SyntaxKind::FunctionKeyword
                | SyntaxKind::ConstKeyword
                | SyntaxKind::LetKeyword
                | SyntaxKind::ExportKeyword
        )
    }

    pub fn is_identifier_or_keyword(self) -> bool {
        self == SyntaxKind::Identifier || self.is_keyword()
    }

    /// Source text for punctuation tokens, used in "'X' expected." messages.
    pub fn text(self) -> &'static str {
        match self {
            SyntaxKind::OpenParenToken => "(",
            SyntaxKind::CloseParenToken => ")",
            SyntaxKind::OpenBraceToken => "{",
            SyntaxKind::CloseBraceToken => "}",
            SyntaxKind::OpenBracketToken => "[",
            SyntaxKind::CloseBracketToken => "]",
            SyntaxKind::LessThanToken => "<",
            SyntaxKind::GreaterThanToken => ">",
            SyntaxKind::CommaToken => ",",
            SyntaxKind::SemicolonToken => ";",
            SyntaxKind::ColonToken => ":",
            SyntaxKind::QuestionToken => "?",
            SyntaxKind::DotToken => ".",
            SyntaxKind::DotDotDotToken => "...",
            SyntaxKind::BarToken => "|",
            SyntaxKind::AmpersandToken => "&",
            SyntaxKind::EqualsToken => "=",
            SyntaxKind::EqualsGreaterThanToken => "=>",
            SyntaxKind::MinusToken => "-",
            SyntaxKind::IsKeyword => "is",
            SyntaxKind::NewKeyword => "new",
            SyntaxKind::SymbolKeyword => "symbol",
            SyntaxKind::Identifier => "identifier",
            SyntaxKind::EndOfFileToken => "end of input",
            _ => "token",
        }
    }
}

fn keyword_kind(text: &str) -> Option<SyntaxKind> {
    let kind = match text {
        "any" => SyntaxKind::AnyKeyword,
        "unknown" => SyntaxKind::UnknownKeyword,
        "never" => SyntaxKind::NeverKeyword,
        "void" => SyntaxKind::VoidKeyword,
        "undefined" => SyntaxKind::UndefinedKeyword,
        "null" => SyntaxKind::NullKeyword,
        "boolean" => SyntaxKind::BooleanKeyword,
        "number" => SyntaxKind::NumberKeyword,
        "string" => SyntaxKind::StringKeyword,
        "bigint" => SyntaxKind::BigIntKeyword,
        "symbol" => SyntaxKind::SymbolKeyword,
        "object" => SyntaxKind::ObjectKeyword,
        "true" => SyntaxKind::TrueKeyword,
        "false" => SyntaxKind::FalseKeyword,
        "this" => SyntaxKind::ThisKeyword,
        "new" => SyntaxKind::NewKeyword,
        "abstract" => SyntaxKind::AbstractKeyword,
        "readonly" => SyntaxKind::ReadonlyKeyword,
        "unique" => SyntaxKind::UniqueKeyword,
        "asserts" => SyntaxKind::AssertsKeyword,
        "is" => SyntaxKind::IsKeyword,
        "typeof" => SyntaxKind::TypeofKeyword,
        "type" => SyntaxKind::TypeKeyword,
        "interface" => SyntaxKind::InterfaceKeyword,
        "declare" => SyntaxKind::DeclareKeyword,
        "function" => SyntaxKind::FunctionKeyword,
        "const" => SyntaxKind::ConstKeyword,
        "let" => SyntaxKind::LetKeyword,
        "export" => SyntaxKind::ExportKeyword,
        _ => return None,
    };
    Some(kind)
}

/// Saved scanner position for speculative lookahead.
#[derive(Clone, Debug)]
pub struct ScannerSnapshot {
    pos: usize,
    token: SyntaxKind,
    token_start: usize,
    token_value: String,
    preceding_line_break: bool,
    unterminated: bool,
}

/// Tokenizer state machine over a borrowed source string.
pub struct Scanner<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    token: SyntaxKind,
    token_start: usize,
    token_value: String,
    preceding_line_break: bool,
    unterminated: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Scanner {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            token: SyntaxKind::Unknown,
            token_start: 0,
            token_value: String::new(),
            preceding_line_break: false,
            unterminated: false,
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    #[inline]
    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    /// Cooked value of the current token: identifier text, unescaped string
    /// contents, or numeric text (bigint literals without the `n` suffix).
    #[inline]
    pub fn token_value(&self) -> &str {
        &self.token_value
    }

    #[inline]
    pub fn token_span(&self) -> Span {
        Span::new(self.token_start as u32, self.pos as u32)
    }

    #[inline]
    pub fn has_preceding_line_break(&self) -> bool {
        self.preceding_line_break
    }

    /// `true` when the last string literal hit end of input before its quote.
    #[inline]
    pub fn is_unterminated(&self) -> bool {
        self.unterminated
    }

    pub fn save_state(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            pos: self.pos,
            token: self.token,
            token_start: self.token_start,
            token_value: self.token_value.clone(),
            preceding_line_break: self.preceding_line_break,
            unterminated: self.unterminated,
        }
    }

    pub fn restore_state(&mut self, snapshot: ScannerSnapshot) {
        self.pos = snapshot.pos;
        self.token = snapshot.token;
        self.token_start = snapshot.token_start;
        self.token_value = snapshot.token_value;
        self.preceding_line_break = snapshot.preceding_line_break;
        self.unterminated = snapshot.unterminated;
    }

    /// Advance to the next token and return its kind.
    pub fn scan(&mut self) -> SyntaxKind {
        self.preceding_line_break = false;
        self.unterminated = false;
        self.skip_trivia();
        self.token_start = self.pos;
        self.token_value.clear();

        let Some(&ch) = self.bytes.get(self.pos) else {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        };

        self.token = match ch {
            b'(' => self.single(SyntaxKind::OpenParenToken),
            b')' => self.single(SyntaxKind::CloseParenToken),
            b'{' => self.single(SyntaxKind::OpenBraceToken),
            b'}' => self.single(SyntaxKind::CloseBraceToken),
            b'[' => self.single(SyntaxKind::OpenBracketToken),
            b']' => self.single(SyntaxKind::CloseBracketToken),
            b'<' => self.single(SyntaxKind::LessThanToken),
            b'>' => self.single(SyntaxKind::GreaterThanToken),
            b',' => self.single(SyntaxKind::CommaToken),
            b';' => self.single(SyntaxKind::SemicolonToken),
            b':' => self.single(SyntaxKind::ColonToken),
            b'?' => self.single(SyntaxKind::QuestionToken),
            b'|' => self.single(SyntaxKind::BarToken),
            b'&' => self.single(SyntaxKind::AmpersandToken),
            b'-' => self.single(SyntaxKind::MinusToken),
            b'=' => {
                if self.bytes.get(self.pos + 1) == Some(&b'>') {
                    self.pos += 2;
                    SyntaxKind::EqualsGreaterThanToken
                } else {
                    self.single(SyntaxKind::EqualsToken)
                }
            }
            b'.' => {
                if self.source[self.pos..].starts_with("...") {
                    self.pos += 3;
                    SyntaxKind::DotDotDotToken
                } else if self
                    .bytes
                    .get(self.pos + 1)
                    .is_some_and(|b| b.is_ascii_digit())
                {
                    self.scan_number()
                } else {
                    self.single(SyntaxKind::DotToken)
                }
            }
            b'"' | b'\'' => self.scan_string(ch),
            b'0'..=b'9' => self.scan_number(),
            _ if is_identifier_start(ch) => self.scan_identifier(),
            _ => {
                // Step over the full UTF-8 character so spans stay on char boundaries.
                let len = self.source[self.pos..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
                self.pos += len;
                SyntaxKind::Unknown
            }
        };
        self.token
    }

    fn single(&mut self, kind: SyntaxKind) -> SyntaxKind {
        self.pos += 1;
        kind
    }

    fn skip_trivia(&mut self) {
        while let Some(&ch) = self.bytes.get(self.pos) {
            match ch {
                b'\n' | b'\r' => {
                    self.preceding_line_break = true;
                    self.pos += 1;
                }
                b' ' | b'\t' | 0x0b | 0x0c => self.pos += 1,
                b'/' if self.bytes.get(self.pos + 1) == Some(&b'/') => {
                    while let Some(&c) = self.bytes.get(self.pos) {
                        if c == b'\n' {
                            break;
                        }
                        self.pos += 1;
                    }
                }
                b'/' if self.bytes.get(self.pos + 1) == Some(&b'*') => {
                    self.pos += 2;
                    loop {
                        match self.bytes.get(self.pos) {
                            None => break,
                            Some(b'*') if self.bytes.get(self.pos + 1) == Some(&b'/') => {
                                self.pos += 2;
                                break;
                            }
                            Some(b'\n') => {
                                self.preceding_line_break = true;
                                self.pos += 1;
                            }
                            Some(_) => self.pos += 1,
                        }
                    }
                }
                _ => break,
            }
        }
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        let start = self.pos;
        while let Some(&ch) = self.bytes.get(self.pos) {
            if is_identifier_part(ch) {
                self.pos += 1;
            } else {
                break;
            }
        }
        let text = &self.source[start..self.pos];
        self.token_value.push_str(text);
        keyword_kind(text).unwrap_or(SyntaxKind::Identifier)
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let start = self.pos;
        if self.source[self.pos..].starts_with("0x") || self.source[self.pos..].starts_with("0X") {
            self.pos += 2;
            while self
                .bytes
                .get(self.pos)
                .is_some_and(|b| b.is_ascii_hexdigit() || *b == b'_')
            {
                self.pos += 1;
            }
            let digits: String = self.source[start + 2..self.pos]
                .chars()
                .filter(|c| *c != '_')
                .collect();
            if self.bytes.get(self.pos) == Some(&b'n') {
                self.pos += 1;
                let value = u128::from_str_radix(&digits, 16).unwrap_or(0);
                self.token_value = value.to_string();
                return SyntaxKind::BigIntLiteral;
            }
            let value = u64::from_str_radix(&digits, 16).unwrap_or(0);
            self.token_value = value.to_string();
            return SyntaxKind::NumericLiteral;
        }

        self.eat_digits();
        let mut is_integer = true;
        if self.bytes.get(self.pos) == Some(&b'.') {
            is_integer = false;
            self.pos += 1;
            self.eat_digits();
        }
        if matches!(self.bytes.get(self.pos), Some(b'e') | Some(b'E')) {
            is_integer = false;
            self.pos += 1;
            if matches!(self.bytes.get(self.pos), Some(b'+') | Some(b'-')) {
                self.pos += 1;
            }
            self.eat_digits();
        }
        let text: String = self.source[start..self.pos]
            .chars()
            .filter(|c| *c != '_')
            .collect();
        if is_integer && self.bytes.get(self.pos) == Some(&b'n') {
            self.pos += 1;
            self.token_value = text;
            return SyntaxKind::BigIntLiteral;
        }
        self.token_value = text;
        SyntaxKind::NumericLiteral
    }

    fn eat_digits(&mut self) {
        while self
            .bytes
            .get(self.pos)
            .is_some_and(|b| b.is_ascii_digit() || *b == b'_')
        {
            self.pos += 1;
        }
    }

    fn scan_string(&mut self, quote: u8) -> SyntaxKind {
        self.pos += 1;
        let mut value = String::new();
        loop {
            let Some(ch) = self.source[self.pos..].chars().next() else {
                self.unterminated = true;
                break;
            };
            if ch as u32 == quote as u32 {
                self.pos += 1;
                break;
            }
            if ch == '\n' {
                self.unterminated = true;
                break;
            }
            if ch == '\\' {
                self.pos += 1;
                let Some(escaped) = self.source[self.pos..].chars().next() else {
                    self.unterminated = true;
                    break;
                };
                self.pos += escaped.len_utf8();
                match escaped {
                    'n' => value.push('\n'),
                    't' => value.push('\t'),
                    'r' => value.push('\r'),
                    '0' => value.push('\0'),
                    'u' => {
                        let hex = self.source.get(self.pos..self.pos + 4).unwrap_or("");
                        match u32::from_str_radix(hex, 16).ok().and_then(char::from_u32) {
                            Some(decoded) if hex.len() == 4 => {
                                self.pos += 4;
                                value.push(decoded);
                            }
                            _ => value.push('u'),
                        }
                    }
                    other => value.push(other),
                }
                continue;
            }
            self.pos += ch.len_utf8();
            value.push(ch);
        }
        self.token_value = value;
        SyntaxKind::StringLiteral
    }
}

#[inline]
fn is_identifier_start(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_' || ch == b'$'
}

#[inline]
fn is_identifier_part(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || ch == b'_' || ch == b'$'
}

#[cfg(test)]
#[path = "../tests/scanner_tests.rs"]
mod tests;
