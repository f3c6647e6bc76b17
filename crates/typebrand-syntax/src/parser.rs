//! Recursive-descent parser for TypeScript type syntax.
//!
//! Produces a [`TypeNode`] tree for a single type expression, or a
//! [`SourceFile`] for a sequence of `type`, `interface`, `declare function`
//! and `declare const` declarations. Parsing stops at the first error; the
//! failing position is reported as a [`ParseDiagnostic`] using the TypeScript
//! diagnostic code for the same situation.

use crate::ast::{
    Declaration, KeywordType, MemberNode, ParamNode, PredicateNode, PredicateTarget,
    ReturnTypeNode, SignatureNode, SourceFile, TupleElementNode, TypeNode, TypeNodeKind,
};
use crate::scanner::{Scanner, SyntaxKind};
use serde::Serialize;
use std::fmt;
use tracing::{debug, trace};
use typebrand_common::limits::MAX_PARSE_DEPTH;
use typebrand_common::{Span, ensure_sufficient_stack};

pub mod diagnostic_codes {
    pub const UNTERMINATED_STRING_LITERAL: u32 = 1002;
    pub const IDENTIFIER_EXPECTED: u32 = 1003;
    pub const TOKEN_EXPECTED: u32 = 1005;
    pub const TYPE_EXPECTED: u32 = 1110;
    pub const INVALID_CHARACTER: u32 = 1127;
    pub const DECLARATION_EXPECTED: u32 = 1128;
    pub const NESTING_TOO_DEEP: u32 = 2589;
}

use diagnostic_codes::*;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseDiagnostic {
    pub start: u32,
    pub length: u32,
    pub message: String,
    pub code: u32,
}

impl ParseDiagnostic {
    pub fn new(span: Span, code: u32, message: impl Into<String>) -> Self {
        ParseDiagnostic {
            start: span.start,
            length: span.len(),
            message: message.into(),
            code,
        }
    }

    pub fn span(&self) -> Span {
        Span::new(self.start, self.start + self.length)
    }
}

impl fmt::Display for ParseDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TS{} at {}: {}", self.code, self.start, self.message)
    }
}

/// Failure of a whole parse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub diagnostics: Vec<ParseDiagnostic>,
}

impl ParseError {
    pub fn first(&self) -> Option<&ParseDiagnostic> {
        self.diagnostics.first()
    }
}

impl From<ParseDiagnostic> for ParseError {
    fn from(diagnostic: ParseDiagnostic) -> Self {
        ParseError {
            diagnostics: vec![diagnostic],
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, diagnostic) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{diagnostic}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

type PResult<T> = Result<T, ParseDiagnostic>;

/// Parse a single type expression that must span the whole input.
pub fn parse_type(source: &str) -> Result<TypeNode, ParseError> {
    Parser::new(source).parse_type_expression()
}

/// Parse a sequence of declarations.
pub fn parse_source(source: &str) -> Result<SourceFile, ParseError> {
    Parser::new(source).parse_source_file()
}

pub struct Parser<'a> {
    scanner: Scanner<'a>,
    /// End offset of the most recently consumed token.
    prev_end: u32,
    depth: u32,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut scanner = Scanner::new(source);
        scanner.scan();
        Parser {
            scanner,
            prev_end: 0,
            depth: 0,
        }
    }

    pub fn parse_type_expression(mut self) -> Result<TypeNode, ParseError> {
        trace!(len = self.scanner.source().len(), "parse_type_expression");
        let result = self.parse_type().and_then(|ty| {
            self.parse_expected(SyntaxKind::EndOfFileToken)?;
            Ok(ty)
        });
        result.map_err(|diagnostic| {
            debug!(%diagnostic, "type expression failed to parse");
            ParseError::from(diagnostic)
        })
    }

    pub fn parse_source_file(mut self) -> Result<SourceFile, ParseError> {
        trace!(len = self.scanner.source().len(), "parse_source_file");
        let mut file = SourceFile::default();
        while self.token() != SyntaxKind::EndOfFileToken {
            match self.parse_declaration() {
                Ok(Some(declaration)) => file.declarations.push(declaration),
                Ok(None) => {}
                Err(diagnostic) => {
                    debug!(%diagnostic, "source failed to parse");
                    return Err(diagnostic.into());
                }
            }
        }
        Ok(file)
    }

    // =========================================================================
    // Token helpers
    // =========================================================================

    #[inline]
    fn token(&self) -> SyntaxKind {
        self.scanner.token()
    }

    #[inline]
    fn token_pos(&self) -> u32 {
        self.scanner.token_span().start
    }

    fn next_token(&mut self) -> SyntaxKind {
        self.prev_end = self.scanner.token_span().end;
        self.scanner.scan()
    }

    fn span_from(&self, start: u32) -> Span {
        Span::new(start, self.prev_end.max(start))
    }

    fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.token() == kind {
            self.next_token();
            true
        } else {
            false
        }
    }

    fn parse_expected(&mut self, kind: SyntaxKind) -> PResult<()> {
        if self.token() == kind {
            self.next_token();
            return Ok(());
        }
        Err(self.error_at_token(TOKEN_EXPECTED, format!("'{}' expected.", kind.text())))
    }

    fn error_at_token(&self, code: u32, message: impl Into<String>) -> ParseDiagnostic {
        let span = self.scanner.token_span();
        if self.token() == SyntaxKind::Unknown {
            return ParseDiagnostic::new(span, INVALID_CHARACTER, "Invalid character.");
        }
        ParseDiagnostic::new(span, code, message)
    }

    fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let snapshot = self.scanner.save_state();
        let prev_end = self.prev_end;
        let result = f(self);
        self.scanner.restore_state(snapshot);
        self.prev_end = prev_end;
        result
    }

    fn enter(&mut self) -> PResult<()> {
        if self.depth >= MAX_PARSE_DEPTH {
            return Err(self.error_at_token(NESTING_TOO_DEEP, "Type nesting is too deep."));
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Identifier, or a contextual keyword that TypeScript lets name a type.
    fn is_identifier_like(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::Identifier
                | SyntaxKind::AssertsKeyword
                | SyntaxKind::IsKeyword
                | SyntaxKind::TypeKeyword
                | SyntaxKind::DeclareKeyword
                | SyntaxKind::AbstractKeyword
                | SyntaxKind::UniqueKeyword
                | SyntaxKind::LetKeyword
        )
    }

    fn parse_identifier(&mut self) -> PResult<String> {
        if !self.is_identifier_like() {
            return Err(self.error_at_token(IDENTIFIER_EXPECTED, "Identifier expected."));
        }
        let name = self.scanner.token_value().to_string();
        self.next_token();
        Ok(name)
    }

    /// `a` or `a.b.c`
    fn parse_entity_name(&mut self) -> PResult<String> {
        let mut name = self.parse_identifier()?;
        while self.token() == SyntaxKind::DotToken {
            self.next_token();
            if !self.token().is_identifier_or_keyword() {
                return Err(self.error_at_token(IDENTIFIER_EXPECTED, "Identifier expected."));
            }
            name.push('.');
            name.push_str(self.scanner.token_value());
            self.next_token();
        }
        Ok(name)
    }

    // =========================================================================
    // Types
    // =========================================================================

    fn parse_type(&mut self) -> PResult<TypeNode> {
        self.enter()?;
        let result = ensure_sufficient_stack(|| {
            if self.is_start_of_function_or_constructor_type() {
                self.parse_function_or_constructor_type()
            } else {
                self.parse_union_type()
            }
        });
        self.leave();
        result
    }

    fn is_start_of_function_or_constructor_type(&mut self) -> bool {
        match self.token() {
            SyntaxKind::OpenParenToken => {
                self.look_ahead(Self::is_unambiguously_start_of_function_type)
            }
            SyntaxKind::NewKeyword => true,
            SyntaxKind::AbstractKeyword => self.look_ahead(|p| {
                p.next_token();
                p.token() == SyntaxKind::NewKeyword
            }),
            _ => false,
        }
    }

    fn is_unambiguously_start_of_function_type(&mut self) -> bool {
        self.next_token();
        match self.token() {
            SyntaxKind::CloseParenToken | SyntaxKind::DotDotDotToken => true,
            kind if kind.is_identifier_or_keyword() => {
                self.next_token();
                match self.token() {
                    SyntaxKind::ColonToken
                    | SyntaxKind::CommaToken
                    | SyntaxKind::QuestionToken
                    | SyntaxKind::EqualsToken => true,
                    SyntaxKind::CloseParenToken => {
                        self.next_token();
                        self.token() == SyntaxKind::EqualsGreaterThanToken
                    }
                    _ => false,
                }
            }
            _ => false,
        }
    }

    fn parse_function_or_constructor_type(&mut self) -> PResult<TypeNode> {
        let start = self.token_pos();
        let is_abstract = self.parse_optional(SyntaxKind::AbstractKeyword);
        let is_constructor = self.parse_optional(SyntaxKind::NewKeyword);
        let signature = Box::new(self.parse_signature(true)?);
        let kind = if is_constructor {
            TypeNodeKind::Constructor {
                signature,
                is_abstract,
            }
        } else {
            TypeNodeKind::Function(signature)
        };
        Ok(TypeNode::new(kind, self.span_from(start)))
    }

    fn parse_union_type(&mut self) -> PResult<TypeNode> {
        let start = self.token_pos();
        self.parse_optional(SyntaxKind::BarToken);
        let first = self.parse_intersection_type()?;
        if self.token() != SyntaxKind::BarToken {
            return Ok(first);
        }
        let mut types = vec![first];
        while self.parse_optional(SyntaxKind::BarToken) {
            types.push(self.parse_intersection_type()?);
        }
        Ok(TypeNode::new(TypeNodeKind::Union(types), self.span_from(start)))
    }

    fn parse_intersection_type(&mut self) -> PResult<TypeNode> {
        let start = self.token_pos();
        self.parse_optional(SyntaxKind::AmpersandToken);
        let first = self.parse_type_operator()?;
        if self.token() != SyntaxKind::AmpersandToken {
            return Ok(first);
        }
        let mut types = vec![first];
        while self.parse_optional(SyntaxKind::AmpersandToken) {
            types.push(self.parse_type_operator()?);
        }
        Ok(TypeNode::new(
            TypeNodeKind::Intersection(types),
            self.span_from(start),
        ))
    }

    fn parse_type_operator(&mut self) -> PResult<TypeNode> {
        let start = self.token_pos();
        match self.token() {
            SyntaxKind::ReadonlyKeyword => {
                self.next_token();
                self.enter()?;
                let inner = self.parse_type_operator();
                self.leave();
                Ok(TypeNode::new(
                    TypeNodeKind::Readonly(Box::new(inner?)),
                    self.span_from(start),
                ))
            }
            SyntaxKind::UniqueKeyword
                if self.look_ahead(|p| {
                    p.next_token();
                    p.token() == SyntaxKind::SymbolKeyword
                }) =>
            {
                self.next_token();
                self.next_token();
                Ok(TypeNode::new(
                    TypeNodeKind::UniqueSymbol,
                    self.span_from(start),
                ))
            }
            _ => self.parse_postfix_type(),
        }
    }

    fn parse_postfix_type(&mut self) -> PResult<TypeNode> {
        let start = self.token_pos();
        let mut ty = self.parse_primary_type()?;
        while self.token() == SyntaxKind::OpenBracketToken && !self.scanner.has_preceding_line_break()
        {
            self.next_token();
            self.parse_expected(SyntaxKind::CloseBracketToken)?;
            ty = TypeNode::new(TypeNodeKind::Array(Box::new(ty)), self.span_from(start));
        }
        Ok(ty)
    }

    fn parse_primary_type(&mut self) -> PResult<TypeNode> {
        let start = self.token_pos();
        let keyword = match self.token() {
            SyntaxKind::AnyKeyword => Some(KeywordType::Any),
            SyntaxKind::UnknownKeyword => Some(KeywordType::Unknown),
            SyntaxKind::NeverKeyword => Some(KeywordType::Never),
            SyntaxKind::VoidKeyword => Some(KeywordType::Void),
            SyntaxKind::UndefinedKeyword => Some(KeywordType::Undefined),
            SyntaxKind::NullKeyword => Some(KeywordType::Null),
            SyntaxKind::BooleanKeyword => Some(KeywordType::Boolean),
            SyntaxKind::NumberKeyword => Some(KeywordType::Number),
            SyntaxKind::StringKeyword => Some(KeywordType::String),
            SyntaxKind::BigIntKeyword => Some(KeywordType::BigInt),
            SyntaxKind::SymbolKeyword => Some(KeywordType::Symbol),
            SyntaxKind::ObjectKeyword => Some(KeywordType::Object),
            _ => None,
        };
        if let Some(keyword) = keyword {
            self.next_token();
            return Ok(TypeNode::new(
                TypeNodeKind::Keyword(keyword),
                self.span_from(start),
            ));
        }

        let kind = match self.token() {
            SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword => {
                let value = self.token() == SyntaxKind::TrueKeyword;
                self.next_token();
                TypeNodeKind::BooleanLiteral(value)
            }
            SyntaxKind::StringLiteral => {
                if self.scanner.is_unterminated() {
                    return Err(self.error_at_token(
                        UNTERMINATED_STRING_LITERAL,
                        "Unterminated string literal.",
                    ));
                }
                let value = self.scanner.token_value().to_string();
                self.next_token();
                TypeNodeKind::StringLiteral(value)
            }
            SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral => {
                self.parse_numeric_literal(false)?
            }
            SyntaxKind::MinusToken => {
                self.next_token();
                match self.token() {
                    SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral => {
                        self.parse_numeric_literal(true)?
                    }
                    _ => return Err(self.error_at_token(TYPE_EXPECTED, "Type expected.")),
                }
            }
            SyntaxKind::ThisKeyword => {
                self.next_token();
                TypeNodeKind::This
            }
            SyntaxKind::TypeofKeyword => {
                self.next_token();
                let name = self.parse_entity_name()?;
                TypeNodeKind::TypeQuery { name }
            }
            SyntaxKind::OpenParenToken | SyntaxKind::NewKeyword | SyntaxKind::AbstractKeyword
                if self.is_start_of_function_or_constructor_type() =>
            {
                return self.parse_function_or_constructor_type();
            }
            SyntaxKind::OpenParenToken => {
                self.next_token();
                let inner = self.parse_type()?;
                self.parse_expected(SyntaxKind::CloseParenToken)?;
                TypeNodeKind::Parenthesized(Box::new(inner))
            }
            SyntaxKind::OpenBracketToken => return self.parse_tuple_type(),
            SyntaxKind::OpenBraceToken => {
                let members = self.parse_members()?;
                TypeNodeKind::TypeLiteral(members)
            }
            _ if self.is_identifier_like() => {
                let name = self.parse_entity_name()?;
                let args = if self.token() == SyntaxKind::LessThanToken
                    && !self.scanner.has_preceding_line_break()
                {
                    self.parse_type_arguments()?
                } else {
                    Vec::new()
                };
                TypeNodeKind::Reference { name, args }
            }
            _ => return Err(self.error_at_token(TYPE_EXPECTED, "Type expected.")),
        };
        Ok(TypeNode::new(kind, self.span_from(start)))
    }

    fn parse_numeric_literal(&mut self, negative: bool) -> PResult<TypeNodeKind> {
        let text = self.scanner.token_value().to_string();
        let kind = if self.token() == SyntaxKind::BigIntLiteral {
            let trimmed = text.trim_start_matches('0');
            let digits = if trimmed.is_empty() { "0" } else { trimmed };
            TypeNodeKind::BigIntLiteral {
                negative: negative && digits != "0",
                digits: digits.to_string(),
            }
        } else {
            let Ok(value) = text.parse::<f64>() else {
                return Err(self.error_at_token(TYPE_EXPECTED, "Type expected."));
            };
            TypeNodeKind::NumberLiteral(if negative { -value } else { value })
        };
        self.next_token();
        Ok(kind)
    }

    fn parse_type_arguments(&mut self) -> PResult<Vec<TypeNode>> {
        self.parse_expected(SyntaxKind::LessThanToken)?;
        let mut args = Vec::new();
        loop {
            args.push(self.parse_type()?);
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::GreaterThanToken)?;
        Ok(args)
    }

    fn parse_tuple_type(&mut self) -> PResult<TypeNode> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBracketToken)?;
        let mut elements = Vec::new();
        while self.token() != SyntaxKind::CloseBracketToken {
            elements.push(self.parse_tuple_element()?);
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBracketToken)?;
        Ok(TypeNode::new(
            TypeNodeKind::Tuple(elements),
            self.span_from(start),
        ))
    }

    /// `T`, `T?`, `...T`, `name: T`, `name?: T`, `...name: T`
    fn parse_tuple_element(&mut self) -> PResult<TupleElementNode> {
        let start = self.token_pos();
        let rest = self.parse_optional(SyntaxKind::DotDotDotToken);
        let is_named = self.token().is_identifier_or_keyword()
            && self.look_ahead(|p| {
                p.next_token();
                match p.token() {
                    SyntaxKind::ColonToken => true,
                    SyntaxKind::QuestionToken => {
                        p.next_token();
                        p.token() == SyntaxKind::ColonToken
                    }
                    _ => false,
                }
            });

        if is_named {
            let name = self.scanner.token_value().to_string();
            self.next_token();
            let optional = self.parse_optional(SyntaxKind::QuestionToken);
            self.parse_expected(SyntaxKind::ColonToken)?;
            let ty = self.parse_type()?;
            return Ok(TupleElementNode {
                name: Some(name),
                ty,
                optional,
                rest,
                span: self.span_from(start),
            });
        }

        let ty = self.parse_type()?;
        let optional = !rest && self.parse_optional(SyntaxKind::QuestionToken);
        Ok(TupleElementNode {
            name: None,
            ty,
            optional,
            rest,
            span: self.span_from(start),
        })
    }

    // =========================================================================
    // Signatures
    // =========================================================================

    /// `(params) => R` when `arrow`, otherwise `(params)` with an optional `: R`.
    fn parse_signature(&mut self, arrow: bool) -> PResult<SignatureNode> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenParenToken)?;
        let mut params = Vec::new();
        let mut this_param = None;
        while self.token() != SyntaxKind::CloseParenToken {
            let is_this = self.token() == SyntaxKind::ThisKeyword;
            let param = self.parse_parameter()?;
            if is_this && !param.rest && params.is_empty() && this_param.is_none() {
                let span = param.span;
                this_param = Some(
                    param
                        .ty
                        .unwrap_or_else(|| TypeNode::new(TypeNodeKind::Keyword(KeywordType::Any), span)),
                );
            } else {
                params.push(param);
            }
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseParenToken)?;

        let return_type = if arrow {
            self.parse_expected(SyntaxKind::EqualsGreaterThanToken)?;
            Some(self.parse_return_type()?)
        } else if self.parse_optional(SyntaxKind::ColonToken) {
            Some(self.parse_return_type()?)
        } else {
            None
        };

        Ok(SignatureNode {
            this_param,
            params,
            return_type,
            span: self.span_from(start),
        })
    }

    fn parse_parameter(&mut self) -> PResult<ParamNode> {
        let start = self.token_pos();
        let rest = self.parse_optional(SyntaxKind::DotDotDotToken);
        if !self.token().is_identifier_or_keyword() {
            return Err(self.error_at_token(IDENTIFIER_EXPECTED, "Identifier expected."));
        }
        let name = self.scanner.token_value().to_string();
        self.next_token();
        let optional = self.parse_optional(SyntaxKind::QuestionToken);
        let ty = if self.parse_optional(SyntaxKind::ColonToken) {
            Some(self.parse_type()?)
        } else {
            None
        };
        Ok(ParamNode {
            name,
            ty,
            optional,
            rest,
            span: self.span_from(start),
        })
    }

    fn parse_return_type(&mut self) -> PResult<ReturnTypeNode> {
        let start = self.token_pos();
        let is_asserts = self.token() == SyntaxKind::AssertsKeyword
            && self.look_ahead(|p| {
                p.next_token();
                !p.scanner.has_preceding_line_break()
                    && (p.token() == SyntaxKind::ThisKeyword || p.is_identifier_like())
            });
        if is_asserts {
            self.next_token();
            let target = self.parse_predicate_target();
            let ty = if self.parse_optional(SyntaxKind::IsKeyword) {
                Some(self.parse_type()?)
            } else {
                None
            };
            return Ok(ReturnTypeNode::Predicate(PredicateNode {
                asserts: true,
                target,
                ty,
                span: self.span_from(start),
            }));
        }

        let is_predicate = (self.token() == SyntaxKind::ThisKeyword || self.is_identifier_like())
            && self.look_ahead(|p| {
                p.next_token();
                p.token() == SyntaxKind::IsKeyword && !p.scanner.has_preceding_line_break()
            });
        if is_predicate {
            let target = self.parse_predicate_target();
            self.parse_expected(SyntaxKind::IsKeyword)?;
            let ty = self.parse_type()?;
            return Ok(ReturnTypeNode::Predicate(PredicateNode {
                asserts: false,
                target,
                ty: Some(ty),
                span: self.span_from(start),
            }));
        }

        Ok(ReturnTypeNode::Type(self.parse_type()?))
    }

    fn parse_predicate_target(&mut self) -> PredicateTarget {
        let target = if self.token() == SyntaxKind::ThisKeyword {
            PredicateTarget::This
        } else {
            PredicateTarget::Parameter(self.scanner.token_value().to_string())
        };
        self.next_token();
        target
    }

    // =========================================================================
    // Members
    // =========================================================================

    /// `{ member; member, member \n member }`
    fn parse_members(&mut self) -> PResult<Vec<MemberNode>> {
        self.parse_expected(SyntaxKind::OpenBraceToken)?;
        let mut members = Vec::new();
        while self.token() != SyntaxKind::CloseBraceToken
            && self.token() != SyntaxKind::EndOfFileToken
        {
            members.push(self.parse_type_member()?);
            if !self.parse_optional(SyntaxKind::SemicolonToken)
                && !self.parse_optional(SyntaxKind::CommaToken)
                && self.token() != SyntaxKind::CloseBraceToken
                && !self.scanner.has_preceding_line_break()
            {
                return Err(self.error_at_token(TOKEN_EXPECTED, "';' expected."));
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken)?;
        Ok(members)
    }

    fn is_property_name_start(&self) -> bool {
        self.token().is_identifier_or_keyword()
            || matches!(
                self.token(),
                SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral | SyntaxKind::OpenBracketToken
            )
    }

    fn parse_type_member(&mut self) -> PResult<MemberNode> {
        let start = self.token_pos();
        if self.token() == SyntaxKind::OpenParenToken {
            return Ok(MemberNode::Call(self.parse_signature(false)?));
        }
        if self.token() == SyntaxKind::NewKeyword
            && self.look_ahead(|p| {
                p.next_token();
                p.token() == SyntaxKind::OpenParenToken
            })
        {
            self.next_token();
            return Ok(MemberNode::Construct(self.parse_signature(false)?));
        }

        let readonly = self.token() == SyntaxKind::ReadonlyKeyword
            && self.look_ahead(|p| {
                p.next_token();
                p.is_property_name_start()
            });
        if readonly {
            self.next_token();
        }

        if self.token() == SyntaxKind::OpenBracketToken
            && self.look_ahead(|p| {
                p.next_token();
                if !p.token().is_identifier_or_keyword() {
                    return false;
                }
                p.next_token();
                p.token() == SyntaxKind::ColonToken
            })
        {
            self.next_token();
            let param_name = self.scanner.token_value().to_string();
            self.next_token();
            self.parse_expected(SyntaxKind::ColonToken)?;
            let key = self.parse_type()?;
            self.parse_expected(SyntaxKind::CloseBracketToken)?;
            self.parse_expected(SyntaxKind::ColonToken)?;
            let ty = self.parse_type()?;
            return Ok(MemberNode::Index {
                param_name,
                key,
                readonly,
                ty,
                span: self.span_from(start),
            });
        }

        let name = self.parse_property_name()?;
        let optional = self.parse_optional(SyntaxKind::QuestionToken);
        if self.token() == SyntaxKind::OpenParenToken {
            let signature = self.parse_signature(false)?;
            return Ok(MemberNode::Method {
                name,
                optional,
                signature,
                span: self.span_from(start),
            });
        }
        let ty = if self.parse_optional(SyntaxKind::ColonToken) {
            Some(self.parse_type()?)
        } else {
            None
        };
        Ok(MemberNode::Property {
            name,
            optional,
            readonly,
            ty,
            span: self.span_from(start),
        })
    }

    fn parse_property_name(&mut self) -> PResult<String> {
        let name = match self.token() {
            kind if kind.is_identifier_or_keyword() => self.scanner.token_value().to_string(),
            SyntaxKind::StringLiteral => self.scanner.token_value().to_string(),
            SyntaxKind::NumericLiteral => match self.scanner.token_value().parse::<f64>() {
                Ok(value) => number_to_property_name(value),
                Err(_) => {
                    return Err(self.error_at_token(IDENTIFIER_EXPECTED, "Property name expected."));
                }
            },
            _ => {
                return Err(self.error_at_token(IDENTIFIER_EXPECTED, "Property name expected."));
            }
        };
        self.next_token();
        Ok(name)
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    fn parse_declaration(&mut self) -> PResult<Option<Declaration>> {
        let start = self.token_pos();
        while matches!(
            self.token(),
            SyntaxKind::ExportKeyword | SyntaxKind::DeclareKeyword
        ) {
            self.next_token();
        }

        let declaration = match self.token() {
            SyntaxKind::SemicolonToken => {
                self.next_token();
                return Ok(None);
            }
            SyntaxKind::TypeKeyword => {
                self.next_token();
                let name = self.parse_identifier()?;
                self.parse_expected(SyntaxKind::EqualsToken)?;
                let ty = self.parse_type()?;
                self.parse_optional(SyntaxKind::SemicolonToken);
                Declaration::TypeAlias {
                    name,
                    ty,
                    span: self.span_from(start),
                }
            }
            SyntaxKind::InterfaceKeyword => {
                self.next_token();
                let name = self.parse_identifier()?;
                let mut extends = Vec::new();
                if self.token() == SyntaxKind::Identifier && self.scanner.token_value() == "extends"
                {
                    self.next_token();
                    loop {
                        extends.push(self.parse_primary_type()?);
                        if !self.parse_optional(SyntaxKind::CommaToken) {
                            break;
                        }
                    }
                }
                let members = self.parse_members()?;
                Declaration::Interface {
                    name,
                    extends,
                    members,
                    span: self.span_from(start),
                }
            }
            SyntaxKind::FunctionKeyword => {
                self.next_token();
                let name = self.parse_identifier()?;
                let signature = self.parse_signature(false)?;
                self.parse_optional(SyntaxKind::SemicolonToken);
                Declaration::Function {
                    name,
                    signature,
                    span: self.span_from(start),
                }
            }
            SyntaxKind::ConstKeyword | SyntaxKind::LetKeyword => {
                self.next_token();
                let name = self.parse_identifier()?;
                self.parse_expected(SyntaxKind::ColonToken)?;
                let ty = self.parse_type()?;
                self.parse_optional(SyntaxKind::SemicolonToken);
                Declaration::Variable {
                    name,
                    ty,
                    span: self.span_from(start),
                }
            }
            _ => {
                return Err(self.error_at_token(
                    DECLARATION_EXPECTED,
                    "Declaration or statement expected.",
                ));
            }
        };
        Ok(Some(declaration))
    }
}

/// Canonical property key for a numeric name: `{ 1.0: T }` declares key `"1"`.
pub fn number_to_property_name(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e21 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
#[path = "../tests/parser_tests.rs"]
mod tests;
