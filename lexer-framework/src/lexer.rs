use crate::reader::token_context;
use crate::token::bind_to_token;
use common_framework::{ParseResult, TextToken, Token, TokenKind};
use parser_framework::{any, map, named, skip, ParseContext, Parser, ReaderContext};
use std::cmp::Reverse;
use std::collections::HashMap;

/// Assembles a lexing parser that produces [`TextToken`]s.
///
/// Candidates are tried in this order: the identifier parser, the provided
/// token parsers in registration order, then the fixed-text kinds, longest
/// first. An identifier whose text is a reserved kind becomes a token of that
/// kind.
///
/// ```
/// use lexer_framework::LexerBuilder;
/// use parser_framework::{predefined, ParseContext, ReaderContext};
///
/// let lexer = LexerBuilder::new()
///     .identifier("Ident", predefined::identifier())
///     .reserved(["let"])
///     .fixed(["=", "==", ";"])
///     .skip(predefined::whitespace().discard())
///     .build();
/// let mut tokens = lexer.tokenize(ReaderContext::from_str("<string>", "let x == y;")).unwrap();
/// let kinds: Vec<String> = tokens.peek(0, 10).unwrap().iter().map(|t| t.kind.to_string()).collect();
/// assert_eq!(kinds, ["let", "Ident", "==", "Ident", ";"]);
/// ```
#[derive(Default)]
pub struct LexerBuilder {
    identifier: Option<(TokenKind, Parser<char, String>)>,
    reserved: Vec<TokenKind>,
    fixed: Vec<TokenKind>,
    provided: Vec<Parser<char, TextToken>>,
    skips: Vec<Parser<char, ()>>,
}

impl LexerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the parser for identifiers and the kind of the tokens it yields.
    pub fn identifier(mut self, kind: impl Into<TokenKind>, parser: Parser<char, String>) -> Self {
        self.identifier = Some((kind.into(), parser));
        self
    }

    /// Identifier texts that get their own token kind.
    pub fn reserved<I, K>(mut self, kinds: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<TokenKind>,
    {
        self.reserved.extend(kinds.into_iter().map(Into::into));
        self
    }

    /// Texts matched verbatim; each text is also its token kind.
    pub fn fixed<I, K>(mut self, kinds: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<TokenKind>,
    {
        self.fixed.extend(kinds.into_iter().map(Into::into));
        self
    }

    /// Adds a parser producing a token of the given kind.
    pub fn token(mut self, kind: impl Into<TokenKind>, parser: Parser<char, String>) -> Self {
        self.provided.push(bind_to_token(parser, kind));
        self
    }

    /// Adds a skip parser active while lexing.
    pub fn skip(mut self, parser: Parser<char, ()>) -> Self {
        self.skips.push(parser);
        self
    }

    pub fn build(self) -> Lexer {
        let mut candidates = Vec::new();

        if let Some((kind, parser)) = self.identifier {
            let reserved: HashMap<String, TokenKind> = self
                .reserved
                .into_iter()
                .map(|kind| (kind.as_str().to_string(), kind))
                .collect();
            candidates.push(map(parser, move |text| match reserved.get(&text) {
                Some(reserved) => Token::new(reserved.clone(), text),
                None => Token::new(kind.clone(), text),
            }));
        }

        candidates.extend(self.provided);

        if !self.fixed.is_empty() {
            candidates.push(fixed_text(self.fixed));
        }

        Lexer {
            scanner: named("valid token", any(candidates)),
            skips: self.skips,
        }
    }
}

/// A lexer assembled by [`LexerBuilder`].
#[derive(Clone)]
pub struct Lexer {
    scanner: Parser<char, TextToken>,
    skips: Vec<Parser<char, ()>>,
}

impl Lexer {
    /// Returns a parser that matches one token, skipping leading input with
    /// the lexer's skip parsers.
    pub fn parser(&self) -> Parser<char, TextToken> {
        self.skips
            .iter()
            .fold(self.scanner.clone(), |lexer, parser| skip(parser.clone(), lexer))
    }

    /// Turns a character context into a token context.
    ///
    /// The skip parsers are registered on `ctx` itself, so each token's origin
    /// is the position of its first character.
    pub fn tokenize<'a>(&self, mut ctx: ReaderContext<'a, char>) -> ParseResult<ReaderContext<'a, TextToken>> {
        for parser in &self.skips {
            ctx.add_skip(parser.clone())?;
        }
        Ok(token_context(ctx, self.scanner.clone()))
    }
}

/// Matches the longest fixed text at the next position.
fn fixed_text(mut kinds: Vec<TokenKind>) -> Parser<char, TextToken> {
    kinds.sort_by_key(|kind| Reverse(kind.as_str().chars().count()));
    let lookahead = kinds.first().map_or(0, |kind| kind.as_str().chars().count());

    Parser::new(move |ctx| {
        ctx.run_skips()?;
        let peeked: String = ctx.peek(0, lookahead)?.into_iter().collect();
        match kinds.iter().find(|kind| peeked.starts_with(kind.as_str())) {
            Some(kind) => {
                ctx.consume(kind.as_str().chars().count())?;
                Ok(Token::new(kind.clone(), kind.as_str().to_string()))
            }
            None => Err(ctx.expected("valid token")),
        }
    })
}
