use crate::{Error, Span};

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum TokenKind<'a> {
    LSquare,        // [
    RSquare,        // ]
    Colon,          // :
    Ident(&'a str), // uint16, Vec3, MAX_POINTS, etc..
    Lit(&'a str),   // 16
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    pub span: Span,
}

impl<'a> Token<'a> {
    fn new(kind: TokenKind<'a>, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    offset: usize,
}

#[inline(always)]
fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

#[inline(always)]
fn is_ident_continue(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

impl<'a> Tokenizer<'a> {
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Self { input, offset: 0 }
    }

    #[inline]
    fn peek_char(&self) -> Option<char> {
        self.input[self.offset..].chars().next()
    }

    #[inline]
    fn next_char(&mut self) -> Option<char> {
        self.peek_char().map(|ch| {
            self.offset += ch.len_utf8();
            ch
        })
    }

    fn eat_while(&mut self, func: impl Fn(char) -> bool) {
        while let Some(ch) = self.peek_char() {
            if !func(ch) {
                break;
            }
            self.offset += ch.len_utf8();
        }
    }

    // ----

    // spans are u16, tokens past that are an error rather than a wrapped offset.
    #[inline]
    fn emit(&self, kind: TokenKind<'a>, start: usize) -> Result<Token<'a>, Error> {
        let start = u16::try_from(start).map_err(|_| Error::InputTooLong)?;
        let end = u16::try_from(self.offset).map_err(|_| Error::InputTooLong)?;
        Ok(Token::new(kind, Span::new(start, end)))
    }

    #[inline]
    fn emit_word(&mut self, start: usize, func: impl Fn(char) -> bool) -> &'a str {
        self.eat_while(func);
        &self.input[start..self.offset]
    }

    fn next_token(&mut self) -> Option<Result<Token<'a>, Error>> {
        loop {
            let start = self.offset;
            let ch = self.next_char()?;

            let kind = match ch {
                '[' => TokenKind::LSquare,
                ']' => TokenKind::RSquare,
                ':' => TokenKind::Colon,
                ch if is_ident_start(ch) => {
                    TokenKind::Ident(self.emit_word(start, is_ident_continue))
                }
                ch if ch.is_ascii_digit() => {
                    TokenKind::Lit(self.emit_word(start, |ch| ch.is_ascii_digit()))
                }
                ch if ch.is_whitespace() => {
                    self.eat_while(char::is_whitespace);
                    continue;
                }
                _ => return Some(Err(Error::UnknownChar(ch))),
            };

            return Some(self.emit(kind, start));
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}
