use crate::{Error, Result, Token, TokenKind, Tokenizer};

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ArrayLen<'a> {
    Num(usize),
    /// named constant, resolved by whoever consumes the expression.
    Ident(&'a str),
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Expr<'a> {
    Ident(&'a str),
    Array {
        expr: Box<Expr<'a>>,
        len: ArrayLen<'a>,
    },
}

/// `name: type` pair.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct FieldDecl<'a> {
    pub name: &'a str,
    pub ty: Expr<'a>,
}

#[derive(Debug, Clone)]
struct Parser<'a> {
    tokenizer: Tokenizer<'a>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            tokenizer: Tokenizer::new(input),
        }
    }

    #[inline(always)]
    fn next_token(&mut self) -> Result<Option<Token<'a>>> {
        self.tokenizer.next().transpose()
    }

    #[inline(always)]
    fn expect_token<F>(&mut self, f: F) -> Result<Token<'a>>
    where
        F: FnOnce(&TokenKind<'a>) -> bool,
    {
        match self.next_token()? {
            Some(token) if f(&token.kind) => Ok(token),
            Some(token) => Err(Error::UnexpectedToken(token.span.start)),
            None => Err(Error::UnexpectedEof),
        }
    }

    fn expect_ident(&mut self) -> Result<&'a str> {
        let token = self.expect_token(|k| matches!(k, TokenKind::Ident(_)))?;
        let TokenKind::Ident(ident) = token.kind else {
            unreachable!();
        };
        Ok(ident)
    }

    fn parse_len(&mut self) -> Result<ArrayLen<'a>> {
        let identorlit = self.expect_token(|_| true)?;
        let len = match identorlit.kind {
            TokenKind::Ident(ident) => ArrayLen::Ident(ident),
            TokenKind::Lit(lit) => lit
                .parse::<usize>()
                .map(ArrayLen::Num)
                .map_err(|_| Error::UnexpectedToken(identorlit.span.start))?,
            _ => return Err(Error::UnexpectedToken(identorlit.span.start)),
        };
        let _rsquare = self.expect_token(|k| matches!(k, TokenKind::RSquare))?;
        Ok(len)
    }

    fn parse_type(&mut self) -> Result<Expr<'a>> {
        let mut expr = Expr::Ident(self.expect_ident()?);
        while let Some(next) = self.next_token()? {
            match next.kind {
                TokenKind::LSquare => {
                    expr = Expr::Array {
                        expr: Box::new(expr),
                        len: self.parse_len()?,
                    };
                }
                _ => return Err(Error::UnexpectedToken(next.span.start)),
            }
        }
        Ok(expr)
    }

    fn parse_field(&mut self) -> Result<FieldDecl<'a>> {
        let name = self.expect_ident()?;
        let _colon = self.expect_token(|k| matches!(k, TokenKind::Colon))?;
        let ty = self.parse_type()?;
        Ok(FieldDecl { name, ty })
    }
}

/// parses a type string such as `float32[2]`.
pub fn parse(input: &str) -> Result<Expr<'_>> {
    Parser::new(input).parse_type()
}

/// parses a field declaration such as `samples: int16[8]`.
pub fn parse_field(input: &str) -> Result<FieldDecl<'_>> {
    Parser::new(input).parse_field()
}

#[cfg(test)]
mod tests {
    use expect_test::expect;

    use super::*;

    #[test]
    fn unexpected_eof() {
        let expected = expect![[r#"
            Err(
                UnexpectedEof,
            )
        "#]];
        expected.assert_debug_eq(&parse(""));

        assert_eq!(parse("char[5"), Err(Error::UnexpectedEof));
    }

    #[test]
    fn unexpected_token() {
        let expected = expect![[r#"
            Err(
                UnexpectedToken(
                    0,
                ),
            )
        "#]];
        expected.assert_debug_eq(&parse("42"));

        assert_eq!(parse("uint8 uint8"), Err(Error::UnexpectedToken(6)));
        assert_eq!(parse("uint8[]"), Err(Error::UnexpectedToken(6)));
        assert_eq!(parse("uint8:"), Err(Error::UnexpectedToken(5)));
    }

    #[test]
    fn oversized_len() {
        assert_eq!(
            parse("uint8[99999999999999999999999]"),
            Err(Error::UnexpectedToken(6))
        );
    }

    #[test]
    fn long_input() {
        let input = format!("{}uint8 uint8", " ".repeat(65600));
        assert_eq!(parse(&input), Err(Error::InputTooLong));

        let input = format!("{}uint8{}", " ".repeat(65530), "x".repeat(20));
        assert_eq!(parse(&input), Err(Error::InputTooLong));
    }

    #[test]
    fn it_works() -> Result<()> {
        const INPUTS: [&str; 4] = ["uint64", "float32[2]", "Vec3[MAX_POINTS]", "uint8[4][2]"];

        let outputs: Vec<Result<Expr<'static>>> = INPUTS.iter().copied().map(parse).collect();

        let expected = expect![[r#"
            [
                Ok(
                    Ident(
                        "uint64",
                    ),
                ),
                Ok(
                    Array {
                        expr: Ident(
                            "float32",
                        ),
                        len: Num(
                            2,
                        ),
                    },
                ),
                Ok(
                    Array {
                        expr: Ident(
                            "Vec3",
                        ),
                        len: Ident(
                            "MAX_POINTS",
                        ),
                    },
                ),
                Ok(
                    Array {
                        expr: Array {
                            expr: Ident(
                                "uint8",
                            ),
                            len: Num(
                                4,
                            ),
                        },
                        len: Num(
                            2,
                        ),
                    },
                ),
            ]
        "#]];
        expected.assert_debug_eq(&outputs);

        Ok(())
    }

    #[test]
    fn field() {
        let expected = expect![[r#"
            Ok(
                FieldDecl {
                    name: "callsign",
                    ty: Array {
                        expr: Ident(
                            "char",
                        ),
                        len: Num(
                            8,
                        ),
                    },
                },
            )
        "#]];
        expected.assert_debug_eq(&parse_field(" callsign : char[8] "));

        assert_eq!(parse_field("callsign char[8]"), Err(Error::UnexpectedToken(9)));
    }
}
