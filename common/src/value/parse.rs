use super::{is_valid_contract_name, ContractId, PrincipalData, Value};
use crate::crypto::{Address, CryptoError};
use indexmap::IndexMap;
use std::{iter::Peekable, str::CharIndices};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueParseError {
    #[error("Unexpected end of input")]
    UnexpectedEnd,

    #[error("Unexpected character {ch:?} at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("Invalid number literal: {0}")]
    InvalidNumber(String),

    #[error("Invalid escape sequence: \\{0}")]
    InvalidEscape(char),

    #[error("Unknown keyword: {0}")]
    UnknownKeyword(String),

    #[error("Invalid principal {literal}: {source}")]
    InvalidPrincipal {
        literal: String,
        #[source]
        source: CryptoError,
    },

    #[error("Invalid contract name: {0}")]
    InvalidContractName(String),

    #[error("Duplicate tuple field: {0}")]
    DuplicateField(String),

    #[error("Trailing input at position {0}")]
    TrailingInput(usize),
}

/// Parse a value literal such as `u1`, `"text"`, `(some {owner: ST..., id: u2})`
///
/// Principals may be written with or without a leading `'`.
pub fn parse_value(input: &str) -> Result<Value, ValueParseError> {
    let mut parser = Parser {
        chars: input.char_indices().peekable(),
    };
    let value = parser.value()?;
    parser.skip_whitespace();
    match parser.chars.peek() {
        Some(&(pos, _)) => Err(ValueParseError::TrailingInput(pos)),
        None => Ok(value),
    }
}

struct Parser<'a> {
    chars: Peekable<CharIndices<'a>>,
}

impl Parser<'_> {
    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
    }

    fn peek(&mut self) -> Result<(usize, char), ValueParseError> {
        self.chars.peek().copied().ok_or(ValueParseError::UnexpectedEnd)
    }

    fn expect(&mut self, expected: char) -> Result<(), ValueParseError> {
        match self.chars.next() {
            Some((_, c)) if c == expected => Ok(()),
            Some((pos, ch)) => Err(ValueParseError::UnexpectedChar { ch, pos }),
            None => Err(ValueParseError::UnexpectedEnd),
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut out = String::new();
        while let Some((_, c)) = self.chars.next_if(|(_, c)| pred(*c)) {
            out.push(c);
        }
        out
    }

    fn value(&mut self) -> Result<Value, ValueParseError> {
        self.skip_whitespace();
        let (pos, c) = self.peek()?;
        match c {
            '"' => self.ascii(),
            '(' => self.wrapped(),
            '{' => self.tuple(),
            '\'' => {
                self.chars.next();
                self.principal()
            }
            'S' => self.principal(),
            '-' | '0'..='9' => self.int(),
            'u' => {
                self.chars.next();
                match self.chars.peek() {
                    Some((_, d)) if d.is_ascii_digit() => self.uint(),
                    _ => {
                        let rest = self.identifier();
                        Err(ValueParseError::UnknownKeyword(format!("u{}", rest)))
                    }
                }
            }
            c if c.is_ascii_alphabetic() => match self.identifier().as_str() {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                "none" => Ok(Value::Optional(None)),
                other => Err(ValueParseError::UnknownKeyword(other.to_string())),
            },
            ch => Err(ValueParseError::UnexpectedChar { ch, pos }),
        }
    }

    fn identifier(&mut self) -> String {
        self.take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '?' | '!'))
    }

    fn uint(&mut self) -> Result<Value, ValueParseError> {
        let digits = self.take_while(|c| c.is_ascii_digit());
        digits
            .parse::<u128>()
            .map(Value::UInt)
            .map_err(|_| ValueParseError::InvalidNumber(format!("u{}", digits)))
    }

    fn int(&mut self) -> Result<Value, ValueParseError> {
        let mut literal = String::new();
        if self.chars.next_if(|(_, c)| *c == '-').is_some() {
            literal.push('-');
        }
        literal.push_str(&self.take_while(|c| c.is_ascii_digit()));
        literal
            .parse::<i128>()
            .map(Value::Int)
            .map_err(|_| ValueParseError::InvalidNumber(literal))
    }

    fn ascii(&mut self) -> Result<Value, ValueParseError> {
        self.expect('"')?;
        let mut out = String::new();
        loop {
            match self.chars.next() {
                None => return Err(ValueParseError::UnexpectedEnd),
                Some((_, '"')) => return Ok(Value::Ascii(out)),
                Some((_, '\\')) => {
                    let (_, escaped) = self.chars.next().ok_or(ValueParseError::UnexpectedEnd)?;
                    out.push(match escaped {
                        '"' => '"',
                        '\\' => '\\',
                        'n' => '\n',
                        't' => '\t',
                        'r' => '\r',
                        other => return Err(ValueParseError::InvalidEscape(other)),
                    });
                }
                Some((_, c)) => out.push(c),
            }
        }
    }

    fn principal(&mut self) -> Result<Value, ValueParseError> {
        let literal = self.take_while(|c| c.is_ascii_alphanumeric());
        let issuer: Address =
            literal
                .parse()
                .map_err(|source| ValueParseError::InvalidPrincipal {
                    literal: literal.clone(),
                    source,
                })?;

        if self.chars.next_if(|(_, c)| *c == '.').is_none() {
            return Ok(Value::Principal(PrincipalData::Standard(issuer)));
        }

        let name = self.take_while(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !is_valid_contract_name(&name) {
            return Err(ValueParseError::InvalidContractName(name));
        }
        Ok(Value::Principal(PrincipalData::Contract(ContractId::new(
            issuer, name,
        ))))
    }

    fn wrapped(&mut self) -> Result<Value, ValueParseError> {
        self.expect('(')?;
        self.skip_whitespace();
        let keyword = self.identifier();
        let inner = Box::new(self.value()?);
        self.skip_whitespace();
        self.expect(')')?;

        match keyword.as_str() {
            "some" => Ok(Value::Optional(Some(inner))),
            "ok" => Ok(Value::Response(Ok(inner))),
            "err" => Ok(Value::Response(Err(inner))),
            _ => Err(ValueParseError::UnknownKeyword(keyword)),
        }
    }

    fn tuple(&mut self) -> Result<Value, ValueParseError> {
        self.expect('{')?;
        let mut fields = IndexMap::new();

        self.skip_whitespace();
        if self.chars.next_if(|(_, c)| *c == '}').is_some() {
            return Ok(Value::Tuple(fields));
        }

        loop {
            self.skip_whitespace();
            let (pos, ch) = self.peek()?;
            let name = self.identifier();
            if name.is_empty() {
                return Err(ValueParseError::UnexpectedChar { ch, pos });
            }
            self.skip_whitespace();
            self.expect(':')?;
            let value = self.value()?;
            if fields.insert(name.clone(), value).is_some() {
                return Err(ValueParseError::DuplicateField(name));
            }

            self.skip_whitespace();
            match self.chars.next() {
                Some((_, ',')) => continue,
                Some((_, '}')) => return Ok(Value::Tuple(fields)),
                Some((pos, ch)) => return Err(ValueParseError::UnexpectedChar { ch, pos }),
                None => return Err(ValueParseError::UnexpectedEnd),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types;

    #[test]
    fn test_scalars() {
        assert_eq!(parse_value("u1").unwrap(), types::uint(1));
        assert_eq!(parse_value("-42").unwrap(), types::int(-42));
        assert_eq!(parse_value(" true ").unwrap(), types::bool(true));
        assert_eq!(parse_value("none").unwrap(), types::none());
        assert_eq!(
            parse_value(r#""a \"b\" \\ c""#).unwrap(),
            types::ascii("a \"b\" \\ c")
        );
    }

    #[test]
    fn test_nested_literal_from_receipt() {
        let owner = Address::derive_account("wallet_1");
        let literal = format!(
            "(some {{owner: {}, details: \"Property 1 details\"}})",
            owner
        );
        let value = parse_value(&literal).unwrap();
        assert_eq!(value, literal);
        assert_eq!(
            value
                .as_optional()
                .flatten()
                .and_then(Value::as_tuple)
                .and_then(|t| t.get("owner"))
                .and_then(Value::as_standard_principal),
            Some(&owner)
        );
    }

    #[test]
    fn test_quoted_and_contract_principals() {
        let issuer = Address::derive_account("deployer");
        assert_eq!(
            parse_value(&format!("'{}", issuer)).unwrap(),
            types::principal(issuer)
        );

        let contract = parse_value(&format!("'{}.land-registry", issuer)).unwrap();
        assert_eq!(contract, format!("{}.land-registry", issuer));
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_value(""), Err(ValueParseError::UnexpectedEnd));
        assert_eq!(parse_value("u1 u2"), Err(ValueParseError::TrailingInput(3)));
        assert_eq!(
            parse_value("maybe"),
            Err(ValueParseError::UnknownKeyword("maybe".into()))
        );
        assert_eq!(
            parse_value("(just u1)"),
            Err(ValueParseError::UnknownKeyword("just".into()))
        );
        assert_eq!(
            parse_value("{a: u1, a: u2}"),
            Err(ValueParseError::DuplicateField("a".into()))
        );
        assert_eq!(
            parse_value(r#""\q""#),
            Err(ValueParseError::InvalidEscape('q'))
        );
        assert!(matches!(
            parse_value("STXYZ"),
            Err(ValueParseError::InvalidPrincipal { .. })
        ));
        assert!(matches!(
            parse_value("u340282366920938463463374607431768211456"),
            Err(ValueParseError::InvalidNumber(_))
        ));
    }

    #[test]
    fn test_empty_tuple() {
        assert_eq!(parse_value("{ }").unwrap(), Value::Tuple(IndexMap::new()));
    }

    proptest::proptest! {
        #[test]
        fn prop_literal_roundtrip(
            id in proptest::num::u128::ANY,
            n in proptest::num::i128::ANY,
            details in "[ -~]{0,64}",
            flag in proptest::bool::ANY,
        ) {
            let value = types::ok(types::tuple([
                ("id", types::uint(id)),
                ("n", types::int(n)),
                ("details", types::some(types::ascii(details))),
                ("flag", types::bool(flag)),
            ]));
            let parsed = parse_value(&value.to_string()).unwrap();
            proptest::prop_assert_eq!(parsed, value);
        }
    }
}
