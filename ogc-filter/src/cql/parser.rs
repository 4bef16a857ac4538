use crate::ast::{
    ArithmeticOp, CompareOp, Distance, Expression, Filter, Literal, Spatial, SpatialOp, TemporalOp,
};
use crate::errors::CqlError;
use crate::temporal::TemporalValue;
use geo_types::{Geometry, Rect};
use regex::Regex;
use std::sync::OnceLock;
use wkt::TryFromWkt;

static TEMPORAL_REGEX: OnceLock<Regex> = OnceLock::new();
static NUMBER_REGEX: OnceLock<Regex> = OnceLock::new();

/// ISO-8601 instant, optionally followed by `/` and a second instant.
fn temporal_regex() -> &'static Regex {
    TEMPORAL_REGEX.get_or_init(|| {
        let instant =
            r"\d{4}-\d{2}-\d{2}(?:[T ]\d{2}:\d{2}(?::\d{2}(?:\.\d+)?)?(?:Z|[+-]\d{2}:?\d{2})?)?";
        Regex::new(&format!("^{instant}(?:/{instant})?$")).unwrap()
    })
}

fn number_regex() -> &'static Regex {
    NUMBER_REGEX.get_or_init(|| Regex::new(r"^-?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?$").unwrap())
}

const GEOMETRY_KEYWORDS: &[&str] = &[
    "POINT",
    "LINESTRING",
    "POLYGON",
    "MULTIPOINT",
    "MULTILINESTRING",
    "MULTIPOLYGON",
    "GEOMETRYCOLLECTION",
];

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Word(String),
    QuotedName(String),
    Str(String),
    Number(String),
    Temporal(String),
    Geometry(String),
    LParen,
    RParen,
    Comma,
    Eq,
    NotEq,
    Lt,
    Lte,
    Gt,
    Gte,
    Plus,
    Minus,
    Star,
    Slash,
}

impl Token {
    fn is_keyword(&self, keyword: &str) -> bool {
        matches!(self, Token::Word(w) if w.eq_ignore_ascii_case(keyword))
    }

    /// True when a following '-' starts a negative number rather than a subtraction.
    fn expects_operand_after(&self) -> bool {
        !matches!(
            self,
            Token::Word(_)
                | Token::QuotedName(_)
                | Token::Str(_)
                | Token::Number(_)
                | Token::Temporal(_)
                | Token::Geometry(_)
                | Token::RParen
        )
    }
}

struct Tokenizer {
    input: Vec<char>,
    pos: usize,
}

impl Tokenizer {
    fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_while<F>(&mut self, predicate: F) -> String
    where
        F: Fn(char) -> bool,
    {
        let mut result = String::new();
        while let Some(ch) = self.peek() {
            if predicate(ch) {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    /// Reads text enclosed by `quote`, a doubled quote stands for itself.
    fn read_quoted(&mut self, quote: char) -> Result<String, CqlError> {
        let start = self.pos;
        self.advance();
        let mut result = String::new();
        loop {
            match self.advance() {
                Some(ch) if ch == quote => {
                    if self.peek() == Some(quote) {
                        self.advance();
                        result.push(quote);
                    } else {
                        return Ok(result);
                    }
                }
                Some(ch) => result.push(ch),
                None => return Err(CqlError::UnterminatedString(start)),
            }
        }
    }

    /// Consumes the body of a WKT literal after its keyword, if one follows.
    fn read_geometry_body(&mut self) -> Result<Option<String>, CqlError> {
        let checkpoint = self.pos;
        self.skip_whitespace();
        let modifier = self.read_while(|c| c.is_ascii_alphabetic());
        if modifier.eq_ignore_ascii_case("EMPTY") {
            return Ok(Some(" EMPTY".to_string()));
        }
        if !modifier.is_empty() && !matches!(modifier.to_ascii_uppercase().as_str(), "Z" | "M" | "ZM") {
            self.pos = checkpoint;
            return Ok(None);
        }
        self.skip_whitespace();
        if self.peek() != Some('(') {
            self.pos = checkpoint;
            return Ok(None);
        }
        let start = self.pos;
        let mut depth = 0usize;
        let mut body = String::new();
        while let Some(ch) = self.advance() {
            body.push(ch);
            match ch {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        let prefix = if modifier.is_empty() {
                            String::new()
                        } else {
                            format!(" {}", modifier)
                        };
                        return Ok(Some(format!("{}{}", prefix, body)));
                    }
                }
                _ => {}
            }
        }
        Err(CqlError::InvalidGeometry(format!(
            "unbalanced parentheses starting at position {}",
            start
        )))
    }

    fn tokenize(&mut self) -> Result<Vec<Token>, CqlError> {
        let mut tokens: Vec<Token> = Vec::new();

        while self.peek().is_some() {
            self.skip_whitespace();
            let ch = match self.peek() {
                Some(c) => c,
                None => break,
            };

            match ch {
                '(' => {
                    self.advance();
                    tokens.push(Token::LParen);
                }
                ')' => {
                    self.advance();
                    tokens.push(Token::RParen);
                }
                ',' => {
                    self.advance();
                    tokens.push(Token::Comma);
                }
                '=' => {
                    self.advance();
                    tokens.push(Token::Eq);
                }
                '<' => {
                    self.advance();
                    match self.peek() {
                        Some('=') => {
                            self.advance();
                            tokens.push(Token::Lte);
                        }
                        Some('>') => {
                            self.advance();
                            tokens.push(Token::NotEq);
                        }
                        _ => tokens.push(Token::Lt),
                    }
                }
                '>' => {
                    self.advance();
                    if self.peek() == Some('=') {
                        self.advance();
                        tokens.push(Token::Gte);
                    } else {
                        tokens.push(Token::Gt);
                    }
                }
                '!' if self.peek_at(1) == Some('=') => {
                    self.pos += 2;
                    tokens.push(Token::NotEq);
                }
                '+' => {
                    self.advance();
                    tokens.push(Token::Plus);
                }
                '*' => {
                    self.advance();
                    tokens.push(Token::Star);
                }
                '/' => {
                    self.advance();
                    tokens.push(Token::Slash);
                }
                '\'' => tokens.push(Token::Str(self.read_quoted('\'')?)),
                '"' => tokens.push(Token::QuotedName(self.read_quoted('"')?)),
                '-' => {
                    let negative = self.peek_at(1).is_some_and(|c| c.is_ascii_digit() || c == '.')
                        && tokens.last().map_or(true, Token::expects_operand_after);
                    if negative {
                        self.advance();
                        let text = self.read_while(|c| c.is_ascii_alphanumeric() || c == '.');
                        tokens.push(self.classify_numeric(format!("-{}", text))?);
                    } else {
                        self.advance();
                        tokens.push(Token::Minus);
                    }
                }
                _ if ch.is_ascii_digit() || ch == '.' => {
                    let text = self.read_while(|c| {
                        c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | ':' | '+' | '/')
                    });
                    tokens.push(self.classify_numeric(text)?);
                }
                _ if ch.is_alphabetic() || ch == '_' => {
                    let word = self.read_while(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | ':'));
                    let upper = word.to_ascii_uppercase();
                    if GEOMETRY_KEYWORDS.contains(&upper.as_str()) {
                        if let Some(body) = self.read_geometry_body()? {
                            tokens.push(Token::Geometry(format!("{}{}", upper, body)));
                            continue;
                        }
                    }
                    tokens.push(Token::Word(word));
                }
                _ => return Err(CqlError::UnexpectedCharacter(ch, self.pos)),
            }
        }

        Ok(tokens)
    }

    fn classify_numeric(&self, text: String) -> Result<Token, CqlError> {
        if temporal_regex().is_match(&text) {
            Ok(Token::Temporal(text))
        } else if number_regex().is_match(&text) {
            Ok(Token::Number(text))
        } else {
            Err(CqlError::InvalidNumber(text))
        }
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn at_keyword(&self, keyword: &str) -> bool {
        self.peek().is_some_and(|t| t.is_keyword(keyword))
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.at_keyword(keyword) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: Token, description: &'static str) -> Result<(), CqlError> {
        match self.advance() {
            Some(token) if token == expected => Ok(()),
            Some(token) => Err(CqlError::UnexpectedToken(format!(
                "{:?} (expected {})",
                token, description
            ))),
            None => Err(CqlError::UnexpectedEnd(description)),
        }
    }

    fn expect_keyword(&mut self, keyword: &'static str) -> Result<(), CqlError> {
        if self.eat_keyword(keyword) {
            return Ok(());
        }
        match self.peek() {
            Some(token) => Err(CqlError::UnexpectedToken(format!(
                "{:?} (expected {})",
                token, keyword
            ))),
            None => Err(CqlError::UnexpectedEnd(keyword)),
        }
    }

    fn parse_filter(&mut self) -> Result<Filter, CqlError> {
        let filter = self.parse_or()?;
        match self.peek() {
            None => Ok(filter),
            Some(token) => Err(CqlError::UnexpectedToken(format!("{:?}", token))),
        }
    }

    fn parse_or(&mut self) -> Result<Filter, CqlError> {
        let mut children = vec![self.parse_and()?];
        while self.eat_keyword("OR") {
            children.push(self.parse_and()?);
        }
        Ok(if children.len() == 1 {
            children.remove(0)
        } else {
            Filter::Or(children)
        })
    }

    fn parse_and(&mut self) -> Result<Filter, CqlError> {
        let mut children = vec![self.parse_unary()?];
        while self.eat_keyword("AND") {
            children.push(self.parse_unary()?);
        }
        Ok(if children.len() == 1 {
            children.remove(0)
        } else {
            Filter::And(children)
        })
    }

    fn parse_unary(&mut self) -> Result<Filter, CqlError> {
        if self.eat_keyword("NOT") {
            return Ok(Filter::not(self.parse_unary()?));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Filter, CqlError> {
        let Some(token) = self.peek().cloned() else {
            return Err(CqlError::UnexpectedEnd("a predicate"));
        };

        if token == Token::LParen && self.parenthesized_filter() {
            self.advance();
            let inner = self.parse_or()?;
            self.expect(Token::RParen, "')'")?;
            return Ok(inner);
        }

        if let Token::Word(word) = &token {
            let upper = word.to_ascii_uppercase();
            match upper.as_str() {
                "INCLUDE" => {
                    self.advance();
                    return Ok(Filter::Include);
                }
                "EXCLUDE" => {
                    self.advance();
                    return Ok(Filter::Exclude);
                }
                "IN" if self.peek_at(1) == Some(&Token::LParen) => {
                    self.advance();
                    return self.parse_feature_ids();
                }
                _ => {}
            }
            if self.peek_at(1) == Some(&Token::LParen) {
                if let Some(op) = spatial_op(&upper) {
                    self.advance();
                    return self.parse_spatial(op);
                }
            }
        }

        let left = self.parse_expression()?;
        self.parse_predicate(left)
    }

    /// Distinguishes `(a = 1 OR b = 2)` from `(a + 1) > 2` by scanning to the
    /// matching parenthesis and looking at what follows it.
    fn parenthesized_filter(&self) -> bool {
        let mut depth = 0usize;
        for (offset, token) in self.tokens[self.pos..].iter().enumerate() {
            match token {
                Token::LParen => depth += 1,
                Token::RParen => {
                    depth -= 1;
                    if depth == 0 {
                        return match self.tokens.get(self.pos + offset + 1) {
                            None | Some(Token::RParen) => true,
                            Some(next) => next.is_keyword("AND") || next.is_keyword("OR"),
                        };
                    }
                }
                _ => {}
            }
        }
        true
    }

    fn parse_feature_ids(&mut self) -> Result<Filter, CqlError> {
        self.expect(Token::LParen, "'('")?;
        let mut ids = Vec::new();
        loop {
            match self.advance() {
                Some(Token::Str(id)) | Some(Token::Number(id)) | Some(Token::Word(id)) => ids.push(id),
                Some(token) => return Err(CqlError::UnexpectedToken(format!("{:?}", token))),
                None => return Err(CqlError::UnexpectedEnd("a feature id")),
            }
            if self.peek() == Some(&Token::Comma) {
                self.advance();
            } else {
                break;
            }
        }
        self.expect(Token::RParen, "')'")?;
        Ok(Filter::Id(ids))
    }

    fn parse_spatial(&mut self, op: SpatialOp) -> Result<Filter, CqlError> {
        self.expect(Token::LParen, "'('")?;
        let left = self.parse_expression()?;
        self.expect(Token::Comma, "','")?;

        if op == SpatialOp::BBox {
            let mut bounds = [0f64; 4];
            for (index, bound) in bounds.iter_mut().enumerate() {
                if index > 0 {
                    self.expect(Token::Comma, "','")?;
                }
                *bound = self.parse_number()?;
            }
            // optional CRS, the envelope is used as given
            if self.peek() == Some(&Token::Comma) {
                self.advance();
                match self.advance() {
                    Some(Token::Str(_)) => {}
                    Some(token) => return Err(CqlError::UnexpectedToken(format!("{:?}", token))),
                    None => return Err(CqlError::UnexpectedEnd("a CRS string")),
                }
            }
            self.expect(Token::RParen, "')'")?;
            let envelope = Rect::new((bounds[0], bounds[1]), (bounds[2], bounds[3]));
            return Ok(Filter::spatial(op, left, Expression::literal(envelope)));
        }

        let right = self.parse_expression()?;
        let distance = if matches!(op, SpatialOp::DWithin | SpatialOp::Beyond) {
            self.expect(Token::Comma, "','")?;
            let value = self.parse_number()?;
            self.expect(Token::Comma, "','")?;
            let units = match self.advance() {
                Some(Token::Word(units)) | Some(Token::Str(units)) => units,
                Some(token) => return Err(CqlError::UnexpectedToken(format!("{:?}", token))),
                None => return Err(CqlError::UnexpectedEnd("distance units")),
            };
            Some(Distance { value, units })
        } else {
            None
        };
        self.expect(Token::RParen, "')'")?;
        Ok(Filter::Spatial(Spatial {
            op,
            left,
            right,
            distance,
        }))
    }

    fn parse_number(&mut self) -> Result<f64, CqlError> {
        match self.advance() {
            Some(Token::Number(text)) => text.parse().map_err(|_| CqlError::InvalidNumber(text)),
            Some(token) => Err(CqlError::UnexpectedToken(format!("{:?} (expected number)", token))),
            None => Err(CqlError::UnexpectedEnd("a number")),
        }
    }

    fn parse_predicate(&mut self, left: Expression) -> Result<Filter, CqlError> {
        let compare = match self.peek() {
            Some(Token::Eq) => Some(CompareOp::EqualTo),
            Some(Token::NotEq) => Some(CompareOp::NotEqualTo),
            Some(Token::Lt) => Some(CompareOp::LessThan),
            Some(Token::Lte) => Some(CompareOp::LessThanOrEqualTo),
            Some(Token::Gt) => Some(CompareOp::GreaterThan),
            Some(Token::Gte) => Some(CompareOp::GreaterThanOrEqualTo),
            _ => None,
        };
        if let Some(op) = compare {
            self.advance();
            let right = self.parse_expression()?;
            return Ok(Filter::compare(op, left, right));
        }

        if self.eat_keyword("IS") {
            let negated = self.eat_keyword("NOT");
            self.expect_keyword("NULL")?;
            let filter = Filter::is_null(left);
            return Ok(if negated { Filter::not(filter) } else { filter });
        }

        let negated = self.eat_keyword("NOT");
        let filter = if self.eat_keyword("BETWEEN") {
            let lower = self.parse_expression()?;
            self.expect_keyword("AND")?;
            let upper = self.parse_expression()?;
            Filter::between(left, lower, upper)
        } else if self.at_keyword("LIKE") || self.at_keyword("ILIKE") {
            let match_case = self.eat_keyword("LIKE");
            if !match_case {
                self.advance();
            }
            let pattern = match self.advance() {
                Some(Token::Str(pattern)) => pattern,
                Some(token) => return Err(CqlError::UnexpectedToken(format!("{:?}", token))),
                None => return Err(CqlError::UnexpectedEnd("a LIKE pattern")),
            };
            Filter::like_with(left, pattern, '%', '_', '\\', match_case)
        } else if self.eat_keyword("IN") {
            self.expect(Token::LParen, "'('")?;
            let mut alternatives = Vec::new();
            loop {
                let value = self.parse_expression()?;
                alternatives.push(Filter::equals(left.clone(), value));
                if self.peek() == Some(&Token::Comma) {
                    self.advance();
                } else {
                    break;
                }
            }
            self.expect(Token::RParen, "')'")?;
            if alternatives.len() == 1 {
                alternatives.remove(0)
            } else {
                Filter::Or(alternatives)
            }
        } else if !negated {
            let op = match self.peek() {
                Some(Token::Word(word)) => temporal_op(&word.to_ascii_uppercase()),
                _ => None,
            };
            let Some(op) = op else {
                return match self.peek() {
                    Some(token) => Err(CqlError::UnexpectedToken(format!("{:?}", token))),
                    None => Err(CqlError::UnexpectedEnd("a comparison operator")),
                };
            };
            self.advance();
            let right = self.parse_temporal_operand()?;
            return Ok(Filter::temporal(op, left, right));
        } else {
            return match self.peek() {
                Some(token) => Err(CqlError::UnexpectedToken(format!("{:?}", token))),
                None => Err(CqlError::UnexpectedEnd("BETWEEN, LIKE or IN")),
            };
        };

        Ok(if negated { Filter::not(filter) } else { filter })
    }

    fn parse_temporal_operand(&mut self) -> Result<Expression, CqlError> {
        match self.peek() {
            Some(Token::Temporal(text)) => {
                let value = TemporalValue::parse(text)
                    .ok_or_else(|| CqlError::InvalidTemporal(text.clone()))?;
                self.advance();
                Ok(Expression::literal(value))
            }
            _ => self.parse_expression(),
        }
    }

    fn parse_expression(&mut self) -> Result<Expression, CqlError> {
        let mut left = self.parse_term()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => ArithmeticOp::Add,
                Some(Token::Minus) => ArithmeticOp::Subtract,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.parse_term()?;
            left = Expression::arithmetic(op, left, right);
        }
    }

    fn parse_term(&mut self) -> Result<Expression, CqlError> {
        let mut left = self.parse_factor()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => ArithmeticOp::Multiply,
                Some(Token::Slash) => ArithmeticOp::Divide,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.parse_factor()?;
            left = Expression::arithmetic(op, left, right);
        }
    }

    fn parse_factor(&mut self) -> Result<Expression, CqlError> {
        let Some(token) = self.advance() else {
            return Err(CqlError::UnexpectedEnd("an expression"));
        };
        match token {
            Token::Str(value) => Ok(Expression::literal(value)),
            Token::QuotedName(name) => Ok(Expression::property(name)),
            Token::Number(text) => parse_number_literal(&text),
            Token::Temporal(text) => match TemporalValue::parse(&text) {
                Some(TemporalValue::Instant(at)) => Ok(Expression::literal(at)),
                Some(period) => Ok(Expression::literal(period)),
                None => Err(CqlError::InvalidTemporal(text)),
            },
            Token::Geometry(text) => {
                let geometry = Geometry::<f64>::try_from_wkt_str(&text)
                    .map_err(|e| CqlError::InvalidGeometry(format!("{}: {}", text, e)))?;
                Ok(Expression::literal(geometry))
            }
            Token::LParen => {
                let inner = self.parse_expression()?;
                self.expect(Token::RParen, "')'")?;
                Ok(inner)
            }
            Token::Word(word) => {
                if word.eq_ignore_ascii_case("TRUE") {
                    return Ok(Expression::literal(true));
                }
                if word.eq_ignore_ascii_case("FALSE") {
                    return Ok(Expression::literal(false));
                }
                if word.eq_ignore_ascii_case("NULL") {
                    return Ok(Expression::Literal(Literal::Null));
                }
                if self.peek() == Some(&Token::LParen) {
                    return self.parse_function(word);
                }
                Ok(Expression::property(word))
            }
            other => Err(CqlError::UnexpectedToken(format!("{:?}", other))),
        }
    }

    fn parse_function(&mut self, name: String) -> Result<Expression, CqlError> {
        self.expect(Token::LParen, "'('")?;
        let mut args = Vec::new();
        if self.peek() != Some(&Token::RParen) {
            loop {
                args.push(self.parse_expression()?);
                if self.peek() == Some(&Token::Comma) {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        self.expect(Token::RParen, "')'")?;
        Ok(Expression::function(name, args))
    }
}

fn parse_number_literal(text: &str) -> Result<Expression, CqlError> {
    let is_integer = !text.contains(['.', 'e', 'E']);
    if is_integer {
        if let Ok(value) = text.parse::<i64>() {
            return Ok(Expression::literal(value));
        }
    }
    text.parse::<f64>()
        .map(Expression::literal)
        .map_err(|_| CqlError::InvalidNumber(text.to_string()))
}

fn spatial_op(name: &str) -> Option<SpatialOp> {
    Some(match name {
        "BBOX" => SpatialOp::BBox,
        "INTERSECTS" => SpatialOp::Intersects,
        "DISJOINT" => SpatialOp::Disjoint,
        "CONTAINS" => SpatialOp::Contains,
        "WITHIN" => SpatialOp::Within,
        "CROSSES" => SpatialOp::Crosses,
        "TOUCHES" => SpatialOp::Touches,
        "OVERLAPS" => SpatialOp::Overlaps,
        "EQUALS" => SpatialOp::Equals,
        "DWITHIN" => SpatialOp::DWithin,
        "BEYOND" => SpatialOp::Beyond,
        _ => return None,
    })
}

fn temporal_op(name: &str) -> Option<TemporalOp> {
    Some(match name {
        "AFTER" => TemporalOp::After,
        "BEFORE" => TemporalOp::Before,
        "BEGINS" => TemporalOp::Begins,
        "BEGUNBY" => TemporalOp::BegunBy,
        "ENDS" => TemporalOp::Ends,
        "ENDEDBY" => TemporalOp::EndedBy,
        "DURING" => TemporalOp::During,
        "TCONTAINS" => TemporalOp::TContains,
        "TEQUALS" => TemporalOp::TEquals,
        "MEETS" => TemporalOp::Meets,
        "METBY" => TemporalOp::MetBy,
        "TOVERLAPS" => TemporalOp::TOverlaps,
        "OVERLAPPEDBY" => TemporalOp::OverlappedBy,
        "ANYINTERACTS" => TemporalOp::AnyInteracts,
        _ => return None,
    })
}

/// Parses ECQL text into a filter tree.
pub fn parse(input: &str) -> Result<Filter, CqlError> {
    let tokens = Tokenizer::new(input).tokenize()?;
    if tokens.is_empty() {
        return Err(CqlError::UnexpectedEnd("a predicate"));
    }
    tracing::trace!(count = tokens.len(), "tokenized ECQL filter");
    Parser::new(tokens).parse_filter()
}
