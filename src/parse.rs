use crate::error::ParseError;
use crate::lexer::{validate_token, Symbol, CLOSE, OPEN};
use crate::FloatExt;

/// Deepest parenthesis nesting accepted by [`parse_tokens`].
pub const MAX_DEPTH: usize = 256;

/// One element of a parenthesized group.
///
/// Siblings are kept in source order and are not combined here; operator
/// precedence is applied later by [`Postfix::from_group`](crate::Postfix::from_group).
#[derive(Clone, Debug, PartialEq)]
pub enum Node<Real> {
    Leaf(Symbol<Real>),
    Group(Vec<Node<Real>>),
}

/// Groups `tokens` by their parentheses.
///
/// The whole token sequence forms an implicit outermost group, so `2 + x` and
/// `( 2 + x )` are both accepted. The returned vector holds that group's
/// children.
pub fn parse_tokens<Real: FloatExt>(tokens: &[&str]) -> Result<Vec<Node<Real>>, ParseError> {
    if tokens.is_empty() {
        return Err(ParseError::UnexpectedEnd);
    }
    let mut cursor = Cursor {
        tokens,
        position: 0,
        depth: 0,
    };
    let mut root = Vec::new();
    while cursor.peek().is_some() {
        root.push(cursor.parse_node()?);
    }
    Ok(root)
}

/// Read position into an immutable token slice, shared by every level of the
/// recursive descent.
struct Cursor<'t, 'a> {
    tokens: &'t [&'a str],
    position: usize,
    depth: usize,
}

impl<'t, 'a> Cursor<'t, 'a> {
    fn peek(&self) -> Option<&'a str> {
        self.tokens.get(self.position).copied()
    }

    fn advance(&mut self) -> Option<&'a str> {
        let token = self.peek()?;
        self.position += 1;
        Some(token)
    }

    fn parse_node<Real: FloatExt>(&mut self) -> Result<Node<Real>, ParseError> {
        match self.advance() {
            None => Err(ParseError::UnexpectedEnd),
            Some(OPEN) => {
                if self.depth == MAX_DEPTH {
                    return Err(ParseError::TooDeep { max: MAX_DEPTH });
                }
                self.depth += 1;
                let group = self.parse_group();
                self.depth -= 1;
                group.map(Node::Group)
            }
            Some(CLOSE) => Err(ParseError::UnexpectedClose),
            Some(token) => validate_token(token).map(Node::Leaf),
        }
    }

    /// Parses children up to and including the `)` closing the group whose `(`
    /// was just consumed.
    fn parse_group<Real: FloatExt>(&mut self) -> Result<Vec<Node<Real>>, ParseError> {
        let mut children = Vec::new();
        loop {
            match self.peek() {
                None => return Err(ParseError::MissingClose),
                Some(CLOSE) => {
                    self.position += 1;
                    break;
                }
                Some(_) => children.push(self.parse_node()?),
            }
        }
        if children.is_empty() {
            return Err(ParseError::EmptyGroup);
        }
        Ok(children)
    }
}
