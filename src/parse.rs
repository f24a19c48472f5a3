//! Análisis sintáctico y traducción de expresiones.
//!
//! # Gramática
//! Las expresiones usan notación prefija separada por espacios, con
//! paréntesis para agrupar:
//!
//! ```text
//! expr     := element+
//! element  := item (',' item)*
//! item     := word | '(' expr ')'
//! ```
//!
//! Un `element` con comas es una tupla. Una secuencia de un solo
//! elemento es ese mismo elemento, de forma que `((a))` equivale a `a`.
//! Una secuencia de dos o más elementos es una aplicación cuyo primer
//! hijo es la cabeza.
//!
//! # Traducción
//! La cabeza de una aplicación determina cómo se traduce:
//! - `+ A B C` es una cadena de operadores: `(A + B + C)`.
//! - `rotate 90 P` es una transformación: `rotate(90) * P`.
//! - Un alias registrado delega a su propia regla.
//! - Cualquier otro identificador es una llamada: `f(a, b)`.

use thiserror::Error;

use crate::{
    alias::{self, Aliases},
    lex::Token,
    source::{Located, Location},
};

/// Árbol sintáctico de una expresión.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Texto crudo.
    Leaf(String),

    /// Literal de tupla, `(a,b)`.
    Tuple(Vec<Expr>),

    /// Secuencia no vacía. Con un solo hijo denota agrupación explícita.
    Apply(Vec<Expr>),
}

#[non_exhaustive]
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParserError {
    #[error("Mismatched parentheses in expression")]
    MismatchedParentheses,

    #[error("Expected an expression")]
    EmptyExpression,

    #[error("Comma without a neighboring operand")]
    DanglingComma,
}

pub type Parse<T> = Result<T, Located<ParserError>>;

/// Construye el árbol de una expresión a partir de sus tokens.
///
/// `anchor` es la ubicación a reportar si no hay tokens que señalar,
/// usualmente el separador que precede a la expresión.
pub fn parse(tokens: &[Located<Token>], anchor: &Location) -> Parse<Expr> {
    let mut parser = Parser {
        tokens: tokens.iter().peekable(),
        last_known: anchor.clone(),
    };

    let elements = parser.elements()?;
    match parser.tokens.next() {
        None => parser.reduce(elements),

        // Solo un `)` puede detener una secuencia de nivel superior
        Some(token) => Err(Located::at(
            ParserError::MismatchedParentheses,
            token.location().clone(),
        )),
    }
}

struct Parser<'a> {
    tokens: std::iter::Peekable<std::slice::Iter<'a, Located<Token>>>,
    last_known: Location,
}

impl<'a> Parser<'a> {
    fn elements(&mut self) -> Parse<Vec<Expr>> {
        let mut elements = Vec::new();
        while !matches!(self.peek(), None | Some(Token::CloseParen)) {
            elements.push(self.element()?);
        }

        Ok(elements)
    }

    fn reduce(&self, mut elements: Vec<Expr>) -> Parse<Expr> {
        if elements.len() > 1 {
            return Ok(Expr::Apply(elements));
        }

        match elements.pop() {
            Some(only) => Ok(only),
            None => self.fail(ParserError::EmptyExpression),
        }
    }

    fn element(&mut self) -> Parse<Expr> {
        let first = self.item()?;
        if self.peek() != Some(&Token::Comma) {
            return Ok(first);
        }

        let mut items = vec![first];
        while self.peek() == Some(&Token::Comma) {
            self.next();
            match self.peek() {
                None | Some(Token::CloseParen) | Some(Token::Comma) => {
                    return self.fail(ParserError::DanglingComma)
                }

                _ => items.push(self.item()?),
            }
        }

        Ok(Expr::Tuple(items))
    }

    fn item(&mut self) -> Parse<Expr> {
        let token = match self.next() {
            Some(token) => token,
            None => return self.fail(ParserError::EmptyExpression),
        };

        match token.val() {
            Token::OpenParen => {
                let open = token.location().clone();
                let elements = self.elements()?;

                match self.next() {
                    Some(close) if *close.val() == Token::CloseParen => self.reduce(elements),
                    _ => Err(Located::at(ParserError::MismatchedParentheses, open)),
                }
            }

            Token::Comma => self.fail(ParserError::DanglingComma),

            // `/`, `=` y `~` dentro de una expresión son operadores
            other => Ok(Expr::Leaf(other.text().to_owned())),
        }
    }

    fn peek(&mut self) -> Option<&'a Token> {
        self.tokens.peek().map(|&token| token.val())
    }

    fn next(&mut self) -> Option<&'a Located<Token>> {
        let token = self.tokens.next()?;
        self.last_known = token.location().clone();
        Some(token)
    }

    fn fail<T>(&self, error: ParserError) -> Parse<T> {
        Err(Located::at(error, self.last_known.clone()))
    }
}

impl Expr {
    /// Traduce la expresión a texto del lenguaje objetivo.
    pub fn render(&self, aliases: &Aliases) -> String {
        match self {
            Expr::Leaf(text) => text.clone(),

            Expr::Tuple(items) => {
                let items: Vec<_> = items.iter().map(|item| item.render(aliases)).collect();
                format!("({})", items.join(","))
            }

            Expr::Apply(children) => match children.as_slice() {
                [] => String::new(),
                [group] => format!("({})", group.render(aliases)),
                [head, args @ ..] => {
                    let head = head.render(aliases);
                    let args: Vec<_> = args.iter().map(|arg| arg.render(aliases)).collect();

                    render_application(&head, &args, aliases)
                }
            },
        }
    }
}

/// Traduce una aplicación ya reducida a cabeza y argumentos traducidos.
fn render_application(head: &str, args: &[String], aliases: &Aliases) -> String {
    if !is_function_name(head) {
        return match args {
            [operand] => format!("({}{})", head, operand),
            _ => format!("({})", args.join(&format!(" {} ", head))),
        };
    }

    if alias::is_transform(head) {
        // Siempre hay al menos un argumento: la cabeza no está sola
        if let Some((operand, parameters)) = args.split_last() {
            return format!("{}({}) * {}", head, parameters.join(", "), operand);
        }
    }

    aliases
        .apply(head, args)
        .unwrap_or_else(|| format!("{}({})", head, args.join(", ")))
}

/// Determina si una cabeza es un identificador y no un operador.
fn is_function_name(head: &str) -> bool {
    let mut chars = head.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }

        _ => false,
    }
}
