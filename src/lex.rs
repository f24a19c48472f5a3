//! Análisis léxico.
//!
//! # Tokenization
//! Esta es la primera fase del traductor. Descompone el código de una
//! línea (sin su comentario) en unidades léxicas. Los espacios en blanco
//! se descartan y separan palabras. Cada token emitido está asociado a
//! su rango de columnas en la línea original, lo cual permite señalar
//! errores de fases posteriores con precisión.
//!
//! # Reglas importantes
//! - `~`, `=`, `,`, `(` y `)` son siempre tokens independientes,
//!   aunque no estén rodeados de espacios.
//! - `/` es un token independiente solo si no está pegado a una palabra.
//!   En `(1/2, 1)` o `yellow/red` forma parte de la palabra, mientras
//!   que en `A--B / red` o `(/ A 2)` separa.
//! - Cualquier otra secuencia de caracteres que no sean espacios forma
//!   una palabra. Operadores como `+` o `--` son palabras.
//! - Los caracteres ilegales en identificadores del lenguaje objetivo
//!   se reescriben dentro de las palabras (ver [`escape`]).
//!
//! # Errores
//! El lexer es total: no existe entrada que no pueda tokenizarse.

use crate::source::{Located, Position, SourceLine};
use std::{
    fmt::{self, Display},
    iter::Peekable,
    str::Chars,
};

/// Reescrituras de caracteres ilegales en identificadores.
const ESCAPES: &[(char, &str)] = &[
    ('\'', "_prime"),
    ('"', "_dprime"),
    ('{', "_lbrace"),
    ('}', "_rbrace"),
];

/// Objeto resultante del análisis léxico.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Palabra: identificador, número, operador u opción.
    Word(String),

    /// `~`
    Tilde,

    /// `=`
    Assign,

    /// `/`
    Slash,

    /// `,`
    Comma,

    /// `(`
    OpenParen,

    /// `)`
    CloseParen,
}

impl Token {
    /// Texto que representa al token, ya escapado.
    pub fn text(&self) -> &str {
        use Token::*;

        match self {
            Word(word) => word,
            Tilde => "~",
            Assign => "=",
            Slash => "/",
            Comma => ",",
            OpenParen => "(",
            CloseParen => ")",
        }
    }
}

impl Display for Token {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Word(word) => write!(fmt, "word `{}`", word),
            symbol => write!(fmt, "`{}`", symbol.text()),
        }
    }
}

/// Máquina de estados para análisis léxico de una línea.
pub struct Lexer<'a> {
    line: &'a SourceLine,
    chars: Peekable<Chars<'a>>,
    state: State,
    start: Position,
    next: Position,
}

/// Posibles estados del lexer.
enum State {
    /// Estado que ocurre antes de encontrar el inicio de un token.
    Start,

    /// Estado de completitud; siempre emite el token incluido
    /// y pasa a [`State::Start`].
    Complete(Token),

    /// Palabra en construcción, ya escapada.
    Word(String),

    /// Se leyó `/` fuera de una palabra; falta decidir si inicia una.
    Slash,
}

impl<'a> Lexer<'a> {
    /// Crea un lexer sobre `code`, que debe ser prefijo de la línea.
    pub fn new(line: &'a SourceLine, code: &'a str) -> Self {
        Lexer {
            line,
            chars: code.chars().peekable(),
            state: State::Start,
            start: line.start(),
            next: line.start(),
        }
    }

    fn lex(&mut self) -> Option<Token> {
        use State::*;

        loop {
            let next_char = self.chars.peek().copied();

            // La posición de origen se mueve junto a la posición
            // siguiente siempre que no se haya encontrado una
            // frontera de token
            if let Start = self.state {
                self.start = self.next;
            }

            match (&mut self.state, next_char) {
                (Start, None) => return None,
                (Start, Some('~')) => self.state = Complete(Token::Tilde),
                (Start, Some('=')) => self.state = Complete(Token::Assign),
                (Start, Some('/')) => self.state = Slash,
                (Start, Some(',')) => self.state = Complete(Token::Comma),
                (Start, Some('(')) => self.state = Complete(Token::OpenParen),
                (Start, Some(')')) => self.state = Complete(Token::CloseParen),
                (Start, Some(c)) if c.is_whitespace() => (),
                (Start, Some(c)) => {
                    let mut word = String::new();
                    escape(c, &mut word);
                    self.state = Word(word);
                }

                // Emisión retardada, el carácter ya fue consumido
                (Complete(token), _) => return Some(std::mem::replace(token, Token::Tilde)),

                (Slash, Some(c)) if is_word_char(c) => {
                    let mut word = String::from("/");
                    escape(c, &mut word);
                    self.state = Word(word);
                }

                (Slash, _) => return Some(Token::Slash),

                (Word(word), Some(c)) if is_word_char(c) => escape(c, word),
                (Word(word), _) => return Some(Token::Word(std::mem::take(word))),
            }

            if let Some(c) = self.chars.next() {
                self.next = self.next.after(c);
            }
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Located<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.lex()?;
        self.state = State::Start;

        let location = self.line.location(self.start..self.next);
        Some(Located::at(token, location))
    }
}

/// Tokeniza el código de una línea.
pub fn tokenize(line: &SourceLine, code: &str) -> Vec<Located<Token>> {
    Lexer::new(line, code).collect()
}

/// Agrega un carácter a una palabra, reescribiéndolo si es necesario.
pub fn escape(c: char, word: &mut String) {
    match ESCAPES.iter().find(|&&(from, _)| from == c) {
        Some((_, to)) => word.push_str(to),
        None => word.push(c),
    }
}

/// Revierte [`escape`], para mostrar nombres en etiquetas.
pub fn unescape(word: &str) -> String {
    // `_dprime` no contiene a `_prime`, el orden es indiferente
    ESCAPES
        .iter()
        .fold(word.to_owned(), |word, &(c, escaped)| {
            word.replace(escaped, &c.to_string())
        })
}

/// Determina si un carácter puede pertenecer a una palabra.
fn is_word_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '~' | '=' | ',' | '(' | ')')
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::source;

    fn lex(input: &str) -> Vec<(Token, u32, u32)> {
        let line = source::consume(input.as_bytes(), "<test>")
            .next()
            .unwrap()
            .unwrap();

        tokenize(&line, line.text())
            .into_iter()
            .map(|token| {
                let (location, token) = token.split();
                (token, location.start().column(), location.end().column())
            })
            .collect()
    }

    fn word(text: &str) -> Token {
        Token::Word(text.to_owned())
    }

    #[test]
    fn structural_symbols_split_words() {
        let tokens: Vec<_> = lex("A=(1,2) / red").into_iter().map(|t| t.0).collect();
        assert_eq!(
            tokens,
            vec![
                word("A"),
                Token::Assign,
                Token::OpenParen,
                word("1"),
                Token::Comma,
                word("2"),
                Token::CloseParen,
                Token::Slash,
                word("red"),
            ]
        );
    }

    #[test]
    fn whitespace_collapses() {
        let tokens = lex("  +   A\t B ");
        assert_eq!(
            tokens,
            vec![(word("+"), 3, 4), (word("A"), 7, 8), (word("B"), 10, 11)]
        );
    }

    #[test]
    fn empty_line_has_no_tokens() {
        assert!(lex("\n").is_empty());
        assert!(lex("   \t").is_empty());
    }

    #[test]
    fn illegal_characters_are_escaped() {
        let tokens = lex("A' B\" C_{1}");
        assert_eq!(tokens[0].0, word("A_prime"));
        assert_eq!(tokens[1].0, word("B_dprime"));
        assert_eq!(tokens[2].0, word("C__lbrace1_rbrace"));

        // Las columnas corresponden al texto original
        assert_eq!((tokens[0].1, tokens[0].2), (1, 3));
    }

    #[test]
    fn unescape_restores_names() {
        assert_eq!(unescape("A_prime"), "A'");
        assert_eq!(unescape("B_dprime"), "B\"");
        assert_eq!(unescape("C__lbrace1_rbrace"), "C_{1}");
        assert_eq!(unescape("plain"), "plain");
    }

    #[test]
    fn glued_slashes_stay_in_words() {
        let tokens = lex("(1/2, 1) yellow/red /2 (/ A 2)");
        let texts: Vec<_> = tokens.iter().map(|t| t.0.clone()).collect();
        assert_eq!(
            texts,
            vec![
                Token::OpenParen,
                word("1/2"),
                Token::Comma,
                word("1"),
                Token::CloseParen,
                word("yellow/red"),
                word("/2"),
                Token::OpenParen,
                Token::Slash,
                word("A"),
                word("2"),
                Token::CloseParen,
            ]
        );

        assert_eq!((tokens[1].1, tokens[1].2), (2, 5));
        assert_eq!((tokens[8].1, tokens[8].2), (25, 26));
    }

    #[test]
    fn arrows_and_operators_are_words() {
        let tokens: Vec<_> = lex("A--B <-> ->-").into_iter().map(|t| t.0).collect();
        assert_eq!(tokens, vec![word("A--B"), word("<->"), word("->-")]);
    }
}
