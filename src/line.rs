//! Clasificación y análisis de líneas.
//!
//! Cada línea de entrada es, en orden de prioridad:
//! 1. Vacía, si no tiene tokens fuera de su comentario.
//! 2. Especial, si inicia con `~`: `~triangle A B C`, `~regular 5 A B C D E`.
//! 3. Declaración de punto, si contiene `=`: `A 2N1E = foot A B C`.
//! 4. Trazo con opciones, si contiene `/`: `A--B--C--cycle / 0.1 yellow / red`.
//! 5. Trazo sin opciones en cualquier otro caso.
//!
//! Los separadores `=` y `/` solo se reconocen fuera de paréntesis, de
//! forma que `(/ A 2)` sigue siendo una división.

use std::str::FromStr;
use thiserror::Error;
use unicase::Ascii as NoCase;

use crate::{
    alias::Aliases,
    config::Config,
    ir::{Draw, Operation, Statement},
    lex::{self, Token},
    options, parse,
    source::{Located, Location, SourceLine},
};

/// Posiciones de `~triangle`, en grados.
const TRIANGLE: [f64; 3] = [110.0, 210.0, 330.0];

/// Posición del primer vértice de `~regular`, en grados.
const REGULAR_START: f64 = 90.0;

/// Error de análisis de una línea.
#[non_exhaustive]
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LineError {
    #[error(transparent)]
    Expr(#[from] parse::ParserError),

    #[error("Unknown special command `{0}`")]
    UnknownSpecialCommand(String),

    #[error("`~{command}` expects {expected} point names, found {found}")]
    SpecialArity {
        command: Special,
        expected: usize,
        found: usize,
    },

    #[error("Expected a positive number of sides, found `{0}`")]
    BadSides(String),

    #[error("Malformed point name or options: {0}")]
    MalformedNameOptions(String),

    #[error("Malformed draw options: {0}")]
    MalformedDrawOptions(String),

    #[error("Unexpected trailing tokens after point options")]
    UnexpectedTrailingTokens,
}

/// Generadores de múltiples puntos.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Special {
    Triangle,
    Regular,
}

impl std::fmt::Display for Special {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt.write_str(match self {
            Special::Triangle => "triangle",
            Special::Regular => "regular",
        })
    }
}

impl FromStr for Special {
    type Err = ();

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        const SPECIALS: &[(NoCase<&str>, Special)] = &[
            (NoCase::new("triangle"), Special::Triangle),
            (NoCase::new("regular"), Special::Regular),
        ];

        SPECIALS
            .iter()
            .find(|&&(name, _)| name == NoCase::new(string))
            .map(|&(_, special)| special)
            .ok_or(())
    }
}

pub type LineResult<T> = Result<T, Located<LineError>>;

/// Analizador de líneas para una ejecución.
pub struct LineParser<'a> {
    config: &'a Config,
    aliases: &'a Aliases,
}

impl<'a> LineParser<'a> {
    pub fn new(config: &'a Config, aliases: &'a Aliases) -> Self {
        LineParser { config, aliases }
    }

    /// Analiza una línea completa, produciendo una o más sentencias.
    pub fn parse(&self, line: &SourceLine) -> LineResult<Vec<Statement>> {
        let (code, comment) = line.split_comment();
        let comment = comment.map(str::to_owned);
        let tokens = lex::tokenize(line, code);

        let first = match tokens.first() {
            None => {
                let op = Operation::Blank;
                return Ok(vec![Statement { op, comment }]);
            }

            Some(first) => first,
        };

        if *first.val() == Token::Tilde {
            let mut statements = Vec::new();
            if comment.is_some() {
                let op = Operation::Blank;
                statements.push(Statement { op, comment });
            }

            statements.extend(self.special(first.location(), &tokens[1..])?);
            return Ok(statements);
        }

        let op = if let Some(assign) = top_level(&tokens, &Token::Assign) {
            self.point(&tokens[..assign], &tokens[assign], &tokens[assign + 1..])?
        } else if let Some(slash) = top_level(&tokens, &Token::Slash) {
            let options = words(&tokens[slash + 1..]);
            self.draw(&tokens[..slash], tokens[slash].location(), &options)?
        } else {
            self.draw(&tokens, first.location(), &[])?
        };

        Ok(vec![Statement { op, comment }])
    }

    fn point(
        &self,
        name: &[Located<Token>],
        assign: &Located<Token>,
        expr: &[Located<Token>],
    ) -> LineResult<Operation> {
        let options = options::parse_name(
            &words(name),
            assign.location(),
            self.config.soft_label(),
        )?;

        let expr = self.expr(expr, assign.location())?;
        Ok(Operation::Point(options.bind(expr)))
    }

    fn draw(
        &self,
        expr: &[Located<Token>],
        anchor: &Location,
        options: &[Located<String>],
    ) -> LineResult<Operation> {
        let expr = self.expr(expr, anchor)?;
        let options::DrawOptions {
            fill,
            outline,
            clip,
            arrow,
        } = options::parse_draw(options, self.config.transparency())?;

        Ok(Operation::Draw(Draw {
            expr,
            fill,
            outline,
            clip,
            arrow,
        }))
    }

    fn special(&self, tilde: &Location, tokens: &[Located<Token>]) -> LineResult<Vec<Statement>> {
        let words = words(tokens);
        let (command, args) = match words.split_first() {
            Some(split) => split,
            None => {
                let error = LineError::UnknownSpecialCommand(String::new());
                return Err(Located::at(error, tilde.clone()));
            }
        };

        let special = Special::from_str(command.val()).map_err(|()| {
            let error = LineError::UnknownSpecialCommand(command.val().clone());
            Located::at(error, command.location().clone())
        })?;

        let arity = |expected: usize, names: &[Located<String>]| {
            if names.len() == expected {
                return Ok(());
            }

            let location = match (names.first(), names.last()) {
                (Some(first), Some(last)) => Location::span(first.location().clone(), last.location()),
                _ => command.location().clone(),
            };

            let error = LineError::SpecialArity {
                command: special,
                expected,
                found: names.len(),
            };

            Err(Located::at(error, location))
        };

        let placements: Vec<(&Located<String>, f64)> = match special {
            Special::Triangle => {
                arity(TRIANGLE.len(), args)?;
                args.iter().zip(TRIANGLE.iter().copied()).collect()
            }

            Special::Regular => {
                let (sides_word, names) = match args.split_first() {
                    Some(split) => split,
                    None => {
                        let error = LineError::BadSides(String::new());
                        return Err(Located::at(error, command.location().clone()));
                    }
                };

                let sides = match sides_word.val().parse::<usize>() {
                    Ok(sides) if sides > 0 => sides,
                    _ => {
                        let error = LineError::BadSides(sides_word.val().clone());
                        return Err(Located::at(error, sides_word.location().clone()));
                    }
                };

                arity(sides, names)?;
                names
                    .iter()
                    .enumerate()
                    .map(|(i, name)| (name, REGULAR_START + 360.0 * i as f64 / sides as f64))
                    .collect()
            }
        };

        placements
            .into_iter()
            .map(|(name, degrees)| {
                let options = options::parse_name(
                    std::slice::from_ref(name),
                    name.location(),
                    self.config.soft_label(),
                )?;

                let op = Operation::Point(options.bind(format!("dir({})", degrees)));
                Ok(Statement { op, comment: None })
            })
            .collect()
    }

    fn expr(&self, tokens: &[Located<Token>], anchor: &Location) -> LineResult<String> {
        parse::parse(tokens, anchor)
            .map(|expr| expr.render(self.aliases))
            .map_err(|error| error.map(LineError::from))
    }
}

/// Agrupa tokens contiguos en palabras.
///
/// `dir(30)` o `linewidth(2)` forman una sola palabra, mientras que
/// `/`, `=` y `~` siempre son palabras independientes.
pub fn words(tokens: &[Located<Token>]) -> Vec<Located<String>> {
    let mut words: Vec<Located<String>> = Vec::new();
    let mut extendable = false;

    for token in tokens {
        let standalone = matches!(token.val(), Token::Slash | Token::Assign | Token::Tilde);
        let adjacent = words
            .last()
            .map_or(false, |last| last.location().end() == token.location().start());

        match words.pop() {
            Some(last) if extendable && adjacent && !standalone => {
                let (location, mut text) = last.split();
                text.push_str(token.val().text());
                words.push(Located::at(text, Location::span(location, token.location())));
            }

            last => {
                words.extend(last);
                words.push(token.clone().map(|token| token.text().to_owned()));
            }
        }

        extendable = !standalone;
    }

    words
}

/// Busca un token fuera de paréntesis.
fn top_level(tokens: &[Located<Token>], target: &Token) -> Option<usize> {
    let mut depth = 0usize;
    tokens.iter().position(|token| match token.val() {
        Token::OpenParen => {
            depth += 1;
            false
        }

        Token::CloseParen => {
            depth = depth.saturating_sub(1);
            false
        }

        other => depth == 0 && other == target,
    })
}
