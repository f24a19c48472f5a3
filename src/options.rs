//! Opciones de declaraciones de puntos y de trazos.
//!
//! Ambas funciones reciben palabras ya agrupadas por [`crate::line`]:
//! tokens contiguos, sin espacios entre ellos, forman una sola palabra.

use bitflags::bitflags;

use crate::{
    arrow::{self, Arrow},
    ir::Point,
    lex,
    line::LineError,
    source::{Located, Location},
};

bitflags! {
    /// Anotaciones a emitir para un punto.
    pub struct Marks: u32 {
        /// Marcar el punto con `dot()`.
        const DOT = 0x01;

        /// Etiquetar el punto con su nombre.
        const LABEL = 0x02;
    }
}

impl Marks {
    /// Marcas que aplican cuando no hay sufijo.
    pub fn default_for(soft_label: bool) -> Marks {
        if soft_label {
            Marks::LABEL
        } else {
            Marks::all()
        }
    }

    /// Resuelve un sufijo, ya sea abreviado o canónico.
    ///
    /// En modo de etiquetado suave, `;` recupera ambas marcas.
    pub fn from_suffix(suffix: &str, soft_label: bool) -> Option<Marks> {
        match suffix {
            ":" => Some(Marks::empty()),
            "." | "d" => Some(Marks::DOT),
            ";" if soft_label => Some(Marks::all()),
            ";" | "l" => Some(Marks::LABEL),
            "dl" => Some(Marks::all()),
            _ => None,
        }
    }

    /// Forma canónica: una letra por marca activa.
    pub fn canonical(self) -> &'static str {
        match (self.contains(Marks::DOT), self.contains(Marks::LABEL)) {
            (true, true) => "dl",
            (true, false) => "d",
            (false, true) => "l",
            (false, false) => "",
        }
    }
}

/// Lado izquierdo de una declaración de punto, ya resuelto.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameOptions {
    pub name: String,
    pub dot: bool,
    pub label: Option<String>,
    pub direction: String,
}

impl NameOptions {
    /// Liga estas opciones a una expresión ya traducida.
    pub fn bind(self, expr: String) -> Point {
        Point {
            name: self.name,
            expr,
            dot: self.dot,
            label: self.label,
            direction: self.direction,
        }
    }
}

/// Opciones de un trazo.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DrawOptions {
    pub fill: String,
    pub outline: String,
    pub clip: bool,
    pub arrow: Option<Arrow>,
}

/// Interpreta `nombre [sufijo] [dirección]`.
///
/// `anchor` se señala si ni siquiera hay un nombre.
pub fn parse_name(
    words: &[Located<String>],
    anchor: &Location,
    soft_label: bool,
) -> Result<NameOptions, Located<LineError>> {
    let (name, mut rest) = match words.split_first() {
        Some(split) => split,
        None => {
            let error = LineError::MalformedNameOptions(String::from("missing point name"));
            return Err(Located::at(error, anchor.clone()));
        }
    };

    if !is_identifier(name.val()) {
        let error = LineError::MalformedNameOptions(format!("bad point name `{}`", name.val()));
        return Err(Located::at(error, name.location().clone()));
    }

    let mut marks = Marks::default_for(soft_label);
    if let Some((suffix, tail)) = rest.split_first() {
        if let Some(resolved) = Marks::from_suffix(suffix.val(), soft_label) {
            marks = resolved;
            rest = tail;
        }
    }

    let direction = match rest.split_first() {
        None => format!("dir({})", name.val()),
        Some((word, tail)) => {
            rest = tail;
            direction(word.val()).ok_or_else(|| {
                let error = LineError::MalformedNameOptions(format!("bad direction `{}`", word.val()));
                Located::at(error, word.location().clone())
            })?
        }
    };

    if let (Some(first), Some(last)) = (rest.first(), rest.last()) {
        let location = Location::span(first.location().clone(), last.location());
        return Err(Located::at(LineError::UnexpectedTrailingTokens, location));
    }

    let name = name.val().clone();
    let label = marks.contains(Marks::LABEL).then(|| lex::unescape(&name));

    Ok(NameOptions {
        dot: marks.contains(Marks::DOT),
        label,
        direction,
        name,
    })
}

/// Interpreta `[relleno... /] contorno...`.
pub fn parse_draw(
    words: &[Located<String>],
    transparency: bool,
) -> Result<DrawOptions, Located<LineError>> {
    let (fill_words, outline_words) = match words.iter().position(|word| word.val() == "/") {
        Some(slash) => (&words[..slash], &words[slash + 1..]),
        None => (&[][..], words),
    };

    let malformed = |reason: &str, location: &Location| {
        let error = LineError::MalformedDrawOptions(reason.to_owned());
        Err(Located::at(error, location.clone()))
    };

    let mut options = DrawOptions::default();

    let mut fill = Vec::new();
    for word in fill_words {
        match word.val().as_str() {
            number if is_decimal(number) => {
                if transparency {
                    fill.push(format!("opacity({})", number));
                }
            }

            pen => fill.push(pen.to_owned()),
        }
    }

    let mut outline = Vec::new();
    for word in outline_words {
        match word.val().as_str() {
            "/" => return malformed("more than one `/`", word.location()),
            "x" => options.clip = true,
            number if is_decimal(number) => outline.push(format!("linewidth({})", number)),

            other => match arrow::lookup(other) {
                Some(_) if options.arrow.is_some() => {
                    return malformed("more than one arrow", word.location())
                }

                Some(found) => options.arrow = Some(found),
                None => outline.push(other.to_owned()),
            },
        }
    }

    options.fill = fill.join("+");
    options.outline = outline.join("+");

    Ok(options)
}

/// Interpreta una dirección de etiqueta.
fn direction(word: &str) -> Option<String> {
    if let Some(pairs) = compass_pairs(word) {
        let terms: Vec<_> = pairs
            .into_iter()
            .map(|(weight, compass)| format!("{}*plain.{}", weight, compass))
            .collect();

        return Some(terms.join("+"));
    }

    let digits = word.strip_prefix('-').unwrap_or(word);
    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        return Some(format!("dir({})", word));
    }

    if !word.is_empty() && word.chars().all(|c| matches!(c, 'N' | 'S' | 'E' | 'W')) {
        return Some(format!("plain.{}", word));
    }

    None
}

/// Descompone `2N1E` en `[("2", "N"), ("1", "E")]`.
fn compass_pairs(mut word: &str) -> Option<Vec<(&str, &str)>> {
    let mut pairs = Vec::new();
    while !word.is_empty() {
        let digits = word.find(|c: char| !c.is_ascii_digit()).unwrap_or(word.len());
        let (weight, tail) = word.split_at(digits);

        let letters = tail.find(|c: char| !c.is_ascii_uppercase()).unwrap_or(tail.len());
        let (compass, tail) = tail.split_at(letters);

        if weight.is_empty() || compass.is_empty() {
            return None;
        }

        pairs.push((weight, compass));
        word = tail;
    }

    (!pairs.is_empty()).then(|| pairs)
}

/// Un identificador: una letra seguida de letras, dígitos o `_`.
pub fn is_identifier(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => chars.all(|c| c.is_ascii_alphanumeric() || c == '_'),
        _ => false,
    }
}

/// Un número decimal sin signo, como `2`, `0.5` o `.5`.
fn is_decimal(word: &str) -> bool {
    let mut digits = 0;
    let mut points = 0;

    for c in word.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => points += 1,
            _ => return false,
        }
    }

    digits > 0 && points <= 1
}
