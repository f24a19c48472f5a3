//! Rastreo de ubicaciones originales en código fuente.
//!
//! Cada línea de entrada se registra en un [`Source`] compartido a
//! medida que se lee, de forma que los errores de cualquier fase
//! posterior puedan citar la línea original exacta donde ocurrieron.
//! Los tokens y errores se asocian a un rango de columnas por medio
//! de [`Located`].

use std::{
    cell::RefCell,
    fmt::{self, Debug, Display, Formatter},
    io::{self, BufRead},
    ops::Range,
    rc::Rc,
};

/// Ancho de los divisores de tabulador.
const TAB_STOP: u32 = 4;

/// Marcador de inicio de comentario de línea.
const COMMENT: char = '#';

/// Un objeto cualquiera con una posición original asociada.
#[derive(Debug, Clone, PartialEq)]
pub struct Located<T> {
    location: Location,
    value: T,
}

impl<T> Located<T> {
    /// Obtiene el valor.
    pub fn val(&self) -> &T {
        &self.value
    }

    /// Obtiene la ubicación.
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Descarta la ubicación y toma ownership del valor.
    pub fn into_inner(self) -> T {
        self.value
    }

    /// Descompone y toma ownership de las dos partes.
    pub fn split(self) -> (Location, T) {
        (self.location, self.value)
    }

    /// Construye a partir de un valor y una ubicación.
    pub fn at(value: T, location: Location) -> Self {
        Located { value, location }
    }

    /// Transforma el valor con la misma ubicación.
    pub fn map<U, F>(self, map: F) -> Located<U>
    where
        F: FnOnce(T) -> U,
    {
        Located {
            value: map(self.value),
            location: self.location,
        }
    }
}

impl<T> AsRef<T> for Located<T> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}

/// Una ubicación está conformada por un origen y un rango de posiciones.
#[derive(Clone)]
pub struct Location {
    from: Rc<Source>,
    position: Range<Position>,
}

impl Location {
    /// Unifica un rango de ubicaciones. Se asume el mismo origen.
    pub fn span(from: Location, to: &Location) -> Self {
        Location {
            from: from.from,
            position: from.position.start..to.position.end,
        }
    }

    /// Obtiene la posición de inicio.
    pub fn start(&self) -> Position {
        self.position.start
    }

    /// Obtiene la posición de fin (exclusiva).
    pub fn end(&self) -> Position {
        self.position.end
    }

    /// Texto de la línea donde inicia la ubicación.
    ///
    /// Los tabuladores se expanden a espacios, de forma que cada
    /// carácter quede en la columna que le asigna [`Position`].
    pub fn line_text(&self) -> String {
        let line = self.position.start.line;
        self.from.with_line(line, |text| {
            let mut expanded = String::with_capacity(text.len());
            let mut position = Position { line, column: 1 };

            for c in text.chars() {
                let next = position.after(c);
                match c {
                    '\t' => (position.column..next.column).for_each(|_| expanded.push(' ')),
                    c => expanded.push(c),
                }

                position = next;
            }

            expanded
        })
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.from, &other.from) && self.position == other.position
    }
}

impl Display for Location {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}:", self.from.name)?;

        let Range { start, end } = self.position;
        if end == start.advance() || end == start {
            // Solo se señala una columna en específico
            write!(formatter, "{}", start)
        } else {
            write!(formatter, "[{}-{}]", start, end.back())
        }
    }
}

impl Debug for Location {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        <Self as Display>::fmt(self, formatter)
    }
}

/// Una posición línea-columna en un archivo.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Position {
    line: u32,
    column: u32,
}

impl Position {
    /// Obtiene el número de línea.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Obtiene el número de columna.
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Incrementa el número de columna.
    pub fn advance(self) -> Position {
        Position {
            line: self.line,
            column: self.column + 1,
        }
    }

    /// Decrementa el número de columna.
    pub fn back(self) -> Position {
        Position {
            line: self.line,
            column: self.column - 1,
        }
    }

    /// Ajusta la posición a la siguiente columna de tabulador.
    pub fn tab(self) -> Position {
        let column = 1 + ((self.column - 1) / TAB_STOP + 1) * TAB_STOP;
        Position {
            line: self.line,
            column,
        }
    }

    /// Posición que sigue a un carácter dado que inicia en esta.
    pub fn after(self, c: char) -> Position {
        match c {
            '\t' => self.tab(),
            _ => self.advance(),
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position { line: 1, column: 1 }
    }
}

impl Display for Position {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}:{}", self.line, self.column)
    }
}

/// Nombre de origen e histórico interior de líneas.
pub struct Source {
    name: String,
    lines: RefCell<Vec<String>>,
}

impl Source {
    /// Invoca un closure sobre el texto de una línea ya leída.
    ///
    /// Las líneas que todavía no se han leído se observan vacías.
    fn with_line<F, R>(&self, line: u32, f: F) -> R
    where
        F: FnOnce(&str) -> R,
    {
        let lines = self.lines.borrow();
        let text = (line as usize)
            .checked_sub(1)
            .and_then(|index| lines.get(index))
            .map(String::as_str)
            .unwrap_or("");

        f(text)
    }
}

/// Una línea de entrada junto a su origen.
#[derive(Clone)]
pub struct SourceLine {
    from: Rc<Source>,
    number: u32,
    text: String,
}

impl SourceLine {
    /// Texto crudo completo de la línea.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Posición de la primera columna.
    pub fn start(&self) -> Position {
        Position {
            line: self.number,
            column: 1,
        }
    }

    /// Construye una ubicación dentro de esta línea.
    pub fn location(&self, position: Range<Position>) -> Location {
        Location {
            from: Rc::clone(&self.from),
            position,
        }
    }

    /// Separa el código del comentario en línea, si lo hay.
    ///
    /// El comentario es todo lo que sigue al primer `#`, sin incluirlo.
    pub fn split_comment(&self) -> (&str, Option<&str>) {
        match self.text.split_once(COMMENT) {
            Some((code, comment)) => (code, Some(comment)),
            None => (&self.text, None),
        }
    }
}

/// Transforma un flujo de entrada estándar en uno que itera por línea.
///
/// Cada línea emitida queda registrada en un mismo [`Source`] para
/// el reporte posterior de errores.
pub fn consume<R, S>(reader: R, name: S) -> impl Iterator<Item = io::Result<SourceLine>>
where
    R: BufRead,
    S: Into<String>,
{
    let source = Rc::new(Source {
        name: name.into(),
        lines: Default::default(),
    });

    reader.lines().enumerate().map(move |(index, line)| {
        let text = line?;
        source.lines.borrow_mut().push(text.clone());

        Ok(SourceLine {
            from: Rc::clone(&source),
            number: index as u32 + 1,
            text,
        })
    })
}
