//! Reporte de errores con ubicación.
//!
//! Un [`Diagnostics`] agrupa errores de una misma clase. Cada uno se
//! muestra junto a la línea de entrada que lo produjo, con la región
//! señalada subrayada:
//!
//! ```text
//! Syntax error: Mismatched parentheses in expression
//!  --> figure.tsqx:2:7
//!   |
//! 2 | B = + (A C
//!   |       ^
//! ```

use crate::source::{Located, Location};
use std::{
    error::Error,
    fmt::{self, Display},
};

/// Un error ya formateado junto a su ubicación.
struct Diagnostic {
    message: String,
    location: Location,
}

pub struct Diagnostics {
    kind: &'static str,
    reported: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Cambia la clase que encabeza cada error.
    pub fn kind(self, kind: &'static str) -> Self {
        Diagnostics { kind, ..self }
    }

    /// Agrega un error al reporte.
    pub fn push<E: Error>(&mut self, error: Located<E>) {
        let (location, error) = error.split();
        self.reported.push(Diagnostic {
            message: error.to_string(),
            location,
        });
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Diagnostics {
            kind: "error",
            reported: Vec::new(),
        }
    }
}

impl<E: Error> From<Located<E>> for Diagnostics {
    fn from(error: Located<E>) -> Self {
        let mut diagnostics = Diagnostics::default();
        diagnostics.push(error);
        diagnostics
    }
}

impl Diagnostic {
    fn write(&self, kind: &str, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Diagnostic { message, location } = self;
        let (start, end) = (location.start(), location.end());

        writeln!(fmt, "{}: {}", kind, message)?;
        writeln!(fmt, " --> {}", location)?;

        let number = start.line().to_string();
        let gutter = " ".repeat(number.len());

        writeln!(fmt, "{} |", gutter)?;
        writeln!(fmt, "{} | {}", number, location.line_text())?;

        // Una ubicación vacía o de varias líneas subraya al menos una columna
        let from = start.column().max(1);
        let to = match end.line() == start.line() {
            true => end.column().max(from + 1),
            false => from + 1,
        };

        let skip = " ".repeat((from - 1) as usize);
        let carets = "^".repeat((to - from) as usize);
        writeln!(fmt, "{} | {}{}", gutter, skip, carets)
    }
}

impl Display for Diagnostics {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Diagnostics { kind, reported } = self;

        if reported.is_empty() {
            return writeln!(fmt, "No errors were reported");
        }

        for diagnostic in reported {
            diagnostic.write(kind, fmt)?;
            writeln!(fmt)?;
        }

        let error_or_errors = if reported.len() == 1 { "error" } else { "errors" };
        writeln!(
            fmt,
            "Translation failed with {} {}",
            reported.len(),
            error_or_errors
        )
    }
}
