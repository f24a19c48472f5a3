//! Emisión de código.
//!
//! La salida se compone de un encabezado, una primera pasada con la
//! sentencia principal de cada operación y, tras una línea en blanco,
//! una segunda pasada con las anotaciones (`dot()`, `label()`) de cada
//! punto. Las anotaciones deben seguir a todas las declaraciones, por
//! lo cual el orden de declaración no coincide con el de anotación.

use std::io::{self, BufRead, Write};
use thiserror::Error;

use crate::{
    alias::Aliases,
    config::Config,
    ir::Statement,
    line::{LineError, LineParser},
    source::{self, Located},
};

/// Error de una ejecución completa.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("I/O error")]
    Io(#[from] io::Error),

    #[error("Syntax error")]
    Syntax(Located<LineError>),
}

impl From<Located<LineError>> for TranslateError {
    fn from(error: Located<LineError>) -> Self {
        TranslateError::Syntax(error)
    }
}

/// Emite el encabezado y, si se solicitó, el preámbulo.
pub fn emit_header<W: Write + ?Sized>(config: &Config, output: &mut W) -> io::Result<()> {
    writeln!(output, "import geometry;")?;

    if config.preamble() {
        writeln!(output, "import olympiad;")?;
        writeln!(output, "import cse5;")?;
        writeln!(output, "size({});", config.size)?;
        writeln!(output, "defaultpen(fontsize(9pt));")?;
        writeln!(output, "settings.outformat=\"pdf\";")?;
    }

    Ok(())
}

/// Emite ambas pasadas sobre una secuencia completa de sentencias.
pub fn emit<W: Write + ?Sized>(statements: &[Statement], output: &mut W) -> io::Result<()> {
    for statement in statements {
        writeln!(output, "{}", statement.primary())?;
    }

    writeln!(output)?;

    for annotation in statements.iter().filter_map(Statement::annotation) {
        writeln!(output, "{}", annotation)?;
    }

    Ok(())
}

/// Analiza todas las líneas de una entrada, en orden.
///
/// El primer error aborta el análisis completo.
pub fn parse_all<R: BufRead>(
    reader: R,
    name: &str,
    config: &Config,
    aliases: &Aliases,
) -> Result<Vec<Statement>, TranslateError> {
    let parser = LineParser::new(config, aliases);

    let mut statements = Vec::new();
    for line in source::consume(reader, name) {
        statements.extend(parser.parse(&line?)?);
    }

    Ok(statements)
}

/// Traduce una entrada completa.
///
/// El encabezado se escribe antes de leer la entrada. Si alguna línea
/// falla no se emite ninguna sentencia.
pub fn translate<R, W>(
    reader: R,
    name: &str,
    config: &Config,
    aliases: &Aliases,
    output: &mut W,
) -> Result<(), TranslateError>
where
    R: BufRead,
    W: Write + ?Sized,
{
    emit_header(config, output)?;

    let statements = parse_all(reader, name, config, aliases)?;
    emit(&statements, output)?;

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::RunFlags;

    fn run(input: &str, config: &Config) -> (Result<(), TranslateError>, String) {
        let mut output = Vec::new();
        let result = translate(
            input.as_bytes(),
            "<test>",
            config,
            &Aliases::default(),
            &mut output,
        );

        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn two_passes() {
        let input = "A = 0,0\nB = dir 30\n\nA--B\n";
        let (result, output) = run(input, &Config::default());
        result.unwrap();

        assert_eq!(
            output,
            "import geometry;\n\
             pair A = (0,0);\n\
             pair B = dir(30);\n\
             \n\
             draw(A--B);\n\
             \n\
             dot(\"$A$\", A, dir(A));\n\
             dot(\"$B$\", B, dir(B));\n"
        );
    }

    #[test]
    fn annotations_only_for_marked_points() {
        let input = "A : = 0,0\nB . = 1,0\nC ; = 0,1\nA--B--C--cycle\n# note";
        let statements = parse_all(input.as_bytes(), "<test>", &Config::default(), &Aliases::default())
            .unwrap();

        let annotations: Vec<_> = statements.iter().filter_map(Statement::annotation).collect();
        assert_eq!(annotations, vec!["dot(B);", "label(\"$C$\", C, dir(C));"]);
    }

    #[test]
    fn preamble() {
        let mut config = Config::with_flags(RunFlags::PREAMBLE);
        config.size = String::from("5cm");

        let (result, output) = run("", &config);
        result.unwrap();

        assert_eq!(
            output,
            "import geometry;\n\
             import olympiad;\n\
             import cse5;\n\
             size(5cm);\n\
             defaultpen(fontsize(9pt));\n\
             settings.outformat=\"pdf\";\n\
             \n"
        );
    }

    #[test]
    fn failures_discard_everything_but_the_header() {
        let (result, output) = run("A = 0,0\nB = + (A\n", &Config::default());
        assert!(matches!(result, Err(TranslateError::Syntax(_))));
        assert_eq!(output, "import geometry;\n");
    }
}
