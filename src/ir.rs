//! Representación intermedia: una operación por sentencia de salida.
//!
//! Cada línea de entrada produce una o más [`Statement`]. Las expresiones
//! ya se encuentran traducidas a texto del lenguaje objetivo, por lo cual
//! la emisión final solo ensambla fragmentos.

use crate::arrow::Arrow;

/// Marcador de comentario del lenguaje objetivo.
const COMMENT: &str = "//";

/// Una operación junto al comentario en línea que la acompañaba.
#[derive(Clone, Debug, PartialEq)]
pub struct Statement {
    pub op: Operation,
    pub comment: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Operation {
    Blank,
    Point(Point),
    Draw(Draw),
}

/// Declaración de un punto.
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    pub name: String,
    pub expr: String,
    pub dot: bool,

    /// Texto de la etiqueta, sin delimitadores de TeX.
    pub label: Option<String>,

    /// Expresión de dirección de la etiqueta.
    pub direction: String,
}

/// Trazo de un camino o figura.
#[derive(Clone, Debug, PartialEq)]
pub struct Draw {
    pub expr: String,
    pub fill: String,
    pub outline: String,
    pub clip: bool,
    pub arrow: Option<Arrow>,
}

impl Statement {
    /// Sentencia principal, con su comentario si lo hay.
    pub fn primary(&self) -> String {
        let text = self.op.primary();
        match &self.comment {
            None => text,
            Some(comment) if text.is_empty() => format!("{}{}", COMMENT, comment),
            Some(comment) => format!("{} {}{}", text, COMMENT, comment),
        }
    }

    /// Anotación diferida a la segunda pasada, si la hay.
    pub fn annotation(&self) -> Option<String> {
        match &self.op {
            Operation::Point(point) => point.annotation(),
            _ => None,
        }
    }
}

impl Operation {
    fn primary(&self) -> String {
        match self {
            Operation::Blank => String::new(),
            Operation::Point(point) => format!("pair {} = {};", point.name, point.expr),
            Operation::Draw(draw) => draw.statement(),
        }
    }
}

impl Point {
    fn annotation(&self) -> Option<String> {
        let Point {
            name,
            dot,
            label,
            direction,
            ..
        } = self;

        match (*dot, label.as_deref()) {
            (true, Some(label)) => Some(format!(
                "dot(\"${}$\", {}, {});",
                label, name, direction
            )),

            (false, Some(label)) => Some(format!(
                "label(\"${}$\", {}, {});",
                label, name, direction
            )),

            (true, None) => Some(format!("dot({});", name)),
            (false, None) => None,
        }
    }
}

impl Draw {
    fn statement(&self) -> String {
        let stroke = self.stroke();
        match self.fill.as_str() {
            "" => stroke,

            // filldraw() no acepta flechas ni recorta
            fill if self.clip || self.arrow.is_some() => {
                format!("fill({}, {}); {}", self.expr, fill, stroke)
            }

            fill => {
                let outline = match self.outline.as_str() {
                    "" => "defaultpen",
                    outline => outline,
                };

                format!("filldraw({}, {}, {});", self.expr, fill, outline)
            }
        }
    }

    fn stroke(&self) -> String {
        let mut args = vec![self.expr.clone()];
        if !self.outline.is_empty() {
            args.push(self.outline.clone());
        }

        if let Some(arrow) = self.arrow {
            args.push(arrow.to_string());
        }

        let function = if self.clip { "clipdraw" } else { "draw" };
        format!("{}({});", function, args.join(", "))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::arrow;

    fn point(dot: bool, label: Option<&str>) -> Statement {
        Statement {
            op: Operation::Point(Point {
                name: "A".to_owned(),
                expr: "(0,0)".to_owned(),
                dot,
                label: label.map(str::to_owned),
                direction: "dir(A)".to_owned(),
            }),
            comment: None,
        }
    }

    fn draw(fill: &str, outline: &str, clip: bool, arrow: Option<Arrow>) -> String {
        let statement = Statement {
            op: Operation::Draw(Draw {
                expr: "A--B".to_owned(),
                fill: fill.to_owned(),
                outline: outline.to_owned(),
                clip,
                arrow,
            }),
            comment: None,
        };

        assert_eq!(statement.annotation(), None);
        statement.primary()
    }

    #[test]
    fn point_binding() {
        assert_eq!(point(true, Some("A")).primary(), "pair A = (0,0);");
    }

    #[test]
    fn point_annotations() {
        assert_eq!(
            point(true, Some("A")).annotation().unwrap(),
            "dot(\"$A$\", A, dir(A));"
        );

        assert_eq!(
            point(false, Some("A'")).annotation().unwrap(),
            "label(\"$A'$\", A, dir(A));"
        );

        assert_eq!(point(true, None).annotation().unwrap(), "dot(A);");
        assert_eq!(point(false, None).annotation(), None);
    }

    #[test]
    fn draw_calls() {
        assert_eq!(draw("", "", false, None), "draw(A--B);");
        assert_eq!(draw("", "red", false, None), "draw(A--B, red);");
        assert_eq!(draw("", "red", true, None), "clipdraw(A--B, red);");
        assert_eq!(
            draw("", "", false, arrow::lookup("->")),
            "draw(A--B, EndArrow(DefaultHead));"
        );

        assert_eq!(
            draw("opacity(0.1)+lightblue", "", false, None),
            "filldraw(A--B, opacity(0.1)+lightblue, defaultpen);"
        );

        assert_eq!(
            draw("lightblue", "blue+linewidth(2)", false, None),
            "filldraw(A--B, lightblue, blue+linewidth(2));"
        );

        assert_eq!(
            draw("yellow", "red", true, None),
            "fill(A--B, yellow); clipdraw(A--B, red);"
        );

        assert_eq!(
            draw("yellow", "", false, arrow::lookup("->")),
            "fill(A--B, yellow); draw(A--B, EndArrow(DefaultHead));"
        );
    }

    #[test]
    fn comments() {
        let blank = Statement {
            op: Operation::Blank,
            comment: Some(" just a comment".to_owned()),
        };

        assert_eq!(blank.primary(), "// just a comment");
        assert_eq!(blank.annotation(), None);

        let mut commented = point(true, Some("A"));
        commented.comment = Some(" origin".to_owned());
        assert_eq!(commented.primary(), "pair A = (0,0); // origin");

        let empty = Statement {
            op: Operation::Blank,
            comment: None,
        };

        assert_eq!(empty.primary(), "");
    }
}
