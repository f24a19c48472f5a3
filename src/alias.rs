//! Registro de alias y transformaciones.
//!
//! Algunos identificadores no se traducen como llamadas ordinarias.
//! Las transformaciones geométricas (ver [`TRANSFORMS`]) se aplican
//! multiplicativamente sobre su último argumento, mientras que los
//! alias registrados en [`Aliases`] delegan su traducción completa a
//! una regla arbitraria. Esto permite introducir identidades geométricas
//! nuevas sin tocar la gramática.

use std::collections::HashMap;
use thiserror::Error;

/// Identificadores reservados que se traducen como `t(..) * x`.
pub const TRANSFORMS: &[&str] = &[
    "identity",
    "shift",
    "xscale",
    "yscale",
    "scale",
    "slant",
    "rotate",
    "reflect",
    "zeroTransform",
    "inversion",
];

/// Determina si un identificador es una transformación reservada.
pub fn is_transform(name: &str) -> bool {
    TRANSFORMS.contains(&name)
}

/// Regla de traducción de un alias.
///
/// Recibe los argumentos ya traducidos. Retorna `None` si no acepta
/// esa cantidad de argumentos, en cuyo caso se emite una llamada
/// ordinaria.
pub type Rule = Box<dyn Fn(&[String]) -> Option<String>>;

/// Se intentó registrar un alias con nombre de transformación.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("`{0}` is a reserved transform and cannot be aliased")]
pub struct ReservedAlias(pub String);

/// Tabla de alias, inyectable en el traductor.
pub struct Aliases {
    rules: HashMap<String, Rule>,
}

impl Aliases {
    /// Una tabla sin alias.
    pub fn empty() -> Self {
        Aliases {
            rules: HashMap::new(),
        }
    }

    /// Registra un alias, reemplazando cualquier regla anterior.
    pub fn insert<S, F>(&mut self, name: S, rule: F) -> Result<(), ReservedAlias>
    where
        S: Into<String>,
        F: 'static + Fn(&[String]) -> Option<String>,
    {
        let name = name.into();
        if is_transform(&name) {
            return Err(ReservedAlias(name));
        }

        self.rules.insert(name, Box::new(rule));
        Ok(())
    }

    /// Determina si existe un alias con este nombre.
    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Aplica el alias `name`, si existe y acepta estos argumentos.
    pub fn apply(&self, name: &str, args: &[String]) -> Option<String> {
        self.rules.get(name).and_then(|rule| rule(args))
    }
}

impl Default for Aliases {
    /// Alias estándar sobre `geometry.asy`.
    fn default() -> Self {
        const STANDARD: &[(&str, fn(&[String]) -> Option<String>)] = &[
            ("excenter", excenter),
            ("excircle", excircle),
            ("orthocenter", orthocenter),
            ("IP", intersection),
            ("OP", other_intersection),
            ("foot", foot),
            ("centroid", centroid),
            ("dist", dist),
            ("varg", varg),
            ("CP", circle_through),
            ("CR", circle_radius),
            ("VA", vertex_a),
            ("VB", vertex_b),
            ("VC", vertex_c),
            ("rightangle", right_angle),
        ];

        let rules = STANDARD
            .iter()
            .map(|&(name, rule)| (name.to_owned(), Box::new(rule) as Rule))
            .collect();

        Aliases { rules }
    }
}

// `excenter()` de geometry.asy es tangente a AB, este es tangente a BC
fn excenter(args: &[String]) -> Option<String> {
    match args {
        [a, b, c] => Some(format!("excenter({}, {}, {})", b, c, a)),
        _ => None,
    }
}

fn excircle(args: &[String]) -> Option<String> {
    match args {
        [a, b, c] => Some(format!("excircle({}, {}, {})", b, c, a)),
        _ => None,
    }
}

fn orthocenter(args: &[String]) -> Option<String> {
    match args {
        [a, b, c] => Some(format!("orthocentercenter({}, {}, {})", a, b, c)),
        _ => None,
    }
}

fn intersection(args: &[String]) -> Option<String> {
    match args {
        [p, q] => Some(format!("intersectionpoints({}, {})[0]", p, q)),
        [p, q, n] => Some(format!("intersectionpoints({}, {})[{}]", p, q, n)),
        _ => None,
    }
}

fn other_intersection(args: &[String]) -> Option<String> {
    match args {
        [p, q] => Some(format!("intersectionpoints({}, {})[1]", p, q)),
        _ => None,
    }
}

fn foot(args: &[String]) -> Option<String> {
    match args {
        [p, a, b] => Some(format!("foot(triangle({}, {}, {}).VC)", a, b, p)),
        _ => None,
    }
}

fn centroid(args: &[String]) -> Option<String> {
    match args {
        [] => None,
        points => Some(format!("(({}) / {})", points.join(" + "), points.len())),
    }
}

fn dist(args: &[String]) -> Option<String> {
    match args {
        [a, b] => Some(format!("abs({} - {})", a, b)),
        _ => None,
    }
}

fn varg(args: &[String]) -> Option<String> {
    match args {
        [a, b] => Some(format!("unit({} - {})", a, b)),
        _ => None,
    }
}

fn circle_through(args: &[String]) -> Option<String> {
    match args {
        [o, p] => Some(format!("circle({0}, abs({0} - {1}))", o, p)),
        _ => None,
    }
}

fn circle_radius(args: &[String]) -> Option<String> {
    match args {
        [o, r] => Some(format!("circle({}, {})", o, r)),
        _ => None,
    }
}

// Vértices de un `triangle` de geometry.asy
fn vertex(args: &[String], field: &str) -> Option<String> {
    match args {
        [triangle] => Some(format!("{}.{}", triangle, field)),
        _ => None,
    }
}

fn vertex_a(args: &[String]) -> Option<String> {
    vertex(args, "VA")
}

fn vertex_b(args: &[String]) -> Option<String> {
    vertex(args, "VB")
}

fn vertex_c(args: &[String]) -> Option<String> {
    vertex(args, "VC")
}

fn right_angle(args: &[String]) -> Option<String> {
    match args {
        [a, b, c] => Some(format!("rightanglemark({}, {}, {})", a, b, c)),
        _ => None,
    }
}
