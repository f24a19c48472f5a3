//! Tabla de flechas.
//!
//! Una opción de flecha se compone de una forma (`->`, `<-`, `<->`,
//! `->-`, ...), un estilo de punta opcional (`d`, `s`, `h`, `t`) y una
//! marca opcional de arco (`a`). La tabla completa es el producto
//! cartesiano de las tres y se construye una única vez.

use lazy_static::lazy_static;
use std::{
    collections::HashMap,
    fmt::{self, Display},
};

/// Formas, con sus constructores para trazos rectos y para arcos.
const SHAPES: &[(&str, &str, &str)] = &[
    ("->", "EndArrow", "EndArcArrow"),
    ("-->", "EndArrow", "EndArcArrow"),
    ("<-", "BeginArrow", "BeginArcArrow"),
    ("<--", "BeginArrow", "BeginArcArrow"),
    ("<->", "Arrows", "ArcArrows"),
    ("->-", "MidArrow", "MidArcArrow"),
];

/// Estilos de punta.
const HEADS: &[(&str, &str)] = &[
    ("", "DefaultHead"),
    ("d", "DefaultHead"),
    ("s", "SimpleHead"),
    ("h", "HookHead"),
    ("t", "TeXHead"),
];

/// Sufijo de arco.
const ARC: &str = "a";

lazy_static! {
    static ref ARROWS: HashMap<String, Arrow> = build();
}

/// Par de constructores que describe una flecha en el lenguaje objetivo.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Arrow {
    /// Constructor de `arrowbar`, como `EndArrow`.
    pub bar: &'static str,

    /// Constructor de punta, como `TeXHead`.
    pub head: &'static str,
}

impl Display for Arrow {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "{}({})", self.bar, self.head)
    }
}

/// Busca una opción de flecha.
pub fn lookup(token: &str) -> Option<Arrow> {
    ARROWS.get(token).copied()
}

fn build() -> HashMap<String, Arrow> {
    let mut arrows = HashMap::new();

    for &(shape, straight, arc_bar) in SHAPES {
        for &(head_key, head) in HEADS {
            arrows.insert(
                format!("{}{}", shape, head_key),
                Arrow {
                    bar: straight,
                    head,
                },
            );

            let arc = Arrow { bar: arc_bar, head };
            arrows.insert(format!("{}{}{}", shape, head_key, ARC), arc);

            // Con punta explícita, el arco puede ir antes o después
            if !head_key.is_empty() {
                arrows.insert(format!("{}{}{}", shape, ARC, head_key), arc);
            }
        }
    }

    arrows
}
