//! Traductor de TSQX a Asymptote.
//!
//! TSQX es una notación compacta, orientada a líneas, para describir
//! figuras de geometría euclidiana. Cada línea de entrada se traduce a
//! una o más sentencias del módulo `geometry` de Asymptote.
//!
//! # Fases
//! Cada línea se obtiene desde [`source`] y se somete a análisis léxico
//! en [`lex`]. La línea se clasifica en [`line`], donde sus opciones se
//! interpretan en [`options`] y sus expresiones prefijas se reducen y
//! traducen a notación infija en [`parse`], resolviendo alias de
//! funciones mediante [`alias`]. El resultado son sentencias de la
//! representación intermedia descrita en [`ir`].
//!
//! # Emisión
//! [`codegen`] escribe todas las declaraciones y trazos en una primera
//! pasada, seguidas por las anotaciones de puntos en una segunda. Los
//! errores se reportan con ubicación por medio de [`error`].

pub mod alias;
pub mod arrow;
pub mod codegen;
pub mod config;
pub mod error;
pub mod ir;
pub mod lex;
pub mod line;
pub mod options;
pub mod parse;
pub mod source;
