//! Configuración de una ejecución.

use bitflags::bitflags;

/// Tamaño de imagen por omisión en el preámbulo.
pub const DEFAULT_SIZE: &str = "8cm";

bitflags! {
    /// Opciones a aplicar durante la traducción.
    pub struct RunFlags: u32 {
        /// Emitir un preámbulo de Asymptote antes de las sentencias.
        const PREAMBLE = 0x01;

        /// Por omisión, etiquetar puntos sin marcarlos.
        const SOFT_LABEL = 0x02;

        /// Descartar opacidades de relleno.
        const NO_TRANSPARENCY = 0x04;
    }
}

/// Configuración explícita de una ejecución del traductor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub flags: RunFlags,

    /// Argumento de `size()` en el preámbulo.
    pub size: String,
}

impl Config {
    /// Construye una configuración con las opciones dadas.
    pub fn with_flags(flags: RunFlags) -> Self {
        Config {
            flags,
            ..Default::default()
        }
    }

    pub fn preamble(&self) -> bool {
        self.flags.contains(RunFlags::PREAMBLE)
    }

    pub fn soft_label(&self) -> bool {
        self.flags.contains(RunFlags::SOFT_LABEL)
    }

    pub fn transparency(&self) -> bool {
        !self.flags.contains(RunFlags::NO_TRANSPARENCY)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            flags: RunFlags::empty(),
            size: String::from(DEFAULT_SIZE),
        }
    }
}
