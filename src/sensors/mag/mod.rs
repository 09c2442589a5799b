use std::fmt;

use serde::{Deserialize, Serialize};

pub mod lis2mdl;
pub mod reader;
pub(crate) mod registry;

#[cfg(test)]
pub(crate) mod mock;

/// Structure de données issus du capteur magnétique 3 axes
#[derive(Serialize, Deserialize, Clone, Debug, Copy)]
pub struct MAGData {
    pub raw: (i16, i16, i16),
    pub champ_mg: (f32, f32, f32),
    pub temperature_degc: f32,
}

impl fmt::Display for MAGData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Champ [mG]: ({}, {}, {}) Temp: {}°C",
            self.champ_mg.0, self.champ_mg.1, self.champ_mg.2, self.temperature_degc
        )
    }
}

/// Pannes remontées par la séquence de bring-up du capteur.
/// L'hôte décide de la suite (nouvel essai, alerte, abandon).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Le registre d'identité ne correspond pas au LIS2MDL
    DeviceNotFound { found: u8 },
    /// Le reset logiciel ne retombe jamais
    ResetTimeout,
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fault::DeviceNotFound { found } => {
                write!(f, "capteur introuvable (WHO_AM_I: {:#04x})", found)
            }
            Fault::ResetTimeout => write!(f, "le reset du capteur ne se termine pas"),
        }
    }
}

impl std::error::Error for Fault {}

/// Formate la ligne du champ magnétique pour le canal de sortie
pub fn format_champ_magnetique(champ_mg: (f32, f32, f32)) -> String {
    format!(
        "Magnetic field [mG]:{:4.2}\t{:4.2}\t{:4.2}\r\n",
        champ_mg.0, champ_mg.1, champ_mg.2
    )
}

/// Formate la ligne de température pour le canal de sortie
pub fn format_temperature(temperature_degc: f32) -> String {
    format!("Temperature [degC]:{:6.2}\r\n", temperature_degc)
}
