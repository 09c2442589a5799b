use clap::Parser;

#[derive(Debug, Parser, Clone)]
pub struct Cli {
    /// Numéro du bus I2C où le capteur est branché
    #[arg(long, default_value_t = 1)]
    pub bus: u8,

    /// Fréquence d'échantillonnage en Hz (10, 20, 50 ou 100)
    #[arg(long, default_value_t = 10)]
    pub odr: u8,
}
