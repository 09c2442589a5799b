use std::io::Write;
use std::thread::sleep;
use std::time::Duration;

use rppal::i2c::I2c;

use crate::platform::Platform;
use crate::sensors::mag::registry;

/// Bit d'auto-incrément de l'adresse registre du LIS2MDL, nécessaire pour les
/// accès multi-octets
const AUTO_INCREMENT: u8 = 0x80;

pub struct RaspberryPlatform {
    i2c: I2c,
}

impl RaspberryPlatform {
    /// Constructeur
    pub fn new(bus: u8) -> anyhow::Result<Self> {
        let i2c = I2c::with_bus(bus)?;

        Ok(Self { i2c })
    }
}

impl Platform for RaspberryPlatform {
    fn init(&mut self) -> anyhow::Result<()> {
        println!("[PLATFORM] Initialisation du bus I2C ...");
        self.i2c.set_slave_address(registry::LIS2MDL_MAG_ADDR)?;
        Ok(())
    }

    fn ecriture_registre(&mut self, reg: u8, data: &[u8]) -> anyhow::Result<()> {
        let reg = if data.len() > 1 { reg | AUTO_INCREMENT } else { reg };
        self.i2c.block_write(reg, data)?;
        Ok(())
    }

    fn lecture_registre(&mut self, reg: u8, buffer: &mut [u8]) -> anyhow::Result<()> {
        let reg = if buffer.len() > 1 { reg | AUTO_INCREMENT } else { reg };
        self.i2c.block_read(reg, buffer)?;
        Ok(())
    }

    fn transmettre(&mut self, data: &[u8]) -> anyhow::Result<()> {
        let mut sortie = std::io::stdout();
        sortie.write_all(data)?;
        sortie.flush()?;
        Ok(())
    }

    fn attendre(&mut self, ms: u64) {
        sleep(Duration::from_millis(ms));
    }
}
