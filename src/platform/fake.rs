use std::io::Write;
use std::thread::sleep;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::platform::Platform;
use crate::sensors::mag::registry;

/// Plateforme simulée : un fichier de registres LIS2MDL alimenté par des
/// mesures aléatoires, pour travailler sans le matériel.
pub struct FakePlatform {
    registres: [u8; 256],
    rng: StdRng,
}

impl FakePlatform {
    /// Constructeur
    pub fn new() -> Self {
        let mut registres = [0u8; 256];
        registres[registry::LIS2MDL_WHO_AM_I as usize] = registry::LIS2MDL_ID;

        Self {
            registres,
            rng: StdRng::from_entropy(),
        }
    }

    /// Dépose une nouvelle mesure dans les registres de sortie
    fn nouvelle_mesure(&mut self) {
        for reg in registry::LIS2MDL_OUTX_L_REG..=registry::LIS2MDL_TEMP_OUT_H_REG {
            self.registres[reg as usize] = self.rng.gen();
        }

        self.registres[registry::LIS2MDL_STATUS_REG as usize] |=
            1 << registry::LIS2MDL_STATUS_ZYXDA_BIT;
    }
}

impl Platform for FakePlatform {
    fn init(&mut self) -> anyhow::Result<()> {
        println!("[PLATFORM] Initialisation [FAKE] ...");
        Ok(())
    }

    fn ecriture_registre(&mut self, reg: u8, data: &[u8]) -> anyhow::Result<()> {
        for (i, octet) in data.iter().enumerate() {
            self.registres[reg as usize + i] = *octet;
        }

        // Le reset logiciel d'un capteur simulé est immédiat
        if reg == registry::LIS2MDL_CFG_REG_A {
            self.registres[reg as usize] &= !(1 << registry::LIS2MDL_CFGA_SOFT_RST_BIT);
        }

        Ok(())
    }

    fn lecture_registre(&mut self, reg: u8, buffer: &mut [u8]) -> anyhow::Result<()> {
        if reg == registry::LIS2MDL_STATUS_REG {
            self.nouvelle_mesure();
        }

        for (i, octet) in buffer.iter_mut().enumerate() {
            *octet = self.registres[reg as usize + i];
        }

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
