use crate::platform::Platform;
use crate::sensors::mag::registry;

/// Ce que la plateforme a vu passer
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Appel {
    Init,
    Ecriture(u8, Vec<u8>),
    Lecture(u8, usize),
    Transmission(String),
    Attente(u64),
}

/// Plateforme d'enregistrement pour les tests : un fichier de registres
/// LIS2MDL et le journal de tous les appels de l'adaptateur.
pub(crate) struct MockPlatform {
    pub registres: [u8; 256],
    pub journal: Vec<Appel>,
    /// Simule un capteur dont le reset logiciel ne retombe jamais
    pub reset_colle: bool,
}

impl MockPlatform {
    pub fn new() -> Self {
        let mut registres = [0u8; 256];
        registres[registry::LIS2MDL_WHO_AM_I as usize] = registry::LIS2MDL_ID;

        Self {
            registres,
            journal: Vec::new(),
            reset_colle: false,
        }
    }

    /// Registres cibles des écritures, dans l'ordre
    pub fn ecritures(&self) -> Vec<u8> {
        self.journal
            .iter()
            .filter_map(|appel| match appel {
                Appel::Ecriture(reg, _) => Some(*reg),
                _ => None,
            })
            .collect()
    }

    /// Lignes envoyées sur le canal de sortie, dans l'ordre
    pub fn transmissions(&self) -> Vec<String> {
        self.journal
            .iter()
            .filter_map(|appel| match appel {
                Appel::Transmission(ligne) => Some(ligne.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Platform for MockPlatform {
    fn init(&mut self) -> anyhow::Result<()> {
        self.journal.push(Appel::Init);
        Ok(())
    }

    fn ecriture_registre(&mut self, reg: u8, data: &[u8]) -> anyhow::Result<()> {
        self.journal.push(Appel::Ecriture(reg, data.to_vec()));

        for (i, octet) in data.iter().enumerate() {
            self.registres[reg as usize + i] = *octet;
        }

        // Le reset logiciel retombe immédiatement, sauf panne simulée
        if reg == registry::LIS2MDL_CFG_REG_A && !self.reset_colle {
            self.registres[reg as usize] &= !(1 << registry::LIS2MDL_CFGA_SOFT_RST_BIT);
        }

        Ok(())
    }

    fn lecture_registre(&mut self, reg: u8, buffer: &mut [u8]) -> anyhow::Result<()> {
        self.journal.push(Appel::Lecture(reg, buffer.len()));

        for (i, octet) in buffer.iter_mut().enumerate() {
            *octet = self.registres[reg as usize + i];
        }

        Ok(())
    }

    fn transmettre(&mut self, data: &[u8]) -> anyhow::Result<()> {
        self.journal
            .push(Appel::Transmission(String::from_utf8(data.to_vec())?));
        Ok(())
    }

    fn attendre(&mut self, ms: u64) {
        self.journal.push(Appel::Attente(ms));
    }
}
