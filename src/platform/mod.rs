#[cfg(feature = "fake-sensors")]
pub mod fake;

#[cfg(feature = "real-sensors")]
pub mod raspberry;

/// Adaptateur de plateforme : accès registre, canal de sortie, délai et
/// bring-up matériel. Une instance est choisie au démarrage puis partagée
/// entre les threads capteurs.
pub trait Platform {
    /// Initialisation matérielle unique (l'idempotence n'est pas garantie)
    fn init(&mut self) -> anyhow::Result<()>;

    /// Ecrit `data.len()` registres consécutifs à partir de `reg`
    fn ecriture_registre(&mut self, reg: u8, data: &[u8]) -> anyhow::Result<()>;

    /// Lis `buffer.len()` registres consécutifs à partir de `reg`
    fn lecture_registre(&mut self, reg: u8, buffer: &mut [u8]) -> anyhow::Result<()>;

    /// Envoi brut sur le canal de sortie, sans acquittement
    fn transmettre(&mut self, data: &[u8]) -> anyhow::Result<()>;

    /// Attente bloquante en millisecondes
    fn attendre(&mut self, ms: u64);
}
