use nalgebra::Vector3;

use crate::config::Config;
use crate::platform::Platform;
use crate::registre::RegistreBit;
use crate::sensors::mag::registry;
use crate::sensors::mag::{format_champ_magnetique, format_temperature, Fault, MAGData};

/// Sensibilité du champ magnétique (datasheet LIS2MDL)
const SENSIBILITE_MAG_MG_PAR_LSB: f32 = 1.5;

/// Sensibilité et décalage du capteur de température interne
const SENSIBILITE_TEMP_LSB_PAR_DEGC: f32 = 8.0;
const DECALAGE_TEMP_DEGC: f32 = 25.0;

pub(crate) struct Lis2mdl {
    odr_hz: u8,
    hard_cal: Vector3<i16>,
    boot_delay_ms: u64,
    reset_essais_max: u32,
}

impl Lis2mdl {
    /// Constructeur
    pub(crate) fn new(config: &Config) -> Self {
        Self {
            odr_hz: config.odr_hz,
            hard_cal: config.hard_cal,
            boot_delay_ms: config.boot_delay_ms,
            reset_essais_max: config.reset_essais_max,
        }
    }

    /// Améne le capteur de l'état power-on à l'échantillonnage continu.
    /// L'ordre des étapes est imposé par le capteur : la configuration doit
    /// se faire hors du mode continu, le passage en continu vient en dernier.
    pub(crate) fn init_module(&self, p: &mut dyn Platform) -> anyhow::Result<()> {
        println!("[MAG] Initialisation ...");

        p.init()?;

        // Le capteur ne répond pas sur le bus pendant son temps de boot
        p.attendre(self.boot_delay_ms);

        // Vérification de l'identité avant de toucher aux registres
        let who = self.whoami(p)?;
        if who != registry::LIS2MDL_ID {
            return Err(Fault::DeviceNotFound { found: who }.into());
        }

        // Retour à la configuration par défaut
        self.reset(p)?;

        self.set_block_data_update(p, true)?;
        self.set_odr(p, self.odr_hz)?;
        self.set_offset_cancellation(p)?;
        self.set_temp_compensation(p, true)?;
        self.set_mode_continu(p)?;

        // Correction hard-iron, écrite une seule fois après la configuration
        self.set_offset_utilisateur(p, &self.hard_cal)?;

        // Vérification
        self.debug_get_info(p)?;

        println!("[MAG] Fin d'initialisation.");
        Ok(())
    }

    fn debug_get_info(&self, p: &mut dyn Platform) -> anyhow::Result<()> {
        let who = self.whoami(p)?;
        let odr = p.lecture_bits8(
            registry::LIS2MDL_CFG_REG_A,
            registry::LIS2MDL_CFGA_ODR_BIT,
            registry::LIS2MDL_CFGA_ODR_SIZE,
        )?;
        let mode = p.lecture_bits8(
            registry::LIS2MDL_CFG_REG_A,
            registry::LIS2MDL_CFGA_MODE_BIT,
            registry::LIS2MDL_CFGA_MODE_SIZE,
        )?;
        let bdu = p.lecture_bit8(registry::LIS2MDL_CFG_REG_C, registry::LIS2MDL_CFGC_BDU_BIT)?;

        println!("[MAG] Who i am: {:#04x}", who);
        println!("[MAG] ODR: {:#04x}", odr);
        println!("[MAG] Mode: {:#04x}", mode);
        println!("[MAG] BDU: {}", bdu);
        Ok(())
    }

    /// Qui suis-je ?
    fn whoami(&self, p: &mut dyn Platform) -> anyhow::Result<u8> {
        p.lecture_word(registry::LIS2MDL_WHO_AM_I)
    }

    /// Réinitialise le capteur puis attend la retombée du flag (borné)
    fn reset(&self, p: &mut dyn Platform) -> anyhow::Result<()> {
        p.ecriture_bit8(
            registry::LIS2MDL_CFG_REG_A,
            registry::LIS2MDL_CFGA_SOFT_RST_BIT,
            true,
        )?;

        for _ in 0..self.reset_essais_max {
            let en_cours = p.lecture_bit8(
                registry::LIS2MDL_CFG_REG_A,
                registry::LIS2MDL_CFGA_SOFT_RST_BIT,
            )?;

            if !en_cours {
                return Ok(());
            }

            p.attendre(1);
        }

        Err(Fault::ResetTimeout.into())
    }

    /// Verrouille les registres de sortie le temps d'une lecture complète
    fn set_block_data_update(&self, p: &mut dyn Platform, enable: bool) -> anyhow::Result<()> {
        p.ecriture_bit8(
            registry::LIS2MDL_CFG_REG_C,
            registry::LIS2MDL_CFGC_BDU_BIT,
            enable,
        )
    }

    /// Défini le sample rate de sortie du capteur
    fn set_odr(&self, p: &mut dyn Platform, odr_hz: u8) -> anyhow::Result<()> {
        let valeur = match odr_hz {
            10 => registry::LIS2MDL_ODR_10HZ,
            20 => registry::LIS2MDL_ODR_20HZ,
            50 => registry::LIS2MDL_ODR_50HZ,
            100 => registry::LIS2MDL_ODR_100HZ,
            _ => {
                println!("ODR invalide, retour à 10 Hz.");
                registry::LIS2MDL_ODR_10HZ
            }
        };

        p.ecriture_bits8(
            registry::LIS2MDL_CFG_REG_A,
            registry::LIS2MDL_CFGA_ODR_BIT,
            registry::LIS2MDL_CFGA_ODR_SIZE,
            valeur,
        )
    }

    /// Soustrait l'offset mémorisé à chaque cycle de conversion
    fn set_offset_cancellation(&self, p: &mut dyn Platform) -> anyhow::Result<()> {
        p.ecriture_bits8(
            registry::LIS2MDL_CFG_REG_B,
            registry::LIS2MDL_CFGB_OFF_CANC_BIT,
            registry::LIS2MDL_CFGB_SET_RST_SIZE,
            registry::LIS2MDL_SENS_OFF_CANC_EVERY_ODR,
        )
    }

    /// Compense la dérive en température de la mesure magnétique
    fn set_temp_compensation(&self, p: &mut dyn Platform, enable: bool) -> anyhow::Result<()> {
        p.ecriture_bit8(
            registry::LIS2MDL_CFG_REG_A,
            registry::LIS2MDL_CFGA_COMP_TEMP_EN_BIT,
            enable,
        )
    }

    /// Passe en conversion continue, dernière étape de la configuration
    fn set_mode_continu(&self, p: &mut dyn Platform) -> anyhow::Result<()> {
        p.ecriture_bits8(
            registry::LIS2MDL_CFG_REG_A,
            registry::LIS2MDL_CFGA_MODE_BIT,
            registry::LIS2MDL_CFGA_MODE_SIZE,
            registry::LIS2MDL_MODE_CONTINU,
        )
    }

    /// Ecrit les 6 octets d'offset hard-iron (X/Y/Z, little-endian)
    fn set_offset_utilisateur(
        &self,
        p: &mut dyn Platform,
        offsets: &Vector3<i16>,
    ) -> anyhow::Result<()> {
        let x = offsets.x.to_le_bytes();
        let y = offsets.y.to_le_bytes();
        let z = offsets.z.to_le_bytes();
        let tampon = [x[0], x[1], y[0], y[1], z[0], z[1]];

        p.ecriture_registre(registry::LIS2MDL_OFFSET_X_REG_L, &tampon)
    }

    /// Vérifie si une nouvelle mesure est disponible
    fn is_data_ready(&self, p: &mut dyn Platform) -> anyhow::Result<bool> {
        p.lecture_bit8(registry::LIS2MDL_STATUS_REG, registry::LIS2MDL_STATUS_ZYXDA_BIT)
    }

    /// Récupére les trois axes magnétiques (RAW)
    fn get_mag_raw(&self, p: &mut dyn Platform) -> anyhow::Result<Vector3<i16>> {
        let mut tampon = [0u8; 6];
        p.lecture_registre(registry::LIS2MDL_OUTX_L_REG, &mut tampon)?;

        let raw_x = i16::from_le_bytes([tampon[0], tampon[1]]);
        let raw_y = i16::from_le_bytes([tampon[2], tampon[3]]);
        let raw_z = i16::from_le_bytes([tampon[4], tampon[5]]);

        Ok(Vector3::new(raw_x, raw_y, raw_z))
    }

    /// Récupére la température interne (RAW)
    fn get_temp_raw(&self, p: &mut dyn Platform) -> anyhow::Result<i16> {
        let mut tampon = [0u8; 2];
        p.lecture_registre(registry::LIS2MDL_TEMP_OUT_L_REG, &mut tampon)?;

        Ok(i16::from_le_bytes([tampon[0], tampon[1]]))
    }

    /// Un cycle de polling : si une mesure est prête, lit, convertit et
    /// transmet le champ magnétique puis la température.
    pub(crate) fn poll_once(&self, p: &mut dyn Platform) -> anyhow::Result<Option<MAGData>> {
        if !self.is_data_ready(p)? {
            return Ok(None);
        }

        let raw = self.get_mag_raw(p)?;
        let champ_mg = (
            from_lsb_to_mgauss(raw.x),
            from_lsb_to_mgauss(raw.y),
            from_lsb_to_mgauss(raw.z),
        );
        p.transmettre(format_champ_magnetique(champ_mg).as_bytes())?;

        let raw_temp = self.get_temp_raw(p)?;
        let temperature_degc = from_lsb_to_celsius(raw_temp);
        p.transmettre(format_temperature(temperature_degc).as_bytes())?;

        Ok(Some(MAGData {
            raw: (raw.x, raw.y, raw.z),
            champ_mg,
            temperature_degc,
        }))
    }
}

/// Conversion LSB vers milligauss
pub(crate) fn from_lsb_to_mgauss(lsb: i16) -> f32 {
    lsb as f32 * SENSIBILITE_MAG_MG_PAR_LSB
}

/// Conversion LSB vers degrés Celsius
pub(crate) fn from_lsb_to_celsius(lsb: i16) -> f32 {
    (lsb as f32 / SENSIBILITE_TEMP_LSB_PAR_DEGC) + DECALAGE_TEMP_DEGC
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::mag::mock::{Appel, MockPlatform};

    fn lis2mdl() -> Lis2mdl {
        Lis2mdl::new(&Config::new())
    }

    /// Place une mesure dans les registres de sortie du mock
    fn depose_mesure(p: &mut MockPlatform, x: i16, y: i16, z: i16, temp: i16) {
        let debut = registry::LIS2MDL_OUTX_L_REG as usize;
        let octets: Vec<u8> = [x, y, z, temp]
            .iter()
            .flat_map(|valeur| valeur.to_le_bytes())
            .collect();
        p.registres[debut..debut + 8].copy_from_slice(&octets);
        p.registres[registry::LIS2MDL_STATUS_REG as usize] |=
            1 << registry::LIS2MDL_STATUS_ZYXDA_BIT;
    }

    #[test]
    fn identite_valide_poursuit_la_sequence() {
        let mut p = MockPlatform::new();

        lis2mdl().init_module(&mut p).unwrap();

        // Le reset a bien été déclenché juste après le contrôle d'identité
        assert_eq!(p.ecritures().first(), Some(&registry::LIS2MDL_CFG_REG_A));
    }

    #[test]
    fn identite_invalide_ne_reset_jamais() {
        let mut p = MockPlatform::new();
        p.registres[registry::LIS2MDL_WHO_AM_I as usize] = 0x3B;

        let err = lis2mdl().init_module(&mut p).unwrap_err();

        assert_eq!(
            err.downcast_ref::<Fault>(),
            Some(&Fault::DeviceNotFound { found: 0x3B })
        );
        assert!(p.ecritures().is_empty());
    }

    #[test]
    fn reset_qui_ne_retombe_pas_finit_en_timeout() {
        let mut p = MockPlatform::new();
        p.reset_colle = true;

        let err = lis2mdl().init_module(&mut p).unwrap_err();

        assert_eq!(err.downcast_ref::<Fault>(), Some(&Fault::ResetTimeout));
    }

    #[test]
    fn ordre_de_configuration() {
        let mut p = MockPlatform::new();

        lis2mdl().init_module(&mut p).unwrap();

        // Reset, puis BDU, ODR, offset cancellation, compensation en
        // température, mode continu et enfin les offsets, rien d'autre
        assert_eq!(
            p.ecritures(),
            vec![
                registry::LIS2MDL_CFG_REG_A,
                registry::LIS2MDL_CFG_REG_C,
                registry::LIS2MDL_CFG_REG_A,
                registry::LIS2MDL_CFG_REG_B,
                registry::LIS2MDL_CFG_REG_A,
                registry::LIS2MDL_CFG_REG_A,
                registry::LIS2MDL_OFFSET_X_REG_L,
            ]
        );
    }

    #[test]
    fn offsets_ecrits_une_fois_en_little_endian() {
        let mut p = MockPlatform::new();

        lis2mdl().init_module(&mut p).unwrap();

        let offsets: Vec<&Appel> = p
            .journal
            .iter()
            .filter(|a| matches!(a, Appel::Ecriture(reg, _) if *reg == registry::LIS2MDL_OFFSET_X_REG_L))
            .collect();

        // Une seule écriture, valeurs du Config par défaut (-2816/-2048/-3072)
        assert_eq!(
            offsets,
            vec![&Appel::Ecriture(
                registry::LIS2MDL_OFFSET_X_REG_L,
                vec![0x00, 0xF5, 0x00, 0xF8, 0x00, 0xF4]
            )]
        );
    }

    #[test]
    fn conversion_en_milligauss() {
        assert_eq!(from_lsb_to_mgauss(0), 0.0);
        assert_eq!(from_lsb_to_mgauss(100), 150.0);
        assert_eq!(from_lsb_to_mgauss(-100), -150.0);
    }

    #[test]
    fn conversion_en_celsius() {
        assert_eq!(from_lsb_to_celsius(0), 25.0);
        assert_eq!(from_lsb_to_celsius(200), 50.0);
        assert_eq!(from_lsb_to_celsius(-80), 15.0);
    }

    #[test]
    fn pas_de_lecture_ni_de_transmission_sans_mesure_prete() {
        let mut p = MockPlatform::new();

        let mesure = lis2mdl().poll_once(&mut p).unwrap();

        assert!(mesure.is_none());
        assert!(p.transmissions().is_empty());
        assert!(!p
            .journal
            .contains(&Appel::Lecture(registry::LIS2MDL_OUTX_L_REG, 6)));
        assert!(!p
            .journal
            .contains(&Appel::Lecture(registry::LIS2MDL_TEMP_OUT_L_REG, 2)));
    }

    #[test]
    fn cycle_complet_quand_une_mesure_est_prete() {
        let mut p = MockPlatform::new();
        depose_mesure(&mut p, 100, 0, -100, 200);

        let mesure = lis2mdl().poll_once(&mut p).unwrap().unwrap();

        assert_eq!(mesure.raw, (100, 0, -100));
        assert_eq!(mesure.champ_mg, (150.0, 0.0, -150.0));
        assert_eq!(mesure.temperature_degc, 50.0);

        // Exactement une lecture magnétique (6 octets) et une lecture de
        // température (2 octets), chacune suivie de sa transmission
        let attendu = vec![
            Appel::Lecture(registry::LIS2MDL_STATUS_REG, 1),
            Appel::Lecture(registry::LIS2MDL_OUTX_L_REG, 6),
            Appel::Transmission("Magnetic field [mG]:150.00\t0.00\t-150.00\r\n".to_string()),
            Appel::Lecture(registry::LIS2MDL_TEMP_OUT_L_REG, 2),
            Appel::Transmission("Temperature [degC]: 50.00\r\n".to_string()),
        ];
        assert_eq!(p.journal, attendu);
    }
}
