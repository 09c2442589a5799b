use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone)]
pub struct Config {
    pub(crate) odr_hz: u8,
    pub(crate) hard_cal: Vector3<i16>,
    pub(crate) boot_delay_ms: u64,
    pub(crate) reset_essais_max: u32,
}

impl Config {
    pub fn new() -> Self {
        // NOTE : Les offsets hard-iron viennent d'un processus d'estimation
        // externe, voir : https://github.com/nliaudat/magnetometer_calibration/
        let config = Config {
            odr_hz: 10,
            hard_cal: Vector3::new(-2816, -2048, -3072),
            boot_delay_ms: 20,
            reset_essais_max: 100,
        };

        config
    }
}
