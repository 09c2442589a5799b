#![allow(unused)]

// LIS2MDL (magnétomètre ST, 3 axes + température interne)
pub const LIS2MDL_MAG_ADDR: u16 = 0x1E;

pub const LIS2MDL_WHO_AM_I: u8 = 0x4F;
pub const LIS2MDL_ID: u8 = 0x40;

pub const LIS2MDL_OFFSET_X_REG_L: u8 = 0x45;
pub const LIS2MDL_OFFSET_X_REG_H: u8 = 0x46;
pub const LIS2MDL_OFFSET_Y_REG_L: u8 = 0x47;
pub const LIS2MDL_OFFSET_Y_REG_H: u8 = 0x48;
pub const LIS2MDL_OFFSET_Z_REG_L: u8 = 0x49;
pub const LIS2MDL_OFFSET_Z_REG_H: u8 = 0x4A;

pub const LIS2MDL_CFG_REG_A: u8 = 0x60;
pub const LIS2MDL_CFG_REG_B: u8 = 0x61;
pub const LIS2MDL_CFG_REG_C: u8 = 0x62;
pub const LIS2MDL_INT_CRTL_REG: u8 = 0x63;
pub const LIS2MDL_INT_SOURCE_REG: u8 = 0x64;
pub const LIS2MDL_INT_THS_L_REG: u8 = 0x65;
pub const LIS2MDL_INT_THS_H_REG: u8 = 0x66;
pub const LIS2MDL_STATUS_REG: u8 = 0x67;

pub const LIS2MDL_OUTX_L_REG: u8 = 0x68;
pub const LIS2MDL_OUTX_H_REG: u8 = 0x69;
pub const LIS2MDL_OUTY_L_REG: u8 = 0x6A;
pub const LIS2MDL_OUTY_H_REG: u8 = 0x6B;
pub const LIS2MDL_OUTZ_L_REG: u8 = 0x6C;
pub const LIS2MDL_OUTZ_H_REG: u8 = 0x6D;
pub const LIS2MDL_TEMP_OUT_L_REG: u8 = 0x6E;
pub const LIS2MDL_TEMP_OUT_H_REG: u8 = 0x6F;

// CFG_REG_A
pub const LIS2MDL_CFGA_MODE_BIT: u8 = 0;
pub const LIS2MDL_CFGA_MODE_SIZE: u8 = 2;
pub const LIS2MDL_CFGA_ODR_BIT: u8 = 2;
pub const LIS2MDL_CFGA_ODR_SIZE: u8 = 2;
pub const LIS2MDL_CFGA_LP_BIT: u8 = 4;
pub const LIS2MDL_CFGA_SOFT_RST_BIT: u8 = 5;
pub const LIS2MDL_CFGA_REBOOT_BIT: u8 = 6;
pub const LIS2MDL_CFGA_COMP_TEMP_EN_BIT: u8 = 7;

// CFG_REG_B
pub const LIS2MDL_CFGB_LPF_BIT: u8 = 0;
pub const LIS2MDL_CFGB_OFF_CANC_BIT: u8 = 1;
pub const LIS2MDL_CFGB_SET_RST_SIZE: u8 = 2;
pub const LIS2MDL_CFGB_OFF_CANC_ONE_SHOT_BIT: u8 = 4;

// CFG_REG_C
pub const LIS2MDL_CFGC_DRDY_ON_PIN_BIT: u8 = 0;
pub const LIS2MDL_CFGC_SELF_TEST_BIT: u8 = 1;
pub const LIS2MDL_CFGC_BLE_BIT: u8 = 3;
pub const LIS2MDL_CFGC_BDU_BIT: u8 = 4;
pub const LIS2MDL_CFGC_I2C_DIS_BIT: u8 = 5;

// STATUS_REG
pub const LIS2MDL_STATUS_XDA_BIT: u8 = 0;
pub const LIS2MDL_STATUS_YDA_BIT: u8 = 1;
pub const LIS2MDL_STATUS_ZDA_BIT: u8 = 2;
pub const LIS2MDL_STATUS_ZYXDA_BIT: u8 = 3;
pub const LIS2MDL_STATUS_ZYXOR_BIT: u8 = 7;

// Valeurs des champs de CFG_REG_A
pub const LIS2MDL_MODE_CONTINU: u8 = 0b00;
pub const LIS2MDL_MODE_SINGLE: u8 = 0b01;
pub const LIS2MDL_MODE_IDLE: u8 = 0b11;

pub const LIS2MDL_ODR_10HZ: u8 = 0b00;
pub const LIS2MDL_ODR_20HZ: u8 = 0b01;
pub const LIS2MDL_ODR_50HZ: u8 = 0b10;
pub const LIS2MDL_ODR_100HZ: u8 = 0b11;

// Valeurs du champ set/reset de CFG_REG_B
pub const LIS2MDL_SET_SENS_ODR_DIV_63: u8 = 0b00;
pub const LIS2MDL_SENS_OFF_CANC_EVERY_ODR: u8 = 0b01;
pub const LIS2MDL_SET_SENS_ONLY_AT_POWER_ON: u8 = 0b10;
