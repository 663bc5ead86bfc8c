//! TA-Lib moving average type codes
//!
//! TA-Lib selects its moving average kind with a small integer. Whether a
//! TA-Lib backend is present is injected by the caller as a
//! [`TalibCapability`]; without one every name maps to SMA.

use serde::{Deserialize, Serialize};

/// Reports whether a TA-Lib backend can be used.
pub trait TalibCapability {
    fn is_available(&self) -> bool;
}

/// A capability with a fixed answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticTalib(pub bool);

impl TalibCapability for StaticTalib {
    fn is_available(&self) -> bool {
        self.0
    }
}

/// TA-Lib `MA_Type` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(i32)]
pub enum MaType {
    Sma = 0,
    Ema = 1,
    Wma = 2,
    Dema = 3,
    Tema = 4,
    Trima = 5,
    Kama = 6,
    Mama = 7,
    T3 = 8,
}

impl MaType {
    /// Case-insensitive lookup by short name.
    pub fn from_name(name: &str) -> Option<Self> {
        let ma = match name.to_ascii_lowercase().as_str() {
            "sma" => MaType::Sma,
            "ema" => MaType::Ema,
            "wma" => MaType::Wma,
            "dema" => MaType::Dema,
            "tema" => MaType::Tema,
            "trima" => MaType::Trima,
            "kama" => MaType::Kama,
            "mama" => MaType::Mama,
            "t3" => MaType::T3,
            _ => return None,
        };
        Some(ma)
    }

    pub fn code(self) -> i32 {
        self as i32
    }
}

/// TA-Lib code for a moving average name, or 0 (SMA) when no backend is
/// available, the name is a single character, or it is not recognized.
///
/// # Example
/// ```
/// use ta_utils::{tal_ma, StaticTalib};
/// assert_eq!(tal_ma("EMA", Some(&StaticTalib(true))), 1);
/// assert_eq!(tal_ma("ema", None), 0);
/// ```
pub fn tal_ma(name: &str, talib: Option<&dyn TalibCapability>) -> i32 {
    match talib {
        Some(backend) if backend.is_available() && name.chars().count() > 1 => {
            MaType::from_name(name).map_or(0, MaType::code)
        }
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AVAILABLE: StaticTalib = StaticTalib(true);

    #[test]
    fn test_all_codes() {
        let names = ["sma", "ema", "wma", "dema", "tema", "trima", "kama", "mama", "t3"];
        for (code, name) in names.iter().enumerate() {
            assert_eq!(tal_ma(name, Some(&AVAILABLE)), code as i32);
        }
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(tal_ma("TEMA", Some(&AVAILABLE)), 4);
        assert_eq!(tal_ma("T3", Some(&AVAILABLE)), 8);
    }

    #[test]
    fn test_defaults_to_sma() {
        assert_eq!(tal_ma("hma", Some(&AVAILABLE)), 0);
        assert_eq!(tal_ma("e", Some(&AVAILABLE)), 0);
        assert_eq!(tal_ma("", Some(&AVAILABLE)), 0);
        assert_eq!(tal_ma("kama", Some(&StaticTalib(false))), 0);
        assert_eq!(tal_ma("kama", None), 0);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(MaType::from_name("Trima"), Some(MaType::Trima));
        assert_eq!(MaType::from_name("zlma"), None);
        assert_eq!(MaType::Mama.code(), 7);
    }
}
