/// Calculator constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CalculatorConfig {
    /// Display name given to the pre-existing `self` buff target.
    pub self_name: String,
    /// Shadow Lash DC used until the DC helper has been run once.
    pub fallback_lash_dc: i32,
    /// DC written onto stub ability cards until the DC helper has been run once.
    pub fallback_stub_dc: i32,
    /// Refuse stack increments that would overdraw the power pool.
    /// Off by default: spending is never validated unless asked for.
    pub enforce_spend_cap: bool,
}

impl CalculatorConfig {
    // ===== fixed input ranges =====
    pub const MAX_RAW_MIGHT: u8 = 20;
    pub const MAX_TIER: u8 = 9;
    pub const MAX_SHADOW_LEVEL: u8 = 10;
    pub const MAX_POWER_UNITS: u32 = 1000;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_SELF_NAME: &'static str = "Elren (Primary User)";
    pub const DEFAULT_LASH_DC: i32 = 15;
    pub const DEFAULT_STUB_DC: i32 = 17;

    pub fn new() -> Self {
        Self {
            self_name: Self::DEFAULT_SELF_NAME.to_string(),
            fallback_lash_dc: Self::DEFAULT_LASH_DC,
            fallback_stub_dc: Self::DEFAULT_STUB_DC,
            enforce_spend_cap: false,
        }
    }

    pub fn with_spend_cap(mut self, enforce: bool) -> Self {
        self.enforce_spend_cap = enforce;
        self
    }
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self::new()
    }
}
